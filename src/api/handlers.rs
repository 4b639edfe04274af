use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::AppError;
use crate::store::{Command, StoreEvent, SubPoll};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct VoteRequest {
    #[serde(rename = "optionId")]
    pub option_id: String,
}

#[derive(Debug, Serialize)]
pub struct MutationResponse<'a> {
    pub event: &'a StoreEvent,
    pub subpoll: &'a SubPoll,
}

/// Full snapshot of every SubPoll, for rendering.
pub async fn list_subpolls(state: web::Data<AppState>) -> HttpResponse {
    let store = state.store.read().await;
    HttpResponse::Ok().json(&*store)
}

pub async fn get_subpoll(
    path: web::Path<String>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let subpoll_id = path.into_inner();
    let store = state.store.read().await;
    let subpoll = store.subpoll(&subpoll_id)?;
    Ok(HttpResponse::Ok().json(subpoll))
}

pub async fn vote(
    path: web::Path<String>,
    req: web::Json<VoteRequest>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let subpoll_id = path.into_inner();
    info!("Received vote for subpoll {}: option {}", subpoll_id, req.option_id);
    dispatch(&state, Command::vote(subpoll_id, req.into_inner().option_id)).await
}

pub async fn toggle_open(
    path: web::Path<String>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let subpoll_id = path.into_inner();
    info!("Received toggle for subpoll {}", subpoll_id);
    dispatch(&state, Command::toggle_open(subpoll_id)).await
}

pub async fn command(
    req: web::Json<Command>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    info!("Received command: {:?}", req);
    dispatch(&state, req.into_inner()).await
}

async fn dispatch(state: &AppState, command: Command) -> Result<HttpResponse, AppError> {
    // Held across check and apply so no other writer interleaves
    let mut store = state.store.write().await;

    match state.policy.apply(&mut *store, &command) {
        Ok(event) => {
            info!("Applied {:?}", event);
            let subpoll = store.subpoll(event.subpoll_id())?;
            Ok(HttpResponse::Ok().json(MutationResponse {
                event: &event,
                subpoll,
            }))
        }
        Err(e) => {
            warn!("Command {:?} failed: {}", command, e);
            Err(e)
        }
    }
}
