//! HTTP API for the poll store
//!
//! Read routes serve the current snapshot; write routes turn requests into
//! store commands and answer with the resulting event.

pub mod handlers;

use actix_web::web;

use crate::error::AppError;

/// Registers every route on an actix `App` or scope.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(
        web::JsonConfig::default()
            .error_handler(|err, _req| AppError::ValidationError(err.to_string()).into()),
    )
    .route("/health", web::get().to(crate::health_check))
    .route("/subpolls", web::get().to(handlers::list_subpolls))
    .route("/subpolls/{subpoll_id}", web::get().to(handlers::get_subpoll))
    .route("/subpolls/{subpoll_id}/vote", web::post().to(handlers::vote))
    .route("/subpolls/{subpoll_id}/toggle-open", web::post().to(handlers::toggle_open))
    .route("/commands", web::post().to(handlers::command));
}
