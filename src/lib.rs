pub mod api;
pub mod config;
pub mod error;
pub mod policy;
pub mod store;

use std::sync::Arc;
use tokio::sync::RwLock;
use actix_web::HttpResponse;

pub use error::{AppError, StoreError};
pub type Result<T> = std::result::Result<T, AppError>;
pub use config::Settings;

pub use policy::VotePolicy;
pub use store::{Command, OptionCheck, PollOption, PollStore, StoreEvent, SubPoll};

/// Health check endpoint handler
/// Returns a JSON response with server status and timestamp
pub async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

/// Application state shared by every worker. The store has a single
/// writer at a time through the write half of the lock.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Settings>,
    pub store: Arc<RwLock<PollStore>>,
    pub policy: VotePolicy,
}

impl AppState {
    /// Seeds a fresh store configured from `config.polls`.
    pub fn new(config: Settings) -> Self {
        let store = PollStore::seeded().with_option_check(config.polls.option_check());
        Self::with_store(config, store)
    }

    pub fn with_store(config: Settings, store: PollStore) -> Self {
        let policy = VotePolicy::from(&config.polls);
        Self {
            config: Arc::new(config),
            store: Arc::new(RwLock::new(store)),
            policy,
        }
    }
}
