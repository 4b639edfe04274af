use thiserror::Error;
use actix_web::{ResponseError, HttpResponse, http::StatusCode};
use serde_json::json;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Store error: {0}")]
    StoreError(#[from] StoreError),

    #[error("Subpoll {0} is closed for voting")]
    PollClosed(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Internal server error: {0}")]
    InternalError(String),

    #[error("Validation error: {0}")]
    ValidationError(String),
}

// Implement conversion from config::ConfigError
impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        AppError::ConfigError(err.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::InternalError(err.to_string())
    }
}

impl ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        let message = self.to_string();
        let response = json!({
            "error": {
                "status": status.as_u16(),
                "message": message
            }
        });
        HttpResponse::build(status).json(response)
    }

    fn status_code(&self) -> StatusCode {
        match self {
            AppError::StoreError(e) => match e {
                StoreError::UnknownSubPoll(_) => StatusCode::NOT_FOUND,
                StoreError::UnknownOption { .. } => StatusCode::UNPROCESSABLE_ENTITY,
                StoreError::DuplicateSubPoll(_) => StatusCode::INTERNAL_SERVER_ERROR,
                StoreError::DuplicateOption { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            },
            AppError::PollClosed(_) => StatusCode::CONFLICT,
            AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::ConfigError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("Unknown subpoll: {0}")]
    UnknownSubPoll(String),

    #[error("Unknown option {option_id} for subpoll {subpoll_id}")]
    UnknownOption { subpoll_id: String, option_id: String },

    #[error("Duplicate subpoll: {0}")]
    DuplicateSubPoll(String),

    #[error("Duplicate option {option_id} for subpoll {subpoll_id}")]
    DuplicateOption { subpoll_id: String, option_id: String },
}
