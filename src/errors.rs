use crate::models::ErrorResponse;
use axum::{Json, http::StatusCode};
use thiserror::Error;

#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub message: String,
}

impl AppError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    pub fn bad_gateway(err: impl std::error::Error) -> Self {
        Self {
            status: StatusCode::BAD_GATEWAY,
            message: err.to_string(),
        }
    }

    pub fn internal(err: impl std::error::Error) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: err.to_string(),
        }
    }
}

impl From<SourceError> for AppError {
    fn from(err: SourceError) -> Self {
        match err {
            SourceError::MissingApiKey | SourceError::InvalidApiKey | SourceError::InvalidVersion(_) => {
                Self::internal(err)
            }
            other => Self::bad_gateway(other),
        }
    }
}

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        (
            self.status,
            Json(ErrorResponse {
                error: self.message,
            }),
        )
            .into_response()
    }
}

/// Why a tracker entry could not be turned into a [`crate::models::TaskRecord`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RecordError {
    #[error("property `{0}` is missing")]
    MissingProperty(String),

    #[error("property `{property}` has an unexpected shape")]
    MalformedProperty { property: String },

    #[error("property `{0}` has no status selected")]
    MissingStatus(String),

    #[error("property `{0}` has no date set")]
    MissingDate(String),

    #[error("property `{property}` holds unparseable date `{value}`")]
    InvalidDate { property: String, value: String },
}

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("NOTION_API_KEY is not configured")]
    MissingApiKey,

    #[error("NOTION_API_KEY is not a valid header value")]
    InvalidApiKey,

    #[error("NOTION_VERSION `{0}` is not a valid header value")]
    InvalidVersion(String),

    #[error("request to Notion failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Notion responded with {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("could not decode Notion response: {0}")]
    Decode(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{name} must be a number, got `{value}`")]
    InvalidNumber { name: &'static str, value: String },

    #[error("{name} is not a valid header value: `{value}`")]
    InvalidHeader { name: &'static str, value: String },
}
