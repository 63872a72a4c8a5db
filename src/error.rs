use actix_web::http::StatusCode;
use actix_web::HttpResponse;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Every failure that can leave the service, mapped to a transport status.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("API Key is missing")]
    MissingCredential,
    #[error("Invalid API Key")]
    InvalidCredential,
    #[error("Ollama service is not available.")]
    BackendUnavailable,
    #[error("Ollama error: {message}")]
    BackendRequest { code: u16, message: String },
    #[error("{0}")]
    BadRequest(String),
    #[error("File operation failed: {0}")]
    FileOperation(String),
    #[error("Website generation failed: {0}")]
    SiteAssembly(String),
    #[error("An unexpected error occurred: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::MissingCredential | ApiError::InvalidCredential => StatusCode::UNAUTHORIZED,
            ApiError::BackendUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            // Ollama's own status code is passed through verbatim
            ApiError::BackendRequest { code, .. } => {
                StatusCode::from_u16(*code).unwrap_or(StatusCode::BAD_GATEWAY)
            }
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::FileOperation(_) | ApiError::SiteAssembly(_) | ApiError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Convert into the client-facing JSON envelope. Error text is surfaced
    /// as-is, including internal failure detail; this service runs behind a
    /// trusted frontend.
    pub fn into_response(self, request_id: &str) -> HttpResponse {
        let status = self.status();
        HttpResponse::build(status).json(ErrorEnvelope {
            error: self.to_string(),
            code: status.as_u16(),
            request_id: request_id.to_string(),
            details: None,
        })
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    pub error: String,
    pub code: u16,
    pub request_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}
