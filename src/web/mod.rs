pub mod auth;
pub mod handlers;
pub mod models;
pub mod routes;

use actix_web::error::InternalError;
use actix_web::{web, HttpResponse};

use crate::error::ErrorEnvelope;

/// Body-extraction failures (missing fields, malformed JSON) are shaped into
/// the same error envelope as everything else, correlation id included, so no
/// client ever sees a bare transport error.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, req| {
        let envelope = ErrorEnvelope {
            error: "Invalid request body".to_string(),
            code: 400,
            request_id: handlers::request_id(req),
            details: Some(err.to_string()),
        };
        InternalError::from_response(err, HttpResponse::BadRequest().json(envelope)).into()
    })
}
