use crate::error::ApiError;

pub const API_KEY_HEADER: &str = "X-API-KEY";

/// Decide whether a request may proceed, given the configured shared secret
/// and the credential presented in the request header.
///
/// With no secret configured the gate is wide open; that state is logged
/// once at startup, not per request.
pub fn check(configured: Option<&str>, presented: Option<&str>) -> Result<(), ApiError> {
    let Some(expected) = configured else {
        return Ok(());
    };
    match presented {
        None => Err(ApiError::MissingCredential),
        Some(key) if key != expected => Err(ApiError::InvalidCredential),
        Some(_) => Ok(()),
    }
}
