use actix_web::{web, HttpRequest, HttpResponse, Responder};
use actix_ws::Message as WsMessage;
use chrono::Utc;
use futures_util::StreamExt;
use log::{error, info, warn};
use uuid::Uuid;

use crate::error::ApiError;
use crate::files;
use crate::normalize::{normalize, Normalized};
use crate::web::auth;
use crate::web::models::{
    FileWriteRequest, FileWriteResponse, GenerateRequest, GenerateResponse, HealthResponse,
    Message, Role, WebsiteRequest, WebsiteResponse,
};
use crate::AppState;

const REQUEST_ID_HEADER: &str = "X-Request-ID";

// Appended verbatim when json_format is requested; plain concatenation, the
// prompt is not templated.
const JSON_FORMAT_INSTRUCTION: &str =
    ". IMPORTANT: Your response MUST be a single, valid JSON object.";

fn current_timestamp() -> String {
    Utc::now().to_rfc3339()
}

/// Correlation id for one request: the inbound X-Request-ID if the caller
/// supplied one, otherwise freshly minted. Never reused across requests.
pub fn request_id(req: &HttpRequest) -> String {
    req.headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(String::from)
        .unwrap_or_else(|| Uuid::new_v4().to_string())
}

fn authorize(data: &AppState, req: &HttpRequest) -> Result<(), ApiError> {
    let presented = req
        .headers()
        .get(auth::API_KEY_HEADER)
        .and_then(|v| v.to_str().ok());
    auth::check(data.config.api_access_key.as_deref(), presented)
}

// Health check endpoint; always 200, reports the startup probe result
pub async fn health_check(data: web::Data<AppState>) -> impl Responder {
    let ollama_status = if data.ollama_ready { "ready" } else { "unavailable" };
    HttpResponse::Ok().json(HealthResponse {
        status: "running".to_string(),
        ollama_status: ollama_status.to_string(),
        timestamp: current_timestamp(),
    })
}

// Generation endpoint: auth gate, readiness gate, prompt augmentation,
// backend call, output normalization
pub async fn generate(
    data: web::Data<AppState>,
    req: web::Json<GenerateRequest>,
    http_req: HttpRequest,
) -> HttpResponse {
    let request_id = request_id(&http_req);

    if let Err(e) = authorize(&data, &http_req) {
        return e.into_response(&request_id);
    }

    // The readiness flag is set once at startup and never re-probed; when it
    // is false no backend call is attempted.
    if !data.ollama_ready {
        warn!("Request {} rejected: Ollama is not available", request_id);
        return ApiError::BackendUnavailable.into_response(&request_id);
    }

    if req.prompt.trim().is_empty() {
        return ApiError::BadRequest("prompt must not be empty".to_string())
            .into_response(&request_id);
    }

    info!("Processing request {} with model {}", request_id, req.model);

    let mut prompt = req.prompt.clone();
    if req.json_format {
        prompt.push_str(JSON_FORMAT_INSTRUCTION);
    }

    let messages = vec![Message {
        role: Role::User,
        content: prompt,
    }];

    match data
        .backend
        .chat(&req.model, messages, req.options.as_ref())
        .await
    {
        Ok(content) => {
            let normalized = normalize(&content);
            if matches!(normalized, Normalized::Fallback(_)) {
                warn!(
                    "Request {}: model response was not valid JSON, wrapping raw content",
                    request_id
                );
            }
            let response = normalized.into_map();
            info!("Request {} completed successfully", request_id);
            HttpResponse::Ok().json(GenerateResponse {
                request_id,
                timestamp: current_timestamp(),
                response,
            })
        }
        Err(e) => {
            error!("Request {}: {}", request_id, e);
            e.into_response(&request_id)
        }
    }
}

// File write endpoint
pub async fn file_operation(
    data: web::Data<AppState>,
    req: web::Json<FileWriteRequest>,
    http_req: HttpRequest,
) -> HttpResponse {
    let request_id = request_id(&http_req);

    if let Err(e) = authorize(&data, &http_req) {
        return e.into_response(&request_id);
    }

    info!(
        "Processing file operation request {} for path: {}",
        request_id, req.path
    );

    match files::write_file(&req.path, &req.content).await {
        Ok(()) => HttpResponse::Ok().json(FileWriteResponse {
            message: "File written successfully".to_string(),
            path: req.path.clone(),
            timestamp: current_timestamp(),
        }),
        Err(e) => {
            error!("File operation {} failed for path: {}", request_id, req.path);
            e.into_response(&request_id)
        }
    }
}

// Website assembly endpoint
pub async fn generate_website(
    data: web::Data<AppState>,
    req: web::Json<WebsiteRequest>,
    http_req: HttpRequest,
) -> HttpResponse {
    let request_id = request_id(&http_req);

    if let Err(e) = authorize(&data, &http_req) {
        return e.into_response(&request_id);
    }

    info!("Processing website generation request {}", request_id);

    match files::assemble_site(
        &data.config.sites_root,
        &req.html_content,
        req.css_content.as_deref(),
        req.js_content.as_deref(),
    )
    .await
    {
        Ok(url) => {
            info!(
                "Website generation request {} completed successfully. URL: {}",
                request_id, url
            );
            HttpResponse::Ok().json(WebsiteResponse {
                message: "Website generated successfully".to_string(),
                url,
                timestamp: current_timestamp(),
            })
        }
        Err(e) => {
            error!("Website generation request {} failed: {}", request_id, e);
            e.into_response(&request_id)
        }
    }
}

// WebSocket echo endpoint: one task per connection, no shared state
pub async fn ws(req: HttpRequest, body: web::Payload) -> Result<HttpResponse, actix_web::Error> {
    let (response, mut session, mut stream) = actix_ws::handle(&req, body)?;

    actix_web::rt::spawn(async move {
        while let Some(Ok(msg)) = stream.next().await {
            match msg {
                WsMessage::Text(text) => {
                    let reply = format!("Message text was: {}", &*text);
                    if session.text(reply).await.is_err() {
                        break;
                    }
                }
                WsMessage::Ping(bytes) => {
                    if session.pong(&bytes).await.is_err() {
                        break;
                    }
                }
                WsMessage::Close(_) => {
                    info!("Client disconnected from WebSocket");
                    break;
                }
                _ => {}
            }
        }
        let _ = session.close(None).await;
    });

    Ok(response)
}
