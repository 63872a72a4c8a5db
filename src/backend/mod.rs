use log::{debug, info};
use reqwest::Client;
use serde_json::{json, Map, Value};

use crate::error::ApiError;
use crate::web::models::Message;

// A thin wrapper for the Ollama HTTP API
pub struct OllamaClient {
    base_url: String,
    client: Client,
}

impl OllamaClient {
    pub fn new(base_url: String) -> Self {
        info!("Using Ollama server at: {}", base_url);
        Self {
            base_url,
            client: Client::new(),
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), path)
    }

    /// List the models the Ollama instance has pulled. Used as the startup
    /// readiness probe; any failure means the backend is unreachable.
    pub async fn list_models(&self) -> Result<Vec<String>, ApiError> {
        let url = self.endpoint("api/tags");
        debug!("Listing models from {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| ApiError::Internal(format!("Ollama request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(ApiError::Internal(format!(
                "Ollama returned {}",
                response.status()
            )));
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| ApiError::Internal(format!("Failed to parse Ollama response: {}", e)))?;

        let models = body
            .get("models")
            .and_then(|m| m.as_array())
            .map(|models| {
                models
                    .iter()
                    .filter_map(|m| m.get("name").and_then(|n| n.as_str()).map(String::from))
                    .collect()
            })
            .unwrap_or_default();

        Ok(models)
    }

    /// Run one non-streaming chat completion and return the message text.
    ///
    /// `options` is forwarded to Ollama as-is; this service does not know or
    /// care which sampling knobs the caller is turning.
    pub async fn chat(
        &self,
        model: &str,
        messages: Vec<Message>,
        options: Option<&Map<String, Value>>,
    ) -> Result<String, ApiError> {
        let mut payload = json!({
            "model": model,
            "messages": messages,
            "stream": false,
        });
        if let Some(options) = options {
            payload["options"] = Value::Object(options.clone());
        }

        let url = self.endpoint("api/chat");
        debug!("Payload: {}", payload);

        let response = self
            .client
            .post(&url)
            .json(&payload)
            .send()
            .await
            .map_err(|e| ApiError::Internal(format!("Ollama request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            // Ollama reports application errors (unknown model, bad options)
            // as {"error": "..."} with a meaningful status code.
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<Value>(&body)
                .ok()
                .and_then(|v| v.get("error").and_then(|e| e.as_str()).map(String::from))
                .unwrap_or(body);
            return Err(ApiError::BackendRequest {
                code: status.as_u16(),
                message,
            });
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| ApiError::Internal(format!("Failed to parse Ollama response: {}", e)))?;

        let content = body
            .get("message")
            .and_then(|message| message.get("content"))
            .and_then(|content| content.as_str())
            .ok_or_else(|| {
                ApiError::Internal("Failed to extract content from Ollama response".to_string())
            })?;

        debug!("Response length: {} characters", content.len());
        Ok(content.to_string())
    }
}
