use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

fn default_model() -> String {
    "phi3:mini".to_string()
}

fn default_json_format() -> bool {
    true
}

#[derive(Debug, Deserialize)]
pub struct GenerateRequest {
    pub prompt: String,
    #[serde(default = "default_model")]
    pub model: String,
    /// Ollama generation options (temperature, top_p, ...), forwarded opaquely.
    #[serde(default)]
    pub options: Option<Map<String, Value>>,
    #[serde(default = "default_json_format")]
    pub json_format: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct GenerateResponse {
    pub request_id: String,
    pub timestamp: String,
    pub response: Map<String, Value>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub ollama_status: String,
    pub timestamp: String,
}

#[derive(Debug, Deserialize)]
pub struct FileWriteRequest {
    pub path: String,
    pub content: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct FileWriteResponse {
    pub message: String,
    pub path: String,
    pub timestamp: String,
}

#[derive(Debug, Deserialize)]
pub struct WebsiteRequest {
    pub html_content: String,
    pub css_content: Option<String>,
    pub js_content: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct WebsiteResponse {
    pub message: String,
    pub url: String,
    pub timestamp: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub enum Role {
    #[serde(rename = "user")]
    User,
    #[serde(rename = "assistant")]
    Assistant,
    #[serde(rename = "system")]
    System,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}
