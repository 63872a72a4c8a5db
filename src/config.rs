use std::env;
use std::path::PathBuf;

// Runtime configuration, read once at startup
pub struct Config {
    pub api_access_key: Option<String>,
    pub port: u16,
    pub ollama_url: String,
    pub sites_root: PathBuf,
}

impl Config {
    pub fn from_env() -> Self {
        let api_access_key = env::var("API_ACCESS_KEY").ok().filter(|k| !k.is_empty());

        let port = env::var("PORT")
            .ok()
            .and_then(|v| v.parse::<u16>().ok())
            .unwrap_or(8001);

        let ollama_url = env::var("OLLAMA_URL")
            .unwrap_or_else(|_| "http://localhost:11434".to_string());

        // Generated sites land under the frontend's public directory so they
        // are served as static assets without any extra routing.
        let sites_root = env::var("SITES_ROOT")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("../frontend/public/websites"));

        Self {
            api_access_key,
            port,
            ollama_url,
            sites_root,
        }
    }
}
