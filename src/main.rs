mod backend;
mod config;
mod error;
mod files;
mod normalize;
mod web;

use actix_cors::Cors;
use actix_web::{web::Data, App, HttpServer};
use dotenv::dotenv;
use log::{error, info, warn};

use backend::OllamaClient;
use config::Config;
use web::routes;

// App state structure; readiness is written exactly once, before the
// listener binds, and only read afterwards
pub struct AppState {
    pub config: Config,
    pub backend: OllamaClient,
    pub ollama_ready: bool,
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Initialize environment
    dotenv().ok();
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = Config::from_env();
    if config.api_access_key.is_none() {
        warn!("API_ACCESS_KEY environment variable not set. The API will not require authentication.");
    }

    let backend = OllamaClient::new(config.ollama_url.clone());

    // One-shot readiness probe; failure keeps the process serving everything
    // except /generate
    info!("Checking connection to Ollama...");
    let ollama_ready = match backend.list_models().await {
        Ok(models) => {
            info!("Ollama connection successful. {} models available", models.len());
            true
        }
        Err(e) => {
            error!(
                "Failed to connect to Ollama on startup. Please ensure Ollama is running. Error: {}",
                e
            );
            false
        }
    };

    let port = config.port;
    let app_state = Data::new(AppState {
        config,
        backend,
        ollama_ready,
    });

    info!("Starting server on http://localhost:{}", port);

    HttpServer::new(move || {
        App::new()
            .app_data(app_state.clone())
            .app_data(web::json_config())
            .wrap(Cors::permissive())
            .configure(routes::configure)
    })
    .bind(("127.0.0.1", port))?
    .run()
    .await
}
