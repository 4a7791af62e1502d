use log::{error, info, warn};
use service::{config::Config, logging::Logger};
use std::sync::Arc;

#[tokio::main]
async fn main() {
    let config = Config::new();
    if let Err(e) = Logger::init_logger(&config) {
        eprintln!("Failed to initialize logger: {e}");
    }

    info!(
        "Starting SmartResolve summarization service [{}] with model {}",
        config.runtime_env(),
        config.model_id()
    );
    if config.anthropic_api_key().is_none() {
        error!("ANTHROPIC_API_KEY is not set; summarization requests will fail");
    } else {
        match domain::summary::verify_model_credentials(&config).await {
            Ok(true) => info!("Model host accepted the configured API key"),
            Ok(false) => {
                error!("Model host rejected ANTHROPIC_API_KEY; summarization requests will fail")
            }
            Err(e) => warn!("Could not verify model credentials at startup: {e}"),
        }
    }

    let db = match service::init_database(&config).await {
        Ok(db) => Arc::new(db),
        Err(e) => {
            error!("Failed to establish database connection: {e}");
            std::process::exit(1);
        }
    };

    let app_state = service::AppState::new(config, &db);

    if let Err(e) = web::init_server(app_state).await {
        error!("Server exited with error: {e}");
        std::process::exit(1);
    }
}
