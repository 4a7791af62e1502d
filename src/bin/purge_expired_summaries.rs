use log::{error, info};
use service::{config::Config, logging::Logger};
use std::sync::Arc;

#[tokio::main]
async fn main() {
    let config = Config::new();
    if let Err(e) = Logger::init_logger(&config) {
        eprintln!("Failed to initialize logger: {e}");
    }

    info!("Purging expired summaries...");

    let db = match service::init_database(&config).await {
        Ok(db) => Arc::new(db),
        Err(e) => {
            error!("Failed to establish database connection: {e}");
            std::process::exit(1);
        }
    };

    let service_state = service::AppState::new(config, &db);

    match domain::summary::purge_expired(service_state.db_conn_ref()).await {
        Ok(deleted) => info!("Done, {deleted} expired summaries removed"),
        Err(e) => {
            error!("Failed to purge expired summaries: {e}");
            std::process::exit(1);
        }
    }
}
