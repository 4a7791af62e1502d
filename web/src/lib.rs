use log::*;
use std::io;

pub use service::AppState;

pub use self::error::{Error, Result};

mod controller;
mod error;
mod extractors;
mod params;
mod response;
pub mod router;

pub async fn init_server(app_state: AppState) -> io::Result<()> {
    let interface = app_state.config.interface.clone();
    let port = app_state.config.port;

    let listener = tokio::net::TcpListener::bind((interface.as_str(), port)).await?;
    info!("Server starting... listening for connections on http://{interface}:{port}");

    axum::serve(listener, router::define_routes(app_state)).await
}
