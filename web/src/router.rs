use crate::{controller::health_check_controller, AppState};
use axum::{
    http::{header, HeaderName, HeaderValue, Method},
    routing::{get, post},
    Router,
};
use log::*;
use std::time::Duration;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};

use crate::controller::summary_controller;

use utoipa::OpenApi;
use utoipa_rapidoc::RapiDoc;

const X_REQUEST_ID: &str = "x-request-id";

// This is the global definition of our OpenAPI spec. To be a part
// of the rendered spec, a path and schema must be listed here.
#[derive(OpenApi)]
#[openapi(
        info(
            title = "SmartResolve Summarization API"
        ),
        paths(
            health_check_controller::health_check,
            summary_controller::create,
            summary_controller::read,
            summary_controller::index,
        ),
        components(
            schemas(
                domain::summaries::Model,
                domain::key_metrics::KeyMetrics,
                domain::language::Language,
                domain::resolution_status::ResolutionStatus,
                domain::sentiment::Sentiment,
                crate::response::summary::SummaryPage,
            )
        ),
        tags(
            (name = "smart_resolve", description = "Call transcript summarization API")
        )
    )]
struct ApiDoc;

pub fn define_routes(app_state: AppState) -> Router {
    let cors = cors_layer(&app_state.config.allowed_origins);

    Router::new()
        .merge(health_routes())
        .merge(summary_routes(app_state))
        .merge(RapiDoc::with_openapi("/api-docs/openapi.json", ApiDoc::openapi()).path("/rapidoc"))
        .layer(cors)
        .layer(PropagateRequestIdLayer::new(HeaderName::from_static(
            X_REQUEST_ID,
        )))
        .layer(SetRequestIdLayer::new(
            HeaderName::from_static(X_REQUEST_ID),
            MakeRequestUuid,
        ))
}

fn health_routes() -> Router {
    Router::new().route("/health", get(health_check_controller::health_check))
}

fn summary_routes(app_state: AppState) -> Router {
    Router::new()
        .route("/summaries", post(summary_controller::create))
        .route("/summaries", get(summary_controller::index))
        .route("/summaries/{id}", get(summary_controller::read))
        .with_state(app_state)
}

/// Only the configured origins may read responses. Origins that aren't valid
/// header values are skipped.
fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Ignoring invalid CORS origin: {origin}");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([
            header::CONTENT_TYPE,
            HeaderName::from_static("x-version"),
            HeaderName::from_static(X_REQUEST_ID),
        ])
        .expose_headers([HeaderName::from_static(X_REQUEST_ID)])
        .max_age(Duration::from_secs(3600))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn openapi_lists_every_summary_route() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&String> = doc.paths.paths.keys().collect();

        assert!(paths.contains(&&"/health".to_string()));
        assert!(paths.contains(&&"/summaries".to_string()));
        assert!(paths.contains(&&"/summaries/{id}".to_string()));
    }

    #[test]
    fn cors_layer_skips_invalid_origins() {
        // Builds without panicking even when an origin can't be a header value
        let _layer = cors_layer(&[
            "http://localhost:3000".to_string(),
            "bad\norigin".to_string(),
        ]);
    }
}
