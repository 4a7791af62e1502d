use crate::controller::ApiResponse;
use crate::extractors::compare_api_version::CompareApiVersion;
use crate::params::summary::IndexParams;
use crate::response::summary::SummaryPage;
use crate::{AppState, Error};
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use domain::summary as SummaryApi;
use domain::validation;
use serde_json::Value;
use service::config::ApiVersion;

use log::*;

/// POST summarize a call transcript
#[utoipa::path(
    post,
    path = "/summaries",
    params(ApiVersion),
    request_body(
        content = Object,
        description = "complaintId (non-empty), transcript (at least 50 characters), optional language (en, es, fr, de, pt, zh)",
        example = json!({
            "complaintId": "CMP-1001",
            "transcript": "Agent: Thank you for calling. Customer: I was charged twice for my March bill...",
            "language": "en"
        })
    ),
    responses(
        (status = 201, description = "Successfully summarized the transcript", body = domain::summaries::Model),
        (status = 400, description = "Invalid request"),
        (status = 500, description = "Internal Server Error"),
        (status = 502, description = "Model provider unavailable or returned an unusable answer"),
        (status = 503, description = "Model provider rate limit exceeded"),
        (status = 504, description = "Model provider timed out")
    )
)]
pub async fn create(
    CompareApiVersion(_v): CompareApiVersion,
    State(app_state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse, Error> {
    let Json(body) = body.map_err(|rejection| {
        warn!("Rejected summary request body: {}", rejection.body_text());
        Error::from(validation::rejected_input(rejection.body_text()))
    })?;

    let request = validation::validate(&body)?;
    debug!(
        "POST Summarize transcript for complaint: {}",
        request.complaint_id
    );

    let summary =
        SummaryApi::summarize(app_state.db_conn_ref(), &app_state.config, request).await?;

    debug!("New Summary: {}", summary.id);

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::new(StatusCode::CREATED.into(), summary)),
    ))
}

/// GET a particular Summary specified by its id.
#[utoipa::path(
    get,
    path = "/summaries/{id}",
    params(
        ApiVersion,
        ("id" = String, Path, description = "Summary id to retrieve")
    ),
    responses(
        (status = 200, description = "Successfully retrieved a specific Summary by its id", body = domain::summaries::Model),
        (status = 404, description = "Summary not found"),
        (status = 422, description = "Malformed summary id")
    )
)]
pub async fn read(
    CompareApiVersion(_v): CompareApiVersion,
    State(app_state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, Error> {
    debug!("GET Summary by id: {id}");

    let summary = SummaryApi::find_by_id(app_state.db_conn_ref(), &id).await?;

    Ok(Json(ApiResponse::new(StatusCode::OK.into(), summary)))
}

/// GET all Summaries for a complaint, most recent first
#[utoipa::path(
    get,
    path = "/summaries",
    params(ApiVersion, IndexParams),
    responses(
        (status = 200, description = "Successfully retrieved a page of Summaries", body = SummaryPage),
        (status = 400, description = "Malformed query string")
    )
)]
pub async fn index(
    CompareApiVersion(_v): CompareApiVersion,
    State(app_state): State<AppState>,
    params: Result<Query<IndexParams>, QueryRejection>,
) -> Result<impl IntoResponse, Error> {
    let Query(params) = params.map_err(|rejection| {
        warn!("Rejected summary list query: {}", rejection.body_text());
        Error::from(validation::rejected_input(rejection.body_text()))
    })?;
    debug!("GET all Summaries");
    debug!("Filter Params: {params:?}");

    let limit = params.limit();
    let offset = params.offset();
    let page = SummaryApi::list(
        app_state.db_conn_ref(),
        params.complaint_id.as_deref(),
        limit,
        offset,
    )
    .await?;

    debug!("Found {} of {} Summaries", page.items.len(), page.total);

    Ok(Json(ApiResponse::new(
        StatusCode::OK.into(),
        SummaryPage::new(page, limit, offset),
    )))
}
