use crate::error::error_response;
use crate::AppState;
use axum::{
    extract::FromRequestParts,
    http::{request::Parts, StatusCode},
    response::Response,
};
use log::*;
use service::config::ApiVersion;

/// The API version a request asked for. Without an `x-version` header the
/// configured server version applies. A header naming a version this server
/// doesn't expose is rejected with 400.
pub(crate) struct CompareApiVersion(pub String);

impl FromRequestParts<AppState> for CompareApiVersion {
    type Rejection = Response;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let Some(value) = parts.headers.get(ApiVersion::field_name()) else {
            return Ok(CompareApiVersion(state.config.api_version().to_string()));
        };

        let requested = value
            .to_str()
            .map_err(|_| error_response(StatusCode::BAD_REQUEST, "Invalid x-version header"))?;

        if ApiVersion::is_supported(requested) {
            trace!("Request for API version {requested}");
            Ok(CompareApiVersion(requested.to_string()))
        } else {
            warn!("Request for unsupported API version: {requested}");
            Err(error_response(
                StatusCode::BAD_REQUEST,
                &format!("Unsupported API version: {requested}"),
            ))
        }
    }
}
