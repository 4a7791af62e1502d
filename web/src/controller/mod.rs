use serde::Serialize;
pub(crate) mod health_check_controller;
pub(crate) mod summary_controller;

/// Envelope around every successful JSON body: `{"status_code": .., "data": ..}`.
#[derive(Debug, Serialize)]
struct ApiResponse<T: Serialize> {
    status_code: u16,
    data: T,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn new(status_code: u16, data: T) -> Self {
        Self { status_code, data }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use serde_json::json;

    #[test]
    fn envelope_nests_payload_under_data() {
        let response = ApiResponse::new(
            StatusCode::CREATED.into(),
            json!({ "id": "3f1c", "complaintId": "CMP-1001" }),
        );

        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            json!({
                "status_code": 201,
                "data": { "id": "3f1c", "complaintId": "CMP-1001" }
            })
        );
    }
}
