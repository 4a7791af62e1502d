use domain::MAX_OFFSET;
use serde::Deserialize;
use utoipa::IntoParams;

pub(crate) const DEFAULT_LIMIT: u64 = 20;
pub(crate) const MAX_LIMIT: u64 = 100;

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub(crate) struct IndexParams {
    /// Complaint whose summaries to list. Without it the list is empty.
    /// `complaintId` is accepted as well.
    #[serde(alias = "complaintId")]
    pub(crate) complaint_id: Option<String>,
    /// Page size, 1 to 100 (default 20)
    pub(crate) limit: Option<u64>,
    /// Number of summaries to skip (default 0, at most 2^63 - 1)
    pub(crate) offset: Option<u64>,
}

impl IndexParams {
    pub(crate) fn limit(&self) -> u64 {
        self.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT)
    }

    pub(crate) fn offset(&self) -> u64 {
        self.offset.unwrap_or(0).min(MAX_OFFSET)
    }
}
