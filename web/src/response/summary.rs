use domain::summaries;
use serde::Serialize;
use utoipa::ToSchema;

/// One page of summaries for a complaint.
#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct SummaryPage {
    pub(crate) items: Vec<summaries::Model>,
    /// Live summaries matching the query across all pages
    pub(crate) total: u64,
    pub(crate) limit: u64,
    pub(crate) offset: u64,
}

impl SummaryPage {
    pub(crate) fn new(page: domain::Page, limit: u64, offset: u64) -> Self {
        Self {
            items: page.items,
            total: page.total,
            limit,
            offset,
        }
    }
}
