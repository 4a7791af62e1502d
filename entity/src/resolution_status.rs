use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Where the complaint stood when the call ended.
///
/// Only ever stored inside the `key_metrics` JSON column, so unlike
/// [`crate::sentiment::Sentiment`] it has no database enum type.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ResolutionStatus {
    Resolved,
    Escalated,
    Pending,
}

impl std::fmt::Display for ResolutionStatus {
    fn fmt(&self, fmt: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResolutionStatus::Resolved => write!(fmt, "resolved"),
            ResolutionStatus::Escalated => write!(fmt, "escalated"),
            ResolutionStatus::Pending => write!(fmt, "pending"),
        }
    }
}
