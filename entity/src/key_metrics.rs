use crate::resolution_status::ResolutionStatus;
use crate::sentiment::Sentiment;
use sea_orm::FromJsonQueryResult;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Categorical metrics the model extracts from a call. Persisted as a single
/// JSONB column on `summaries`.
#[derive(
    Clone, Debug, PartialEq, Eq, Serialize, Deserialize, FromJsonQueryResult, ToSchema,
)]
#[serde(rename_all = "camelCase")]
pub struct KeyMetrics {
    /// Free-form category such as "Billing" or "Technical Support"
    pub issue_category: String,
    pub sentiment: Sentiment,
    pub resolution_status: ResolutionStatus,
    /// Call length in `HH:MM:SS`, when the model could infer it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub call_duration: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub agent_name: Option<String>,
}
