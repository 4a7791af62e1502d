//! SeaORM Entity for the summaries table.
//! Stores one model-generated summary of a call transcript per row.

use crate::key_metrics::KeyMetrics;
use crate::language::Language;
use crate::sentiment::Sentiment;
use crate::Id;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize, ToSchema)]
#[schema(as = entity::summaries::Model)]
#[serde(rename_all = "camelCase")]
#[sea_orm(schema_name = "smart_resolve", table_name = "summaries")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    #[schema(value_type = uuid::Uuid)]
    pub id: Id,

    /// Caller-supplied complaint this summary belongs to
    pub complaint_id: String,

    #[sea_orm(column_type = "Text")]
    pub transcript: String,

    pub language: Language,

    /// 1-2 sentence summary of the key issue
    #[sea_orm(column_type = "Text")]
    pub executive: String,

    /// Multi-paragraph analysis of the complaint and its outcome
    #[sea_orm(column_type = "Text")]
    pub detailed: String,

    #[sea_orm(column_type = "JsonBinary")]
    pub key_metrics: KeyMetrics,

    pub sentiment: Sentiment,

    /// Model's self-reported confidence (0.0 - 1.0)
    pub confidence_score: f64,

    /// Wall time spent building the prompt, calling the model and parsing its answer
    pub processing_time_ms: i64,

    #[schema(value_type = String, format = DateTime)]
    pub created_at: DateTimeWithTimeZone,

    /// Rows past this instant are treated as deleted and swept by `purge_expired_summaries`
    #[schema(value_type = String, format = DateTime)]
    pub expires_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
