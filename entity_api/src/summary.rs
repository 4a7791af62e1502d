//! Read/write operations for the summaries table.
//!
//! Rows carry their own expiry instant. Every read filters on it, so an expired
//! summary behaves as if it was never written even before the purge job runs.

use super::error::{EntityApiErrorKind, Error};
use entity::summaries::{ActiveModel, Column, Entity, Model};
use entity::Id;
use log::*;
use sea_orm::{
    entity::prelude::*, ActiveValue::Set, DatabaseConnection, PaginatorTrait, QueryOrder,
    QuerySelect,
};

/// A page of summaries plus the number of live rows matching the query.
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    pub items: Vec<Model>,
    pub total: u64,
}

/// Largest OFFSET Postgres accepts. It is bound as a signed 64-bit integer.
pub const MAX_OFFSET: u64 = i64::MAX as u64;

/// Inserts a fully composed summary row.
pub async fn create(db: &DatabaseConnection, model: Model) -> Result<Model, Error> {
    debug!(
        "Creating summary {} for complaint: {}",
        model.id, model.complaint_id
    );

    let active_model = ActiveModel {
        id: Set(model.id),
        complaint_id: Set(model.complaint_id),
        transcript: Set(model.transcript),
        language: Set(model.language),
        executive: Set(model.executive),
        detailed: Set(model.detailed),
        key_metrics: Set(model.key_metrics),
        sentiment: Set(model.sentiment),
        confidence_score: Set(model.confidence_score),
        processing_time_ms: Set(model.processing_time_ms),
        created_at: Set(model.created_at),
        expires_at: Set(model.expires_at),
    };

    Ok(active_model.insert(db).await?)
}

/// Finds a live summary by ID
pub async fn find_by_id(db: &DatabaseConnection, id: Id) -> Result<Model, Error> {
    let now: DateTimeWithTimeZone = chrono::Utc::now().into();

    Entity::find_by_id(id)
        .filter(Column::ExpiresAt.gt(now))
        .one(db)
        .await?
        .ok_or_else(|| {
            debug!("Summary with id {id} not found");
            Error {
                source: None,
                error_kind: EntityApiErrorKind::RecordNotFound,
            }
        })
}

/// Lists live summaries for a complaint, most recent first.
pub async fn find_by_complaint_id(
    db: &DatabaseConnection,
    complaint_id: &str,
    limit: u64,
    offset: u64,
) -> Result<Page, Error> {
    let offset = offset.min(MAX_OFFSET);
    let now: DateTimeWithTimeZone = chrono::Utc::now().into();

    let query = Entity::find()
        .filter(Column::ComplaintId.eq(complaint_id))
        .filter(Column::ExpiresAt.gt(now));

    let total = query.clone().count(db).await?;

    let items = query
        .order_by_desc(Column::CreatedAt)
        .limit(limit)
        .offset(offset)
        .all(db)
        .await?;

    debug!(
        "Found {} of {total} summaries for complaint {complaint_id} (limit={limit}, offset={offset})",
        items.len()
    );

    Ok(Page { items, total })
}

/// Deletes every summary whose expiry has passed and returns how many rows went.
pub async fn delete_expired(db: &DatabaseConnection) -> Result<u64, Error> {
    let now: DateTimeWithTimeZone = chrono::Utc::now().into();

    let result = Entity::delete_many()
        .filter(Column::ExpiresAt.lte(now))
        .exec(db)
        .await?;

    Ok(result.rows_affected)
}
