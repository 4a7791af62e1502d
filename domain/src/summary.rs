//! Summarization pipeline and summary lookups.
//!
//! `summarize` takes a [`SummaryRequest`] that already passed
//! [`crate::validation::validate`], asks the model for a summary, stamps the
//! resulting record with its id and expiry, and stores it.

use crate::error::{DomainErrorKind, Error, ExternalErrorKind, InternalErrorKind};
use crate::gateway::anthropic::AnthropicClient;
use crate::key_metrics::KeyMetrics;
use crate::prompt::build_prompt;
use crate::sentiment::Sentiment;
use crate::validation::SummaryRequest;
use crate::{summaries, Id, Page};
use call_ai::{CompletionRequest, Provider};
use chrono::{DateTime, Utc};
use entity_api::summary;
use log::*;
use sea_orm::DatabaseConnection;
use serde::Deserialize;
use service::config::Config;
use std::time::{Duration, Instant};

/// Knobs for a single summarization run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SummarizeOptions {
    pub max_tokens: u32,
    pub ttl_days: u32,
}

impl From<&Config> for SummarizeOptions {
    fn from(config: &Config) -> Self {
        Self {
            max_tokens: config.model_max_tokens,
            ttl_days: config.summary_ttl_days,
        }
    }
}

/// What the model is asked to return.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryDraft {
    pub executive: String,
    pub detailed: String,
    pub key_metrics: KeyMetrics,
    pub sentiment: Sentiment,
    pub confidence_score: f64,
}

/// Summarizes a transcript with the model configured in `config`.
pub async fn summarize(
    db: &DatabaseConnection,
    config: &Config,
    request: SummaryRequest,
) -> Result<summaries::Model, Error> {
    let client = model_client(config)?;
    summarize_with(db, &client, SummarizeOptions::from(config), request).await
}

/// Asks the configured model host whether it accepts our API key.
pub async fn verify_model_credentials(config: &Config) -> Result<bool, Error> {
    let client = model_client(config)?;
    Ok(client.verify_credentials().await?)
}

fn model_client(config: &Config) -> Result<AnthropicClient, Error> {
    let api_key = config.anthropic_api_key().ok_or_else(|| {
        error!("Anthropic API key not configured");
        Error {
            source: None,
            error_kind: DomainErrorKind::Internal(InternalErrorKind::Config),
        }
    })?;

    Ok(AnthropicClient::new(
        &api_key,
        config.anthropic_base_url(),
        config.model_id(),
        Duration::from_secs(config.model_timeout_secs),
    )?)
}

/// Summarizes a transcript with an arbitrary completion provider.
pub async fn summarize_with(
    db: &DatabaseConnection,
    provider: &dyn Provider,
    options: SummarizeOptions,
    request: SummaryRequest,
) -> Result<summaries::Model, Error> {
    let complaint_id = request.complaint_id.clone();

    match run(db, provider, options, request).await {
        Ok(summary) => {
            info!(
                "Summary {} created for complaint {} in {}ms",
                summary.id, summary.complaint_id, summary.processing_time_ms
            );
            Ok(summary)
        }
        Err(err) => {
            error!("Summarization failed for complaint {complaint_id}: {err}");
            Err(err)
        }
    }
}

async fn run(
    db: &DatabaseConnection,
    provider: &dyn Provider,
    options: SummarizeOptions,
    request: SummaryRequest,
) -> Result<summaries::Model, Error> {
    let started = Instant::now();
    info!(
        "Starting summarization for complaint {} ({} chars, language={}) with {}/{}",
        request.complaint_id,
        request.transcript.chars().count(),
        request.language.code(),
        provider.provider_id(),
        provider.model_id()
    );

    let prompt = build_prompt(&request);
    let completion = provider
        .complete(CompletionRequest::new(prompt).max_tokens(options.max_tokens))
        .await
        .inspect_err(|err| {
            if err.is_transient() {
                warn!(
                    "Transient {} failure, the client may retry: {err}",
                    provider.provider_id()
                );
            }
        })?;
    let draft = parse_completion(&completion.text)?;

    let processing_time_ms = i64::try_from(started.elapsed().as_millis()).unwrap_or(i64::MAX);
    let model = compose_record(
        request,
        draft,
        Utc::now(),
        processing_time_ms,
        options.ttl_days,
    );

    Ok(summary::create(db, model).await?)
}

/// Builds the row to store: a fresh id, the request's fields, the model's draft and
/// an expiry `ttl_days` after `created_at`.
fn compose_record(
    request: SummaryRequest,
    draft: SummaryDraft,
    created_at: DateTime<Utc>,
    processing_time_ms: i64,
    ttl_days: u32,
) -> summaries::Model {
    let expires_at = created_at + chrono::Duration::days(i64::from(ttl_days));

    summaries::Model {
        id: Id::new_v4(),
        complaint_id: request.complaint_id,
        transcript: request.transcript,
        language: request.language,
        executive: draft.executive,
        detailed: draft.detailed,
        key_metrics: draft.key_metrics,
        sentiment: draft.sentiment,
        confidence_score: draft.confidence_score,
        processing_time_ms,
        created_at: created_at.fixed_offset(),
        expires_at: expires_at.fixed_offset(),
    }
}

/// Parses the model's answer into a [`SummaryDraft`].
///
/// Models sometimes wrap JSON in a markdown fence despite being told not to, so a
/// single surrounding fence is removed first.
pub fn parse_completion(text: &str) -> Result<SummaryDraft, Error> {
    let json = strip_code_fence(text);

    serde_json::from_str(json).map_err(|e| {
        warn!("Failed to parse model summary: {:?}, response: {}", e, text);
        Error {
            source: Some(Box::new(e)),
            error_kind: DomainErrorKind::External(ExternalErrorKind::Other(
                "Model returned an unparseable summary".to_string(),
            )),
        }
    })
}

fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    // Drop the info string (e.g. "json") on the opening fence line
    let body = rest.split_once('\n').map_or("", |(_, body)| body);
    body.trim_end()
        .strip_suffix("```")
        .unwrap_or(body)
        .trim()
}

pub async fn find_by_id(db: &DatabaseConnection, id: &str) -> Result<summaries::Model, Error> {
    let id = entity_api::uuid_parse_str(id)?;
    Ok(summary::find_by_id(db, id).await?)
}

/// Lists summaries for a complaint. Without a complaint id there is nothing to
/// look up and an empty page comes back.
pub async fn list(
    db: &DatabaseConnection,
    complaint_id: Option<&str>,
    limit: u64,
    offset: u64,
) -> Result<Page, Error> {
    let Some(complaint_id) = complaint_id.filter(|id| !id.trim().is_empty()) else {
        debug!("No complaint id given, returning empty summary list");
        return Ok(Page {
            items: Vec::new(),
            total: 0,
        });
    };

    Ok(summary::find_by_complaint_id(db, complaint_id, limit, offset).await?)
}

/// Removes expired summaries, returning how many were deleted.
pub async fn purge_expired(db: &DatabaseConnection) -> Result<u64, Error> {
    let deleted = summary::delete_expired(db).await?;
    info!("Purged {deleted} expired summaries");
    Ok(deleted)
}
