//! Error types for the `domain` layer.
use entity_api::error::{EntityApiErrorKind, Error as EntityApiError};
use std::collections::BTreeMap;
use std::error::Error as StdError;
use std::fmt;

/// Field name mapped to every message describing what is wrong with it.
pub type FieldErrors = BTreeMap<String, Vec<String>>;

/// Top-level domain error type.
/// Errors in the Domain layer are modeled as a tree structure
/// with `domain::error::Error` as the root type holding a tree of `error_kind`
/// enums that represent the kinds of errors that can occur in the domain layer or
/// in lower layers. The `source` field is used to hold the original error that caused
/// the domain error. The intent is to translate errors between layers while maintaining
/// layer boundaries. Ex. `domain` is dependent on `entity_api` and `call_ai`, and `web` is
/// dependent on `domain`, but `web` should not be dependent, directly, on either of them.
/// Ultimately the various `error_kind`s are used by `web` to return appropriate HTTP status
/// codes and messages to the client.
#[derive(Debug)]
pub struct Error {
    pub source: Option<Box<dyn StdError + Send + Sync>>,
    pub error_kind: DomainErrorKind,
}

/// Enum representing the major categories of errors that can occur in the `domain` layer.
#[derive(Debug, PartialEq)]
pub enum DomainErrorKind {
    /// The caller sent a request that failed validation.
    Validation(FieldErrors),
    Internal(InternalErrorKind),
    External(ExternalErrorKind),
}
/// Enum representing the various kinds of internal errors that can occur in the `domain` layer.
#[derive(Debug, PartialEq)]
pub enum InternalErrorKind {
    Entity(EntityErrorKind),
    Config,
    Other(String),
}

/// Enum representing the various kinds of entity errors that can bubble up from the "Entity" layer (`entity_api` and `entity`).
/// These errors are translated from the `entity_api` layer to the `domain` layer and reduced to a subset of error kinds
/// that are relevant to the `domain` layer.
#[derive(Debug, PartialEq)]
pub enum EntityErrorKind {
    NotFound,
    Invalid,
    DbTransaction,
    Other(String),
}

/// Enum representing the various kinds of external errors that can occur in the `domain` layer.
/// In practice these all come from the model host.
#[derive(Debug, PartialEq)]
pub enum ExternalErrorKind {
    Network,
    Timeout,
    RateLimited { retry_after_seconds: u64 },
    Other(String),
}

impl Error {
    pub fn validation(errors: FieldErrors) -> Self {
        Error {
            source: None,
            error_kind: DomainErrorKind::Validation(errors),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Domain Error: {self:?}")
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn StdError + 'static))
    }
}

// This is where we translate errors from the `entity_api` layer to the `domain` layer.
impl From<EntityApiError> for Error {
    fn from(err: EntityApiError) -> Self {
        let entity_error_kind = match err.error_kind {
            EntityApiErrorKind::RecordNotFound => EntityErrorKind::NotFound,
            EntityApiErrorKind::InvalidQueryTerm => EntityErrorKind::Invalid,
            EntityApiErrorKind::SystemError => EntityErrorKind::DbTransaction,
            _ => EntityErrorKind::Other("EntityErrorKind".to_string()),
        };

        Error {
            source: Some(Box::new(err)),
            error_kind: DomainErrorKind::Internal(InternalErrorKind::Entity(entity_error_kind)),
        }
    }
}

// Model host failures. Credentials and model selection are our own configuration,
// everything else is the upstream's problem.
impl From<call_ai::Error> for Error {
    fn from(err: call_ai::Error) -> Self {
        use call_ai::Error as AiError;

        let error_kind = match &err {
            AiError::Authentication(_) | AiError::Configuration(_) | AiError::NotFound(_) => {
                DomainErrorKind::Internal(InternalErrorKind::Config)
            }
            AiError::Network(_) => DomainErrorKind::External(ExternalErrorKind::Network),
            AiError::Timeout(_) => DomainErrorKind::External(ExternalErrorKind::Timeout),
            AiError::RateLimited {
                retry_after_seconds,
            } => DomainErrorKind::External(ExternalErrorKind::RateLimited {
                retry_after_seconds: *retry_after_seconds,
            }),
            AiError::Provider(msg) => DomainErrorKind::External(ExternalErrorKind::Other(
                format!("Model provider error: {msg}"),
            )),
            AiError::Deserialization(_) => DomainErrorKind::External(ExternalErrorKind::Other(
                "Invalid response from model provider".to_string(),
            )),
            AiError::Serialization(_) | AiError::Other(_) => {
                DomainErrorKind::Internal(InternalErrorKind::Other(err.to_string()))
            }
        };

        Error {
            source: Some(Box::new(err)),
            error_kind,
        }
    }
}
