//! Error types for model completion operations.

use std::fmt;

/// Universal error type that abstracts provider-specific errors into common variants.
///
/// All provider implementations map their native errors (HTTP status codes,
/// client failures, malformed payloads) to these variants so callers can decide
/// how to surface them without knowing which model host produced them.
#[derive(Debug)]
pub enum Error {
    /// API key missing, invalid, or lacking access to the requested model.
    Authentication(String),

    /// Connection refused, DNS failure, TLS failure or similar transport problems.
    Network(String),

    /// Invalid parameters or malformed client configuration.
    Configuration(String),

    /// The provider rejected or failed the request for its own reasons.
    Provider(String),

    /// The request exceeded the configured or provider-enforced timeout.
    Timeout(String),

    /// Unknown model or endpoint.
    NotFound(String),

    /// Provider rate limit exceeded. Callers must wait before trying again.
    RateLimited { retry_after_seconds: u64 },

    /// Failed to serialize the outgoing request body.
    Serialization(String),

    /// The provider answered with a body that does not match the expected shape.
    Deserialization(String),

    /// Catch-all for errors that don't fit other categories.
    Other(Box<dyn std::error::Error + Send + Sync>),
}

impl Error {
    /// True for failures that may succeed if the same request is sent later.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            Error::Network(_) | Error::Timeout(_) | Error::RateLimited { .. }
        )
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Authentication(msg) => write!(f, "Authentication failed: {}", msg),
            Error::Network(msg) => write!(f, "Network error: {}", msg),
            Error::Configuration(msg) => write!(f, "Invalid configuration: {}", msg),
            Error::Provider(msg) => write!(f, "Provider error: {}", msg),
            Error::Timeout(msg) => write!(f, "Timeout: {}", msg),
            Error::NotFound(msg) => write!(f, "Not found: {}", msg),
            Error::RateLimited {
                retry_after_seconds,
            } => {
                write!(f, "Rate limited: retry after {}s", retry_after_seconds)
            }
            Error::Serialization(msg) => write!(f, "Serialization error: {}", msg),
            Error::Deserialization(msg) => write!(f, "Deserialization error: {}", msg),
            Error::Other(err) => write!(f, "Other error: {}", err),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Other(err) => Some(err.as_ref()),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Deserialization(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rate_limited_display_includes_retry_after() {
        let err = Error::RateLimited {
            retry_after_seconds: 30,
        };
        assert_eq!(err.to_string(), "Rate limited: retry after 30s");
    }

    #[test]
    fn transient_errors_are_network_timeout_and_rate_limit() {
        assert!(Error::Network("reset".into()).is_transient());
        assert!(Error::Timeout("60s".into()).is_transient());
        assert!(Error::RateLimited {
            retry_after_seconds: 1
        }
        .is_transient());
        assert!(!Error::Authentication("bad key".into()).is_transient());
        assert!(!Error::Deserialization("eof".into()).is_transient());
    }

    #[test]
    fn serde_json_errors_become_deserialization() {
        let err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        assert!(matches!(Error::from(err), Error::Deserialization(_)));
    }

    #[test]
    fn other_exposes_its_source() {
        use std::error::Error as _;
        let io = std::io::Error::new(std::io::ErrorKind::Other, "boom");
        let err = Error::Other(Box::new(io));
        assert!(err.source().is_some());
        assert!(Error::Provider("x".into()).source().is_none());
    }
}
