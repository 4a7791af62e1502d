pub use entity::{key_metrics, language, resolution_status, sentiment, summaries, Id};

pub mod error;
pub mod summary;

pub fn uuid_parse_str(uuid_str: &str) -> Result<Id, error::Error> {
    Id::parse_str(uuid_str).map_err(|_| error::Error {
        source: None,
        error_kind: error::EntityApiErrorKind::InvalidQueryTerm,
    })
}
