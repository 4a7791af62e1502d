use uuid::Uuid;

pub mod prelude;

pub mod key_metrics;
pub mod language;
pub mod resolution_status;
pub mod sentiment;
pub mod summaries;

/// A type alias that represents any Entity's internal id field data type.
/// Aliased so that it's easy to change the underlying type if necessary.
pub type Id = Uuid;
