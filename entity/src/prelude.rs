pub use super::summaries::Entity as Summaries;
