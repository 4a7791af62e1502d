//! Provider abstraction for hosted large-language-model completions.
//!
//! Call summarization only needs a single capability from a model host: send a
//! prompt, get text back. The [`traits::completion::Provider`] trait captures
//! that so the summarization pipeline can run against Anthropic, a Bedrock
//! proxy, or a test double without changing application code.

pub mod error;
pub mod traits;
pub mod types;

// Re-export commonly used types
pub use error::Error;
pub use traits::completion::Provider;
pub use types::completion::{Completion, CompletionRequest};
