//! Completion provider trait.

use crate::types::completion::{Completion, CompletionRequest};
use crate::Error;
use async_trait::async_trait;

/// Abstraction for hosted text-completion models.
///
/// Implementations send one prompt to a model host and return the text of the
/// first content block. Nothing is streamed and nothing is retried here; a
/// failed call surfaces as an [`Error`] variant and the caller decides.
#[async_trait]
pub trait Provider: Send + Sync {
    /// Send the prompt and wait for the full completion.
    async fn complete(&self, request: CompletionRequest) -> std::result::Result<Completion, Error>;

    /// Return unique identifier for this provider (e.g., "anthropic", "bedrock").
    ///
    /// Used in logs and token cost tracking.
    fn provider_id(&self) -> &str;

    /// Model the provider sends requests to.
    fn model_id(&self) -> &str;

    /// Validate API credentials by making a lightweight test request.
    ///
    /// Returns false if credentials are invalid or lack access to the model.
    async fn verify_credentials(&self) -> std::result::Result<bool, Error>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockall::mock;

    mock! {
        pub TestProvider {}

        #[async_trait]
        impl Provider for TestProvider {
            async fn complete(&self, request: CompletionRequest) -> std::result::Result<Completion, Error>;
            fn provider_id(&self) -> &str;
            fn model_id(&self) -> &str;
            async fn verify_credentials(&self) -> std::result::Result<bool, Error>;
        }
    }

    #[tokio::test]
    async fn provider_is_usable_as_trait_object() {
        let mut mock = MockTestProvider::new();
        mock.expect_complete()
            .withf(|req| req.prompt == "hello" && req.max_tokens == 16)
            .times(1)
            .returning(|_| Ok(Completion::new("hi there")));
        mock.expect_provider_id().return_const("test".to_string());

        let provider: Box<dyn Provider> = Box::new(mock);
        let completion = provider
            .complete(CompletionRequest::new("hello").max_tokens(16))
            .await
            .unwrap();

        assert_eq!(completion.text, "hi there");
        assert_eq!(provider.provider_id(), "test");
    }
}
