//! Anthropic Messages API client for summary completions.
//!
//! Implements [`call_ai::Provider`] over `POST {base_url}/messages`. One prompt goes
//! out as a single user message and the text of the first content block comes back.

use async_trait::async_trait;
use call_ai::{Completion, CompletionRequest, Error, Provider};
use log::*;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const ANTHROPIC_VERSION: &str = "2023-06-01";

/// Used when a 429 arrives without a usable `retry-after` header.
const DEFAULT_RETRY_AFTER_SECS: u64 = 60;

#[derive(Debug, Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    system: Option<&'a str>,
    messages: Vec<Message<'a>>,
}

#[derive(Debug, Serialize)]
struct Message<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    content: Vec<ContentBlock>,
    #[serde(default)]
    stop_reason: Option<String>,
    #[serde(default)]
    usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
struct Usage {
    input_tokens: Option<u32>,
    output_tokens: Option<u32>,
}

/// Anthropic API client
pub struct AnthropicClient {
    client: reqwest::Client,
    base_url: String,
    model_id: String,
}

impl AnthropicClient {
    /// Create a new client for `model_id`. Requests give up after `timeout`.
    pub fn new(
        api_key: &str,
        base_url: &str,
        model_id: &str,
        timeout: Duration,
    ) -> Result<Self, Error> {
        if api_key.trim().is_empty() {
            return Err(Error::Configuration("Anthropic API key is empty".to_string()));
        }

        let mut headers = reqwest::header::HeaderMap::new();

        let mut key_value = reqwest::header::HeaderValue::from_str(api_key).map_err(|e| {
            warn!("Failed to create API key header: {:?}", e);
            Error::Configuration("Invalid API key format".to_string())
        })?;
        key_value.set_sensitive(true);
        headers.insert("x-api-key", key_value);
        headers.insert(
            "anthropic-version",
            reqwest::header::HeaderValue::from_static(ANTHROPIC_VERSION),
        );

        let client = reqwest::Client::builder()
            .use_rustls_tls()
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .map_err(|e| Error::Configuration(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            model_id: model_id.to_string(),
        })
    }
}

#[async_trait]
impl Provider for AnthropicClient {
    async fn complete(&self, request: CompletionRequest) -> Result<Completion, Error> {
        let url = format!("{}/messages", self.base_url);
        let body = MessagesRequest {
            model: &self.model_id,
            max_tokens: request.max_tokens,
            system: request.system.as_deref(),
            messages: vec![Message {
                role: "user",
                content: &request.prompt,
            }],
        };

        debug!(
            "Sending {} character prompt to Anthropic model {}",
            request.prompt.chars().count(),
            self.model_id
        );

        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                warn!("Failed to call Anthropic messages API: {:?}", e);
                from_transport(e)
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(from_status(response).await);
        }

        let parsed: MessagesResponse = response.json().await.map_err(|e| {
            warn!("Failed to parse Anthropic response: {:?}", e);
            Error::Deserialization(format!("Invalid response from Anthropic: {e}"))
        })?;

        let text = parsed
            .content
            .into_iter()
            .next()
            .and_then(|block| block.text)
            .ok_or_else(|| {
                warn!("Anthropic response contained no text content");
                Error::Deserialization("Response contained no text content".to_string())
            })?;

        let usage = parsed.usage.unwrap_or_default();
        let completion = Completion {
            text,
            input_tokens: usage.input_tokens,
            output_tokens: usage.output_tokens,
            stop_reason: parsed.stop_reason,
        };
        info!(
            "Anthropic completion finished: model={}, input_tokens={:?}, output_tokens={:?}, total_tokens={:?}, stop_reason={:?}",
            self.model_id,
            completion.input_tokens,
            completion.output_tokens,
            completion.total_tokens(),
            completion.stop_reason
        );

        Ok(completion)
    }

    fn provider_id(&self) -> &str {
        "anthropic"
    }

    fn model_id(&self) -> &str {
        &self.model_id
    }

    async fn verify_credentials(&self) -> Result<bool, Error> {
        let url = format!("{}/models", self.base_url);

        let response = self.client.get(&url).send().await.map_err(|e| {
            warn!("Failed to verify Anthropic API key: {:?}", e);
            from_transport(e)
        })?;

        match response.status() {
            status if status.is_success() => Ok(true),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Ok(false),
            _ => Err(from_status(response).await),
        }
    }
}

fn from_transport(err: reqwest::Error) -> Error {
    if err.is_timeout() {
        Error::Timeout(err.to_string())
    } else if err.is_builder() {
        Error::Configuration(err.to_string())
    } else {
        Error::Network(err.to_string())
    }
}

async fn from_status(response: reqwest::Response) -> Error {
    let status = response.status();
    let retry_after_seconds = response
        .headers()
        .get(reqwest::header::RETRY_AFTER)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.trim().parse::<u64>().ok())
        .unwrap_or(DEFAULT_RETRY_AFTER_SECS);
    let error_text = response.text().await.unwrap_or_default();
    error!("Anthropic API returned {}: {}", status, error_text);

    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Error::Authentication(error_text),
        StatusCode::NOT_FOUND => Error::NotFound(error_text),
        StatusCode::TOO_MANY_REQUESTS => Error::RateLimited {
            retry_after_seconds,
        },
        StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT => Error::Timeout(error_text),
        _ => Error::Provider(format!("{status}: {error_text}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::{Matcher, Server, ServerGuard};
    use serde_json::json;

    const MODEL: &str = "claude-3-sonnet-20240229";

    async fn setup_test_server() -> ServerGuard {
        Server::new_async().await
    }

    fn client_for(server: &ServerGuard) -> AnthropicClient {
        AnthropicClient::new("test_api_key_123", &server.url(), MODEL, Duration::from_secs(5))
            .unwrap()
    }

    fn success_body(text: &str) -> String {
        json!({
            "id": "msg_01",
            "type": "message",
            "role": "assistant",
            "content": [{ "type": "text", "text": text }],
            "stop_reason": "end_turn",
            "usage": { "input_tokens": 812, "output_tokens": 233 }
        })
        .to_string()
    }

    #[tokio::test]
    async fn complete_sends_messages_request_and_returns_first_text_block() {
        let mut server = setup_test_server().await;
        let mock = server
            .mock("POST", "/messages")
            .match_header("x-api-key", "test_api_key_123")
            .match_header("anthropic-version", ANTHROPIC_VERSION)
            .match_body(Matcher::Json(json!({
                "model": MODEL,
                "max_tokens": 2048,
                "messages": [{ "role": "user", "content": "Summarize this call" }]
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(success_body(r#"{"executive":"ok"}"#))
            .create_async()
            .await;

        let completion = client_for(&server)
            .complete(CompletionRequest::new("Summarize this call"))
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(completion.text, r#"{"executive":"ok"}"#);
        assert_eq!(completion.input_tokens, Some(812));
        assert_eq!(completion.output_tokens, Some(233));
        assert_eq!(completion.stop_reason.as_deref(), Some("end_turn"));
    }

    #[tokio::test]
    async fn complete_passes_system_prompt_through() {
        let mut server = setup_test_server().await;
        let mock = server
            .mock("POST", "/messages")
            .match_body(Matcher::PartialJson(json!({ "system": "be terse" })))
            .with_status(200)
            .with_body(success_body("fine"))
            .create_async()
            .await;

        let completion = client_for(&server)
            .complete(CompletionRequest::new("hi").system("be terse"))
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(completion.text, "fine");
    }

    #[tokio::test]
    async fn rate_limit_reads_retry_after_header() {
        let mut server = setup_test_server().await;
        let _mock = server
            .mock("POST", "/messages")
            .with_status(429)
            .with_header("retry-after", "12")
            .with_body(r#"{"type":"error","error":{"type":"rate_limit_error"}}"#)
            .create_async()
            .await;

        let result = client_for(&server)
            .complete(CompletionRequest::new("hi"))
            .await;

        assert!(matches!(
            result,
            Err(Error::RateLimited {
                retry_after_seconds: 12
            })
        ));
    }

    #[tokio::test]
    async fn rate_limit_without_header_uses_default_wait() {
        let mut server = setup_test_server().await;
        let _mock = server
            .mock("POST", "/messages")
            .with_status(429)
            .create_async()
            .await;

        let result = client_for(&server)
            .complete(CompletionRequest::new("hi"))
            .await;

        assert!(matches!(
            result,
            Err(Error::RateLimited {
                retry_after_seconds: DEFAULT_RETRY_AFTER_SECS
            })
        ));
    }

    #[tokio::test]
    async fn status_codes_map_to_error_variants() {
        let cases: [(usize, fn(&Error) -> bool); 5] = [
            (401, |e| matches!(e, Error::Authentication(_))),
            (403, |e| matches!(e, Error::Authentication(_))),
            (404, |e| matches!(e, Error::NotFound(_))),
            (504, |e| matches!(e, Error::Timeout(_))),
            (500, |e| matches!(e, Error::Provider(_))),
        ];

        for (status, is_expected) in cases {
            let mut server = setup_test_server().await;
            let _mock = server
                .mock("POST", "/messages")
                .with_status(status)
                .with_body("upstream said no")
                .create_async()
                .await;

            let err = client_for(&server)
                .complete(CompletionRequest::new("hi"))
                .await
                .unwrap_err();

            assert!(is_expected(&err), "status {status} mapped to {err:?}");
        }
    }

    #[tokio::test]
    async fn provider_error_keeps_response_body() {
        let mut server = setup_test_server().await;
        let _mock = server
            .mock("POST", "/messages")
            .with_status(529)
            .with_body("overloaded")
            .create_async()
            .await;

        let err = client_for(&server)
            .complete(CompletionRequest::new("hi"))
            .await
            .unwrap_err();

        match err {
            Error::Provider(msg) => assert!(msg.contains("overloaded")),
            other => panic!("Expected Provider error, got: {other:?}"),
        }
    }

    #[tokio::test]
    async fn empty_content_is_a_deserialization_error() {
        let mut server = setup_test_server().await;
        let _mock = server
            .mock("POST", "/messages")
            .with_status(200)
            .with_body(r#"{"content":[],"stop_reason":"end_turn"}"#)
            .create_async()
            .await;

        let result = client_for(&server)
            .complete(CompletionRequest::new("hi"))
            .await;

        assert!(matches!(result, Err(Error::Deserialization(_))));
    }

    #[tokio::test]
    async fn unreachable_host_is_a_network_error() {
        // Nothing listens on the discard port
        let client = AnthropicClient::new(
            "test_api_key_123",
            "http://127.0.0.1:9",
            MODEL,
            Duration::from_secs(5),
        )
        .unwrap();

        let result = client.complete(CompletionRequest::new("hi")).await;

        assert!(matches!(result, Err(Error::Network(_))));
    }

    #[tokio::test]
    async fn verify_credentials_reports_key_validity() {
        let mut server = setup_test_server().await;
        let _ok = server
            .mock("GET", "/models")
            .match_header("x-api-key", "test_api_key_123")
            .with_status(200)
            .with_body(r#"{"data":[]}"#)
            .create_async()
            .await;
        assert!(client_for(&server).verify_credentials().await.unwrap());

        let mut server = setup_test_server().await;
        let _denied = server
            .mock("GET", "/models")
            .with_status(401)
            .create_async()
            .await;
        assert!(!client_for(&server).verify_credentials().await.unwrap());
    }

    #[test]
    fn empty_api_key_is_a_configuration_error() {
        let result = AnthropicClient::new("  ", "http://localhost", MODEL, Duration::from_secs(5));

        assert!(matches!(result, Err(Error::Configuration(_))));
    }

    #[test]
    fn trailing_slash_is_trimmed_from_base_url() {
        let client = AnthropicClient::new(
            "key",
            "https://api.anthropic.com/v1/",
            MODEL,
            Duration::from_secs(5),
        )
        .unwrap();

        assert_eq!(client.base_url, "https://api.anthropic.com/v1");
        assert_eq!(client.model_id(), MODEL);
        assert_eq!(client.provider_id(), "anthropic");
    }
}
