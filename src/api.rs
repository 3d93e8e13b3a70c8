use crate::{
    config::Config,
    constants::FALLBACK_REPLY,
    errors::{NexaError, NexaResult},
    models::{ChatReply, ChatRequest},
};
use log::{info, warn};
use reqwest::Client;
use std::time::Instant;

/// Client for the chat endpoint.
#[derive(Debug, Clone)]
pub struct ChatClient {
    client: Client,
    endpoint: String,
}

impl ChatClient {
    pub fn new(endpoint: impl Into<String>, client: Client) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
        }
    }

    pub fn from_config(config: &Config) -> NexaResult<Self> {
        let client = Client::builder()
            .connect_timeout(config.connect_timeout())
            .build()?;
        Ok(Self::new(config.endpoint.clone(), client))
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Sends one user message and returns the reply text.
    ///
    /// A response without a usable `reply` yields the fallback text. Transport
    /// failures, non-2xx statuses and bodies that aren't JSON are errors.
    pub async fn send(&self, message: &str) -> NexaResult<String> {
        let started = Instant::now();
        let response = self
            .client
            .post(&self.endpoint)
            .json(&ChatRequest { message })
            .send()
            .await
            .map_err(|e| NexaError::api_error(format!("Request failed: {}", e)))?;

        let status = response.status();
        info!(
            "POST {} - {} chars - Status: {} - Time: {}ms",
            self.endpoint,
            message.chars().count(),
            status.as_u16(),
            started.elapsed().as_millis()
        );

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            warn!("Chat endpoint returned {}: {}", status, error_text);
            return Err(NexaError::api_error(format!(
                "API returned error: {} - {}",
                status, error_text
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| NexaError::api_error(format!("Failed to read API response: {}", e)))?;
        let parsed: ChatReply = serde_json::from_str(&body)
            .map_err(|e| NexaError::api_error(format!("Failed to parse API response: {}", e)))?;

        Ok(parsed
            .reply
            .filter(|reply| !reply.is_empty())
            .unwrap_or_else(|| FALLBACK_REPLY.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::{
        matchers::{body_json, header, method, path},
        Mock, MockServer, ResponseTemplate,
    };

    async fn client_for(server: &MockServer) -> ChatClient {
        ChatClient::new(format!("{}/chat", server.uri()), Client::new())
    }

    #[tokio::test]
    async fn test_send_posts_message_and_returns_reply() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat"))
            .and(header("content-type", "application/json"))
            .and(body_json(json!({ "message": "hi there" })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "reply": "hello" })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let reply = client_for(&mock_server).await.send("hi there").await.unwrap();
        assert_eq!(reply, "hello");
    }

    #[tokio::test]
    async fn test_missing_or_empty_reply_uses_fallback() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(body_json(json!({ "message": "a" })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "other": 1 })))
            .mount(&mock_server)
            .await;
        Mock::given(method("POST"))
            .and(body_json(json!({ "message": "b" })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "reply": "" })))
            .mount(&mock_server)
            .await;
        Mock::given(method("POST"))
            .and(body_json(json!({ "message": "c" })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "reply": null })))
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server).await;
        for message in ["a", "b", "c"] {
            assert_eq!(client.send(message).await.unwrap(), FALLBACK_REPLY);
        }
    }

    #[tokio::test]
    async fn test_non_success_status_is_an_error() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500).set_body_json(json!({ "reply": "ignored" })))
            .mount(&mock_server)
            .await;

        let result = client_for(&mock_server).await.send("hi").await;
        assert!(matches!(result, Err(NexaError::Api(_))));
    }

    #[tokio::test]
    async fn test_malformed_json_is_an_error() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&mock_server)
            .await;

        let result = client_for(&mock_server).await.send("hi").await;
        assert!(matches!(result, Err(NexaError::Api(_))));
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_an_error() {
        let client = ChatClient::new("http://127.0.0.1:1/chat", Client::new());
        assert!(matches!(client.send("hi").await, Err(NexaError::Api(_))));
    }
}
