//! Ollama LLM prompt relay.
//!
//! Sends a prompt to a local Ollama instance and accumulates its
//! line-delimited streaming response into one string.

use serde::Deserialize;
use std::time::Duration;

use crate::error::{ServerError, ServerResult};

/// Default generate endpoint of a local Ollama install.
pub const DEFAULT_OLLAMA_URL: &str = "http://localhost:11434/api/generate";

/// Default model used for dashboard analysis.
pub const DEFAULT_OLLAMA_MODEL: &str = "llama3.2";

/// How long one relayed generation may take end to end.
const DEFAULT_RELAY_TIMEOUT: Duration = Duration::from_secs(60);

/// One line of the streaming generate response.
#[derive(Debug, Deserialize)]
struct GenerateLine {
    #[serde(default)]
    response: String,
    #[serde(default)]
    done: bool,
}

/// Relay client for the Ollama generate API.
#[derive(Debug, Clone)]
pub struct OllamaClient {
    client: reqwest::Client,
    url: String,
    model: String,
    timeout: Duration,
}

impl OllamaClient {
    pub fn new(client: reqwest::Client, url: String, model: String) -> Self {
        Self {
            client,
            url,
            model,
            timeout: DEFAULT_RELAY_TIMEOUT,
        }
    }

    /// Override the relay timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Send a prompt and accumulate the streamed response until `done`.
    ///
    /// The whole round trip is bounded by the relay timeout, so a stalled
    /// Ollama yields an error instead of a hung request. Unparseable lines
    /// are logged and skipped; they do not abort the relay.
    pub async fn generate(&self, prompt: &str) -> ServerResult<String> {
        let body = tokio::time::timeout(self.timeout, self.request(prompt))
            .await
            .map_err(|_| {
                ServerError::LlmRelay(format!(
                    "no response from {} within {:?}",
                    self.url, self.timeout
                ))
            })??;

        Ok(accumulate_stream(&body))
    }

    async fn request(&self, prompt: &str) -> ServerResult<String> {
        let payload = serde_json::json!({
            "model": self.model,
            "prompt": prompt,
        });

        let response = self
            .client
            .post(&self.url)
            .json(&payload)
            .send()
            .await
            .map_err(|e| ServerError::LlmRelay(e.to_string()))?;

        if !response.status().is_success() {
            return Err(ServerError::LlmRelay(format!(
                "Ollama returned {}",
                response.status()
            )));
        }

        response
            .text()
            .await
            .map_err(|e| ServerError::LlmRelay(e.to_string()))
    }
}

/// Concatenate the `response` fragments of a line-delimited generate stream.
fn accumulate_stream(body: &str) -> String {
    let mut full = String::new();
    for line in body.lines().filter(|l| !l.trim().is_empty()) {
        match serde_json::from_str::<GenerateLine>(line) {
            Ok(parsed) => {
                full.push_str(&parsed.response);
                if parsed.done {
                    break;
                }
            }
            Err(e) => tracing::warn!("Skipping unparseable Ollama line: {}", e),
        }
    }
    full
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accumulate_stream_joins_fragments() {
        let body = concat!(
            "{\"response\": \"The sky\", \"done\": false}\n",
            "{\"response\": \" is blue.\", \"done\": true}\n",
        );
        assert_eq!(accumulate_stream(body), "The sky is blue.");
    }

    #[test]
    fn test_accumulate_stream_stops_at_done() {
        let body = concat!(
            "{\"response\": \"done\", \"done\": true}\n",
            "{\"response\": \" trailing\", \"done\": false}\n",
        );
        assert_eq!(accumulate_stream(body), "done");
    }

    #[test]
    fn test_accumulate_stream_skips_bad_lines() {
        let body = concat!(
            "not json at all\n",
            "{\"response\": \"kept\", \"done\": true}\n",
        );
        assert_eq!(accumulate_stream(body), "kept");
    }

    #[test]
    fn test_accumulate_stream_empty_body() {
        assert_eq!(accumulate_stream(""), "");
    }

    #[tokio::test]
    async fn test_generate_times_out_against_silent_server() {
        // Bound but never accepted: the connection sits in the backlog and
        // no response ever arrives
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let url = format!("http://{}/api/generate", listener.local_addr().unwrap());

        let client = OllamaClient::new(
            reqwest::Client::new(),
            url,
            DEFAULT_OLLAMA_MODEL.to_string(),
        )
        .with_timeout(Duration::from_millis(200));

        let err = client.generate("hello").await.unwrap_err();
        assert!(matches!(err, ServerError::LlmRelay(_)));
        drop(listener);
    }

    #[tokio::test]
    async fn test_generate_unreachable_endpoint_is_relay_error() {
        let client = OllamaClient::new(
            reqwest::Client::new(),
            // Reserved TEST-NET address, nothing listens there
            "http://192.0.2.1:1/api/generate".to_string(),
            DEFAULT_OLLAMA_MODEL.to_string(),
        )
        .with_timeout(Duration::from_millis(200));

        let err = client.generate("hello").await.unwrap_err();
        assert!(matches!(err, ServerError::LlmRelay(_)));
    }
}
