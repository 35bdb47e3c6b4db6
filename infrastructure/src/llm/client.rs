//! Minimal Ollama client over `/api/generate`.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;

use nlmake_application::ports::InterpretationError;

#[derive(Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
    format: &'a str,
}

#[derive(Deserialize)]
struct GenerateResponse {
    response: String,
}

/// Blocking-free HTTP client for one Ollama model.
#[derive(Clone)]
pub struct OllamaClient {
    http: reqwest::Client,
    base_url: String,
    model: String,
}

impl OllamaClient {
    pub fn new(
        base_url: impl Into<String>,
        model: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, InterpretationError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| InterpretationError::ServiceUnavailable(e.to_string()))?;
        Ok(OllamaClient {
            http,
            base_url: base_url.into(),
            model: model.into(),
        })
    }

    /// Send a prompt and return the raw response text. `format: "json"`
    /// asks the model to emit a single JSON object.
    pub async fn generate(&self, prompt: &str) -> Result<String, InterpretationError> {
        let url = format!("{}/api/generate", self.base_url.trim_end_matches('/'));
        let request = GenerateRequest {
            model: &self.model,
            prompt,
            stream: false,
            format: "json",
        };
        debug!(model = %self.model, prompt_bytes = prompt.len(), "sending generate request");

        let response = self
            .http
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    InterpretationError::Timeout
                } else {
                    InterpretationError::ServiceUnavailable(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(InterpretationError::ServiceUnavailable(format!(
                "Ollama returned {status}"
            )));
        }

        let body: GenerateResponse = response
            .json()
            .await
            .map_err(|e| InterpretationError::MalformedResponse(e.to_string()))?;
        Ok(body.response)
    }
}
