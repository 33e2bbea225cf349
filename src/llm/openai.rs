// src/llm/openai.rs

//! Responder over the OpenAI chat-completions API.
//! No wrappers; just reqwest and Rust, as the universe intended.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde_json::json;

use crate::error::ResponderError;
use crate::llm::Responder;

pub struct OpenAIResponder {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    model: String,
}

impl OpenAIResponder {
    pub fn new(
        base_url: &str,
        api_key: &str,
        model: &str,
        timeout: Duration,
    ) -> Result<Self, ResponderError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| ResponderError::Unavailable(err.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            model: model.to_string(),
        })
    }

    fn auth_header(&self) -> (&'static str, String) {
        ("Authorization", format!("Bearer {}", self.api_key))
    }
}

#[async_trait]
impl Responder for OpenAIResponder {
    async fn complete(
        &self,
        system_prompt: &str,
        user_text: &str,
    ) -> Result<String, ResponderError> {
        let url = format!("{}/chat/completions", self.base_url);
        let body = json!({
            "model": self.model,
            "messages": [
                {"role": "system", "content": system_prompt},
                {"role": "user", "content": user_text},
            ],
        });

        let resp = self
            .client
            .post(&url)
            .header(self.auth_header().0, self.auth_header().1.clone())
            .json(&body)
            .send()
            .await?;

        let status = resp.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(ResponderError::RateLimited);
        }
        if !status.is_success() {
            return Err(ResponderError::Unavailable(format!(
                "completion returned {}: {}",
                status,
                resp.text().await.unwrap_or_default()
            )));
        }

        let resp_json: serde_json::Value = resp
            .json()
            .await
            .map_err(|err| ResponderError::Unavailable(err.to_string()))?;

        let text = resp_json["choices"][0]["message"]["content"]
            .as_str()
            .unwrap_or("")
            .trim()
            .to_string();

        if text.is_empty() {
            return Err(ResponderError::Unavailable(
                "no content in completion".to_string(),
            ));
        }

        Ok(text)
    }
}
