use crate::{EnhanceError, EnhanceResult, TextEnhancer, Tone};
use async_trait::async_trait;
use serde_json::{json, Value};
use std::time::Duration;

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_API_KEY_ENV: &str = "API_KEY";
const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Text enhancer backed by the Gemini `generateContent` API
#[derive(Debug, Clone)]
pub struct GeminiEnhancer {
    client: reqwest::Client,
    endpoint: String,
    model: String,
    api_key: Option<String>,
    api_key_env: String,
}

impl GeminiEnhancer {
    pub fn new(model: impl Into<String>, api_key: Option<String>) -> EnhanceResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self {
            client,
            endpoint: DEFAULT_ENDPOINT.to_string(),
            model: model.into(),
            api_key: api_key.filter(|k| !k.trim().is_empty()),
            api_key_env: DEFAULT_API_KEY_ENV.to_string(),
        })
    }

    /// Read the key from `api_key_env`; a missing key surfaces on first use
    pub fn from_env(model: impl Into<String>, api_key_env: &str) -> EnhanceResult<Self> {
        let mut enhancer = Self::new(model, std::env::var(api_key_env).ok())?;
        enhancer.api_key_env = api_key_env.to_string();
        Ok(enhancer)
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into().trim_end_matches('/').to_string();
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn has_credential(&self) -> bool {
        self.api_key.is_some()
    }

    fn url(&self) -> String {
        format!("{}/models/{}:generateContent", self.endpoint, self.model)
    }
}

#[async_trait]
impl TextEnhancer for GeminiEnhancer {
    async fn enhance(&self, text: &str, tone: Tone) -> EnhanceResult<String> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| EnhanceError::MissingCredential(self.api_key_env.clone()))?;

        let request_body = json!({
            "contents": [{
                "parts": [{ "text": build_prompt(text, tone) }]
            }]
        });

        tracing::debug!("Requesting {} rewrite from {}", tone, self.model);

        let response = self
            .client
            .post(self.url())
            .header("Content-Type", "application/json")
            .header("x-goog-api-key", api_key)
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(EnhanceError::Service {
                status: status.as_u16(),
                body,
            });
        }

        let response_body: Value = response.json().await?;
        extract_text(&response_body)
    }
}

/// Instruction sent to the model
pub fn build_prompt(text: &str, tone: Tone) -> String {
    format!(
        "다음 텍스트를 '{}' 톤으로 모바일 뉴스레터나 초대장에 적합하게 자연스럽게 수정해줘.\n\
         텍스트: \"{}\"\n\n\
         결과만 출력해. 따옴표 없이.",
        tone, text
    )
}

/// Concatenated text parts of the first candidate
pub fn extract_text(response: &Value) -> EnhanceResult<String> {
    let parts = response
        .pointer("/candidates/0/content/parts")
        .and_then(Value::as_array)
        .ok_or_else(|| EnhanceError::InvalidResponse("no candidate content".to_string()))?;

    let text: String = parts
        .iter()
        .filter_map(|p| p.get("text").and_then(Value::as_str))
        .collect();

    let text = text.trim().trim_matches('"').trim();
    if text.is_empty() {
        return Err(EnhanceError::InvalidResponse("empty candidate text".to_string()));
    }

    Ok(text.to_string())
}
