//! AI-assisted rewriting of block text.
//!
//! Enhancement never mutates a document. Callers receive a proposal and
//! decide whether to apply it.

pub mod error;
pub mod gemini;
pub mod tone;

pub use error::{EnhanceError, EnhanceResult};
pub use gemini::{build_prompt, GeminiEnhancer, DEFAULT_API_KEY_ENV, DEFAULT_MODEL};
pub use tone::Tone;

use async_trait::async_trait;

/// Rewrites text in a given tone
#[async_trait]
pub trait TextEnhancer: Send + Sync {
    async fn enhance(&self, text: &str, tone: Tone) -> EnhanceResult<String>;
}

/// Enhanced text, or `text` unchanged if the enhancer fails
pub async fn enhance_or_original(enhancer: &dyn TextEnhancer, text: &str, tone: Tone) -> String {
    match enhancer.enhance(text, tone).await {
        Ok(enhanced) => enhanced,
        Err(e) => {
            tracing::warn!("Text enhancement failed, keeping original: {}", e);
            text.to_string()
        }
    }
}

/// Returns a fixed rewrite, or echoes the input with a tone marker
#[derive(Debug, Clone, Default)]
pub struct StaticEnhancer {
    reply: Option<String>,
}

impl StaticEnhancer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn replying(reply: impl Into<String>) -> Self {
        Self {
            reply: Some(reply.into()),
        }
    }
}

#[async_trait]
impl TextEnhancer for StaticEnhancer {
    async fn enhance(&self, text: &str, tone: Tone) -> EnhanceResult<String> {
        Ok(match &self.reply {
            Some(reply) => reply.clone(),
            None => format!("[{}] {}", tone, text),
        })
    }
}

/// Always fails; stands in for an unreachable service
#[derive(Debug, Clone, Default)]
pub struct FailingEnhancer;

#[async_trait]
impl TextEnhancer for FailingEnhancer {
    async fn enhance(&self, _text: &str, _tone: Tone) -> EnhanceResult<String> {
        Err(EnhanceError::Generic("enhancement service unavailable".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_fallback_returns_original() {
        let text = "원래 문장";
        assert_eq!(enhance_or_original(&FailingEnhancer, text, Tone::Friendly).await, text);
    }

    #[tokio::test]
    async fn test_static_enhancer() {
        let echo = StaticEnhancer::new();
        assert_eq!(echo.enhance("hi", Tone::Formal).await.unwrap(), "[formal] hi");

        let fixed = StaticEnhancer::replying("done");
        assert_eq!(enhance_or_original(&fixed, "hi", Tone::Friendly).await, "done");
    }

    #[tokio::test]
    async fn test_missing_credential_falls_back() {
        let gemini = GeminiEnhancer::new(DEFAULT_MODEL, Some("   ".to_string())).unwrap();
        assert!(!gemini.has_credential());
        assert_eq!(enhance_or_original(&gemini, "keep me", Tone::Formal).await, "keep me");
    }

    #[test]
    fn test_tone_parse() {
        assert_eq!("Promotional".parse::<Tone>().unwrap(), Tone::Promotional);
        assert!("sarcastic".parse::<Tone>().is_err());
        assert_eq!(Tone::default(), Tone::Friendly);
    }
}
