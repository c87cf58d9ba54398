use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;

use crate::app::{GazetteError, Result};
use crate::domain::Language;
use crate::enricher::Translator;

const DEFAULT_ENDPOINT: &str = "https://translate.googleapis.com/translate_a/single";

/// Translator backed by the public gtx translation endpoint.
///
/// The response is a nested JSON array whose first element lists translated
/// segments; the translated text is the concatenation of each segment's
/// first element.
pub struct HttpTranslator {
    client: Client,
    endpoint: String,
}

impl HttpTranslator {
    pub fn new() -> Self {
        Self::with_endpoint(DEFAULT_ENDPOINT)
    }

    pub fn with_endpoint(endpoint: &str) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(10))
            .user_agent("gazette/0.1.0")
            .build()
            .expect("Failed to build HTTP client");

        Self {
            client,
            endpoint: endpoint.to_string(),
        }
    }

    fn extract_translation(value: &Value) -> Option<String> {
        let segments = value.get(0)?.as_array()?;
        let mut text = String::new();
        for segment in segments {
            if let Some(part) = segment.get(0).and_then(Value::as_str) {
                text.push_str(part);
            }
        }
        Some(text)
    }
}

impl Default for HttpTranslator {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Translator for HttpTranslator {
    async fn translate(&self, text: &str, target: Language) -> Result<String> {
        if text.is_empty() {
            return Ok(String::new());
        }

        let response = self
            .client
            .get(&self.endpoint)
            .query(&[
                ("client", "gtx"),
                ("sl", "auto"),
                ("tl", target.code()),
                ("dt", "t"),
                ("q", text),
            ])
            .send()
            .await?;

        response.error_for_status_ref()?;
        let value: Value = response.json().await?;

        Self::extract_translation(&value)
            .ok_or_else(|| GazetteError::Translation("unexpected response shape".into()))
    }
}
