pub mod http_translator;

use std::sync::Arc;

use async_trait::async_trait;

use crate::app::Result;
use crate::domain::{EnrichedEntry, Entry, Language};

pub use http_translator::HttpTranslator;

/// Seam for the network translation collaborator.
#[async_trait]
pub trait Translator {
    async fn translate(&self, text: &str, target: Language) -> Result<String>;
}

/// Produces translated copies of an entry's text fields.
///
/// A failed field falls back to its original text and records a notice; it
/// never aborts the rest of the entry's work, so media display proceeds even
/// when translation is down.
#[derive(Clone)]
pub struct Enricher {
    translator: Arc<dyn Translator + Send + Sync>,
}

impl Enricher {
    pub fn new(translator: Arc<dyn Translator + Send + Sync>) -> Self {
        Self { translator }
    }

    pub async fn enrich(&self, entry: &Entry, target: Language) -> EnrichedEntry {
        let mut notices = Vec::new();

        let translated_title = match self.translator.translate(&entry.title, target).await {
            Ok(text) => text,
            Err(e) => {
                tracing::warn!("Title translation failed: {}", e);
                notices.push(format!("Translation unavailable for title: {}", e));
                entry.title.clone()
            }
        };

        let translated_description = match self
            .translator
            .translate(&entry.description, target)
            .await
        {
            Ok(text) => text,
            Err(e) => {
                tracing::warn!("Description translation failed: {}", e);
                notices.push(format!("Translation unavailable for description: {}", e));
                entry.description.clone()
            }
        };

        EnrichedEntry {
            entry: entry.clone(),
            translated_title,
            translated_description,
            target_language: target,
            notices,
        }
    }
}
