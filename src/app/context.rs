use std::sync::Arc;

use tokio::sync::mpsc;

use crate::coordinator::{Coordinator, UiMessage};
use crate::enricher::{Enricher, HttpTranslator, Translator};
use crate::fetcher::{Fetcher, HttpFetcher};
use crate::media::ImageLoader;
use crate::normalizer::Normalizer;

/// Wires the pipeline's collaborators together. One HTTP fetcher serves both
/// feed documents and thumbnail downloads.
pub struct AppContext {
    pub fetcher: Arc<dyn Fetcher + Send + Sync>,
    pub normalizer: Normalizer,
    pub enricher: Enricher,
    pub images: ImageLoader,
}

impl AppContext {
    pub fn new() -> Self {
        let fetcher: Arc<dyn Fetcher + Send + Sync> = Arc::new(HttpFetcher::new());
        let translator: Arc<dyn Translator + Send + Sync> = Arc::new(HttpTranslator::new());

        Self {
            normalizer: Normalizer::new(),
            enricher: Enricher::new(translator),
            images: ImageLoader::new(fetcher.clone()),
            fetcher,
        }
    }

    /// Build a coordinator that reports into `tx`.
    pub fn coordinator(&self, tx: mpsc::UnboundedSender<UiMessage>) -> Coordinator {
        Coordinator::new(
            self.fetcher.clone(),
            self.normalizer.clone(),
            self.enricher.clone(),
            self.images.clone(),
            tx,
        )
    }
}

impl Default for AppContext {
    fn default() -> Self {
        Self::new()
    }
}
