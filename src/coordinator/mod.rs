use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::domain::{ArticleStore, Entry, FeedSource, Language, RenderEvent, TextStyle};
use crate::enricher::Enricher;
use crate::fetcher::Fetcher;
use crate::media::ImageLoader;
use crate::normalizer::{Normalizer, MAX_ENTRIES_PER_FEED};
use crate::search;

/// Message handed from worker tasks to the UI task. Every message carries the
/// generation that produced it; the consumer drops anything stale.
#[derive(Debug)]
pub enum UiMessage {
    /// A new cycle (fetch or search) has begun; the view must reset.
    /// `expected` is an upper bound on entries for the progress gauge.
    CycleStarted { generation: u64, expected: usize },
    Render { generation: u64, event: RenderEvent },
    Progress { generation: u64, processed: u64 },
    /// All units and all spawned image tasks of this generation terminated.
    CycleFinished { generation: u64 },
}

/// Fans fetch/enrich/render work out across feeds and funnels every result
/// into a single mpsc channel consumed by the UI task.
///
/// Each cycle gets a fresh generation from a monotonic counter. Starting a
/// new cycle or search supersedes outstanding work: superseded tasks run to
/// completion, but their store writes and emissions are generation-checked
/// and silently discarded.
#[derive(Clone)]
pub struct Coordinator {
    fetcher: Arc<dyn Fetcher + Send + Sync>,
    normalizer: Normalizer,
    enricher: Enricher,
    images: ImageLoader,
    store: Arc<Mutex<ArticleStore>>,
    generation: Arc<AtomicU64>,
    tx: mpsc::UnboundedSender<UiMessage>,
}

/// Per-cycle progress counter. A fresh one is created for every generation,
/// so a straggler from a superseded cycle can never inflate the current
/// cycle's count.
type ProgressCounter = Arc<AtomicU64>;

impl Coordinator {
    pub fn new(
        fetcher: Arc<dyn Fetcher + Send + Sync>,
        normalizer: Normalizer,
        enricher: Enricher,
        images: ImageLoader,
        tx: mpsc::UnboundedSender<UiMessage>,
    ) -> Self {
        Self {
            fetcher,
            normalizer,
            enricher,
            images,
            store: Arc::new(Mutex::new(ArticleStore::new())),
            generation: Arc::new(AtomicU64::new(0)),
            tx,
        }
    }

    pub fn current_generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    /// Entries accumulated by the most recent cycle so far.
    pub fn snapshot(&self) -> Vec<Entry> {
        self.store.lock().expect("store lock poisoned").snapshot()
    }

    /// Launch a full fetch cycle: clear the store and view, then one
    /// concurrent unit per source. Returns the cycle's generation.
    pub fn start_cycle(&self, sources: Vec<FeedSource>, target: Language) -> u64 {
        let generation = self.begin_generation();
        self.store
            .lock()
            .expect("store lock poisoned")
            .reset(generation);

        let expected = sources.len() * MAX_ENTRIES_PER_FEED;
        self.send(UiMessage::CycleStarted {
            generation,
            expected,
        });
        info!("Starting fetch cycle {} for {} sources", generation, sources.len());

        let progress: ProgressCounter = Arc::new(AtomicU64::new(0));
        let (done_tx, done_rx) = mpsc::channel::<()>(1);
        for source in sources {
            let this = self.clone();
            let progress = progress.clone();
            let done = done_tx.clone();
            tokio::spawn(async move {
                this.run_feed_unit(source, target, generation, progress, done)
                    .await;
            });
        }
        drop(done_tx);

        self.watch_completion(generation, done_rx);
        generation
    }

    /// Re-drive the display path for store entries matching `term`, without
    /// refetching. Supersedes any outstanding cycle.
    pub fn start_search(&self, term: &str, target: Language) -> u64 {
        let generation = self.begin_generation();
        let matches = search::filter(term, &self.snapshot());

        self.send(UiMessage::CycleStarted {
            generation,
            expected: matches.len(),
        });
        debug!("Search '{}' matched {} entries", term, matches.len());

        let progress: ProgressCounter = Arc::new(AtomicU64::new(0));
        let (done_tx, done_rx) = mpsc::channel::<()>(1);
        let this = self.clone();
        let done = done_tx.clone();
        tokio::spawn(async move {
            for entry in &matches {
                if this.current_generation() != generation {
                    return;
                }
                this.display_entry(entry, target, generation, &progress, &done)
                    .await;
            }
        });
        drop(done_tx);

        self.watch_completion(generation, done_rx);
        generation
    }

    fn begin_generation(&self) -> u64 {
        self.generation.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Signals completion once every task holding a clone of the done sender
    /// has terminated, successfully or not. No timers involved.
    fn watch_completion(&self, generation: u64, mut done_rx: mpsc::Receiver<()>) {
        let this = self.clone();
        tokio::spawn(async move {
            while done_rx.recv().await.is_some() {}
            debug!("Cycle {} complete", generation);
            this.send(UiMessage::CycleFinished { generation });
        });
    }

    async fn run_feed_unit(
        &self,
        source: FeedSource,
        target: Language,
        generation: u64,
        progress: ProgressCounter,
        done: mpsc::Sender<()>,
    ) {
        let body = match self.fetcher.fetch(&source.url).await {
            Ok(body) => body,
            Err(e) => {
                warn!("Fetch failed for {}: {}", source, e);
                self.emit(
                    generation,
                    RenderEvent::ErrorNotice(format!("Error fetching news from {}: {}", source, e)),
                );
                return;
            }
        };

        let entries = match self.normalizer.normalize(&body) {
            Ok(entries) => entries,
            Err(e) => {
                warn!("Parse failed for {}: {}", source, e);
                self.emit(
                    generation,
                    RenderEvent::ErrorNotice(format!("Error fetching news from {}: {}", source, e)),
                );
                return;
            }
        };

        debug!("Fetched {} entries from {}", entries.len(), source);

        for entry in entries {
            // Stop writing once a newer cycle has reset the store.
            if !self
                .store
                .lock()
                .expect("store lock poisoned")
                .append(generation, entry.clone())
            {
                return;
            }
            self.display_entry(&entry, target, generation, &progress, &done)
                .await;
        }
    }

    /// Enrich one entry and emit its render events: inline notices for failed
    /// translations, title and description text blocks, one progress tick,
    /// then an independent image task per media URL.
    ///
    /// Shared by feed units and search re-display (which skips fetch and
    /// store-append).
    async fn display_entry(
        &self,
        entry: &Entry,
        target: Language,
        generation: u64,
        progress: &ProgressCounter,
        done: &mpsc::Sender<()>,
    ) {
        let enriched = self.enricher.enrich(entry, target).await;

        if self.current_generation() != generation {
            return;
        }

        for notice in enriched.notices {
            self.emit(generation, RenderEvent::ErrorNotice(notice));
        }
        self.emit(
            generation,
            RenderEvent::TextBlock {
                text: enriched.translated_title,
                style: TextStyle::Title,
            },
        );
        self.emit(
            generation,
            RenderEvent::TextBlock {
                text: enriched.translated_description,
                style: TextStyle::Body,
            },
        );

        let processed = progress.fetch_add(1, Ordering::SeqCst) + 1;
        self.send(UiMessage::Progress {
            generation,
            processed,
        });

        for url in &entry.media_urls {
            self.spawn_image_task(url.clone(), generation, done.clone());
        }
    }

    fn spawn_image_task(&self, url: String, generation: u64, done: mpsc::Sender<()>) {
        let this = self.clone();
        tokio::spawn(async move {
            let _done = done;
            if this.current_generation() != generation {
                return;
            }
            match this.images.load(&url).await {
                Ok(bitmap) => {
                    debug!("Loaded thumbnail {} ({}x{})", url, bitmap.width(), bitmap.height());
                    this.emit(generation, RenderEvent::Image(bitmap));
                }
                Err(e) => {
                    warn!("Image load failed for {}: {}", url, e);
                    this.emit(
                        generation,
                        RenderEvent::ErrorNotice(format!("Error loading image: {}", e)),
                    );
                }
            }
        });
    }

    fn emit(&self, generation: u64, event: RenderEvent) {
        if self.current_generation() != generation {
            return;
        }
        self.send(UiMessage::Render { generation, event });
    }

    fn send(&self, msg: UiMessage) {
        // The receiver disappearing means the UI is gone; the cycle is
        // abandoned and remaining output is dropped.
        let _ = self.tx.send(msg);
    }
}
