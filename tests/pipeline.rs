//! End-to-end pipeline tests with in-process fakes of the network seams.

use std::collections::HashMap;
use std::io::{self, Cursor};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use image::{DynamicImage, ImageFormat};
use tokio::sync::{mpsc, Notify};

use gazette::app::{GazetteError, Result};
use gazette::coordinator::{Coordinator, UiMessage};
use gazette::domain::{FeedSource, Language, RenderEvent, TextStyle};
use gazette::enricher::{Enricher, Translator};
use gazette::fetcher::Fetcher;
use gazette::media::ImageLoader;
use gazette::normalizer::Normalizer;
use gazette::tui::app::TuiApp;
use gazette::tui::theme::Theme;

/// Serves canned bodies by URL; unknown URLs time out. A single URL can be
/// gated on a Notify to hold one download open across cycle boundaries.
#[derive(Default)]
struct FakeFetcher {
    bodies: HashMap<String, Vec<u8>>,
    gate: Option<(String, Arc<Notify>)>,
}

#[async_trait]
impl Fetcher for FakeFetcher {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        if let Some((gated, notify)) = &self.gate {
            if gated == url {
                notify.notified().await;
            }
        }
        self.bodies.get(url).cloned().ok_or_else(|| {
            GazetteError::Io(io::Error::new(
                io::ErrorKind::TimedOut,
                format!("connection to {} timed out", url),
            ))
        })
    }
}

/// Records every call; fails any text containing "poison".
#[derive(Default)]
struct RecordingTranslator {
    calls: Mutex<Vec<(String, Language)>>,
}

#[async_trait]
impl Translator for RecordingTranslator {
    async fn translate(&self, text: &str, target: Language) -> Result<String> {
        self.calls
            .lock()
            .unwrap()
            .push((text.to_string(), target));
        if text.contains("poison") {
            return Err(GazetteError::Translation("simulated outage".into()));
        }
        Ok(format!("[{}] {}", target, text))
    }
}

fn rss_doc(entries: &[(&str, &str, Option<&str>)]) -> Vec<u8> {
    let items: String = entries
        .iter()
        .map(|(title, description, media)| {
            let media = media
                .map(|url| format!(r#"<media:content url="{url}" type="image/png"/>"#))
                .unwrap_or_default();
            format!(
                "<item><title>{title}</title><link>https://example.com/a</link>\
                 <description>{description}</description>{media}</item>"
            )
        })
        .collect();
    format!(
        r#"<?xml version="1.0"?><rss version="2.0" xmlns:media="http://search.yahoo.com/mrss/"><channel><title>feed</title>{items}</channel></rss>"#
    )
    .into_bytes()
}

fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let img = DynamicImage::new_rgba8(width, height);
    let mut buf = Cursor::new(Vec::new());
    img.write_to(&mut buf, ImageFormat::Png).unwrap();
    buf.into_inner()
}

fn source(url: &str) -> FeedSource {
    FeedSource {
        url: url.to_string(),
    }
}

fn build(
    fetcher: Arc<dyn Fetcher + Send + Sync>,
    translator: Arc<dyn Translator + Send + Sync>,
) -> (Coordinator, mpsc::UnboundedReceiver<UiMessage>) {
    let (tx, rx) = mpsc::unbounded_channel();
    let coordinator = Coordinator::new(
        fetcher.clone(),
        Normalizer::new(),
        Enricher::new(translator),
        ImageLoader::new(fetcher),
        tx,
    );
    (coordinator, rx)
}

async fn recv(rx: &mut mpsc::UnboundedReceiver<UiMessage>) -> UiMessage {
    tokio::time::timeout(Duration::from_secs(5), rx.recv())
        .await
        .expect("timed out waiting for message")
        .expect("channel closed")
}

async fn collect_until_finished(
    rx: &mut mpsc::UnboundedReceiver<UiMessage>,
    generation: u64,
) -> Vec<UiMessage> {
    let mut messages = Vec::new();
    loop {
        let msg = recv(rx).await;
        let finished =
            matches!(&msg, UiMessage::CycleFinished { generation: g } if *g == generation);
        messages.push(msg);
        if finished {
            return messages;
        }
    }
}

fn text_blocks(messages: &[UiMessage], generation: u64) -> Vec<(String, TextStyle)> {
    messages
        .iter()
        .filter_map(|msg| match msg {
            UiMessage::Render {
                generation: g,
                event: RenderEvent::TextBlock { text, style },
            } if *g == generation => Some((text.clone(), *style)),
            _ => None,
        })
        .collect()
}

fn error_notices(messages: &[UiMessage], generation: u64) -> Vec<String> {
    messages
        .iter()
        .filter_map(|msg| match msg {
            UiMessage::Render {
                generation: g,
                event: RenderEvent::ErrorNotice(text),
            } if *g == generation => Some(text.clone()),
            _ => None,
        })
        .collect()
}

fn image_count(messages: &[UiMessage], generation: u64) -> usize {
    messages
        .iter()
        .filter(|msg| {
            matches!(
                msg,
                UiMessage::Render {
                    generation: g,
                    event: RenderEvent::Image(_),
                } if *g == generation
            )
        })
        .count()
}

fn progress_values(messages: &[UiMessage], generation: u64) -> Vec<u64> {
    messages
        .iter()
        .filter_map(|msg| match msg {
            UiMessage::Progress {
                generation: g,
                processed,
            } if *g == generation => Some(*processed),
            _ => None,
        })
        .collect()
}

#[tokio::test]
async fn two_sources_one_times_out() {
    let mut fetcher = FakeFetcher::default();
    fetcher.bodies.insert(
        "https://feeds.test/a".into(),
        rss_doc(&[
            ("First", "first body", Some("https://img.test/1.png")),
            ("Second", "second body", None),
            ("Third", "third body", None),
        ]),
    );
    fetcher
        .bodies
        .insert("https://img.test/1.png".into(), png_bytes(20, 10));

    let (coordinator, mut rx) = build(
        Arc::new(fetcher),
        Arc::new(RecordingTranslator::default()),
    );

    let generation = coordinator.start_cycle(
        vec![source("https://feeds.test/a"), source("https://feeds.test/b")],
        Language::Spanish,
    );
    let messages = collect_until_finished(&mut rx, generation).await;

    // 3 entries x (title + description), in feed-document order for the unit.
    let blocks = text_blocks(&messages, generation);
    assert_eq!(blocks.len(), 6);
    let titles: Vec<_> = blocks
        .iter()
        .filter(|(_, style)| *style == TextStyle::Title)
        .map(|(text, _)| text.clone())
        .collect();
    assert_eq!(titles, vec!["[es] First", "[es] Second", "[es] Third"]);

    // Exactly one notice, naming the failed source.
    let notices = error_notices(&messages, generation);
    assert_eq!(notices.len(), 1);
    assert!(notices[0].contains("https://feeds.test/b"));

    assert_eq!(image_count(&messages, generation), 1);
    assert_eq!(progress_values(&messages, generation).last(), Some(&3));
    assert_eq!(coordinator.snapshot().len(), 3);
}

#[tokio::test]
async fn malformed_feed_never_blocks_siblings() {
    let mut fetcher = FakeFetcher::default();
    for name in ["a", "b", "d", "e"] {
        fetcher.bodies.insert(
            format!("https://feeds.test/{name}"),
            rss_doc(&[(name, "body", None)]),
        );
    }
    fetcher
        .bodies
        .insert("https://feeds.test/c".into(), b"not xml at all".to_vec());

    let (coordinator, mut rx) = build(
        Arc::new(fetcher),
        Arc::new(RecordingTranslator::default()),
    );

    let sources = ["a", "b", "c", "d", "e"]
        .iter()
        .map(|n| source(&format!("https://feeds.test/{n}")))
        .collect();
    let generation = coordinator.start_cycle(sources, Language::English);
    let messages = collect_until_finished(&mut rx, generation).await;

    assert_eq!(text_blocks(&messages, generation).len(), 8);
    let notices = error_notices(&messages, generation);
    assert_eq!(notices.len(), 1);
    assert!(notices[0].contains("https://feeds.test/c"));
    assert_eq!(coordinator.snapshot().len(), 4);
}

#[tokio::test]
async fn stale_generation_output_is_discarded() {
    let gate = Arc::new(Notify::new());
    let mut fetcher = FakeFetcher::default();
    fetcher.bodies.insert(
        "https://feeds.test/a".into(),
        rss_doc(&[("Gated", "body", Some("https://img.test/slow.png"))]),
    );
    fetcher
        .bodies
        .insert("https://img.test/slow.png".into(), png_bytes(8, 8));
    fetcher.gate = Some(("https://img.test/slow.png".into(), gate.clone()));

    let (coordinator, mut rx) = build(
        Arc::new(fetcher),
        Arc::new(RecordingTranslator::default()),
    );

    let first = coordinator.start_cycle(vec![source("https://feeds.test/a")], Language::English);

    // Wait for the entry's text to land, so the image task is outstanding.
    let mut messages = Vec::new();
    while text_blocks(&messages, first).len() < 2 {
        messages.push(recv(&mut rx).await);
    }

    // Supersede the cycle while its image download is still held open.
    let second = coordinator.start_cycle(Vec::new(), Language::English);
    gate.notify_one();

    let mut finished = (false, false);
    while !(finished.0 && finished.1) {
        let msg = recv(&mut rx).await;
        if let UiMessage::CycleFinished { generation } = &msg {
            finished.0 |= *generation == first;
            finished.1 |= *generation == second;
        }
        messages.push(msg);
    }

    // The stale image never surfaces, coordinator-side.
    assert_eq!(image_count(&messages, first), 0);
    assert_eq!(image_count(&messages, second), 0);

    // And a consumer replaying the whole stream ends up with a clean view.
    let mut app = TuiApp::new(Theme::Light, Language::English);
    for msg in messages {
        app.apply(msg);
    }
    assert!(app.sink.is_empty());
    assert_eq!(app.current_generation, second);
}

#[tokio::test]
async fn progress_increases_by_one_per_entry() {
    let mut fetcher = FakeFetcher::default();
    fetcher.bodies.insert(
        "https://feeds.test/a".into(),
        rss_doc(&[("A1", "body", None), ("A2", "body", None)]),
    );
    fetcher.bodies.insert(
        "https://feeds.test/b".into(),
        rss_doc(&[("B1", "body", None), ("B2", "body", None)]),
    );

    let (coordinator, mut rx) = build(
        Arc::new(fetcher),
        Arc::new(RecordingTranslator::default()),
    );

    let generation = coordinator.start_cycle(
        vec![source("https://feeds.test/a"), source("https://feeds.test/b")],
        Language::English,
    );
    let messages = collect_until_finished(&mut rx, generation).await;

    let values = progress_values(&messages, generation);
    assert_eq!(values.len(), 4);
    let mut sorted = values.clone();
    sorted.sort_unstable();
    assert_eq!(sorted, vec![1, 2, 3, 4]);
}

#[tokio::test]
async fn language_switch_rerequests_translation() {
    let mut fetcher = FakeFetcher::default();
    fetcher.bodies.insert(
        "https://feeds.test/a".into(),
        rss_doc(&[("One", "uno", None), ("Two", "dos", None)]),
    );

    let translator = Arc::new(RecordingTranslator::default());
    let (coordinator, mut rx) = build(Arc::new(fetcher), translator.clone());

    let first = coordinator.start_cycle(vec![source("https://feeds.test/a")], Language::Spanish);
    collect_until_finished(&mut rx, first).await;
    assert_eq!(translator.calls.lock().unwrap().len(), 4);

    // Re-displaying after a language switch must hit the translator again.
    let second = coordinator.start_search("", Language::Japanese);
    let messages = collect_until_finished(&mut rx, second).await;

    let calls = translator.calls.lock().unwrap();
    assert_eq!(calls.len(), 8);
    assert!(calls[4..].iter().all(|(_, lang)| *lang == Language::Japanese));
    drop(calls);

    let titles: Vec<_> = text_blocks(&messages, second)
        .into_iter()
        .filter(|(_, style)| *style == TextStyle::Title)
        .map(|(text, _)| text)
        .collect();
    assert_eq!(titles, vec!["[ja] One", "[ja] Two"]);
}

#[tokio::test]
async fn search_reemits_matches_in_store_order() {
    let mut fetcher = FakeFetcher::default();
    fetcher.bodies.insert(
        "https://feeds.test/a".into(),
        rss_doc(&[
            ("Alpha event", "about rust", None),
            ("Beta event", "about weather", None),
            ("Gamma", "more RUST talk", None),
        ]),
    );

    let (coordinator, mut rx) = build(
        Arc::new(fetcher),
        Arc::new(RecordingTranslator::default()),
    );

    let first = coordinator.start_cycle(vec![source("https://feeds.test/a")], Language::English);
    collect_until_finished(&mut rx, first).await;

    let second = coordinator.start_search("rust", Language::English);
    let messages = collect_until_finished(&mut rx, second).await;

    let titles: Vec<_> = text_blocks(&messages, second)
        .into_iter()
        .filter(|(_, style)| *style == TextStyle::Title)
        .map(|(text, _)| text)
        .collect();
    assert_eq!(titles, vec!["[en] Alpha event", "[en] Gamma"]);

    // Search never clears the store.
    assert_eq!(coordinator.snapshot().len(), 3);
}

#[tokio::test]
async fn translation_failure_falls_back_to_original_text() {
    let mut fetcher = FakeFetcher::default();
    fetcher.bodies.insert(
        "https://feeds.test/a".into(),
        rss_doc(&[("poison title", "healthy body", None)]),
    );

    let (coordinator, mut rx) = build(
        Arc::new(fetcher),
        Arc::new(RecordingTranslator::default()),
    );

    let generation =
        coordinator.start_cycle(vec![source("https://feeds.test/a")], Language::French);
    let messages = collect_until_finished(&mut rx, generation).await;

    // Both fields still render; the failed one keeps its original text.
    let blocks = text_blocks(&messages, generation);
    assert_eq!(blocks.len(), 2);
    assert_eq!(blocks[0].0, "poison title");
    assert_eq!(blocks[1].0, "[fr] healthy body");

    let notices = error_notices(&messages, generation);
    assert_eq!(notices.len(), 1);
    assert!(notices[0].contains("title"));

    assert_eq!(progress_values(&messages, generation).last(), Some(&1));
}
