//! # Gazette
//!
//! A terminal news aggregator that fetches multiple feeds concurrently,
//! translates each entry, loads thumbnails, and streams everything into a
//! live-updating view.
//!
//! ## Architecture
//!
//! ```text
//! Fetcher → Normalizer → Coordinator → (Enricher, ImageLoader) → channel → PresentationSink
//! ```
//!
//! The coordinator fans one tokio task out per feed. Each unit fetches and
//! parses its feed, then per entry translates the text fields, emits render
//! events, and spawns independent image tasks. All output crosses to the UI
//! task over a single mpsc channel, tagged with the generation of the cycle
//! that produced it; the UI drops anything stale. Cycle completion is an
//! explicit channel-close signal, never a timer.
//!
//! ## Modules
//!
//! - [`app`]: application context and error types
//! - [`cli`]: command-line interface definitions
//! - [`config`]: TOML configuration (feed list, language, theme)
//! - [`coordinator`]: the concurrent fetch/enrich/render pipeline
//! - [`domain`]: core models (Entry, Language, ArticleStore, RenderEvent)
//! - [`enricher`]: translation collaborator and per-entry enrichment
//! - [`fetcher`]: HTTP byte fetching behind an async trait
//! - [`media`]: thumbnail download and decoding
//! - [`normalizer`]: RSS/Atom parsing into domain entries
//! - [`search`]: in-memory filter over fetched entries
//! - [`tui`]: terminal user interface

pub mod app;
pub mod cli;
pub mod config;
pub mod coordinator;
pub mod domain;
pub mod enricher;
pub mod fetcher;
pub mod media;
pub mod normalizer;
pub mod search;
pub mod tui;
