pub mod entry;
pub mod event;
pub mod store;

pub use entry::{EnrichedEntry, Entry, FeedSource, Language};
pub use event::{RenderEvent, TextStyle};
pub use store::ArticleStore;
