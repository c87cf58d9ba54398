use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::app::GazetteError;

/// One configured feed endpoint. The set of sources is fixed at startup.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FeedSource {
    pub url: String,
}

impl FeedSource {
    /// Validate and wrap a feed URL.
    pub fn parse(url: &str) -> crate::app::Result<Self> {
        url::Url::parse(url)?;
        Ok(Self {
            url: url.to_string(),
        })
    }
}

impl fmt::Display for FeedSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.url)
    }
}

/// A single feed entry after normalization. The description has already been
/// reduced to plain text; media URLs come from entry-level media metadata and
/// may be empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub title: String,
    pub description: String,
    pub link: Option<String>,
    pub media_urls: Vec<String>,
}

impl Entry {
    pub fn display_title(&self) -> &str {
        if self.title.is_empty() {
            "(Untitled)"
        } else {
            &self.title
        }
    }
}

/// An entry plus its translated fields. Produced fresh on every display pass;
/// translations are never cached across language switches.
#[derive(Debug, Clone)]
pub struct EnrichedEntry {
    pub entry: Entry,
    pub translated_title: String,
    pub translated_description: String,
    pub target_language: Language,
    /// Per-field translation failures, surfaced as inline error notices.
    pub notices: Vec<String>,
}

/// The closed set of target languages offered to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    English,
    Spanish,
    French,
    German,
    ChineseSimplified,
    Japanese,
    Russian,
    Arabic,
}

impl Language {
    pub const ALL: [Language; 8] = [
        Language::English,
        Language::Spanish,
        Language::French,
        Language::German,
        Language::ChineseSimplified,
        Language::Japanese,
        Language::Russian,
        Language::Arabic,
    ];

    pub fn code(self) -> &'static str {
        match self {
            Language::English => "en",
            Language::Spanish => "es",
            Language::French => "fr",
            Language::German => "de",
            Language::ChineseSimplified => "zh-cn",
            Language::Japanese => "ja",
            Language::Russian => "ru",
            Language::Arabic => "ar",
        }
    }

    /// The next language in the UI cycle order.
    pub fn next(self) -> Self {
        let idx = Language::ALL
            .iter()
            .position(|l| *l == self)
            .unwrap_or_default();
        Language::ALL[(idx + 1) % Language::ALL.len()]
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Language {
    type Err = GazetteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.to_ascii_lowercase();
        Language::ALL
            .into_iter()
            .find(|l| l.code() == lowered)
            .ok_or_else(|| GazetteError::UnknownLanguage(s.to_string()))
    }
}
