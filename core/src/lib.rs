//! Search core for the documentation site: tokenizers, index construction,
//! query scoring, and artifact persistence.
//!
//! The build side turns one language's pages into a [`SearchIndex`] and
//! writes it as a flat JSON artifact; the query side loads that artifact and
//! ranks pages against free-text queries. The artifact is the only contract
//! between the two, so its schema carries an explicit version and a tag
//! naming the tokenizer that produced it.

pub mod index;
pub mod persist;
pub mod query;
pub mod tokenizer;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub use index::{
    build_search_index, excerpt_from_text, IndexMetadata, PageId, PageRecord, SearchIndex,
    SearchPage, INDEX_VERSION,
};
pub use persist::{load_index, load_index_str, save_index, IndexError};
pub use query::{search, SearchHit, MAX_RESULTS};
pub use tokenizer::TokenizerKind;

/// Site languages. The tokenizer strategy is derived from this once, at
/// index-build time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LanguageCode {
    #[serde(rename = "en")]
    En,
    #[serde(rename = "zh-tw")]
    ZhTw,
}

impl LanguageCode {
    pub const ALL: [LanguageCode; 2] = [LanguageCode::En, LanguageCode::ZhTw];

    pub fn as_str(&self) -> &'static str {
        match self {
            LanguageCode::En => "en",
            LanguageCode::ZhTw => "zh-tw",
        }
    }

}

impl fmt::Display for LanguageCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LanguageCode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "en" => Ok(LanguageCode::En),
            "zh-tw" => Ok(LanguageCode::ZhTw),
            other => Err(anyhow::anyhow!("unknown language code: {other}")),
        }
    }
}
