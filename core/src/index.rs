use crate::tokenizer::TokenizerKind;
use crate::LanguageCode;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

pub type PageId = u32;

/// Artifact schema version. Consumers must reject anything else.
pub const INDEX_VERSION: u32 = 1;

/// Build-time excerpt length, in characters (no query context exists yet).
const EXCERPT_LEN: usize = 180;

/// One page as supplied by the rendering pipeline, in final per-language
/// order. Ids are positional and only meaningful within the artifact built
/// from this sequence.
#[derive(Debug, Clone)]
pub struct PageRecord {
    pub slug: String,
    pub title: String,
    pub url: String,
    pub body_text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchPage {
    pub id: PageId,
    pub slug: String,
    pub title: String,
    pub url: String,
    pub excerpt: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexMetadata {
    pub generated_at: String,
    pub tokenizer: TokenizerKind,
}

/// The serialized search index for one language: the sole contract between
/// build-time indexing and runtime querying. Token maps are `BTreeMap`s so
/// rebuilding from identical input serializes identically.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchIndex {
    pub version: u32,
    pub lang: LanguageCode,
    pub pages: Vec<SearchPage>,
    pub inverted_index: BTreeMap<String, Vec<PageId>>,
    pub title_tokens: BTreeMap<String, Vec<PageId>>,
    pub metadata: IndexMetadata,
}

/// First `max_len` characters of the whitespace-collapsed text.
pub fn excerpt_from_text(text: &str, max_len: usize) -> String {
    let clean = text.split_whitespace().collect::<Vec<_>>().join(" ");
    clean.chars().take(max_len).collect()
}

fn add_posting(map: &mut BTreeMap<String, Vec<PageId>>, token: String, page_id: PageId) {
    let list = map.entry(token).or_default();
    // Ids arrive in ascending page order, one pass per page; refusing the
    // current tail keeps posting lists duplicate-free even if a page were
    // ever processed twice.
    if list.last() != Some(&page_id) {
        list.push(page_id);
    }
}

/// Build one language's search index from its ordered page sequence. An
/// empty sequence yields a valid empty artifact, not an error.
pub fn build_search_index(lang: LanguageCode, pages: &[PageRecord]) -> SearchIndex {
    let tokenizer = TokenizerKind::for_lang(lang);
    let mut search_pages = Vec::with_capacity(pages.len());
    let mut inverted_index = BTreeMap::new();
    let mut title_tokens = BTreeMap::new();

    for (id, page) in pages.iter().enumerate() {
        let id = id as PageId;
        search_pages.push(SearchPage {
            id,
            slug: page.slug.clone(),
            title: page.title.clone(),
            url: page.url.clone(),
            excerpt: excerpt_from_text(&page.body_text, EXCERPT_LEN),
        });
        // De-duplicate per page so each page contributes a token at most once.
        let body_tokens: BTreeSet<String> =
            tokenizer.tokenize(&page.body_text).into_iter().collect();
        for token in body_tokens {
            add_posting(&mut inverted_index, token, id);
        }
        let title_set: BTreeSet<String> = tokenizer.tokenize(&page.title).into_iter().collect();
        for token in title_set {
            add_posting(&mut title_tokens, token, id);
        }
    }

    tracing::debug!(
        %lang,
        pages = search_pages.len(),
        body_terms = inverted_index.len(),
        title_terms = title_tokens.len(),
        "built search index"
    );

    SearchIndex {
        version: INDEX_VERSION,
        lang,
        pages: search_pages,
        inverted_index,
        title_tokens,
        metadata: IndexMetadata {
            generated_at: OffsetDateTime::now_utc()
                .format(&Rfc3339)
                .unwrap_or_else(|_| String::new()),
            tokenizer,
        },
    }
}
