use crate::index::{PageId, SearchIndex, SearchPage};
use serde::Serialize;
use std::collections::{BTreeSet, HashMap};

/// Result list cap.
pub const MAX_RESULTS: usize = 20;

const BODY_TOKEN_WEIGHT: u32 = 1;
const TITLE_TOKEN_WEIGHT: u32 = 4;
const TITLE_PHRASE_BONUS: u32 = 6;
const EXCERPT_PHRASE_BONUS: u32 = 2;

#[derive(Debug, Clone, Serialize)]
pub struct SearchHit {
    pub page: SearchPage,
    pub score: u32,
}

/// Score and rank a free-text query against a loaded index.
///
/// Token-level matches accumulate per page (title matches weighted 4x body
/// matches), then pages whose title or excerpt contain the full query string
/// get a phrase bonus (+6 / +2). Results sort score-descending with an
/// ascending title tie-break and are capped at [`MAX_RESULTS`]. The index is
/// never mutated; a blank query yields an empty list.
pub fn search(index: &SearchIndex, query: &str) -> Vec<SearchHit> {
    let q = query.trim();
    if q.is_empty() {
        return Vec::new();
    }

    let mut tokens: BTreeSet<String> =
        index.metadata.tokenizer.tokenize(q).into_iter().collect();
    // A one-character query must still reach single-character index entries
    // the tokenizer would not emit on its own, so the raw character always
    // participates.
    if q.chars().count() == 1 {
        tokens.insert(q.to_string());
    }

    let mut scores: HashMap<PageId, u32> = HashMap::new();
    for token in &tokens {
        if let Some(ids) = index.inverted_index.get(token) {
            for &id in ids {
                *scores.entry(id).or_insert(0) += BODY_TOKEN_WEIGHT;
            }
        }
        if let Some(ids) = index.title_tokens.get(token) {
            for &id in ids {
                *scores.entry(id).or_insert(0) += TITLE_TOKEN_WEIGHT;
            }
        }
    }

    let needle = q.to_lowercase();
    let mut hits: Vec<SearchHit> = scores
        .into_iter()
        .filter_map(|(id, mut score)| {
            let page = index.pages.get(id as usize)?;
            if page.title.to_lowercase().contains(&needle) {
                score += TITLE_PHRASE_BONUS;
            }
            if page.excerpt.to_lowercase().contains(&needle) {
                score += EXCERPT_PHRASE_BONUS;
            }
            Some(SearchHit {
                page: page.clone(),
                score,
            })
        })
        .collect();

    hits.sort_by(|a, b| {
        b.score
            .cmp(&a.score)
            .then_with(|| a.page.title.cmp(&b.page.title))
    });
    hits.truncate(MAX_RESULTS);
    hits
}
