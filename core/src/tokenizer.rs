use crate::LanguageCode;
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use unicode_normalization::UnicodeNormalization;

lazy_static! {
    static ref WORD_RE: Regex = Regex::new(r"[a-z0-9][a-z0-9_-]*").expect("valid regex");
}

/// Which strategy produced an index's tokens. Stored in the artifact
/// metadata so the query side picks the matching strategy without
/// re-deriving it from the language code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenizerKind {
    Word,
    Bigram,
}

impl TokenizerKind {
    pub fn for_lang(lang: LanguageCode) -> Self {
        match lang {
            LanguageCode::En => TokenizerKind::Word,
            LanguageCode::ZhTw => TokenizerKind::Bigram,
        }
    }

    pub fn tokenize(&self, text: &str) -> Vec<String> {
        match self {
            TokenizerKind::Word => tokenize_word(text),
            TokenizerKind::Bigram => tokenize_bigram(text),
        }
    }
}

/// Word tokens for space-segmented scripts: lowercased maximal runs of
/// `[a-z0-9][a-z0-9_-]*`, dropping anything shorter than 2 characters.
/// Punctuation and whitespace act purely as separators. Input is
/// NFKC-normalized first so compatibility forms (full-width latin) match
/// their ASCII equivalents.
pub fn tokenize_word(text: &str) -> Vec<String> {
    let normalized = text.nfkc().collect::<String>().to_lowercase();
    WORD_RE
        .find_iter(&normalized)
        .map(|m| m.as_str().to_string())
        .filter(|t| t.len() >= 2)
        .collect()
}

/// Unigram + bigram tokens for unsegmented scripts: after stripping
/// whitespace, every letter/number character is emitted lowercased, as is
/// every adjacent pair whose characters are both letters/numbers. Captures
/// one- and two-character search units without a segmentation dictionary.
pub fn tokenize_bigram(text: &str) -> Vec<String> {
    let normalized = text.nfkc().collect::<String>();
    let chars: Vec<char> = normalized.chars().filter(|c| !c.is_whitespace()).collect();
    let mut out = Vec::new();
    for (i, &a) in chars.iter().enumerate() {
        if a.is_alphanumeric() {
            out.push(a.to_lowercase().collect::<String>());
        }
        if let Some(&b) = chars.get(i + 1) {
            if a.is_alphanumeric() && b.is_alphanumeric() {
                let mut bigram = String::new();
                bigram.extend(a.to_lowercase());
                bigram.extend(b.to_lowercase());
                out.push(bigram);
            }
        }
    }
    out
}
