use docsite_core::tokenizer::{tokenize_bigram, tokenize_word};
use docsite_core::{LanguageCode, TokenizerKind};

#[test]
fn word_tokens_are_lowercase_and_at_least_two_chars() {
    let toks = tokenize_word("A Deno SANDBOX runs per-request code; see docs_v2 (and x).");
    assert!(!toks.is_empty());
    for t in &toks {
        assert!(t.len() >= 2, "short token {t:?}");
        assert_eq!(t, &t.to_lowercase());
    }
    assert!(toks.contains(&"sandbox".to_string()));
    assert!(toks.contains(&"per-request".to_string()));
    assert!(toks.contains(&"docs_v2".to_string()));
    // Single letters are dropped.
    assert!(!toks.contains(&"a".to_string()));
    assert!(!toks.contains(&"x".to_string()));
}

#[test]
fn word_tokenizer_treats_punctuation_as_separators() {
    let toks = tokenize_word("net.fetch(url)!");
    assert_eq!(toks, vec!["net", "fetch", "url"]);
}

#[test]
fn word_tokenizer_yields_nothing_for_empty_or_symbol_input() {
    assert!(tokenize_word("").is_empty());
    assert!(tokenize_word("!!! ... ???").is_empty());
}

#[test]
fn bigram_emits_every_qualifying_char_and_pair() {
    let toks = tokenize_bigram("沙箱搜尋");
    for expected in ["沙", "箱", "搜", "尋", "沙箱", "箱搜", "搜尋"] {
        assert!(toks.contains(&expected.to_string()), "missing {expected}");
    }
}

#[test]
fn bigram_never_emits_whitespace_tokens() {
    let toks = tokenize_bigram("沙箱 搜尋\nDeno 平台");
    for t in &toks {
        assert!(!t.chars().any(char::is_whitespace), "whitespace in {t:?}");
    }
    // Whitespace is stripped before pairing, so a bigram can span it.
    assert!(toks.contains(&"箱搜".to_string()));
}

#[test]
fn bigram_skips_punctuation_pairs() {
    let toks = tokenize_bigram("沙，箱");
    assert!(toks.contains(&"沙".to_string()));
    assert!(toks.contains(&"箱".to_string()));
    // Neither pair straddling the comma qualifies.
    assert!(!toks.iter().any(|t| t.contains('，')));
}

#[test]
fn bigram_lowercases_latin_characters() {
    let toks = tokenize_bigram("Deno沙箱");
    assert!(toks.contains(&"de".to_string()));
    assert!(toks.contains(&"o沙".to_string()));
}

#[test]
fn tokenizer_kind_follows_language() {
    assert_eq!(TokenizerKind::for_lang(LanguageCode::En), TokenizerKind::Word);
    assert_eq!(
        TokenizerKind::for_lang(LanguageCode::ZhTw),
        TokenizerKind::Bigram
    );
}

#[test]
fn tokenizers_are_pure() {
    let text = "Deno Sandbox 沙箱搜尋";
    assert_eq!(tokenize_word(text), tokenize_word(text));
    assert_eq!(tokenize_bigram(text), tokenize_bigram(text));
}
