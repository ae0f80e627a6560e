use docsite_core::{build_search_index, LanguageCode, PageRecord, TokenizerKind, INDEX_VERSION};

fn sample_pages() -> Vec<PageRecord> {
    vec![
        PageRecord {
            slug: "index".into(),
            title: "Deno Sandbox".into(),
            url: "/en/".into(),
            body_text: "Deno Sandbox overview and security tokens".into(),
        },
        PageRecord {
            slug: "security".into(),
            title: "Security".into(),
            url: "/en/security/".into(),
            body_text: "Outbound network control and secret substitution".into(),
        },
    ]
}

#[test]
fn builds_expected_maps() {
    let index = build_search_index(LanguageCode::En, &sample_pages());
    assert_eq!(index.version, INDEX_VERSION);
    assert_eq!(index.lang, LanguageCode::En);
    assert_eq!(index.metadata.tokenizer, TokenizerKind::Word);
    assert_eq!(index.pages.len(), 2);
    assert_eq!(index.pages[0].id, 0);
    assert_eq!(index.pages[1].id, 1);
    assert_eq!(index.inverted_index["sandbox"], vec![0]);
    assert_eq!(index.inverted_index["security"], vec![0]);
    assert_eq!(index.inverted_index["and"], vec![0, 1]);
    assert_eq!(index.title_tokens["sandbox"], vec![0]);
    assert_eq!(index.title_tokens["security"], vec![1]);
}

#[test]
fn page_ids_are_positional_and_referenced_ids_exist() {
    let index = build_search_index(LanguageCode::En, &sample_pages());
    for (pos, page) in index.pages.iter().enumerate() {
        assert_eq!(page.id as usize, pos);
    }
    for ids in index.inverted_index.values().chain(index.title_tokens.values()) {
        for &id in ids {
            assert!((id as usize) < index.pages.len());
        }
    }
}

#[test]
fn posting_lists_have_no_duplicates() {
    let pages = vec![PageRecord {
        slug: "repeat".into(),
        title: "Tokens tokens tokens".into(),
        url: "/en/repeat/".into(),
        body_text: "tokens and more tokens and yet more tokens".into(),
    }];
    let index = build_search_index(LanguageCode::En, &pages);
    for ids in index.inverted_index.values().chain(index.title_tokens.values()) {
        let mut sorted = ids.clone();
        sorted.dedup();
        assert_eq!(&sorted, ids, "duplicate id in posting list");
    }
    assert_eq!(index.inverted_index["tokens"], vec![0]);
}

#[test]
fn rebuild_is_deterministic_modulo_timestamp() {
    let pages = sample_pages();
    let a = build_search_index(LanguageCode::En, &pages);
    let b = build_search_index(LanguageCode::En, &pages);
    assert_eq!(a.pages, b.pages);
    assert_eq!(a.inverted_index, b.inverted_index);
    assert_eq!(a.title_tokens, b.title_tokens);
    assert_eq!(
        serde_json::to_string(&a.inverted_index).unwrap(),
        serde_json::to_string(&b.inverted_index).unwrap()
    );
}

#[test]
fn empty_page_list_yields_valid_empty_artifact() {
    let index = build_search_index(LanguageCode::ZhTw, &[]);
    assert_eq!(index.version, INDEX_VERSION);
    assert!(index.pages.is_empty());
    assert!(index.inverted_index.is_empty());
    assert!(index.title_tokens.is_empty());
    assert_eq!(index.metadata.tokenizer, TokenizerKind::Bigram);
}

#[test]
fn excerpt_is_whitespace_collapsed_and_capped() {
    let body = format!("lots   of\n\nwhitespace {}", "x".repeat(400));
    let pages = vec![PageRecord {
        slug: "long".into(),
        title: "Long".into(),
        url: "/en/long/".into(),
        body_text: body,
    }];
    let index = build_search_index(LanguageCode::En, &pages);
    let excerpt = &index.pages[0].excerpt;
    assert!(excerpt.starts_with("lots of whitespace"));
    assert_eq!(excerpt.chars().count(), 180);
}

#[test]
fn bigram_index_contains_single_characters_and_pairs() {
    let pages = vec![PageRecord {
        slug: "index".into(),
        title: "沙箱".into(),
        url: "/zh-tw/".into(),
        body_text: "沙箱搜尋概觀".into(),
    }];
    let index = build_search_index(LanguageCode::ZhTw, &pages);
    assert_eq!(index.metadata.tokenizer, TokenizerKind::Bigram);
    assert_eq!(index.inverted_index["沙箱"], vec![0]);
    assert_eq!(index.inverted_index["搜"], vec![0]);
    assert_eq!(index.title_tokens["沙箱"], vec![0]);
}
