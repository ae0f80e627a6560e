use crate::routes::{join_url, slug_to_route};
use crate::types::Heading;
use anyhow::{anyhow, Result};
use docsite_core::LanguageCode;
use pulldown_cmark::{html, CowStr, Event, Options, Parser, Tag, TagEnd};
use std::collections::HashMap;

/// Rendering output for one markdown document, before site placement.
#[derive(Debug, Clone)]
pub struct RenderedPage {
    pub title: String,
    pub article_html: String,
    pub headings: Vec<Heading>,
    pub plain_text: String,
}

fn parser_options() -> Options {
    Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH
}

/// Render one document: markdown to HTML with stable heading ids and
/// rewritten internal links, plus the heading outline and the plain text
/// used for indexing and excerpts. A document without an H1 is an error.
pub fn render_page(lang: LanguageCode, markdown: &str, base_url: &str) -> Result<RenderedPage> {
    let events: Vec<Event> = Parser::new_ext(markdown, parser_options()).collect();

    let headings = collect_headings(&events);
    let title = headings
        .iter()
        .find(|h| h.depth == 1)
        .map(|h| h.text.clone())
        .ok_or_else(|| anyhow!("missing H1 title"))?;
    let plain_text = collect_plain_text(&events);

    let mut heading_idx = 0;
    let rewritten = events.into_iter().map(|event| match event {
        Event::Start(Tag::Heading {
            level,
            classes,
            attrs,
            ..
        }) => {
            let id = headings
                .get(heading_idx)
                .map(|h| CowStr::from(h.id.clone()));
            heading_idx += 1;
            Event::Start(Tag::Heading {
                level,
                id,
                classes,
                attrs,
            })
        }
        Event::Start(Tag::Link {
            link_type,
            dest_url,
            title,
            id,
        }) => Event::Start(Tag::Link {
            link_type,
            dest_url: CowStr::from(rewrite_href(&dest_url, lang, base_url)),
            title,
            id,
        }),
        Event::Start(Tag::Image {
            link_type,
            dest_url,
            title,
            id,
        }) => Event::Start(Tag::Image {
            link_type,
            dest_url: CowStr::from(rewrite_asset_src(&dest_url, base_url)),
            title,
            id,
        }),
        other => other,
    });

    let mut article_html = String::new();
    html::push_html(&mut article_html, rewritten);

    Ok(RenderedPage {
        title,
        article_html,
        headings,
        plain_text,
    })
}

/// Heading outline in document order, with de-duplicated stable ids.
fn collect_headings(events: &[Event]) -> Vec<Heading> {
    let mut headings = Vec::new();
    let mut seen = HashMap::new();
    let mut current: Option<(u32, String)> = None;
    for event in events {
        match event {
            Event::Start(Tag::Heading { level, .. }) => {
                current = Some((*level as u32, String::new()));
            }
            Event::End(TagEnd::Heading(_)) => {
                if let Some((depth, text)) = current.take() {
                    let text = text.trim().to_string();
                    let id = make_heading_id(&text, &mut seen);
                    headings.push(Heading { depth, text, id });
                }
            }
            Event::Text(t) | Event::Code(t) => {
                if let Some((_, buf)) = current.as_mut() {
                    buf.push_str(t);
                }
            }
            _ => {}
        }
    }
    headings
}

/// Whitespace-collapsed document text: code blocks are dropped, inline code
/// and image alt text are kept.
fn collect_plain_text(events: &[Event]) -> String {
    let mut out = String::new();
    let mut in_code_block = false;
    for event in events {
        match event {
            Event::Start(Tag::CodeBlock(_)) => in_code_block = true,
            Event::End(TagEnd::CodeBlock) => in_code_block = false,
            Event::Text(t) => {
                if !in_code_block {
                    out.push_str(t);
                    out.push(' ');
                }
            }
            Event::Code(t) => {
                out.push_str(t);
                out.push(' ');
            }
            Event::SoftBreak | Event::HardBreak => out.push(' '),
            _ => {}
        }
    }
    out.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Stable heading id: lowercase letters/numbers with runs of everything
/// else collapsed to single hyphens; repeats get `-2`, `-3`… suffixes.
fn make_heading_id(text: &str, seen: &mut HashMap<String, usize>) -> String {
    let mut base = String::new();
    let mut pending_hyphen = false;
    for c in text.chars() {
        if c.is_alphanumeric() {
            if pending_hyphen && !base.is_empty() {
                base.push('-');
            }
            pending_hyphen = false;
            base.extend(c.to_lowercase());
        } else if c.is_whitespace() || c == '-' {
            pending_hyphen = true;
        }
        // Other punctuation disappears without acting as a separator.
    }
    if base.is_empty() {
        base.push_str("section");
    }
    let n = seen.entry(base.clone()).or_insert(0);
    *n += 1;
    if *n == 1 {
        base
    } else {
        format!("{base}-{n}")
    }
}

/// Rewrite a markdown link target for the generated site: `foo.md#frag`
/// becomes the page route, `../assets/…` is re-rooted under the base URL,
/// and external, fragment, and mailto links pass through.
pub fn rewrite_href(href: &str, lang: LanguageCode, base_url: &str) -> String {
    if href.is_empty() || href.starts_with('#') {
        return href.to_string();
    }
    if href.starts_with("http://")
        || href.starts_with("https://")
        || href.starts_with("//")
        || href.starts_with("mailto:")
    {
        return href.to_string();
    }
    if let Some(rel) = href.strip_prefix("../assets/") {
        return join_url(base_url, &format!("assets/{rel}"));
    }
    let (path, frag) = match href.split_once('#') {
        Some((path, frag)) => (path, Some(frag)),
        None => (href, None),
    };
    if path.to_ascii_lowercase().ends_with(".md") {
        let name = path.replace('\\', "/");
        let name = name.rsplit('/').next().unwrap_or(&name);
        let slug = &name[..name.len() - 3];
        let route = slug_to_route(lang, slug, base_url);
        return match frag {
            Some(frag) => format!("{route}#{frag}"),
            None => route,
        };
    }
    href.to_string()
}

fn rewrite_asset_src(src: &str, base_url: &str) -> String {
    if let Some(rel) = src.strip_prefix("../assets/") {
        return join_url(base_url, &format!("assets/{rel}"));
    }
    src.to_string()
}
