use crate::types::SitePage;
use lazy_static::lazy_static;
use regex::Regex;
use std::collections::HashSet;

lazy_static! {
    static ref HREF_RE: Regex = Regex::new(r#"<a\s+[^>]*href="([^"]+)""#).expect("valid regex");
}

/// Every internal link in rendered article HTML must resolve to a known
/// page route. External, fragment, mailto, and asset links are exempt.
pub fn validate_rendered_pages(pages: &[SitePage]) -> Vec<String> {
    let routes: HashSet<&str> = pages.iter().map(|p| p.route_path.as_str()).collect();
    let mut errors = Vec::new();
    for page in pages {
        for cap in HREF_RE.captures_iter(&page.article_html) {
            let href = &cap[1];
            if href.starts_with("http") || href.starts_with('#') || href.starts_with("mailto:") {
                continue;
            }
            if href.contains("/assets/") {
                continue;
            }
            let normalized = href.split('#').next().unwrap_or(href);
            if !routes.contains(normalized) {
                errors.push(format!(
                    "broken internal link in {} ({}): {href}",
                    page.slug, page.lang
                ));
            }
        }
    }
    errors
}
