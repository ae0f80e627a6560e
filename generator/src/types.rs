use docsite_core::LanguageCode;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct Heading {
    pub depth: u32,
    pub text: String,
    pub id: String,
}

/// A fully rendered document plus its placement in the site tree.
#[derive(Debug, Clone)]
pub struct SitePage {
    pub lang: LanguageCode,
    pub slug: String,
    pub title: String,
    pub article_html: String,
    pub headings: Vec<Heading>,
    pub plain_text: String,
    pub route_path: String,
    pub output_file_path: PathBuf,
    pub source_url: String,
}
