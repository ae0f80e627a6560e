mod assets;
mod manifest;
mod markdown;
mod routes;
mod templates;
mod types;
mod validate;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use docsite_core::{build_search_index, save_index, LanguageCode, PageRecord};
use lazy_static::lazy_static;
use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};
use tracing_subscriber::{fmt, EnvFilter};

use crate::templates::SiteContext;
use crate::types::SitePage;

#[derive(Parser)]
#[command(name = "generator")]
#[command(about = "Build the bilingual documentation site and its search artifacts", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render pages and per-language search indexes from a manifest
    Build {
        /// Manifest path; source paths resolve relative to its directory
        #[arg(long, default_value = "manifest.json")]
        manifest: PathBuf,
        /// Output directory
        #[arg(long, default_value = "dist")]
        out: PathBuf,
        /// URL prefix the site is served under
        #[arg(long, default_value = "/")]
        base_url: String,
        /// Language to build
        #[arg(long, value_enum, default_value = "all")]
        lang: LangArg,
        /// Site name shown in page titles and the header brand
        #[arg(long, default_value = "Documentation")]
        site_name: String,
        /// Empty the output directory first
        #[arg(long, default_value_t = false)]
        clean: bool,
        /// Collapse whitespace between tags in emitted HTML
        #[arg(long, default_value_t = false)]
        minify: bool,
        /// Check the manifest, sources, and links without writing output
        #[arg(long, default_value_t = false)]
        validate_only: bool,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum LangArg {
    All,
    En,
    ZhTw,
}

impl LangArg {
    fn langs(self) -> Vec<LanguageCode> {
        match self {
            LangArg::All => LanguageCode::ALL.to_vec(),
            LangArg::En => vec![LanguageCode::En],
            LangArg::ZhTw => vec![LanguageCode::ZhTw],
        }
    }
}

struct BuildOptions {
    manifest: PathBuf,
    out: PathBuf,
    base_url: String,
    langs: Vec<LanguageCode>,
    site_name: String,
    clean: bool,
    minify: bool,
    validate_only: bool,
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Build {
            manifest,
            out,
            base_url,
            lang,
            site_name,
            clean,
            minify,
            validate_only,
        } => build_site(BuildOptions {
            manifest,
            out,
            base_url: routes::normalize_base_url(&base_url),
            langs: lang.langs(),
            site_name,
            clean,
            minify,
            validate_only,
        }),
    }
}

fn build_site(options: BuildOptions) -> Result<()> {
    let entries = manifest::load_manifest(&options.manifest)?;
    let warnings = manifest::validate_inputs(&entries, &options.langs)?;
    for warning in &warnings {
        tracing::warn!("{warning}");
    }

    let mut pages: Vec<SitePage> = Vec::new();
    for entry in &entries {
        for &lang in &options.langs {
            let source = entry.path_for(lang);
            let text = fs::read_to_string(source)
                .with_context(|| format!("reading {}", source.display()))?;
            let rendered = markdown::render_page(lang, &text, &options.base_url)
                .with_context(|| format!("rendering {}", source.display()))?;
            pages.push(SitePage {
                lang,
                slug: entry.slug.clone(),
                title: rendered.title,
                article_html: rendered.article_html,
                headings: rendered.headings,
                plain_text: rendered.plain_text,
                route_path: routes::slug_to_route(lang, &entry.slug, &options.base_url),
                output_file_path: routes::route_to_output_path(lang, &entry.slug, &options.out),
                source_url: entry.source_url.clone(),
            });
        }
    }

    let link_errors = validate::validate_rendered_pages(&pages);
    if !link_errors.is_empty() {
        bail!(link_errors.join("\n"));
    }
    if options.validate_only {
        tracing::info!(pages = pages.len(), "validation ok");
        return Ok(());
    }

    if options.clean {
        assets::empty_dir(&options.out)?;
    }
    fs::create_dir_all(&options.out)?;

    let manifest_root = options.manifest.parent().unwrap_or(Path::new("."));
    let assets_src = manifest_root.join("assets");
    if assets_src.is_dir() {
        assets::copy_dir(&assets_src, &options.out.join("assets"))?;
    }
    assets::write_static_assets(&options.out)?;

    let ctx = SiteContext {
        base_url: &options.base_url,
        site_name: &options.site_name,
    };
    for page in &pages {
        let html = templates::render_html_page(page, &pages, &ctx);
        let html = if options.minify {
            minify_html(&html)
        } else {
            html
        };
        write_text(&page.output_file_path, &html)?;
    }

    for &lang in &options.langs {
        let records: Vec<PageRecord> = pages
            .iter()
            .filter(|p| p.lang == lang)
            .map(|p| PageRecord {
                slug: p.slug.clone(),
                title: p.title.clone(),
                url: p.route_path.clone(),
                body_text: p.plain_text.clone(),
            })
            .collect();
        let index = build_search_index(lang, &records);
        let path = options.out.join("search").join(format!("{lang}.json"));
        save_index(&path, &index)?;
        tracing::info!(%lang, pages = records.len(), path = %path.display(), "wrote search index");
    }

    write_text(
        &options.out.join("index.html"),
        &templates::render_root_index(&options.base_url, options.langs[0]),
    )?;

    tracing::info!(pages = pages.len(), out = %options.out.display(), "site built");
    Ok(())
}

fn write_text(path: &Path, text: &str) -> Result<()> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
    }
    fs::write(path, text).with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}

fn minify_html(html: &str) -> String {
    lazy_static! {
        static ref BLANK_LINES: Regex = Regex::new(r"\n{2,}").expect("valid regex");
        static ref BETWEEN_TAGS: Regex = Regex::new(r">\s+<").expect("valid regex");
    }
    let collapsed = BLANK_LINES.replace_all(html, "\n");
    BETWEEN_TAGS.replace_all(&collapsed, "><").trim().to_string()
}
