use crate::routes::{join_url, slug_to_route};
use crate::types::{Heading, SitePage};
use docsite_core::LanguageCode;

pub struct SiteContext<'a> {
    pub base_url: &'a str,
    pub site_name: &'a str,
}

pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn render_sidebar(current: &SitePage, nav_pages: &[&SitePage]) -> String {
    let links = nav_pages
        .iter()
        .map(|p| {
            let class = if p.slug == current.slug {
                " class=\"active\""
            } else {
                ""
            };
            format!(
                "  <a{class} href=\"{}\">{}</a>",
                p.route_path,
                escape_html(&p.title)
            )
        })
        .collect::<Vec<_>>()
        .join("\n");
    format!("<nav class=\"sidebar-nav\" aria-label=\"Page navigation\">\n{links}\n</nav>")
}

fn render_toc(headings: &[Heading]) -> String {
    let items: Vec<&Heading> = headings.iter().filter(|h| h.depth >= 2).collect();
    if items.is_empty() {
        return "<div class=\"toc-empty\">No sections</div>".to_string();
    }
    let lines = items
        .iter()
        .map(|h| {
            format!(
                "  <li class=\"d{}\"><a href=\"#{}\">{}</a></li>",
                h.depth,
                escape_html(&h.id),
                escape_html(&h.text)
            )
        })
        .collect::<Vec<_>>()
        .join("\n");
    format!("<ol class=\"toc-list\">\n{lines}\n</ol>")
}

/// Full HTML document for one page: header with search and language switch,
/// sidebar navigation, article, table of contents, footer source link.
pub fn render_html_page(page: &SitePage, all_pages: &[SitePage], ctx: &SiteContext) -> String {
    let nav_pages: Vec<&SitePage> = all_pages.iter().filter(|p| p.lang == page.lang).collect();
    let en_route = all_pages
        .iter()
        .find(|p| p.slug == page.slug && p.lang == LanguageCode::En)
        .map(|p| p.route_path.as_str());
    let zh_route = all_pages
        .iter()
        .find(|p| p.slug == page.slug && p.lang == LanguageCode::ZhTw)
        .map(|p| p.route_path.as_str());

    let stylesheet = join_url(ctx.base_url, "_static/styles.css");
    let search_js = join_url(ctx.base_url, "_static/search.js");
    let site_js = join_url(ctx.base_url, "_static/site.js");
    let search_index_url = join_url(ctx.base_url, &format!("search/{}.json", page.lang));
    let home_route = slug_to_route(page.lang, "index", ctx.base_url);

    let (search_placeholder, toc_heading) = match page.lang {
        LanguageCode::En => ("Search docs", "On this page"),
        LanguageCode::ZhTw => ("搜尋文件", "本頁內容"),
    };
    let en_current = if page.lang == LanguageCode::En {
        " aria-current=\"page\""
    } else {
        ""
    };
    let zh_current = if page.lang == LanguageCode::ZhTw {
        " aria-current=\"page\""
    } else {
        ""
    };

    format!(
        r#"<!doctype html>
<html lang="{lang}">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <title>{title} | {site_name}</title>
  <link rel="stylesheet" href="{stylesheet}">
</head>
<body data-lang="{lang}" data-search-index="{search_index_url}">
  <header class="site-header">
    <a class="brand" href="{home_route}">{site_name}</a>
    <div class="header-actions">
      <button id="nav-toggle" class="ghost" type="button" aria-expanded="false" aria-controls="sidebar">Menu</button>
      <label class="search-wrap">
        <span class="sr-only">{search_placeholder}</span>
        <input id="search-input" type="search" placeholder="{search_placeholder}">
      </label>
      <div class="lang-switch">
        <a{en_current} href="{en_href}">EN</a>
        <a{zh_current} href="{zh_href}">繁中</a>
      </div>
    </div>
  </header>
  <div class="layout">
    <aside id="sidebar" class="sidebar">{sidebar}</aside>
    <main class="content">
      <div id="search-results" class="search-results" hidden></div>
      <article class="article">{article}</article>
    </main>
    <aside class="toc" aria-label="Table of contents">
      <h2>{toc_heading}</h2>
      {toc}
    </aside>
  </div>
  <footer class="site-footer">
    <a href="{source_url}" target="_blank" rel="noopener noreferrer">Source</a>
  </footer>
  <script type="module" src="{search_js}"></script>
  <script type="module" src="{site_js}"></script>
</body>
</html>"#,
        lang = page.lang,
        title = escape_html(&page.title),
        site_name = escape_html(ctx.site_name),
        stylesheet = stylesheet,
        search_index_url = search_index_url,
        home_route = home_route,
        search_placeholder = search_placeholder,
        en_current = en_current,
        zh_current = zh_current,
        en_href = en_route.unwrap_or("#"),
        zh_href = zh_route.unwrap_or("#"),
        sidebar = render_sidebar(page, &nav_pages),
        article = page.article_html,
        toc_heading = toc_heading,
        toc = render_toc(&page.headings),
        source_url = escape_html(&page.source_url),
        search_js = search_js,
        site_js = site_js,
    )
}

/// Root redirect page pointing at the default language's home.
pub fn render_root_index(base_url: &str, default_lang: LanguageCode) -> String {
    let target = slug_to_route(default_lang, "index", base_url);
    format!(
        r#"<!doctype html><html><head><meta charset="utf-8"><meta http-equiv="refresh" content="0; url={target}"><script>location.replace("{target}");</script></head><body><a href="{target}">Open docs</a></body></html>"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn page(lang: LanguageCode, slug: &str, title: &str) -> SitePage {
        SitePage {
            lang,
            slug: slug.to_string(),
            title: title.to_string(),
            article_html: "<p>body</p>".to_string(),
            headings: vec![
                Heading {
                    depth: 1,
                    text: title.to_string(),
                    id: "t".to_string(),
                },
                Heading {
                    depth: 2,
                    text: "Details".to_string(),
                    id: "details".to_string(),
                },
            ],
            plain_text: "body".to_string(),
            route_path: slug_to_route(lang, slug, "/"),
            output_file_path: PathBuf::new(),
            source_url: "https://example.com/doc".to_string(),
        }
    }

    #[test]
    fn escapes_html_metacharacters() {
        assert_eq!(escape_html(r#"<a href="x">'&'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;&#39;&amp;&#39;&lt;/a&gt;");
    }

    #[test]
    fn page_shell_wires_search_nav_and_lang_switch() {
        let pages = vec![
            page(LanguageCode::En, "index", "Overview <1>"),
            page(LanguageCode::ZhTw, "index", "概觀"),
        ];
        let ctx = SiteContext {
            base_url: "/docs/",
            site_name: "Sandbox Docs",
        };
        let html = render_html_page(&pages[0], &pages, &ctx);
        assert!(html.contains(r#"data-search-index="/docs/search/en.json""#));
        assert!(html.contains("Overview &lt;1&gt;"));
        assert!(html.contains(r#"href="/zh-tw/""#));
        assert!(html.contains(r##"<li class="d2"><a href="#details">Details</a></li>"##));
        assert!(html.contains(r#"aria-current="page""#));
    }

    #[test]
    fn missing_sibling_language_falls_back_to_hash() {
        let pages = vec![page(LanguageCode::En, "only", "Only English")];
        let ctx = SiteContext {
            base_url: "/",
            site_name: "Docs",
        };
        let html = render_html_page(&pages[0], &pages, &ctx);
        assert!(html.contains(r##"href="#">繁中"##));
    }

    #[test]
    fn root_index_redirects_to_default_language() {
        let html = render_root_index("/docs/", LanguageCode::En);
        assert!(html.contains(r#"url=/docs/en/"#));
        assert!(html.contains(r#"location.replace("/docs/en/")"#));
    }
}
