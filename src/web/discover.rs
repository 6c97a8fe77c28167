//! Script URL discovery
//!
//! Finds the bundle entry points on a page: `<script src=…>` tags whose
//! source names look like bundler output (`index`/`main` by default) and end
//! in `.js`, resolved against the page URL.

use html5ever::parse_document;
use html5ever::tendril::TendrilSink;
use markup5ever_rcdom::{Handle, NodeData, RcDom};
use url::Url;

/// Substrings a script `src` must contain to count as a bundle entry point.
pub const DEFAULT_SCRIPT_FILTERS: [&str; 2] = ["index", "main"];

/// Collect candidate script URLs from an HTML page, joined against the page
/// URL. An empty filter list accepts every `.js` script.
pub fn discover_script_urls(page_url: &Url, html: &str, filters: &[String]) -> Vec<Url> {
    let dom = match parse_document(RcDom::default(), Default::default())
        .from_utf8()
        .read_from(&mut html.as_bytes())
    {
        Ok(dom) => dom,
        Err(err) => {
            tracing::warn!(error = %err, "failed to parse page HTML");
            return Vec::new();
        }
    };

    let mut urls = Vec::new();
    collect_scripts(&dom.document, page_url, filters, &mut urls);
    urls
}

fn collect_scripts(handle: &Handle, page_url: &Url, filters: &[String], urls: &mut Vec<Url>) {
    if let NodeData::Element { name, attrs, .. } = &handle.data {
        if &*name.local == "script" {
            let src = attrs
                .borrow()
                .iter()
                .find(|attr| &*attr.name.local == "src")
                .map(|attr| attr.value.to_string());
            if let Some(src) = src {
                if is_candidate(&src, filters) {
                    match page_url.join(&src) {
                        Ok(url) => urls.push(url),
                        Err(err) => {
                            tracing::debug!(src = %src, error = %err, "unjoinable script src")
                        }
                    }
                }
            }
        }
    }
    for child in handle.children.borrow().iter() {
        collect_scripts(child, page_url, filters, urls);
    }
}

fn is_candidate(src: &str, filters: &[String]) -> bool {
    let path = src.split(['?', '#']).next().unwrap_or(src);
    if !path.ends_with(".js") {
        return false;
    }
    filters.is_empty() || filters.iter().any(|needle| src.contains(needle.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn default_filters() -> Vec<String> {
        DEFAULT_SCRIPT_FILTERS.map(String::from).to_vec()
    }

    fn page() -> Url {
        Url::parse("https://app.example.org/dapp/").unwrap()
    }

    const HTML: &str = r#"<html><head>
        <script src="/assets/index-a1b2c3.js"></script>
        <script src="vendor/chunk-9f8e.js"></script>
        <script src="./main.js?v=3"></script>
        <link href="style.css" rel="stylesheet">
        <script>inline();</script>
    </head><body></body></html>"#;

    #[test]
    fn test_filtered_discovery() {
        let urls = discover_script_urls(&page(), HTML, &default_filters());
        let found: Vec<String> = urls.iter().map(Url::to_string).collect();
        assert_eq!(
            found,
            vec![
                "https://app.example.org/assets/index-a1b2c3.js",
                "https://app.example.org/dapp/main.js?v=3",
            ]
        );
    }

    #[test]
    fn test_empty_filters_accept_all_scripts() {
        let urls = discover_script_urls(&page(), HTML, &[]);
        assert_eq!(urls.len(), 3);
    }

    #[test]
    fn test_non_js_and_inline_scripts_ignored() {
        let html = r#"<script src="data/index.json"></script><script>x()</script>"#;
        assert!(discover_script_urls(&page(), html, &[]).is_empty());
    }

    #[test]
    fn test_relative_join_uses_page_url() {
        let html = r#"<script src="../shared/main.bundle.js"></script>"#;
        let urls = discover_script_urls(&page(), html, &default_filters());
        assert_eq!(
            urls[0].as_str(),
            "https://app.example.org/shared/main.bundle.js"
        );
    }

    #[test]
    fn test_query_string_does_not_defeat_extension_check() {
        let html = r#"<script src="main.php?fake=.js"></script>"#;
        assert!(discover_script_urls(&page(), html, &default_filters()).is_empty());
    }
}
