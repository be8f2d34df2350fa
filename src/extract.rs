// src/extract.rs
// =============================================================================
// HTML link extraction: `extract_hrefs(html) -> set<string>`. Spec treats
// this as a black box the core requires but does not specify internally;
// it's a straight `scraper` query over `a[href]`, as the teacher crate
// already does for its own link checking.
// =============================================================================

use scraper::{Html, Selector};
use std::collections::HashSet;

/// Every raw `href` attribute value found on any `<a>` element in `html`.
pub fn extract_hrefs(html: &str) -> HashSet<String> {
    let document = Html::parse_document(html);
    let selector = Selector::parse("a[href]").expect("static selector is valid");

    document
        .select(&selector)
        .filter_map(|el| el.value().attr("href"))
        .map(str::to_owned)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collects_every_href() {
        let html = r#"
            <a href="/a">A</a>
            <a href="https://example.com/b">B</a>
            <a>no href</a>
        "#;
        let hrefs = extract_hrefs(html);
        assert_eq!(hrefs.len(), 2);
        assert!(hrefs.contains("/a"));
        assert!(hrefs.contains("https://example.com/b"));
    }

    #[test]
    fn duplicate_hrefs_are_deduplicated() {
        let html = r#"<a href="/a">1</a><a href="/a">2</a>"#;
        assert_eq!(extract_hrefs(html).len(), 1);
    }
}
