// src/normalize.rs
// =============================================================================
// URL normalizer: resolves a raw href against a base page, rejects anything
// that isn't a web page on the same site, and strips query/fragment so that
// every URL in `found`/`scanned` carries only {scheme, host, path}.
//
// Built on `url::Url::join`, which already implements standard URL
// resolution (absolute hrefs parse as-is, protocol-relative hrefs inherit
// the base scheme, dot-relative and absolute-path hrefs resolve against the
// base path, "#"/""/query-only hrefs resolve back to the base). That single
// call covers steps 5 and 6 of the algorithm; this function layers the
// scheme/extension/host admission checks on top of the resolved result.
// =============================================================================

use crate::host::Host;
use url::Url;

/// Resolve `raw_href` against `base` and admit it only if it names a web
/// page (http/https, no non-html extension) on a site `base_host` covers.
pub fn normalize(base: &Url, base_host: &Host, raw_href: &str) -> Option<Url> {
    let trimmed = raw_href.trim();
    let mut resolved = base.join(trimmed).ok()?;

    if resolved.scheme() != "http" && resolved.scheme() != "https" {
        return None;
    }

    if let Some(ext) = extension_of(resolved.path()) {
        if !ext.eq_ignore_ascii_case("htm") && !ext.eq_ignore_ascii_case("html") {
            return None;
        }
    }

    let candidate_host = Host::full(resolved.host_str()?);
    if !base_host.contains(&candidate_host) {
        return None;
    }

    resolved.set_query(None);
    resolved.set_fragment(None);
    Some(resolved)
}

/// The file extension of a URL path's last segment, if any (e.g. `/a/b.html`
/// -> `Some("html")`, `/a/b` -> `None`).
fn extension_of(path: &str) -> Option<&str> {
    let last_segment = path.rsplit('/').next().unwrap_or("");
    last_segment.rfind('.').map(|i| &last_segment[i + 1..])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base(url: &str) -> Url {
        Url::parse(url).unwrap()
    }

    fn host_of(url: &Url) -> Host {
        Host::full(url.host_str().unwrap())
    }

    #[test]
    fn hash_empty_and_slash_all_resolve_to_base() {
        let b = base("https://dvmn.org");
        let h = host_of(&b);
        for href in ["#", "", "/"] {
            assert_eq!(
                normalize(&b, &h, href).unwrap().as_str(),
                "https://dvmn.org/"
            );
        }
    }

    #[test]
    fn query_is_stripped() {
        let b = base("https://dvmn.org/signin/?next=/modules/");
        let h = host_of(&b);
        let got = normalize(&b, &h, "https://dvmn.org/signin/?next=/modules/").unwrap();
        assert_eq!(got.as_str(), "https://dvmn.org/signin/");
    }

    #[test]
    fn non_web_schemes_are_rejected() {
        let b = base("https://dvmn.org/page");
        let h = host_of(&b);
        for href in [
            "tel:+71234567890",
            "mailto:a@b.com",
            "tg://resolve",
            "ftp://dvmn.org/x",
        ] {
            assert!(
                normalize(&b, &h, href).is_none(),
                "{href} should be rejected"
            );
        }
    }

    #[test]
    fn non_html_extensions_are_rejected() {
        let b = base("https://dvmn.org/page");
        let h = host_of(&b);
        assert!(normalize(&b, &h, "/image.jpg").is_none());
        assert!(normalize(&b, &h, "/doc.pdf").is_none());
    }

    #[test]
    fn html_extensions_pass() {
        let b = base("https://dvmn.org/page");
        let h = host_of(&b);
        assert!(normalize(&b, &h, "/about.htm").is_some());
        assert!(normalize(&b, &h, "/about.html").is_some());
    }

    #[test]
    fn off_site_absolute_link_is_rejected() {
        let b = base("https://dvmn.org/page");
        let h = host_of(&b);
        assert!(normalize(&b, &h, "https://example.org/").is_none());
    }

    #[test]
    fn subdomain_of_base_host_is_admitted() {
        let b = base("https://google.ru/");
        let h = host_of(&b);
        assert!(normalize(&b, &h, "https://www.google.ru/x").is_some());
    }

    #[test]
    fn different_scheme_same_host_is_accepted_as_is() {
        let b = base("https://dvmn.org/page");
        let h = host_of(&b);
        let got = normalize(&b, &h, "http://dvmn.org/other").unwrap();
        assert_eq!(got.scheme(), "http");
    }

    #[test]
    fn protocol_relative_inherits_base_scheme() {
        let b = base("https://dvmn.org/page");
        let h = host_of(&b);
        let got = normalize(&b, &h, "//dvmn.org/other").unwrap();
        assert_eq!(got.as_str(), "https://dvmn.org/other");
    }

    #[test]
    fn relative_paths_resolve_against_base() {
        let b = base("https://dvmn.org/modules/current/");
        let h = host_of(&b);
        assert_eq!(
            normalize(&b, &h, "../other").unwrap().as_str(),
            "https://dvmn.org/modules/other"
        );
        assert_eq!(
            normalize(&b, &h, "./sibling").unwrap().as_str(),
            "https://dvmn.org/modules/current/sibling"
        );
    }
}
