// src/host.rs
// =============================================================================
// Same-site admission test: is a candidate URL's host within the page's site?
//
// A host is stored as its DNS labels reversed (TLD first). "A contains B"
// means A is B or an ancestor domain of B, i.e. A's reversed label tuple is
// a prefix of B's: google.ru contains www.google.ru (www.google.ru is a
// subdomain of google.ru), but not the reverse. Reversing the labels turns
// this into a prefix test instead of a suffix test on the dotted string,
// which sidesteps substring aliasing like "google.com" vs
// "thinkwithgoogle.com": reversed, the first label has to match exactly.
// =============================================================================

/// A host, stored as its DNS labels in reverse (TLD-first) order.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Host {
    labels: Vec<String>,
}

impl Host {
    /// Build a `Host` retaining every label (`www.google.ru` -> `ru.google.www`).
    pub fn full(raw_host: &str) -> Self {
        let mut labels: Vec<String> = raw_host.split('.').map(str::to_owned).collect();
        labels.reverse();
        Host { labels }
    }

    /// Build a `Host` retaining only the top two labels
    /// (`www.google.ru` -> `ru.google`).
    pub fn top_level(raw_host: &str) -> Self {
        let mut labels: Vec<String> = raw_host.split('.').map(str::to_owned).collect();
        labels.reverse();
        labels.truncate(2);
        Host { labels }
    }

    /// True iff `self`'s label tuple is a prefix of `other`'s, i.e. `self`
    /// is `other` or an ancestor domain of `other`.
    pub fn contains(&self, other: &Host) -> bool {
        self.labels.len() <= other.labels.len()
            && other.labels[..self.labels.len()] == self.labels[..]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contains_subdomain() {
        let seed = Host::full("google.ru");
        let candidate = Host::full("www.google.ru");
        assert!(seed.contains(&candidate));
        assert!(!candidate.contains(&seed));
    }

    #[test]
    fn contains_rejects_similar_looking_domains() {
        let seed = Host::full("www.google.com");
        let candidate = Host::full("www.google.com.br");
        assert!(!seed.contains(&candidate));
    }

    #[test]
    fn contains_rejects_substring_alias() {
        let seed = Host::full("google.com");
        let candidate = Host::full("thinkwithgoogle.com");
        assert!(!seed.contains(&candidate));
    }

    #[test]
    fn self_contains_self() {
        let seed = Host::full("example.com");
        assert!(seed.contains(&seed.clone()));
    }

    #[test]
    fn top_level_keeps_only_last_two_labels() {
        let host = Host::top_level("www.google.ru");
        assert_eq!(host, Host::full("google.ru"));
    }
}
