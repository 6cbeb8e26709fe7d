//! URL Utility Functions
//!
//! Resolution itself belongs to the caller; these helpers only answer
//! whether a reference is usable at all.

use url::Url;

use crate::patterns::SCRIPT_URL;

/// Check if a URL runs script when followed.
#[inline]
#[must_use]
pub fn is_script_url(s: &str) -> bool {
    SCRIPT_URL.is_match(s)
}

/// Check if a reference can be resolved to a followable URL.
///
/// Empty references and `javascript:` URLs are never resolvable. With a
/// base, the reference must join against it; without one, any other
/// non-empty reference is accepted.
///
/// # Arguments
/// * `reference` - Raw attribute value (`href`, `src`)
/// * `base` - Optional document URL
#[must_use]
pub fn is_resolvable(reference: &str, base: Option<&Url>) -> bool {
    let reference = reference.trim();

    if reference.is_empty() || is_script_url(reference) {
        return false;
    }

    match base {
        Some(base) => base.join(reference).is_ok(),
        None => true,
    }
}

/// Check if a `srcset` value names at least one candidate URL.
#[must_use]
pub fn srcset_has_candidate(srcset: &str) -> bool {
    srcset
        .split(',')
        .filter_map(|candidate| candidate.split_whitespace().next())
        .any(|url| !url.is_empty() && !is_script_url(url))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_script_urls_are_not_resolvable() {
        assert!(!is_resolvable("javascript:void(0)", None));
        assert!(!is_resolvable(" JAVASCRIPT:foo()", None));
    }

    #[test]
    fn test_empty_reference_is_not_resolvable() {
        assert!(!is_resolvable("", None));
        assert!(!is_resolvable("   ", None));
    }

    #[test]
    fn test_relative_reference_without_base() {
        assert!(is_resolvable("/path/page.html", None));
        assert!(is_resolvable("#section", None));
    }

    #[test]
    fn test_relative_reference_with_base() {
        let base = Url::parse("https://example.com/feed/").unwrap();
        assert!(is_resolvable("item.html", Some(&base)));
        assert!(is_resolvable("https://other.org/", Some(&base)));
    }

    #[test]
    fn test_unjoinable_reference_with_base() {
        let base = Url::parse("https://example.com/").unwrap();
        assert!(!is_resolvable("http://[::1", Some(&base)));
    }

    #[test]
    fn test_srcset_candidates() {
        assert!(srcset_has_candidate("a.jpg 1x, b.jpg 2x"));
        assert!(srcset_has_candidate("  small.png 320w"));
        assert!(!srcset_has_candidate(""));
        assert!(!srcset_has_candidate(" , "));
    }
}
