// src/utils/url.rs

//! Readability-proxy URL composition.

/// Compose the proxied, readable URL for a published document.
///
/// The proxy expects the target with its scheme stripped, appended
/// directly after the prefix (the prefix carries the replacement
/// scheme).
///
/// # Examples
/// ```
/// use menu_sync::utils::url::readable_url;
///
/// assert_eq!(
///     readable_url("https://r.jina.ai/http://", "https://example.com/doc/pub"),
///     "https://r.jina.ai/http://example.com/doc/pub"
/// );
/// ```
pub fn readable_url(proxy_prefix: &str, document_url: &str) -> String {
    let target = document_url
        .strip_prefix("https://")
        .or_else(|| document_url.strip_prefix("http://"))
        .unwrap_or(document_url);
    format!("{proxy_prefix}{target}")
}

/// Append the cache-busting query value to a composed URL.
pub fn bust_url(base: &str, bust: u64) -> String {
    let separator = if base.contains('?') { '&' } else { '?' };
    format!("{base}{separator}v={bust}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_readable_url_strips_https() {
        assert_eq!(
            readable_url("https://r.jina.ai/http://", "https://docs.google.com/d/x/pub"),
            "https://r.jina.ai/http://docs.google.com/d/x/pub"
        );
    }

    #[test]
    fn test_readable_url_strips_http() {
        assert_eq!(
            readable_url("https://r.jina.ai/http://", "http://example.com/menu"),
            "https://r.jina.ai/http://example.com/menu"
        );
    }

    #[test]
    fn test_readable_url_schemeless_target() {
        assert_eq!(
            readable_url("https://proxy/", "example.com/menu"),
            "https://proxy/example.com/menu"
        );
    }

    #[test]
    fn test_bust_url_appends_query() {
        assert_eq!(bust_url("https://proxy/doc", 42), "https://proxy/doc?v=42");
    }

    #[test]
    fn test_bust_url_extends_existing_query() {
        assert_eq!(
            bust_url("https://proxy/doc?lang=sv", 7),
            "https://proxy/doc?lang=sv&v=7"
        );
    }
}
