//! Href resolution against the inherited base.

use std::sync::LazyLock;

use regex::Regex;

use crate::types::Resource;

/// An RFC 3986 scheme followed by its `:` at the start of a reference.
#[allow(clippy::expect_used, reason = "hardcoded pattern is a compile-time invariant")]
static SCHEME: LazyLock<Regex> =
    LazyLock::new(|| return Regex::new(r"^[A-Za-z][A-Za-z0-9+.\-]*:").expect("valid regex"));

/// Whether a reference already names its scheme and needs no base.
pub fn has_scheme(href: &str) -> bool {
    return SCHEME.is_match(href);
}

/// Prefix a relative `href` with the effective base.
///
/// The effective base is the element's own `base`, else `document_base`.
/// Without either, or when `href` is absent or already carries a scheme,
/// the resource is returned unchanged. Resolution is plain string
/// concatenation: separators are not inserted and `..` is not collapsed.
pub fn resolve_href(mut resource: Resource, document_base: Option<&str>) -> Resource {
    let Some(base) = resource.base.as_deref().or(document_base) else {
        return resource;
    };
    let Some(href) = resource.href.as_deref() else {
        return resource;
    };
    if has_scheme(href) {
        return resource;
    }

    let resolved = format!("{base}{href}");
    resource.href = Some(resolved);
    return resource;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_href(href: &str) -> Resource {
        return Resource {
            href: Some(href.to_string()),
            ..Resource::default()
        };
    }

    #[test]
    fn relative_href_gets_document_base() {
        let resolved = resolve_href(with_href("style.css"), Some("http://example.org/dir/"));
        assert_eq!(resolved.href.as_deref(), Some("http://example.org/dir/style.css"));
    }

    #[test]
    fn absolute_href_is_untouched() {
        let resolved =
            resolve_href(with_href("http://cdn.example.com/x.xsl"), Some("http://example.org/dir/"));
        assert_eq!(resolved.href.as_deref(), Some("http://cdn.example.com/x.xsl"));
    }

    #[test]
    fn element_base_wins_over_document_base() {
        let mut resource = with_href("schema.xsd");
        resource.base = Some("http://local.example/".to_string());
        let resolved = resolve_href(resource, Some("http://example.org/dir/"));
        assert_eq!(resolved.href.as_deref(), Some("http://local.example/schema.xsd"));
    }

    #[test]
    fn no_base_leaves_href_alone() {
        let resolved = resolve_href(with_href("style.css"), None);
        assert_eq!(resolved.href.as_deref(), Some("style.css"));
    }

    #[test]
    fn concatenation_is_textual() {
        let resolved = resolve_href(with_href("../up.css"), Some("http://example.org/dir"));
        assert_eq!(resolved.href.as_deref(), Some("http://example.org/dir../up.css"));
    }

    #[test]
    fn missing_href_stays_missing() {
        let resolved = resolve_href(Resource::default(), Some("http://example.org/"));
        assert_eq!(resolved.href, None);
    }

    #[test]
    fn scheme_detection() {
        assert!(has_scheme("urn:isbn:0451450523"));
        assert!(has_scheme("mailto:someone@example.org"));
        assert!(!has_scheme("//cdn.example.com/x.css"));
        assert!(!has_scheme("dir/file.css"));
        assert!(!has_scheme("#fragment"));
    }
}
