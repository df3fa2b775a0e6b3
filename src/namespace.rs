//! Lexical namespace handling.
//!
//! Prefixes are matched as strings after case folding. Namespace URIs are
//! never resolved, so a document binding the RDDL namespace to another
//! prefix is not recognized unless that prefix is configured.

/// Prefix that marks `xml:lang` and `xml:base`, after folding.
pub const XML_PREFIX: &str = "XML";

/// Local name of RDDL resource elements, after folding.
pub const RESOURCE_LOCAL_NAME: &str = "RESOURCE";

/// Unprefixed attribute carrying a resource identifier, after folding.
pub const ID_ATTRIBUTE: &str = "ID";

/// Root attribute declaring the document language, after folding.
pub const XML_LANG: &str = "XML:LANG";

/// Root attribute declaring the document base, after folding.
pub const XML_BASE: &str = "XML:BASE";

/// The two prefix labels the extractor recognizes.
/// Stored upper-cased so they compare directly against folded names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Namespaces {
    /// Prefix denoting RDDL elements.
    rddl: String,
    /// Prefix denoting XLink attributes.
    xlink: String,
}

impl Namespaces {
    /// Build from caller-supplied labels in any case.
    pub fn new(rddl: &str, xlink: &str) -> Self {
        return Self {
            rddl: rddl.to_ascii_uppercase(),
            xlink: xlink.to_ascii_uppercase(),
        };
    }

    /// Whether a folded prefix denotes the RDDL namespace.
    pub fn is_rddl(&self, prefix: &str) -> bool {
        return prefix == self.rddl;
    }

    /// Whether a folded prefix denotes the XLink namespace.
    pub fn is_xlink(&self, prefix: &str) -> bool {
        return prefix == self.xlink;
    }
}

impl Default for Namespaces {
    fn default() -> Self {
        return Self::new("rddl", "xlink");
    }
}

/// A qualified name split at its first `:`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QName<'a> {
    /// Text after the first `:`, up to a second `:` if any.
    pub local: &'a str,
    /// Text before the first `:`.
    pub prefix: &'a str,
}

impl<'a> QName<'a> {
    /// Split a name. Returns `None` when it carries no prefix separator.
    /// Anything after a second `:` is dropped.
    pub fn split(name: &'a str) -> Option<Self> {
        let (prefix, rest) = name.split_once(':')?;
        let local = rest.split(':').next().unwrap_or(rest);
        return Some(Self { local, prefix });
    }
}
