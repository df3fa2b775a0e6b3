//! Turns start tags into resource records and the identifier index.

use std::collections::HashMap;

use tracing::{debug, trace, warn};

use crate::directory::ResourceDirectory;
use crate::namespace::{
    ID_ATTRIBUTE, Namespaces, QName, RESOURCE_LOCAL_NAME, XML_BASE, XML_LANG, XML_PREFIX,
};
use crate::resolver::resolve_href;
use crate::scanner::{StartTag, StartTagVisitor};
use crate::types::{Resource, ResourceField};

/// Document-level state established by the root element.
#[derive(Debug, Default)]
struct ParseContext {
    /// Base for relative hrefs: the root's `xml:base`, else the input's location.
    base_url: Option<String>,
    /// Root `xml:lang`, inherited by every resource.
    lang: Option<String>,
    /// Set once the first element has been seen.
    root_processed: bool,
}

/// All mutable state of one parse. Built fresh per input and consumed by
/// [`ParseSession::finish`], so nothing carries over between parses.
#[derive(Debug)]
pub struct ParseSession<'n> {
    /// Root-level declarations.
    context: ParseContext,
    /// Identifier to position in `resources`. Later duplicates overwrite.
    index: HashMap<String, usize>,
    /// Prefix labels recognized for elements and attributes.
    namespaces: &'n Namespaces,
    /// Resources in document order.
    resources: Vec<Resource>,
}

impl<'n> ParseSession<'n> {
    /// Start a session. `default_base` is derived from the input location
    /// and is replaced by the root's `xml:base` if it declares one.
    pub fn new(namespaces: &'n Namespaces, default_base: Option<String>) -> Self {
        return Self {
            context: ParseContext {
                base_url: default_base,
                ..ParseContext::default()
            },
            index: HashMap::new(),
            namespaces,
            resources: Vec::new(),
        };
    }

    /// Close the session and hand over the collected resources.
    pub fn finish(self) -> ResourceDirectory {
        return ResourceDirectory::new(self.resources, self.index);
    }

    /// Record the root's language and base. Runs for the first element only.
    fn capture_root(&mut self, tag: &StartTag) {
        if let Some(lang) = tag.attribute(XML_LANG) {
            self.context.lang = Some(lang.to_owned());
        }
        if let Some(base) = tag.attribute(XML_BASE) {
            self.context.base_url = Some(base.to_owned());
        }
        self.context.root_processed = true;
        debug!(
            root = %tag.name,
            lang = ?self.context.lang,
            base = ?self.context.base_url,
            "root processed"
        );
    }

    /// Whether the folded element name is `<rddl prefix>:RESOURCE`.
    fn is_resource_element(&self, name: &str) -> bool {
        let Some(qname) = QName::split(name) else {
            return false;
        };
        return self.namespaces.is_rddl(qname.prefix) && qname.local == RESOURCE_LOCAL_NAME;
    }

    /// Build a record from a resource element's attributes.
    /// Registers its `ID` against the position the record is about to take.
    fn build_resource(&mut self, tag: &StartTag) -> Resource {
        let mut resource = Resource {
            lang: self.context.lang.clone(),
            ..Resource::default()
        };

        for (name, value) in &tag.attributes {
            if name == ID_ATTRIBUTE {
                resource.id = Some(value.clone());
                self.register_id(value);
                continue;
            }

            let Some(qname) = QName::split(name) else {
                continue;
            };
            let local = qname.local.to_ascii_lowercase();

            if self.namespaces.is_xlink(qname.prefix) {
                if let Some(field) = ResourceField::from_key(&local) {
                    resource.set(field, value.clone());
                }
            } else if qname.prefix == XML_PREFIX {
                match local.as_str() {
                    "base" => resource.base = Some(value.clone()),
                    "lang" => resource.lang = Some(value.clone()),
                    _ => {},
                }
            }
        }

        return resource;
    }

    /// Point `id` at the next free position in the collection.
    fn register_id(&mut self, id: &str) {
        let position = self.resources.len();
        if let Some(previous) = self.index.insert(id.to_owned(), position) {
            warn!(id, previous, position, "duplicate resource id, keeping the later one");
        }
    }
}

impl StartTagVisitor for ParseSession<'_> {
    fn start_tag(&mut self, tag: &StartTag) {
        if !self.context.root_processed {
            self.capture_root(tag);
        }

        if !self.is_resource_element(&tag.name) {
            trace!(element = %tag.name, "not a resource element");
            return;
        }

        let resource = self.build_resource(tag);
        let resource = resolve_href(resource, self.context.base_url.as_deref());
        debug!(id = ?resource.id, href = ?resource.href, "resource found");
        self.resources.push(resource);
    }
}

#[cfg(test)]
#[allow(clippy::missing_panics_doc, clippy::indexing_slicing, reason = "test assertions")]
mod tests {
    use super::*;

    fn tag(name: &str, attributes: &[(&str, &str)]) -> StartTag {
        return StartTag {
            attributes: attributes
                .iter()
                .map(|(k, v)| return ((*k).to_string(), (*v).to_string()))
                .collect(),
            name: name.to_string(),
        };
    }

    #[test]
    fn root_declarations_are_captured_once() {
        let namespaces = Namespaces::default();
        let mut session = ParseSession::new(&namespaces, None);
        session.start_tag(&tag("HTML", &[("XML:LANG", "en"), ("XML:BASE", "http://a/")]));
        session.start_tag(&tag("BODY", &[("XML:LANG", "fr"), ("XML:BASE", "http://b/")]));

        assert_eq!(session.context.lang.as_deref(), Some("en"));
        assert_eq!(session.context.base_url.as_deref(), Some("http://a/"));
    }

    #[test]
    fn root_base_overrides_default_base() {
        let namespaces = Namespaces::default();
        let mut session = ParseSession::new(&namespaces, Some("docs/".to_string()));
        session.start_tag(&tag("HTML", &[("XML:BASE", "http://example.org/")]));
        assert_eq!(session.context.base_url.as_deref(), Some("http://example.org/"));
    }

    #[test]
    fn root_may_itself_be_a_resource() {
        let namespaces = Namespaces::default();
        let mut session = ParseSession::new(&namespaces, None);
        session.start_tag(&tag("RDDL:RESOURCE", &[("XML:LANG", "de"), ("XLINK:HREF", "a")]));

        let directory = session.finish();
        assert_eq!(directory.all().len(), 1);
        assert_eq!(directory.all()[0].lang.as_deref(), Some("de"));
    }

    #[test]
    fn ignores_other_prefixes_and_local_names() {
        let namespaces = Namespaces::default();
        let mut session = ParseSession::new(&namespaces, None);
        session.start_tag(&tag("HTML", &[]));
        session.start_tag(&tag("RESOURCE", &[("XLINK:HREF", "a")]));
        session.start_tag(&tag("RDF:RESOURCE", &[("XLINK:HREF", "b")]));
        session.start_tag(&tag("RDDL:LINK", &[("XLINK:HREF", "c")]));

        assert!(session.finish().all().is_empty());
    }

    #[test]
    fn extracts_xlink_and_xml_attributes() {
        let namespaces = Namespaces::default();
        let mut session = ParseSession::new(&namespaces, None);
        session.start_tag(&tag("HTML", &[("XML:LANG", "en")]));
        session.start_tag(&tag(
            "RDDL:RESOURCE",
            &[
                ("ID", "CSS"),
                ("XLINK:TYPE", "simple"),
                ("XLINK:TITLE", "Stylesheet"),
                ("XLINK:ROLE", "http://www.isi.edu/in-notes/iana/assignments/media-types/text/css"),
                ("XLINK:ARCROLE", "http://www.rddl.org/purposes#reference"),
                ("XLINK:HREF", "rddl.css"),
                ("XLINK:SHOW", "none"),
                ("XML:LANG", "en-US"),
                ("DC:CREATOR", "someone"),
                ("CLASS", "resource"),
            ],
        ));

        let directory = session.finish();
        let css = directory.by_id("CSS").unwrap();
        assert_eq!(
            css,
            &Resource {
                arcrole: Some("http://www.rddl.org/purposes#reference".to_string()),
                base: None,
                href: Some("rddl.css".to_string()),
                id: Some("CSS".to_string()),
                lang: Some("en-US".to_string()),
                role: Some(
                    "http://www.isi.edu/in-notes/iana/assignments/media-types/text/css".to_string()
                ),
                title: Some("Stylesheet".to_string()),
                link_type: Some("simple".to_string()),
            }
        );
    }

    #[test]
    fn element_base_is_recorded_and_used() {
        let namespaces = Namespaces::default();
        let mut session = ParseSession::new(&namespaces, Some("ignored/".to_string()));
        session.start_tag(&tag("HTML", &[]));
        session.start_tag(&tag(
            "RDDL:RESOURCE",
            &[("XML:BASE", "http://mirror.example/"), ("XLINK:HREF", "a.dtd")],
        ));

        let directory = session.finish();
        let resource = &directory.all()[0];
        assert_eq!(resource.base.as_deref(), Some("http://mirror.example/"));
        assert_eq!(resource.href.as_deref(), Some("http://mirror.example/a.dtd"));
    }

    #[test]
    fn duplicate_ids_keep_the_later_resource() {
        let namespaces = Namespaces::default();
        let mut session = ParseSession::new(&namespaces, None);
        session.start_tag(&tag("HTML", &[]));
        session.start_tag(&tag("RDDL:RESOURCE", &[("ID", "X"), ("XLINK:HREF", "first")]));
        session.start_tag(&tag("RDDL:RESOURCE", &[("ID", "X"), ("XLINK:HREF", "second")]));

        let directory = session.finish();
        assert_eq!(directory.all().len(), 2);
        assert_eq!(directory.by_id("X").unwrap().href.as_deref(), Some("second"));
    }

    #[test]
    fn custom_labels_select_prefixes() {
        let namespaces = Namespaces::new("dir", "xl");
        let mut session = ParseSession::new(&namespaces, None);
        session.start_tag(&tag("HTML", &[]));
        session.start_tag(&tag("RDDL:RESOURCE", &[("XLINK:HREF", "skipped")]));
        session.start_tag(&tag("DIR:RESOURCE", &[("XLINK:HREF", "a"), ("XL:HREF", "b")]));

        let directory = session.finish();
        assert_eq!(directory.all().len(), 1);
        assert_eq!(directory.all()[0].href.as_deref(), Some("b"));
    }
}
