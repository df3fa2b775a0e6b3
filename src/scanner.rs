//! Streaming XML scan that reports every start tag to a visitor.

use std::collections::HashMap;
use std::fmt::Display;
use std::io::BufRead;
use std::sync::LazyLock;

use quick_xml::Reader;
use quick_xml::escape::{EscapeError, resolve_predefined_entity, unescape_with};
use quick_xml::events::{BytesStart, Event};
use regex::Regex;

use crate::error::Error;

/// An internal general entity declaration with a quoted literal value.
/// Parameter entities (`%`) and external (`SYSTEM`/`PUBLIC`) ones do not match.
#[allow(clippy::expect_used, reason = "hardcoded pattern is a compile-time invariant")]
static ENTITY_DECL: LazyLock<Regex> = LazyLock::new(|| {
    return Regex::new(r#"<!ENTITY\s+([^\s%"'>]+)\s+(?:"([^"]*)"|'([^']*)')\s*>"#)
        .expect("valid regex");
});

/// Replacement text of entities declared in the internal DTD subset.
type Entities = HashMap<String, String>;

/// One start tag, with element and attribute names folded to upper case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartTag {
    /// Attributes in source order as `(folded name, unescaped value)`.
    pub attributes: Vec<(String, String)>,
    /// Folded qualified element name, e.g. `RDDL:RESOURCE`.
    pub name: String,
}

impl StartTag {
    /// Look up an attribute by its folded qualified name.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        return self
            .attributes
            .iter()
            .find(|(key, _)| return key == name)
            .map(|(_, value)| return value.as_str());
    }
}

/// Receives start tags in document order.
pub trait StartTagVisitor {
    /// Called once per element, for both `<x>` and `<x/>`.
    fn start_tag(&mut self, tag: &StartTag);
}

/// Scan `input` to the end, feeding every start tag to `visitor`.
/// Returns the number of elements seen.
///
/// # Errors
///
/// Returns `Error::ParseFailed` on malformed markup or a read failure,
/// including a missing root element, an element left open at end of input,
/// or a second top-level element.
pub fn scan<R: BufRead, V: StartTagVisitor>(
    input: R,
    source_name: &str,
    visitor: &mut V,
) -> Result<usize, Error> {
    let mut reader = Reader::from_reader(input);
    reader.config_mut().check_end_names = true;

    let mut entities = Entities::new();
    let mut buf = Vec::new();
    let mut depth = 0_usize;
    let mut elements = 0_usize;

    loop {
        let event = match reader.read_event_into(&mut buf) {
            Ok(event) => event,
            Err(e) => return Err(scan_error(source_name, reader.error_position(), &e)),
        };

        match event {
            Event::Start(start) => {
                reject_second_root(source_name, &reader, depth, elements)?;
                let tag = fold_start_tag(&start, &reader, &entities, source_name)?;
                visitor.start_tag(&tag);
                depth = depth.saturating_add(1);
                elements = elements.saturating_add(1);
            },
            Event::Empty(start) => {
                reject_second_root(source_name, &reader, depth, elements)?;
                let tag = fold_start_tag(&start, &reader, &entities, source_name)?;
                visitor.start_tag(&tag);
                elements = elements.saturating_add(1);
            },
            Event::DocType(doctype) => {
                let text = reader
                    .decoder()
                    .decode(&doctype)
                    .map_err(|e| return scan_error(source_name, reader.buffer_position(), &e))?;
                declare_entities(&mut entities, &text);
            },
            Event::End(_) => depth = depth.saturating_sub(1),
            Event::Eof => break,
            _ => {},
        }
        buf.clear();
    }

    if elements == 0 {
        return Err(scan_error(source_name, reader.buffer_position(), &"no element found"));
    }
    if depth > 0 {
        return Err(scan_error(
            source_name,
            reader.buffer_position(),
            &format!("{depth} element(s) left open at end of input"),
        ));
    }

    return Ok(elements);
}

/// A document has exactly one root: once it closed, any further element is junk.
///
/// # Errors
///
/// Returns `Error::ParseFailed` if an element starts after the root closed.
fn reject_second_root<R>(
    source_name: &str,
    reader: &Reader<R>,
    depth: usize,
    elements: usize,
) -> Result<(), Error> {
    if depth == 0 && elements > 0 {
        return Err(scan_error(
            source_name,
            reader.buffer_position(),
            &"junk after document element",
        ));
    }
    return Ok(());
}

/// Decode a start tag and fold its names.
///
/// # Errors
///
/// Returns `Error::ParseFailed` for undecodable names, malformed attributes,
/// or values with unknown entity references.
fn fold_start_tag<R>(
    start: &BytesStart<'_>,
    reader: &Reader<R>,
    entities: &Entities,
    source_name: &str,
) -> Result<StartTag, Error> {
    let position = reader.buffer_position();
    let decoder = reader.decoder();
    let name = decoder
        .decode(start.name().as_ref())
        .map_err(|e| return scan_error(source_name, position, &e))?
        .to_ascii_uppercase();

    let mut attributes = Vec::new();
    for attr in start.attributes() {
        let attr = attr.map_err(|e| return scan_error(source_name, position, &e))?;
        let key = decoder
            .decode(attr.key.as_ref())
            .map_err(|e| return scan_error(source_name, position, &e))?
            .to_ascii_uppercase();
        let raw = decoder
            .decode(&attr.value)
            .map_err(|e| return scan_error(source_name, position, &e))?;
        let value = attribute_value(&raw, entities)
            .map_err(|e| return scan_error(source_name, position, &e))?;
        attributes.push((key, value));
    }

    return Ok(StartTag { attributes, name });
}

/// Normalize and unescape a raw attribute value (XML 1.0 3.3.3).
///
/// Literal tabs and line breaks become spaces before references are
/// expanded, so `&#10;` still yields a newline. A `\r\n` pair counts as one
/// line break.
///
/// # Errors
///
/// Returns `EscapeError` for a malformed reference or an entity that is
/// neither predefined nor declared in the internal subset.
fn attribute_value(raw: &str, entities: &Entities) -> Result<String, EscapeError> {
    let normalized = normalize_whitespace(raw);
    let value = unescape_with(&normalized, |name| {
        return entities
            .get(name)
            .map(String::as_str)
            .or_else(|| return resolve_predefined_entity(name));
    })?;
    return Ok(value.into_owned());
}

/// Map every literal tab, CR, LF or CRLF pair to a single space.
fn normalize_whitespace(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\r' => {
                chars.next_if_eq(&'\n');
                out.push(' ');
            },
            '\t' | '\n' => out.push(' '),
            other => out.push(other),
        }
    }
    return out;
}

/// Record the internal entities declared in a `<!DOCTYPE ...>` body.
///
/// The first declaration of a name wins. Replacement text is normalized and
/// expanded against entities declared before it; a value that cannot be
/// expanded is kept literally.
fn declare_entities(entities: &mut Entities, doctype: &str) {
    for caps in ENTITY_DECL.captures_iter(doctype) {
        let (Some(name), Some(literal)) = (caps.get(1), caps.get(2).or(caps.get(3))) else {
            continue;
        };
        if entities.contains_key(name.as_str()) {
            continue;
        }
        let text = attribute_value(literal.as_str(), entities)
            .unwrap_or_else(|_| return normalize_whitespace(literal.as_str()));
        entities.insert(name.as_str().to_owned(), text);
    }
}

/// Wrap a tokenizer diagnostic with the input name and byte position.
fn scan_error<P, E>(source_name: &str, position: P, reason: &E) -> Error
where
    u64: TryFrom<P>,
    E: Display + ?Sized,
{
    return Error::ParseFailed {
        position: u64::try_from(position).unwrap_or(u64::MAX),
        reason: reason.to_string(),
        source_name: source_name.to_owned(),
    };
}
