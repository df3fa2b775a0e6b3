//! Markdown diagnostics printed to stderr.

use rddl::Error;

/// ANSI escape that starts bold text.
const BOLD: &str = "\x1b[1m";
/// ANSI escape that resets text attributes.
const RESET: &str = "\x1b[0m";

/// Render an error as markdown with bold headings and print to stderr.
pub fn print_error(e: &Error) {
    let md = render_error(e);
    for line in md.lines() {
        if line.starts_with('#') {
            eprintln!("{BOLD}{line}{RESET}");
        } else {
            eprintln!("{line}");
        }
    }
}

/// Render an error as a structured markdown diagnostic: what happened,
/// and how to fix it where there is something to fix.
pub fn render_error(e: &Error) -> String {
    return match e {
        Error::ConfigInvalid { path, source } => format!("\
# Error: Invalid Config

`{}` is not a valid config file:

{source}

## Fix

Recognized keys are `rddl_prefix`, `xlink_prefix`, `include` and `exclude`.
", path.display()),

        Error::IdentifierNotFound { id } => format!("\
# Error: Identifier Not Found

No resource in the document has `id=\"{id}\"`.

## Fix

List the available identifiers:

    rddl list <input>
"),

        Error::Io(e) => format!("\
# Error: I/O

{e}
"),

        Error::Json(e) => format!("\
# Error: JSON Output

{e}
"),

        Error::NotSupported { operation } => format!("\
# Error: Not Supported

{operation}
"),

        Error::ParseFailed { source_name, position, reason } => render_parse_failed(source_name, *position, reason),
    };
}

/// Diagnostic for a document the scanner rejected.
fn render_parse_failed(source_name: &str, position: u64, reason: &str) -> String {
    return format!("\
# Error: Parse Failed

`{source_name}` could not be read as XML (byte {position}): {reason}

Resources are only extracted from well-formed documents.
");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_id_suggests_listing() {
        let md = render_error(&Error::IdentifierNotFound { id: "CSS".to_string() });
        assert!(md.starts_with("# Error: Identifier Not Found"));
        assert!(md.contains("`id=\"CSS\"`"));
        assert!(md.contains("rddl list"));
    }

    #[test]
    fn parse_failure_names_source_and_position() {
        let md = render_error(&Error::ParseFailed {
            position: 42,
            reason: "unexpected end".to_string(),
            source_name: "index.xml".to_string(),
        });
        assert!(md.contains("`index.xml`"));
        assert!(md.contains("byte 42"));
    }
}
