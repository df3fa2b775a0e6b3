//! CLI commands: list, get, filter by field, and directory scan.

use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use rddl::config::Config;
use rddl::{Error, Input, RddlParser, Resource, ResourceDirectory, ResourceField};
use walkdir::WalkDir;

use crate::diagnostics;

/// Extensions of files the `scan` command tries to parse.
const DOCUMENT_EXTENSIONS: [&str; 4] = ["html", "rddl", "xhtml", "xml"];

/// How results are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// Pretty-printed JSON array of resource maps.
    Json,
    /// One indented block per resource.
    Text,
}

/// Turn a command-line input argument into a parser input. `-` is stdin.
fn input_for(arg: &str) -> Input {
    if arg == "-" {
        return Input::Reader(Box::new(BufReader::new(std::io::stdin())));
    }
    return Input::File(PathBuf::from(arg));
}

/// Print every resource of a document.
///
/// # Errors
///
/// Returns errors from parsing or JSON rendering.
pub fn list(parser: &RddlParser, input: &str, format: Format) -> Result<(), Error> {
    let directory = parser.parse(input_for(input))?;
    let resources: Vec<&Resource> = directory.all().iter().collect();
    print_resources(&resources, format)?;
    return Ok(());
}

/// Print the resource registered under `id`.
///
/// # Errors
///
/// Returns `Error::IdentifierNotFound` if no resource has the identifier,
/// or errors from parsing or JSON rendering.
pub fn get(parser: &RddlParser, input: &str, id: &str, format: Format) -> Result<(), Error> {
    let directory = parser.parse(input_for(input))?;
    let resource = directory.by_id(id)?;
    match format {
        Format::Json => println!("{}", serde_json::to_string_pretty(resource)?),
        Format::Text => print!("{}", render_resource(resource)),
    }
    return Ok(());
}

/// Print resources whose `field` equals `value`.
///
/// # Errors
///
/// Returns errors from parsing or JSON rendering.
pub fn filter(
    parser: &RddlParser,
    input: &str,
    field: ResourceField,
    value: &str,
    format: Format,
) -> Result<(), Error> {
    let directory = parser.parse(input_for(input))?;
    let resources = directory.filter_by(field, value);
    print_resources(&resources, format)?;
    return Ok(());
}

/// Parse every document under `root` that the config allows and print its
/// resources. Documents that fail to parse are reported and skipped.
///
/// # Errors
///
/// Returns `Error::Json` if the result cannot be rendered.
pub fn scan(
    parser: &RddlParser,
    config: &Config,
    root: &Path,
    format: Format,
) -> Result<ExitCode, Error> {
    let mut found: BTreeMap<String, ResourceDirectory> = BTreeMap::new();
    let mut failed = 0_u32;

    for entry in WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_map(Result::ok)
        .filter(|e| return e.file_type().is_file() && is_document(e.path()))
    {
        let path = entry.path();
        let relative = path.strip_prefix(root).unwrap_or(path).to_string_lossy().into_owned();
        if !config.should_scan(&relative) {
            tracing::debug!(path = %relative, "excluded by config");
            continue;
        }

        match parser.parse_file(path) {
            Ok(directory) => {
                found.insert(relative, directory);
            },
            Err(e) => {
                failed = failed.saturating_add(1);
                diagnostics::print_error(&e);
            },
        }
    }

    match format {
        Format::Json => println!("{}", serde_json::to_string_pretty(&found)?),
        Format::Text => print!("{}", render_scan(&found)),
    }

    if failed > 0 {
        eprintln!("{failed} document(s) could not be parsed");
        return Ok(ExitCode::FAILURE);
    }
    return Ok(ExitCode::SUCCESS);
}

/// Whether the file extension marks a document worth parsing.
fn is_document(path: &Path) -> bool {
    return path
        .extension()
        .and_then(|ext| return ext.to_str())
        .is_some_and(|ext| return DOCUMENT_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()));
}

/// Print a list of resources in the requested format.
///
/// # Errors
///
/// Returns `Error::Json` if JSON rendering fails.
fn print_resources(resources: &[&Resource], format: Format) -> Result<(), Error> {
    match format {
        Format::Json => println!("{}", serde_json::to_string_pretty(resources)?),
        Format::Text => print!("{}", render_resources(resources)),
    }
    return Ok(());
}

/// Render resources as text blocks separated by blank lines.
fn render_resources(resources: &[&Resource]) -> String {
    if resources.is_empty() {
        return "No resources found.\n".to_owned();
    }
    return resources
        .iter()
        .map(|r| return render_resource(r))
        .collect::<Vec<_>>()
        .join("\n");
}

/// Render one resource: its id (or a placeholder), then one line per field.
fn render_resource(resource: &Resource) -> String {
    let mut out = format!("{}\n", resource.id.as_deref().unwrap_or("(no id)"));
    for field in ResourceField::ALL {
        if field == ResourceField::Id {
            continue;
        }
        if let Some(value) = resource.get(field) {
            let _ = writeln!(out, "  {:<8} {value}", field.key());
        }
    }
    return out;
}

/// Render scan results grouped under one heading per document.
fn render_scan(found: &BTreeMap<String, ResourceDirectory>) -> String {
    let mut out = String::new();
    for (path, directory) in found {
        let resources: Vec<&Resource> = directory.all().iter().collect();
        let _ = writeln!(out, "## {path} ({} resources)\n", directory.len());
        out.push_str(&render_resources(&resources));
        out.push('\n');
    }
    return out;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_block_lists_present_fields_in_order() {
        let resource = Resource {
            id: Some("CSS".to_string()),
            href: Some("http://www.rddl.org/rddl.css".to_string()),
            link_type: Some("simple".to_string()),
            ..Resource::default()
        };
        assert_eq!(
            render_resource(&resource),
            "CSS\n  href     http://www.rddl.org/rddl.css\n  type     simple\n"
        );
    }

    #[test]
    fn resource_without_id_gets_placeholder() {
        assert_eq!(render_resource(&Resource::default()), "(no id)\n");
    }

    #[test]
    fn recognizes_document_extensions() {
        assert!(is_document(Path::new("site/index.XHTML")));
        assert!(is_document(Path::new("ns.rddl")));
        assert!(!is_document(Path::new("style.css")));
        assert!(!is_document(Path::new("README")));
    }
}
