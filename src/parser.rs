//! Parser entry point: input selection and per-parse session wiring.

use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use tracing::info;

use crate::directory::ResourceDirectory;
use crate::error::Error;
use crate::extractor::ParseSession;
use crate::namespace::Namespaces;
use crate::scanner;

/// Where a document comes from.
pub enum Input {
    /// A file on disk. Its directory becomes the default base.
    File(PathBuf),
    /// Raw markup text. Always rejected with `Error::NotSupported`.
    Markup(String),
    /// An already-open stream. No default base.
    Reader(Box<dyn BufRead>),
}

impl fmt::Debug for Input {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        return match self {
            Self::File(path) => f.debug_tuple("File").field(path).finish(),
            Self::Markup(text) => f.debug_tuple("Markup").field(&text.len()).finish(),
            Self::Reader(_) => f.write_str("Reader(..)"),
        };
    }
}

/// Extracts RDDL resources from documents.
///
/// Holds only the namespace labels; every parse builds its own session,
/// so one parser can be reused for any number of documents.
#[derive(Debug, Clone, Default)]
pub struct RddlParser {
    /// Prefix labels for RDDL elements and XLink attributes.
    namespaces: Namespaces,
}

impl RddlParser {
    /// Create a parser recognizing the given prefix labels.
    pub const fn new(namespaces: Namespaces) -> Self {
        return Self { namespaces };
    }

    /// Parse one document to completion.
    ///
    /// # Errors
    ///
    /// Returns `Error::NotSupported` for `Input::Markup`, `Error::Io` if a
    /// file cannot be opened, or `Error::ParseFailed` if the markup is
    /// malformed or the stream fails mid-read.
    pub fn parse(&self, input: Input) -> Result<ResourceDirectory, Error> {
        return match input {
            Input::File(path) => self.parse_file(&path),
            Input::Markup(_) => Err(Error::NotSupported {
                operation: "parsing from a string; pass a file path or a reader",
            }),
            Input::Reader(reader) => self.parse_reader(reader),
        };
    }

    /// Parse a file. Relative hrefs default to the file's directory as base.
    ///
    /// # Errors
    ///
    /// Returns `Error::Io` if the file cannot be opened, or
    /// `Error::ParseFailed` if its content is malformed.
    pub fn parse_file(&self, path: &Path) -> Result<ResourceDirectory, Error> {
        let file = File::open(path)?;
        let source_name = path.display().to_string();
        return self.run(BufReader::new(file), &source_name, Some(directory_base(path)));
    }

    /// Parse an open stream. There is no default base.
    ///
    /// # Errors
    ///
    /// Returns `Error::ParseFailed` if the content is malformed or unreadable.
    pub fn parse_reader<R: BufRead>(&self, reader: R) -> Result<ResourceDirectory, Error> {
        return self.run(reader, "<stream>", None);
    }

    /// Drive the scanner with a fresh session and collect its result.
    ///
    /// # Errors
    ///
    /// Propagates scanner failures; the partial session is dropped.
    fn run<R: BufRead>(
        &self,
        reader: R,
        source_name: &str,
        default_base: Option<String>,
    ) -> Result<ResourceDirectory, Error> {
        let mut session = ParseSession::new(&self.namespaces, default_base);
        let elements = scanner::scan(reader, source_name, &mut session)?;
        let directory = session.finish();
        info!(source = source_name, elements, resources = directory.len(), "parsed");
        return Ok(directory);
    }
}

/// The containing directory of `path`, with a trailing `/` so that
/// concatenating a relative href yields a path inside that directory.
fn directory_base(path: &Path) -> String {
    let parent = path
        .parent()
        .map(|p| return p.to_string_lossy().into_owned())
        .unwrap_or_default();
    if parent.is_empty() {
        return "./".to_owned();
    }
    if parent.ends_with('/') {
        return parent;
    }
    return format!("{parent}/");
}
