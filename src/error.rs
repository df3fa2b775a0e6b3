/// Crate-level error types for RDDL extraction and the command-line glue.
use std::path::PathBuf;

/// Every failure names the input, identifier, or operation involved so a
/// caller can report it without re-running the parse.
#[allow(clippy::error_impl_error, reason = "crate-wide error type re-exported as rddl::Error")]
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// `.rddl.toml` exists but is not valid TOML for the config schema.
    #[error("invalid config {}: {source}", path.display())]
    ConfigInvalid {
        /// Path to the malformed config file.
        path: PathBuf,
        /// The wrapped TOML deserialization error.
        source: toml::de::Error,
    },

    /// No resource in the parsed document carries the requested `ID`.
    #[error("identifier not found: `{id}`")]
    IdentifierNotFound {
        /// Identifier that was looked up.
        id: String,
    },

    /// Underlying I/O error while opening an input or reading config.
    #[error("io: {0}")]
    Io(
        /// The wrapped I/O error.
        #[from]
        std::io::Error,
    ),

    /// Resources could not be rendered as JSON.
    #[error("json: {0}")]
    Json(
        /// The wrapped serialization error.
        #[from]
        serde_json::Error,
    ),

    /// The caller asked for an input mode the parser does not implement.
    #[error("not supported: {operation}")]
    NotSupported {
        /// Description of the rejected operation.
        operation: &'static str,
    },

    /// The XML scan hit malformed markup or a read failure.
    #[error("parse failed: {source_name} at byte {position}: {reason}")]
    ParseFailed {
        /// Byte offset in the input where the scanner stopped.
        position: u64,
        /// Description of the failure reported by the tokenizer.
        reason: String,
        /// File path, or `<stream>` for reader input.
        source_name: String,
    },
}
