//! Extract resource directory entries from RDDL documents.
//!
//! RDDL (Resource Directory Description Language) embeds `rddl:resource`
//! elements in XHTML or other XML. Each carries XLink attributes that point
//! at related material: stylesheets, schemas, DTDs, normative references.
//!
//! ```no_run
//! use rddl::{Input, RddlParser};
//!
//! let parser = RddlParser::default();
//! let directory = parser.parse(Input::File("index.xhtml".into()))?;
//!
//! let css = directory.by_id("CSS")?;
//! let stylesheets = directory.by_nature("http://www.w3.org/1999/XSL/Transform");
//! let references = directory.by_purpose("http://www.rddl.org/purposes#normative-reference");
//! # let _ = (css, stylesheets, references);
//! # Ok::<(), rddl::Error>(())
//! ```
//!
//! Namespaces are matched lexically: elements are recognized by the
//! configured prefix label (`rddl` by default), not by namespace URI.

pub mod config;
pub mod directory;
pub mod error;
pub mod extractor;
pub mod namespace;
pub mod parser;
pub mod resolver;
pub mod scanner;
pub mod types;

pub use directory::ResourceDirectory;
pub use error::Error;
pub use namespace::Namespaces;
pub use parser::{Input, RddlParser};
pub use types::{Resource, ResourceField};

/// Version of the query API.
pub const API_VERSION: &str = "0.9";
