use std::path::Path;

use crate::error::Error;
use crate::namespace::Namespaces;

/// Name of the optional config file looked up in the working directory.
pub const CONFIG_FILE: &str = ".rddl.toml";

/// Project configuration loaded from `.rddl.toml`.
/// Prefix labels select RDDL elements and XLink attributes; include/exclude
/// patterns are path prefixes applied when scanning a directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Path prefixes excluded from directory scans.
    exclude: Vec<String>,
    /// Path prefixes a directory scan is limited to. Empty means everything.
    include: Vec<String>,
    /// Prefix label for RDDL elements, as written.
    rddl_prefix: String,
    /// Prefix label for XLink attributes, as written.
    xlink_prefix: String,
}

/// Raw TOML structure for `.rddl.toml`.
#[derive(serde::Deserialize)]
#[serde(deny_unknown_fields)]
struct RddlTomlConfig {
    /// See [`Config::exclude`].
    #[serde(default)]
    exclude: Vec<String>,
    /// See [`Config::include`].
    #[serde(default)]
    include: Vec<String>,
    /// See [`Config::rddl_prefix`].
    rddl_prefix: Option<String>,
    /// See [`Config::xlink_prefix`].
    xlink_prefix: Option<String>,
}

impl Config {
    /// Load config from `.rddl.toml` in the given root directory.
    /// Returns the defaults if the file doesn't exist.
    /// Returns an error if the file exists but is malformed, never silently
    /// falling back to defaults when the user wrote a config file.
    ///
    /// # Errors
    ///
    /// Returns `Error::Io` if reading fails (other than not-found),
    /// or `Error::ConfigInvalid` if the TOML is malformed.
    pub fn load(root: &Path) -> Result<Self, Error> {
        let path = root.join(CONFIG_FILE);
        let content = match std::fs::read_to_string(&path) {
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => return Err(Error::Io(e)),
            Ok(c) => c,
        };

        let raw: RddlTomlConfig = toml::from_str(&content)
            .map_err(|source| return Error::ConfigInvalid { path: path.clone(), source })?;
        let defaults = Self::default();
        return Ok(Self {
            exclude: raw.exclude,
            include: raw.include,
            rddl_prefix: raw.rddl_prefix.unwrap_or(defaults.rddl_prefix),
            xlink_prefix: raw.xlink_prefix.unwrap_or(defaults.xlink_prefix),
        });
    }

    /// Replace the prefix labels with command-line overrides, where given.
    #[must_use]
    pub fn with_prefixes(mut self, rddl: Option<String>, xlink: Option<String>) -> Self {
        if let Some(rddl) = rddl {
            self.rddl_prefix = rddl;
        }
        if let Some(xlink) = xlink {
            self.xlink_prefix = xlink;
        }
        return self;
    }

    /// The prefix labels in the form the parser expects.
    pub fn namespaces(&self) -> Namespaces {
        return Namespaces::new(&self.rddl_prefix, &self.xlink_prefix);
    }

    /// Check whether a document path should be scanned.
    ///
    /// A path is included if no include patterns are set (scan everything),
    /// or if the path starts with at least one include pattern.
    /// An included path is then excluded if it starts with any exclude pattern.
    pub fn should_scan(&self, relative_path: &str) -> bool {
        let included = self.include.is_empty()
            || self.include.iter().any(|p| return relative_path.starts_with(p.as_str()));

        if !included {
            return false;
        }

        return !self.exclude.iter().any(|p| return relative_path.starts_with(p.as_str()));
    }
}

impl Default for Config {
    /// Default labels `rddl` and `xlink`; scan everything.
    fn default() -> Self {
        return Self {
            exclude: Vec::new(),
            include: Vec::new(),
            rddl_prefix: "rddl".to_owned(),
            xlink_prefix: "xlink".to_owned(),
        };
    }
}

#[cfg(test)]
#[allow(clippy::missing_panics_doc, reason = "test assertions")]
mod tests {
    use super::*;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load(dir.path()).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.namespaces(), Namespaces::default());
    }

    #[test]
    fn reads_prefixes_and_filters() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(CONFIG_FILE),
            "rddl_prefix = \"dir\"\ninclude = [\"docs/\"]\nexclude = [\"docs/drafts/\"]\n",
        )
        .unwrap();

        let config = Config::load(dir.path()).unwrap();
        assert_eq!(config.namespaces(), Namespaces::new("dir", "xlink"));
        assert!(config.should_scan("docs/index.xml"));
        assert!(!config.should_scan("docs/drafts/wip.xml"));
        assert!(!config.should_scan("site/index.xml"));
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE), "rddl_prefix = [").unwrap();

        let err = Config::load(dir.path()).unwrap_err();
        assert!(matches!(err, Error::ConfigInvalid { .. }), "got {err:?}");
    }

    #[test]
    fn command_line_overrides_file() {
        let config = Config::default().with_prefixes(None, Some("xl".to_string()));
        assert_eq!(config.namespaces(), Namespaces::new("rddl", "xl"));
    }
}
