//! The finished result of a parse and its read-only queries.

use std::collections::HashMap;

use serde::Serialize;

use crate::error::Error;
use crate::types::{Resource, ResourceField};

/// Resources of one document in document order, plus an index by `ID`.
/// Only produced by a successful parse; never mutated afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ResourceDirectory {
    /// Identifier to position in `resources`.
    #[serde(skip)]
    index: HashMap<String, usize>,
    /// Every resource found, in document order.
    resources: Vec<Resource>,
}

impl ResourceDirectory {
    /// Wrap a collection and its index.
    pub(crate) const fn new(resources: Vec<Resource>, index: HashMap<String, usize>) -> Self {
        return Self { index, resources };
    }

    /// All resources in document order.
    pub fn all(&self) -> &[Resource] {
        return &self.resources;
    }

    /// The resource registered under `id`.
    ///
    /// # Errors
    ///
    /// Returns `Error::IdentifierNotFound` if no resource carries `id`.
    pub fn by_id(&self, id: &str) -> Result<&Resource, Error> {
        return self
            .index
            .get(id)
            .and_then(|&position| return self.resources.get(position))
            .ok_or_else(|| return Error::IdentifierNotFound { id: id.to_owned() });
    }

    /// Resources whose nature (`role`) equals `nature` exactly.
    pub fn by_nature(&self, nature: &str) -> Vec<&Resource> {
        return self.filter_by(ResourceField::Role, nature);
    }

    /// Resources whose purpose (`arcrole`) equals `purpose` exactly.
    pub fn by_purpose(&self, purpose: &str) -> Vec<&Resource> {
        return self.filter_by(ResourceField::Arcrole, purpose);
    }

    /// Resources whose language equals `lang` exactly.
    pub fn by_language(&self, lang: &str) -> Vec<&Resource> {
        return self.filter_by(ResourceField::Lang, lang);
    }

    /// Resources whose `field` is present and equals `value`, case-sensitively,
    /// in document order.
    pub fn filter_by(&self, field: ResourceField, value: &str) -> Vec<&Resource> {
        return self
            .resources
            .iter()
            .filter(|resource| return resource.get(field) == Some(value))
            .collect();
    }

    /// Number of resources.
    pub fn len(&self) -> usize {
        return self.resources.len();
    }

    /// Whether the document held no resources.
    pub fn is_empty(&self) -> bool {
        return self.resources.is_empty();
    }
}
