/// Core domain types: resource records and the fields they expose.
use serde::Serialize;

/// One `rddl:resource` entry found in a document.
/// Absent attributes stay `None` and are skipped when serialized.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Resource {
    /// Machine-readable purpose, from `xlink:arcrole`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub arcrole: Option<String>,
    /// Resolution base declared on the element itself via `xml:base`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base: Option<String>,
    /// Target URL, already prefixed with the effective base when relative.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
    /// Unique identifier from the unprefixed `ID` attribute.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Language tag, inherited from the root or set by `xml:lang`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lang: Option<String>,
    /// Machine-readable nature, from `xlink:role`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    /// Human-readable label, from `xlink:title`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Link type, from `xlink:type`. Always `simple` in practice.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub link_type: Option<String>,
}

impl Resource {
    /// Read one field by name.
    pub fn get(&self, field: ResourceField) -> Option<&str> {
        let value = match field {
            ResourceField::Arcrole => &self.arcrole,
            ResourceField::Base => &self.base,
            ResourceField::Href => &self.href,
            ResourceField::Id => &self.id,
            ResourceField::Lang => &self.lang,
            ResourceField::Role => &self.role,
            ResourceField::Title => &self.title,
            ResourceField::Type => &self.link_type,
        };
        return value.as_deref();
    }

    /// Overwrite one field by name.
    pub fn set(&mut self, field: ResourceField, value: String) {
        let slot = match field {
            ResourceField::Arcrole => &mut self.arcrole,
            ResourceField::Base => &mut self.base,
            ResourceField::Href => &mut self.href,
            ResourceField::Id => &mut self.id,
            ResourceField::Lang => &mut self.lang,
            ResourceField::Role => &mut self.role,
            ResourceField::Title => &mut self.title,
            ResourceField::Type => &mut self.link_type,
        };
        *slot = Some(value);
    }
}

/// The keys a resource record can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceField {
    /// `arcrole`, the purpose.
    Arcrole,
    /// `base`.
    Base,
    /// `href`.
    Href,
    /// `id`.
    Id,
    /// `lang`.
    Lang,
    /// `role`, the nature.
    Role,
    /// `title`.
    Title,
    /// `type`.
    Type,
}

impl ResourceField {
    /// Map a lower-cased local attribute name to its field.
    /// Returns `None` for XLink attributes the record does not keep.
    pub fn from_key(key: &str) -> Option<Self> {
        return match key {
            "arcrole" => Some(Self::Arcrole),
            "base" => Some(Self::Base),
            "href" => Some(Self::Href),
            "id" => Some(Self::Id),
            "lang" => Some(Self::Lang),
            "role" => Some(Self::Role),
            "title" => Some(Self::Title),
            "type" => Some(Self::Type),
            _ => None,
        };
    }

    /// The output key, as used in JSON and text listings.
    pub const fn key(self) -> &'static str {
        return match self {
            Self::Arcrole => "arcrole",
            Self::Base => "base",
            Self::Href => "href",
            Self::Id => "id",
            Self::Lang => "lang",
            Self::Role => "role",
            Self::Title => "title",
            Self::Type => "type",
        };
    }

    /// All fields in output order.
    pub const ALL: [Self; 8] = [
        Self::Id,
        Self::Lang,
        Self::Title,
        Self::Href,
        Self::Role,
        Self::Arcrole,
        Self::Type,
        Self::Base,
    ];
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_only_present_keys() {
        let mut resource = Resource::default();
        resource.set(ResourceField::Href, "http://example.org/a.css".to_string());
        resource.set(ResourceField::Type, "simple".to_string());

        let json = serde_json::to_value(&resource).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "href": "http://example.org/a.css", "type": "simple" })
        );
    }

    #[test]
    fn from_key_round_trips_every_field() {
        for field in ResourceField::ALL {
            assert_eq!(ResourceField::from_key(field.key()), Some(field));
        }
        assert_eq!(ResourceField::from_key("show"), None);
    }
}
