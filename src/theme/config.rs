//! Serde model for theme registries.
//!
//! Registries can be described in YAML or JSON:
//!
//! ```yaml
//! properties:
//!   display: [block, flex, grid]
//!   paddingTop: { 0: 0px, 2: 0.5rem, 4: 1rem }
//!   paddingStart:
//!     values: { 0: 0px, 2: 0.5rem }
//!     targets: [paddingInlineStart]
//!   backgroundColor:
//!     kind: color
//!     values: { white: "#fff", black: "#000" }
//!   rotate:
//!     kind: arbitrary
//!     unit: deg
//! conditions:
//!   dark: "@media (prefers-color-scheme: dark)"
//! shorthands:
//!   paddingY: [paddingTop, paddingBottom]
//! ```
//!
//! Properties that need custom logic (a transition shorthand that adds a
//! fixed duration, for example) are registered in code with
//! [`ThemeRegistry::builder`] instead.

use std::fmt;
use std::fs;
use std::path::Path;

use indexmap::IndexMap;
use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};

use super::property::PropertyDefinition;
use super::registry::ThemeRegistry;
use crate::error::ConfigError;
use crate::style::Literal;

/// Top-level registry configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ThemeConfig {
    /// Properties in ordinal order.
    #[serde(default)]
    pub properties: IndexMap<String, PropertyConfig>,
    /// Condition name to prelude; empty preludes are runtime conditions.
    #[serde(default)]
    pub conditions: IndexMap<String, String>,
    /// Shorthand name to longhand property names.
    #[serde(default)]
    pub shorthands: IndexMap<String, Vec<String>>,
}

/// One property entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropertyConfig {
    /// Values that are their own CSS text.
    List(Vec<Literal>),
    /// Explicit kind, values, and declaration targets.
    Detailed(DetailedProperty),
    /// Value names mapped to CSS text.
    Values(ValueMap),
}

/// The long form of a property entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DetailedProperty {
    /// How values are interpreted.
    #[serde(default)]
    pub kind: PropertyKind,
    /// Value names mapped to CSS text. Unused for arbitrary properties.
    #[serde(default)]
    pub values: ValueMap,
    /// CSS properties to set instead of the property's own name.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub targets: Vec<String>,
    /// Unit appended to bare numbers of arbitrary properties.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
}

/// Interpretation of a detailed property's values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PropertyKind {
    /// Enumerated values.
    #[default]
    Values,
    /// Enumerated colors with `/opacity` support.
    Color,
    /// Any number or string, hashed into the class name.
    Arbitrary,
}

/// Ordered value map whose keys may be YAML numbers (`0.5: 0.125rem`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValueMap(pub IndexMap<String, String>);

impl<'de> Deserialize<'de> for ValueMap {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct ValueMapVisitor;

        impl<'de> Visitor<'de> for ValueMapVisitor {
            type Value = ValueMap;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of value names to CSS values")
            }

            fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut values = IndexMap::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((key, value)) = access.next_entry::<Literal, Literal>()? {
                    values.insert(key.key().into_owned(), value.key().into_owned());
                }
                Ok(ValueMap(values))
            }
        }

        deserializer.deserialize_map(ValueMapVisitor)
    }
}

impl PropertyConfig {
    fn into_definition(self) -> PropertyDefinition {
        match self {
            PropertyConfig::List(values) => {
                PropertyDefinition::list(values.iter().map(|v| v.key().into_owned()))
            }
            PropertyConfig::Values(values) => PropertyDefinition::values(values.0),
            PropertyConfig::Detailed(detailed) => {
                let definition = match detailed.kind {
                    PropertyKind::Values => PropertyDefinition::values(detailed.values.0),
                    PropertyKind::Color => PropertyDefinition::color(detailed.values.0),
                    PropertyKind::Arbitrary => {
                        let unit = detailed.unit.unwrap_or_default();
                        PropertyDefinition::arbitrary(move |value| match value {
                            Literal::Number(_) => Some(format!("{}{unit}", value.key())),
                            Literal::String(s) => Some(s.clone()),
                            Literal::Bool(_) => None,
                        })
                    }
                };
                if detailed.targets.is_empty() {
                    definition
                } else {
                    definition.targets(detailed.targets)
                }
            }
        }
    }
}

impl ThemeConfig {
    /// Parses a YAML registry description.
    pub fn from_yaml_str(source: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(source)?)
    }

    /// Parses a JSON registry description.
    pub fn from_json_str(source: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(source)?)
    }

    /// Reads a registry description from disk.
    ///
    /// Files ending in `.json` are parsed as JSON, everything else as YAML.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let source = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Self::from_json_str(&source),
            _ => Self::from_yaml_str(&source),
        }
    }

    /// Builds the registry this configuration describes.
    pub fn into_registry(self) -> Result<ThemeRegistry, ConfigError> {
        let mut builder = ThemeRegistry::builder();
        for (name, property) in self.properties {
            builder = builder.property(name, property.into_definition());
        }
        for (name, prelude) in self.conditions {
            builder = builder.condition(name, prelude);
        }
        for (name, longhands) in self.shorthands {
            builder = builder.shorthand(name, longhands);
        }
        builder.build()
    }
}

impl ThemeRegistry {
    /// Builds a registry from a YAML description.
    pub fn from_yaml_str(source: &str) -> Result<Self, ConfigError> {
        ThemeConfig::from_yaml_str(source)?.into_registry()
    }

    /// Builds a registry from a JSON description.
    pub fn from_json_str(source: &str) -> Result<Self, ConfigError> {
        ThemeConfig::from_json_str(source)?.into_registry()
    }

    /// Builds a registry from a YAML or JSON file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        ThemeConfig::from_path(path)?.into_registry()
    }
}
