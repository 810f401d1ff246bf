//! Style description values.

use std::borrow::Cow;
use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// A leaf value in a style description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Literal {
    Bool(bool),
    Number(f64),
    String(String),
}

impl Literal {
    /// The name used to look this value up in a property's value set.
    ///
    /// Integral numbers drop their fraction, so `2.0` and `2` share the key `"2"`.
    ///
    /// ```rust
    /// use stylemacro::style::Literal;
    ///
    /// assert_eq!(Literal::Number(2.0).key(), "2");
    /// assert_eq!(Literal::Number(0.5).key(), "0.5");
    /// assert_eq!(Literal::Bool(true).key(), "true");
    /// ```
    pub fn key(&self) -> Cow<'_, str> {
        match self {
            Literal::String(s) => Cow::Borrowed(s),
            Literal::Bool(true) => Cow::Borrowed("true"),
            Literal::Bool(false) => Cow::Borrowed("false"),
            Literal::Number(n) if n.fract() == 0.0 && n.abs() < 1e15 => {
                Cow::Owned((*n as i64).to_string())
            }
            Literal::Number(n) => Cow::Owned(n.to_string()),
        }
    }

    /// The numeric value, if this is a number.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Literal::Number(n) => Some(*n),
            _ => None,
        }
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.key())
    }
}

impl From<&str> for Literal {
    fn from(value: &str) -> Self {
        Literal::String(value.to_string())
    }
}

impl From<String> for Literal {
    fn from(value: String) -> Self {
        Literal::String(value)
    }
}

impl From<f64> for Literal {
    fn from(value: f64) -> Self {
        Literal::Number(value)
    }
}

impl From<i32> for Literal {
    fn from(value: i32) -> Self {
        Literal::Number(value.into())
    }
}

impl From<bool> for Literal {
    fn from(value: bool) -> Self {
        Literal::Bool(value)
    }
}

/// A property's value: a literal, or a mapping of condition keys to values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StyleValue {
    Literal(Literal),
    Conditional(IndexMap<String, StyleValue>),
}

impl StyleValue {
    /// Builds a conditional value from `(key, value)` pairs, keeping their order.
    pub fn conditional<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<StyleValue>,
    {
        StyleValue::Conditional(
            entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

impl From<Literal> for StyleValue {
    fn from(value: Literal) -> Self {
        StyleValue::Literal(value)
    }
}

macro_rules! literal_style_value {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for StyleValue {
                fn from(value: $ty) -> Self {
                    StyleValue::Literal(Literal::from(value))
                }
            }
        )*
    };
}

literal_style_value!(&str, String, f64, i32, bool);

/// An ordered mapping from property, shorthand, or custom property name to
/// a [`StyleValue`].
///
/// # Example
///
/// ```rust
/// use stylemacro::style::{StyleDescription, StyleValue};
///
/// let built = StyleDescription::new()
///     .set("display", "flex")
///     .set("backgroundColor", StyleValue::conditional([
///         ("default", "white"),
///         ("isHovered", "gray-100"),
///     ]));
///
/// let parsed = StyleDescription::from_json_str(
///     r#"{"display": "flex", "backgroundColor": {"default": "white", "isHovered": "gray-100"}}"#,
/// ).unwrap();
///
/// assert_eq!(built, parsed);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StyleDescription {
    entries: IndexMap<String, StyleValue>,
}

impl StyleDescription {
    /// Creates an empty description.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a property, replacing any earlier value but keeping its position.
    pub fn set(mut self, name: impl Into<String>, value: impl Into<StyleValue>) -> Self {
        self.entries.insert(name.into(), value.into());
        self
    }

    /// Reads a description from a JSON object.
    pub fn from_json(value: &serde_json::Value) -> Result<Self, ConfigError> {
        Self::deserialize(value).map_err(ConfigError::Description)
    }

    /// Parses a description from JSON text.
    pub fn from_json_str(source: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(source).map_err(ConfigError::Description)
    }

    /// Parses a description from YAML text.
    pub fn from_yaml_str(source: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(source)?)
    }

    /// Entries in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &StyleValue)> + '_ {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<StyleValue>> FromIterator<(K, V)> for StyleDescription {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_number_keys() {
        assert_eq!(Literal::Number(4.0).key(), "4");
        assert_eq!(Literal::Number(-1.0).key(), "-1");
        assert_eq!(Literal::Number(1.5).key(), "1.5");
        assert_eq!(Literal::from(12).key(), "12");
    }

    #[test]
    fn test_description_keeps_key_order() {
        let desc = StyleDescription::from_json(&json!({
            "zIndex": 1,
            "display": "block",
            "alignItems": "center",
        }))
        .unwrap();
        let keys: Vec<_> = desc.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, ["zIndex", "display", "alignItems"]);
    }

    #[test]
    fn test_nested_conditionals_deserialize() {
        let desc = StyleDescription::from_json(&json!({
            "color": {"default": "black", "variant": {"primary": "blue-500"}, "truncate": true}
        }))
        .unwrap();
        let (_, value) = desc.iter().next().unwrap();
        let StyleValue::Conditional(map) = value else {
            panic!("expected a conditional value");
        };
        assert_eq!(map["default"], StyleValue::from("black"));
        assert!(matches!(map["variant"], StyleValue::Conditional(_)));
        assert_eq!(map["truncate"], StyleValue::from(true));
    }

    #[test]
    fn test_non_object_description_is_rejected() {
        let err = StyleDescription::from_json(&json!(["display", "block"])).unwrap_err();
        assert!(matches!(err, ConfigError::Description(_)));
    }

    #[test]
    fn test_yaml_description() {
        let desc = StyleDescription::from_yaml_str("padding: 4\ncolor:\n  default: black\n  dark: white\n")
            .unwrap();
        assert_eq!(desc.len(), 2);
        assert!(!desc.is_empty());
    }
}
