//! Property definitions and per-property value resolution.

use std::fmt;
use std::sync::Arc;

use cssparser::{Parser, ParserInput, Token};
use indexmap::IndexMap;

use crate::codec::Fragment;
use crate::error::ConfigError;
use crate::style::Literal;

/// A single CSS declaration, `property: value`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Declaration {
    /// CSS property name, already kebab-cased.
    pub property: String,
    /// CSS value text.
    pub value: String,
}

impl Declaration {
    /// Creates a declaration.
    pub fn new(property: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            property: property.into(),
            value: value.into(),
        }
    }
}

impl fmt::Display for Declaration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.property, self.value)
    }
}

/// Turns a resolved CSS value into the declarations it sets.
pub type DeclarationMapper = Arc<dyn Fn(&str) -> Vec<Declaration> + Send + Sync>;

/// Resolves an open-ended value to CSS value text, or `None` to reject it.
pub type ArbitraryResolver = Arc<dyn Fn(&Literal) -> Option<String> + Send + Sync>;

/// The values a property accepts.
#[derive(Clone)]
pub enum ValueSet {
    /// A fixed, ordered map of value names to CSS value text.
    Enumerated(IndexMap<String, String>),
    /// Like `Enumerated`, but also accepts `name/opacity`.
    Color(IndexMap<String, String>),
    /// Any value the resolver accepts.
    Arbitrary(ArbitraryResolver),
}

impl fmt::Debug for ValueSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueSet::Enumerated(values) => f.debug_tuple("Enumerated").field(values).finish(),
            ValueSet::Color(values) => f.debug_tuple("Color").field(values).finish(),
            ValueSet::Arbitrary(_) => f.write_str("Arbitrary(..)"),
        }
    }
}

/// How a theme property's values resolve to CSS.
///
/// # Example
///
/// ```rust
/// use stylemacro::theme::{Declaration, PropertyDefinition};
///
/// let display = PropertyDefinition::list(["block", "flex", "none"]);
/// let padding_start = PropertyDefinition::values([("2", "0.5rem"), ("4", "1rem")])
///     .targets(["padding-inline-start"]);
/// let rotate = PropertyDefinition::arbitrary(|value| value.as_number().map(|n| format!("{n}deg")));
/// let transition = PropertyDefinition::values([("colors", "color, background-color")])
///     .map_to(|value| vec![
///         Declaration::new("transition-property", value),
///         Declaration::new("transition-duration", "150ms"),
///     ]);
/// # let _ = (display, padding_start, rotate, transition);
/// ```
#[derive(Clone)]
pub struct PropertyDefinition {
    values: ValueSet,
    mapper: Option<DeclarationMapper>,
}

impl fmt::Debug for PropertyDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PropertyDefinition")
            .field("values", &self.values)
            .field("mapped", &self.mapper.is_some())
            .finish()
    }
}

impl PropertyDefinition {
    /// A property with an enumerated map of value names to CSS values.
    pub fn values<I, K, V>(values: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self::from_set(ValueSet::Enumerated(collect_values(values)))
    }

    /// A property whose accepted values are also its CSS values.
    pub fn list<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let values = values
            .into_iter()
            .map(|v| {
                let v = v.into();
                (v.clone(), v)
            })
            .collect();
        Self::from_set(ValueSet::Enumerated(values))
    }

    /// A color property. Accepts every named color plus `name/opacity`.
    pub fn color<I, K, V>(values: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self::from_set(ValueSet::Color(collect_values(values)))
    }

    /// A property accepting open-ended values.
    pub fn arbitrary<F>(resolver: F) -> Self
    where
        F: Fn(&Literal) -> Option<String> + Send + Sync + 'static,
    {
        Self::from_set(ValueSet::Arbitrary(Arc::new(resolver)))
    }

    fn from_set(values: ValueSet) -> Self {
        Self {
            values,
            mapper: None,
        }
    }

    /// Replaces the default single declaration with the mapper's output.
    pub fn map_to<F>(mut self, mapper: F) -> Self
    where
        F: Fn(&str) -> Vec<Declaration> + Send + Sync + 'static,
    {
        self.mapper = Some(Arc::new(mapper));
        self
    }

    /// Sets the resolved value on each of the given CSS properties instead of
    /// the property's own name.
    pub fn targets<I, S>(self, targets: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let targets: Vec<String> = targets
            .into_iter()
            .map(|t| css_property_name(&t.into()))
            .collect();
        self.map_to(move |value| {
            targets
                .iter()
                .map(|t| Declaration::new(t.clone(), value))
                .collect()
        })
    }

    /// The property's value set.
    pub fn value_set(&self) -> &ValueSet {
        &self.values
    }

    /// Resolves `value` to declarations and a class fragment.
    ///
    /// `name` is the theme property name, used for errors and as the default
    /// declaration target.
    pub fn resolve(&self, name: &str, value: &Literal) -> Result<ResolvedValue, ConfigError> {
        let (css_value, fragment) = self.resolve_value(name, value)?;
        let declarations = match &self.mapper {
            Some(mapper) => mapper(&css_value),
            None => vec![Declaration::new(css_property_name(name), css_value)],
        };
        Ok(ResolvedValue {
            declarations,
            fragment,
        })
    }

    /// Resolves `value` to CSS value text without applying the mapper.
    pub fn resolve_value(
        &self,
        name: &str,
        value: &Literal,
    ) -> Result<(String, Fragment), ConfigError> {
        if let Literal::String(raw) = value {
            if raw.starts_with("--") {
                let css = format!("var({raw})");
                let fragment = Fragment::hashed(&css);
                return Ok((css, fragment));
            }
            if raw.starts_with('[') {
                let inner = raw
                    .strip_prefix('[')
                    .and_then(|r| r.strip_suffix(']'))
                    .ok_or_else(|| arbitrary_error(name, raw, "missing closing ']'"))?;
                validate_arbitrary(name, raw, inner)?;
                let css = inner.trim().to_string();
                let fragment = Fragment::hashed(&css);
                return Ok((css, fragment));
            }
        }

        let key = value.key();
        match &self.values {
            ValueSet::Enumerated(values) => lookup(values, name, &key),
            ValueSet::Color(values) => match key.split_once('/') {
                Some((color, opacity)) if !values.contains_key(key.as_ref()) => {
                    let (css, _) = lookup(values, name, color)?;
                    let opacity = parse_opacity(name, opacity)?;
                    let css = format!("rgb(from {css} r g b / {opacity}%)");
                    let fragment = Fragment::hashed(&css);
                    Ok((css, fragment))
                }
                _ => lookup(values, name, &key),
            },
            ValueSet::Arbitrary(resolver) => resolver(value)
                .map(|css| {
                    let fragment = Fragment::hashed(&css);
                    (css, fragment)
                })
                .ok_or_else(|| ConfigError::UnknownValue {
                    property: name.to_string(),
                    value: key.into_owned(),
                }),
        }
    }
}

/// The result of resolving one value of a property.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedValue {
    /// Declarations the class sets.
    pub declarations: Vec<Declaration>,
    /// The value's contribution to the class token.
    pub fragment: Fragment,
}

fn collect_values<I, K, V>(values: I) -> IndexMap<String, String>
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<String>,
{
    values
        .into_iter()
        .map(|(k, v)| (k.into(), v.into()))
        .collect()
}

fn lookup(
    values: &IndexMap<String, String>,
    name: &str,
    key: &str,
) -> Result<(String, Fragment), ConfigError> {
    values
        .get_full(key)
        .map(|(index, _, css)| (css.clone(), Fragment::Indexed(index)))
        .ok_or_else(|| ConfigError::UnknownValue {
            property: name.to_string(),
            value: key.to_string(),
        })
}

fn parse_opacity(name: &str, opacity: &str) -> Result<String, ConfigError> {
    match opacity.parse::<f64>() {
        Ok(n) if (0.0..=100.0).contains(&n) => Ok(Literal::Number(n).key().into_owned()),
        _ => Err(ConfigError::InvalidOpacity {
            property: name.to_string(),
            opacity: opacity.to_string(),
        }),
    }
}

fn arbitrary_error(name: &str, raw: &str, reason: &str) -> ConfigError {
    ConfigError::InvalidArbitraryValue {
        property: name.to_string(),
        value: raw.to_string(),
        reason: reason.to_string(),
    }
}

/// Checks that bracketed text can stand alone as a declaration value.
fn validate_arbitrary(name: &str, raw: &str, inner: &str) -> Result<(), ConfigError> {
    if inner.trim().is_empty() {
        return Err(arbitrary_error(name, raw, "empty value"));
    }

    let mut input = ParserInput::new(inner);
    let mut parser = Parser::new(&mut input);
    // Nested blocks are skipped by the tokenizer, so only top-level tokens show up here.
    while let Ok(token) = parser.next_including_whitespace_and_comments() {
        let reason = match token {
            Token::BadString(_) | Token::BadUrl(_) => "unterminated string or url",
            Token::CloseParenthesis | Token::CloseSquareBracket | Token::CloseCurlyBracket => {
                "unbalanced closing bracket"
            }
            Token::CurlyBracketBlock => "blocks are not allowed in values",
            Token::Semicolon => "values cannot contain ';'",
            Token::Delim('!') => "values cannot carry '!' flags",
            _ => continue,
        };
        return Err(arbitrary_error(name, raw, reason));
    }
    Ok(())
}

/// Converts a camel-cased theme property name into a CSS property name.
///
/// Custom properties (`--name`) are returned unchanged.
///
/// ```rust
/// use stylemacro::theme::css_property_name;
///
/// assert_eq!(css_property_name("backgroundColor"), "background-color");
/// assert_eq!(css_property_name("--accent"), "--accent");
/// ```
pub fn css_property_name(name: &str) -> String {
    if name.starts_with("--") {
        return name.to_string();
    }
    let mut out = String::with_capacity(name.len() + 4);
    let mut prev_lower = false;
    for c in name.chars() {
        if c.is_ascii_uppercase() && prev_lower {
            out.push('-');
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c);
        }
        prev_lower = c.is_ascii_lowercase();
    }
    out
}
