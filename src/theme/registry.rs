//! The immutable theme registry.
//!
//! A [`ThemeRegistry`] is built once through [`ThemeRegistryBuilder`] and never
//! changes afterwards. Building assigns the ordinals every class token is made
//! of:
//!
//! - **Properties** get an ordinal in registration order.
//! - **Condition preludes** get an ordinal in registration order, after
//!   deduplication, so two condition names sharing one media query produce the
//!   same tokens and the same cascade layer.
//! - **Runtime conditions** (empty prelude) get no ordinal; the selection
//!   procedure decides them, never CSS.
//!
//! Registration mistakes (duplicate properties, shorthands pointing nowhere, a
//! condition named `default`) are reported by [`ThemeRegistryBuilder::build`].

use indexmap::{IndexMap, IndexSet};
use log::debug;

use super::property::{PropertyDefinition, ResolvedValue};
use crate::codec::Fragment;
use crate::error::ConfigError;
use crate::style::Literal;

/// Stable ordinal of a theme property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PropertyId(pub usize);

/// Stable ordinal of a deduplicated theme-condition prelude.
///
/// The ordinal doubles as the condition's cascade-layer position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ConditionId(pub usize);

/// What a registered condition name refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConditionKind {
    /// Resolved by the renderer through a CSS prelude.
    Theme(ConditionId),
    /// Resolved by the selection procedure from render state.
    Runtime,
}

/// Returns `true` for boolean render-state names such as `isHovered`.
///
/// ```rust
/// use stylemacro::theme::is_flag_name;
///
/// assert!(is_flag_name("isFocusVisible"));
/// assert!(!is_flag_name("island"));
/// assert!(!is_flag_name("is"));
/// ```
pub fn is_flag_name(name: &str) -> bool {
    name.strip_prefix("is")
        .and_then(|rest| rest.chars().next())
        .is_some_and(|c| c.is_ascii_uppercase())
}

#[derive(Debug, Clone)]
struct PropertyEntry {
    name: String,
    definition: PropertyDefinition,
}

/// Property, condition, and shorthand tables with their ordinals.
///
/// # Example
///
/// ```rust
/// use stylemacro::theme::{PropertyDefinition, ThemeRegistry};
///
/// let registry = ThemeRegistry::builder()
///     .property("display", PropertyDefinition::list(["block", "flex"]))
///     .property("paddingTop", PropertyDefinition::values([("2", "0.5rem")]))
///     .property("paddingBottom", PropertyDefinition::values([("2", "0.5rem")]))
///     .shorthand("paddingY", ["paddingTop", "paddingBottom"])
///     .condition("dark", "@media (prefers-color-scheme: dark)")
///     .build()
///     .unwrap();
///
/// assert_eq!(registry.expand("paddingY").unwrap().len(), 2);
/// assert_eq!(registry.layer_count(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct ThemeRegistry {
    properties: Vec<PropertyEntry>,
    property_index: IndexMap<String, PropertyId>,
    shorthands: IndexMap<String, Vec<PropertyId>>,
    conditions: IndexMap<String, ConditionKind>,
    preludes: IndexSet<String>,
}

impl ThemeRegistry {
    /// Starts building a registry.
    pub fn builder() -> ThemeRegistryBuilder {
        ThemeRegistryBuilder::new()
    }

    /// Looks up a property's ordinal.
    pub fn property_id(&self, name: &str) -> Option<PropertyId> {
        self.property_index.get(name).copied()
    }

    /// The registered name of a property.
    pub fn property_name(&self, id: PropertyId) -> &str {
        &self.properties[id.0].name
    }

    /// The definition of a property.
    pub fn property(&self, id: PropertyId) -> &PropertyDefinition {
        &self.properties[id.0].definition
    }

    /// Number of registered properties.
    pub fn property_count(&self) -> usize {
        self.properties.len()
    }

    /// Expands a description key into the longhand properties it sets.
    ///
    /// Shorthands take precedence over a property of the same name so that
    /// class tokens are always keyed by longhands.
    pub fn expand(&self, name: &str) -> Result<Vec<PropertyId>, ConfigError> {
        if let Some(longhands) = self.shorthands.get(name) {
            return Ok(longhands.clone());
        }
        self.property_id(name)
            .map(|id| vec![id])
            .ok_or_else(|| ConfigError::UnknownProperty {
                name: name.to_string(),
            })
    }

    /// Looks up a registered condition.
    pub fn condition(&self, name: &str) -> Option<ConditionKind> {
        self.conditions.get(name).copied()
    }

    /// The CSS prelude of a theme condition.
    pub fn prelude(&self, id: ConditionId) -> &str {
        &self.preludes[id.0]
    }

    /// Number of distinct preludes, and so of condition layers.
    pub fn layer_count(&self) -> usize {
        self.preludes.len()
    }

    /// Distinct preludes in ordinal order.
    pub fn preludes(&self) -> impl Iterator<Item = (ConditionId, &str)> + '_ {
        self.preludes
            .iter()
            .enumerate()
            .map(|(i, p)| (ConditionId(i), p.as_str()))
    }

    /// Resolves a value of a theme property to declarations and a fragment.
    pub fn resolve(&self, id: PropertyId, value: &Literal) -> Result<ResolvedValue, ConfigError> {
        let entry = &self.properties[id.0];
        entry.definition.resolve(&entry.name, value)
    }

    /// Resolves a value of a theme property to bare CSS value text.
    ///
    /// Used for custom properties typed by a theme property.
    pub fn resolve_value(
        &self,
        id: PropertyId,
        value: &Literal,
    ) -> Result<(String, Fragment), ConfigError> {
        let entry = &self.properties[id.0];
        entry.definition.resolve_value(&entry.name, value)
    }
}

/// Builder for [`ThemeRegistry`].
///
/// Entries are recorded in call order; validation happens in [`build`](Self::build).
#[derive(Debug, Clone, Default)]
pub struct ThemeRegistryBuilder {
    properties: Vec<(String, PropertyDefinition)>,
    conditions: Vec<(String, String)>,
    shorthands: Vec<(String, Vec<String>)>,
}

impl ThemeRegistryBuilder {
    /// Creates an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a property.
    pub fn property(mut self, name: impl Into<String>, definition: PropertyDefinition) -> Self {
        self.properties.push((name.into(), definition));
        self
    }

    /// Registers a theme condition with a CSS prelude such as
    /// `@media (min-width: 640px)`. An empty prelude registers a runtime
    /// condition.
    pub fn condition(mut self, name: impl Into<String>, prelude: impl Into<String>) -> Self {
        self.conditions.push((name.into(), prelude.into()));
        self
    }

    /// Registers a runtime condition decided from render state.
    pub fn runtime_condition(self, name: impl Into<String>) -> Self {
        self.condition(name, "")
    }

    /// Registers a shorthand expanding to the given longhand properties.
    pub fn shorthand<I, S>(mut self, name: impl Into<String>, longhands: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.shorthands
            .push((name.into(), longhands.into_iter().map(Into::into).collect()));
        self
    }

    /// Validates the entries and assigns ordinals.
    pub fn build(self) -> Result<ThemeRegistry, ConfigError> {
        let mut properties = Vec::with_capacity(self.properties.len());
        let mut property_index = IndexMap::with_capacity(self.properties.len());
        for (name, definition) in self.properties {
            if property_index.contains_key(&name) {
                return Err(ConfigError::DuplicateProperty { name });
            }
            property_index.insert(name.clone(), PropertyId(properties.len()));
            properties.push(PropertyEntry { name, definition });
        }

        let mut conditions = IndexMap::with_capacity(self.conditions.len());
        let mut preludes = IndexSet::new();
        for (name, prelude) in self.conditions {
            if name == "default" {
                return Err(ConfigError::ReservedCondition { name });
            }
            if conditions.contains_key(&name) {
                return Err(ConfigError::InvalidDefinition {
                    name,
                    reason: "condition is defined twice".to_string(),
                });
            }
            let prelude = prelude.trim().to_string();
            let kind = if prelude.is_empty() {
                ConditionKind::Runtime
            } else {
                let (index, _) = preludes.insert_full(prelude);
                ConditionKind::Theme(ConditionId(index))
            };
            conditions.insert(name, kind);
        }

        let mut shorthands = IndexMap::with_capacity(self.shorthands.len());
        for (name, longhands) in self.shorthands {
            if shorthands.contains_key(&name) {
                return Err(ConfigError::InvalidDefinition {
                    name,
                    reason: "shorthand is defined twice".to_string(),
                });
            }
            let ids = longhands
                .into_iter()
                .map(|longhand| {
                    property_index
                        .get(&longhand)
                        .copied()
                        .ok_or_else(|| ConfigError::UnknownShorthandTarget {
                            shorthand: name.clone(),
                            property: longhand,
                        })
                })
                .collect::<Result<Vec<_>, _>>()?;
            shorthands.insert(name, ids);
        }

        debug!(
            target: "stylemacro::theme",
            "built theme registry: {} properties, {} shorthands, {} conditions ({} layers)",
            properties.len(),
            shorthands.len(),
            conditions.len(),
            preludes.len()
        );

        Ok(ThemeRegistry {
            properties,
            property_index,
            shorthands,
            conditions,
            preludes,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn builder() -> ThemeRegistryBuilder {
        ThemeRegistry::builder()
            .property("display", PropertyDefinition::list(["block", "flex"]))
            .property("color", PropertyDefinition::color([("red", "red")]))
    }

    #[test]
    fn test_property_ordinals_follow_registration_order() {
        let registry = builder().build().unwrap();
        assert_eq!(registry.property_id("display"), Some(PropertyId(0)));
        assert_eq!(registry.property_id("color"), Some(PropertyId(1)));
        assert_eq!(registry.property_name(PropertyId(1)), "color");
        assert_eq!(registry.property_count(), 2);
    }

    #[test]
    fn test_duplicate_property_rejected() {
        let err = builder()
            .property("display", PropertyDefinition::list(["grid"]))
            .build()
            .unwrap_err();
        assert!(matches!(err, ConfigError::DuplicateProperty { name } if name == "display"));
    }

    #[test]
    fn test_identical_preludes_share_an_ordinal() {
        let registry = builder()
            .condition("dark", "@media (prefers-color-scheme: dark)")
            .condition("sm", "@media (min-width: 640px)")
            .condition("night", "@media (prefers-color-scheme: dark)")
            .build()
            .unwrap();
        assert_eq!(registry.condition("dark"), registry.condition("night"));
        assert_eq!(
            registry.condition("sm"),
            Some(ConditionKind::Theme(ConditionId(1)))
        );
        assert_eq!(registry.layer_count(), 2);
        assert_eq!(
            registry.prelude(ConditionId(0)),
            "@media (prefers-color-scheme: dark)"
        );
    }

    #[test]
    fn test_empty_prelude_is_runtime_condition() {
        let registry = builder().runtime_condition("selected").build().unwrap();
        assert_eq!(registry.condition("selected"), Some(ConditionKind::Runtime));
        assert_eq!(registry.layer_count(), 0);
    }

    #[test]
    fn test_default_is_reserved() {
        let err = builder()
            .condition("default", "@media print")
            .build()
            .unwrap_err();
        assert!(matches!(err, ConfigError::ReservedCondition { .. }));
    }

    #[test]
    fn test_shorthand_with_unknown_target() {
        let err = builder()
            .shorthand("inset", ["top", "bottom"])
            .build()
            .unwrap_err();
        assert!(
            matches!(err, ConfigError::UnknownShorthandTarget { shorthand, property }
                if shorthand == "inset" && property == "top")
        );
    }

    #[test]
    fn test_duplicate_shorthand_rejected() {
        let err = builder()
            .shorthand("all", ["display"])
            .shorthand("all", ["color"])
            .build()
            .unwrap_err();
        assert!(
            matches!(err, ConfigError::InvalidDefinition { name, reason }
                if name == "all" && reason.contains("twice"))
        );
    }

    #[test]
    fn test_expand_prefers_shorthand() {
        let registry = builder()
            .shorthand("display", ["display", "color"])
            .build()
            .unwrap();
        assert_eq!(
            registry.expand("display").unwrap(),
            vec![PropertyId(0), PropertyId(1)]
        );
        assert_eq!(registry.expand("color").unwrap(), vec![PropertyId(1)]);
        assert!(matches!(
            registry.expand("margin"),
            Err(ConfigError::UnknownProperty { .. })
        ));
    }

    #[test]
    fn test_flag_names() {
        assert!(is_flag_name("isHovered"));
        assert!(!is_flag_name("isolation"));
        assert!(!is_flag_name("variant"));
    }
}
