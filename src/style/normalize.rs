//! Classification of conditional keys into a tagged branch tree.
//!
//! After this pass nothing downstream looks at key names again: every
//! conditional mapping has become a list of [`Branch`]es whose
//! [`BranchCondition`] says how the branch is decided.

use indexmap::IndexMap;

use super::value::{Literal, StyleValue};
use crate::error::ConfigError;
use crate::theme::{is_flag_name, ConditionId, ConditionKind, ThemeRegistry};

/// How a branch is decided.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum BranchCondition {
    /// Taken when no dynamic sibling matches.
    Default,
    /// Decided by the renderer through a CSS prelude.
    Theme(ConditionId),
    /// Taken when a boolean render-state flag is set.
    Flag(String),
    /// Taken when a render-state variant equals `tag`.
    Variant { name: String, tag: String },
}

impl BranchCondition {
    /// Whether the selection procedure decides this branch.
    pub fn is_dynamic(&self) -> bool {
        matches!(self, BranchCondition::Flag(_) | BranchCondition::Variant { .. })
    }
}

/// A normalized style value.
#[derive(Debug, Clone, PartialEq)]
pub enum StyleNode {
    Value(Literal),
    Branches(Vec<Branch>),
}

/// One conditional arm.
#[derive(Debug, Clone, PartialEq)]
pub struct Branch {
    pub condition: BranchCondition,
    pub node: StyleNode,
}

/// Normalizes the value of description entry `property`.
///
/// A nested flag or variant object takes over the enclosing `default` and
/// theme-condition values it does not declare itself, so a partially
/// matching nested object still falls back to them. The values of `default`
/// and theme-condition keys inherit nothing.
///
/// A `default` key inside a variant's tag map is the fallback for the
/// enclosing object. An object may have only one fallback.
pub fn normalize(
    registry: &ThemeRegistry,
    property: &str,
    value: &StyleValue,
) -> Result<StyleNode, ConfigError> {
    Normalizer { registry, property }.node(value, &[])
}

/// Fallback and theme-condition values handed down into dynamic objects.
type Scope<'a> = Vec<(BranchCondition, &'a StyleValue)>;

struct Normalizer<'a> {
    registry: &'a ThemeRegistry,
    property: &'a str,
}

impl<'a> Normalizer<'a> {
    fn node(
        &self,
        value: &'a StyleValue,
        inherited: &[(BranchCondition, &'a StyleValue)],
    ) -> Result<StyleNode, ConfigError> {
        match value {
            StyleValue::Literal(literal) => Ok(StyleNode::Value(literal.clone())),
            StyleValue::Conditional(entries) => self.branches(entries, inherited),
        }
    }

    fn branches(
        &self,
        entries: &'a IndexMap<String, StyleValue>,
        inherited: &[(BranchCondition, &'a StyleValue)],
    ) -> Result<StyleNode, ConfigError> {
        let mut scope: Scope<'a> = Vec::new();
        if let Some(fallback) = self.fallback(entries)? {
            scope.push((BranchCondition::Default, fallback));
        }
        for (key, value) in entries {
            if let Some(ConditionKind::Theme(id)) = self.registry.condition(key) {
                scope.push((BranchCondition::Theme(id), value));
            }
        }
        let missing: Scope<'a> = inherited
            .iter()
            .filter(|(condition, _)| scope.iter().all(|(own, _)| own != condition))
            .cloned()
            .collect();
        scope.extend(missing.iter().cloned());

        let mut branches = Vec::with_capacity(entries.len() + missing.len());
        for (key, value) in entries {
            if key == "default" {
                branches.push(Branch {
                    condition: BranchCondition::Default,
                    node: self.node(value, &[])?,
                });
                continue;
            }

            match self.registry.condition(key) {
                Some(ConditionKind::Theme(id)) => branches.push(Branch {
                    condition: BranchCondition::Theme(id),
                    node: self.node(value, &[])?,
                }),
                Some(ConditionKind::Runtime) => branches.push(Branch {
                    condition: BranchCondition::Flag(key.clone()),
                    node: self.dynamic(value, &scope)?,
                }),
                None if is_flag_name(key) => branches.push(Branch {
                    condition: BranchCondition::Flag(key.clone()),
                    node: self.dynamic(value, &scope)?,
                }),
                None => {
                    let tags = self.tag_map(key, value)?;
                    for (tag, tag_value) in tags {
                        let branch = if tag == "default" {
                            Branch {
                                condition: BranchCondition::Default,
                                node: self.node(tag_value, &[])?,
                            }
                        } else {
                            Branch {
                                condition: BranchCondition::Variant {
                                    name: key.clone(),
                                    tag: tag.clone(),
                                },
                                node: self.dynamic(tag_value, &scope)?,
                            }
                        };
                        branches.push(branch);
                    }
                }
            }
        }

        for (condition, value) in missing {
            branches.push(Branch {
                condition,
                node: self.node(value, &[])?,
            });
        }

        Ok(StyleNode::Branches(branches))
    }

    /// The object's own fallback: its `default` key, or a `default` tag of
    /// one of its variants.
    fn fallback(
        &self,
        entries: &'a IndexMap<String, StyleValue>,
    ) -> Result<Option<&'a StyleValue>, ConfigError> {
        let mut found = entries.get("default");
        for (key, value) in entries {
            if key == "default" || self.registry.condition(key).is_some() || is_flag_name(key) {
                continue;
            }
            let Some(tag_default) = self.tag_map(key, value)?.get("default") else {
                continue;
            };
            if found.is_some() {
                return Err(ConfigError::ConflictingDefault {
                    property: self.property.to_string(),
                    key: key.clone(),
                });
            }
            found = Some(tag_default);
        }
        Ok(found)
    }

    fn tag_map(
        &self,
        key: &str,
        value: &'a StyleValue,
    ) -> Result<&'a IndexMap<String, StyleValue>, ConfigError> {
        match value {
            StyleValue::Conditional(tags) => Ok(tags),
            StyleValue::Literal(_) => Err(ConfigError::InvalidConditionKey {
                property: self.property.to_string(),
                key: key.to_string(),
            }),
        }
    }

    /// Normalizes the value under a dynamic key, handing down `scope`.
    fn dynamic(
        &self,
        value: &'a StyleValue,
        scope: &[(BranchCondition, &'a StyleValue)],
    ) -> Result<StyleNode, ConfigError> {
        match value {
            StyleValue::Conditional(_) => self.node(value, scope),
            StyleValue::Literal(_) => self.node(value, &[]),
        }
    }
}
