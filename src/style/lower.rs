//! Lowering of normalized style trees into a [`RuleForest`].

use std::collections::BTreeSet;

use log::trace;

use super::normalize::{normalize, Branch, BranchCondition, StyleNode};
use super::rule::{ClassSelector, PropertyRules, Rule, RuleBody, RuleForest, RuntimeCondition, Selector};
use super::value::{Literal, StyleDescription, StyleValue};
use crate::codec::{self, Fragment};
use crate::error::ConfigError;
use crate::theme::{ConditionId, Declaration, PropertyId, ThemeRegistry};

/// Lowers a description into one rule group per longhand.
///
/// Shorthands expand to their longhands; the shared value is normalized once
/// and lowered for each longhand independently. Custom properties (`--name`)
/// get a hashed property unit.
pub fn lower(
    registry: &ThemeRegistry,
    description: &StyleDescription,
) -> Result<RuleForest, ConfigError> {
    let mut forest = RuleForest::default();

    for (name, value) in description.iter() {
        if name.starts_with("--") {
            forest.groups.push(lower_custom_property(registry, name, value)?);
            continue;
        }

        let longhands = registry.expand(name)?;
        let tree = normalize(registry, name, value)?;
        for id in longhands {
            let unit = codec::encode_ordinal(id.0);
            let target = Target::Theme(id);
            let rules = Lowering { registry, target: &target, unit: &unit }
                .node(&tree, &BTreeSet::new())?;
            forest.groups.push(PropertyRules {
                unit,
                name: registry.property_name(id).to_string(),
                rules,
            });
        }
    }

    trace!(
        target: "stylemacro::style",
        "lowered {} entries into {} property groups",
        description.len(),
        forest.groups.len()
    );
    Ok(forest)
}

fn lower_custom_property(
    registry: &ThemeRegistry,
    name: &str,
    value: &StyleValue,
) -> Result<PropertyRules, ConfigError> {
    let unit = codec::hash_unit(name);
    let (target, value) = match typed_custom_property(registry, name, value)? {
        Some((id, inner)) => (
            Target::Typed {
                name: name.to_string(),
                property: id,
            },
            inner,
        ),
        None => (Target::Raw(name.to_string()), value),
    };

    let tree = normalize(registry, name, value)?;
    let rules = Lowering {
        registry,
        target: &target,
        unit: &unit,
    }
    .node(&tree, &BTreeSet::new())?;

    Ok(PropertyRules {
        unit,
        name: name.to_string(),
        rules,
    })
}

/// Recognizes `{type: <theme property>, value: <style value>}`.
fn typed_custom_property<'v>(
    registry: &ThemeRegistry,
    name: &str,
    value: &'v StyleValue,
) -> Result<Option<(PropertyId, &'v StyleValue)>, ConfigError> {
    let StyleValue::Conditional(entries) = value else {
        return Ok(None);
    };
    let (Some(kind), Some(inner), 2) = (entries.get("type"), entries.get("value"), entries.len())
    else {
        return Ok(None);
    };

    let StyleValue::Literal(Literal::String(kind)) = kind else {
        return Err(ConfigError::InvalidCustomProperty {
            name: name.to_string(),
            reason: "'type' must name a theme property".to_string(),
        });
    };
    let id = registry
        .property_id(kind)
        .ok_or_else(|| ConfigError::InvalidCustomProperty {
            name: name.to_string(),
            reason: format!("unknown type '{kind}'"),
        })?;
    Ok(Some((id, inner)))
}

/// What the leaves of a tree resolve against.
enum Target {
    /// A theme longhand.
    Theme(PropertyId),
    /// A custom property whose values resolve through a theme property.
    Typed { name: String, property: PropertyId },
    /// A custom property whose values are CSS text.
    Raw(String),
}

struct Lowering<'a> {
    registry: &'a ThemeRegistry,
    target: &'a Target,
    unit: &'a str,
}

impl Lowering<'_> {
    fn node(
        &self,
        node: &StyleNode,
        active: &BTreeSet<ConditionId>,
    ) -> Result<Vec<Rule>, ConfigError> {
        match node {
            StyleNode::Value(literal) => Ok(vec![self.leaf(literal, active)?]),
            StyleNode::Branches(branches) => branches
                .iter()
                .map(|branch| self.branch(branch, active))
                .collect(),
        }
    }

    fn branch(
        &self,
        branch: &Branch,
        active: &BTreeSet<ConditionId>,
    ) -> Result<Rule, ConfigError> {
        let (selector, condition, children) = match &branch.condition {
            BranchCondition::Default => (Selector::Group, None, self.node(&branch.node, active)?),
            BranchCondition::Theme(id) => {
                let mut nested = active.clone();
                nested.insert(*id);
                (Selector::Prelude(*id), None, self.node(&branch.node, &nested)?)
            }
            BranchCondition::Flag(name) => (
                Selector::Group,
                Some(RuntimeCondition::Flag(name.clone())),
                self.node(&branch.node, active)?,
            ),
            BranchCondition::Variant { name, tag } => (
                Selector::Group,
                Some(RuntimeCondition::Variant {
                    name: name.clone(),
                    tag: tag.clone(),
                }),
                self.node(&branch.node, active)?,
            ),
        };

        let layer = match selector {
            Selector::Prelude(id) => Some(id),
            _ => active.last().copied(),
        };
        Ok(Rule {
            selector,
            layer,
            condition,
            body: RuleBody::Rules(children),
        })
    }

    fn leaf(&self, literal: &Literal, active: &BTreeSet<ConditionId>) -> Result<Rule, ConfigError> {
        let (declarations, fragment) = self.resolve(literal)?;

        let mut token = String::from(self.unit);
        for id in active {
            codec::push_ordinal(&mut token, id.0);
        }
        fragment.push_to(&mut token);

        Ok(Rule {
            selector: Selector::Class(ClassSelector {
                token,
                conditions: active.iter().copied().collect(),
            }),
            layer: active.last().copied(),
            condition: None,
            body: RuleBody::Declarations(declarations),
        })
    }

    fn resolve(&self, literal: &Literal) -> Result<(Vec<Declaration>, Fragment), ConfigError> {
        match self.target {
            Target::Theme(id) => {
                let resolved = self.registry.resolve(*id, literal)?;
                Ok((resolved.declarations, resolved.fragment))
            }
            Target::Typed { name, property } => {
                // Several types share the custom property's unit, so the
                // value part must identify the CSS text.
                let (css, _) = self.registry.resolve_value(*property, literal)?;
                let fragment = Fragment::hashed(&css);
                Ok((vec![Declaration::new(name.clone(), css)], fragment))
            }
            Target::Raw(name) => {
                let css = literal.key();
                if css.trim().is_empty() {
                    return Err(ConfigError::InvalidCustomProperty {
                        name: name.clone(),
                        reason: "value is empty".to_string(),
                    });
                }
                let fragment = Fragment::hashed(&css);
                Ok((vec![Declaration::new(name.clone(), css.into_owned())], fragment))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::PropertyDefinition;
    use serde_json::json;

    fn registry() -> ThemeRegistry {
        ThemeRegistry::builder()
            .property("display", PropertyDefinition::list(["block", "flex", "none"]))
            .property("paddingTop", PropertyDefinition::values([("2", "0.5rem"), ("4", "1rem")]))
            .property("paddingBottom", PropertyDefinition::values([("2", "0.5rem"), ("4", "1rem")]))
            .property("color", PropertyDefinition::color([("red", "red"), ("blue", "blue")]))
            .shorthand("paddingY", ["paddingTop", "paddingBottom"])
            .condition("dark", "@media (prefers-color-scheme: dark)")
            .condition("lg", "@media (min-width: 1024px)")
            .build()
            .unwrap()
    }

    fn forest(json: serde_json::Value) -> RuleForest {
        lower(&registry(), &StyleDescription::from_json(&json).unwrap()).unwrap()
    }

    #[test]
    fn test_plain_value_token() {
        let forest = forest(json!({"display": "flex"}));
        assert_eq!(forest.tokens(), vec!["ab"]);
        assert_eq!(forest.groups[0].unit, "a");
        assert_eq!(forest.groups[0].name, "display");
    }

    #[test]
    fn test_shorthand_expands_to_longhands() {
        let forest = forest(json!({"paddingY": 4}));
        let names: Vec<_> = forest.groups.iter().map(|g| g.name.as_str()).collect();
        assert_eq!(names, ["paddingTop", "paddingBottom"]);
        assert_eq!(forest.tokens(), vec!["bb", "cb"]);
    }

    #[test]
    fn test_theme_conditions_are_sorted_in_tokens() {
        let nested = forest(json!({"display": {"lg": {"dark": "none"}}}));
        let reversed = forest(json!({"display": {"dark": {"lg": "none"}}}));
        assert_eq!(nested.tokens(), vec!["aabc"]);
        assert_eq!(nested.tokens(), reversed.tokens());

        let classes = nested.classes();
        assert_eq!(classes[0].0.conditions, vec![ConditionId(0), ConditionId(1)]);
    }

    #[test]
    fn test_runtime_condition_wraps_leaf() {
        let forest = forest(json!({"color": {"default": "red", "isHovered": "blue"}}));
        let rules = &forest.groups[0].rules;
        assert_eq!(rules.len(), 2);
        assert_eq!(rules[0].condition, None);
        assert_eq!(
            rules[1].condition,
            Some(RuntimeCondition::Flag("isHovered".to_string()))
        );
        assert_eq!(forest.tokens(), vec!["da", "db"]);
    }

    #[test]
    fn test_prelude_rule_sets_layer() {
        let forest = forest(json!({"display": {"default": "block", "dark": "flex"}}));
        let rules = &forest.groups[0].rules;
        assert_eq!(rules[1].selector, Selector::Prelude(ConditionId(0)));
        assert_eq!(rules[1].layer, Some(ConditionId(0)));
        assert_eq!(rules[0].layer, None);
    }

    #[test]
    fn test_custom_property_raw_and_typed() {
        let forest = forest(json!({
            "--accent": "rebeccapurple",
            "--gutter": {"type": "paddingTop", "value": 4}
        }));
        let classes = forest.classes();
        assert_eq!(
            classes[0].1,
            &[Declaration::new("--accent", "rebeccapurple")][..]
        );
        assert_eq!(classes[1].1, &[Declaration::new("--gutter", "1rem")][..]);
        assert!(classes[0].0.token.starts_with(&codec::hash_unit("--accent")));
        assert!(classes[1].0.token.ends_with(&codec::hash_unit("1rem")));
    }

    #[test]
    fn test_custom_property_types_never_share_a_token() {
        let colored = forest(json!({"--c": {"type": "color", "value": "blue"}}));
        let spaced = forest(json!({"--c": {"type": "paddingTop", "value": 4}}));
        let (a, b) = (&colored.classes()[0], &spaced.classes()[0]);
        assert_eq!(a.1, &[Declaration::new("--c", "blue")][..]);
        assert_eq!(b.1, &[Declaration::new("--c", "1rem")][..]);
        assert_ne!(a.0.token, b.0.token);
        assert_eq!(colored.groups[0].unit, spaced.groups[0].unit);
    }

    #[test]
    fn test_custom_property_unknown_type() {
        let err = lower(
            &registry(),
            &StyleDescription::from_json(&json!({"--x": {"type": "margin", "value": 1}})).unwrap(),
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidCustomProperty { .. }));
    }

    #[test]
    fn test_unknown_property_is_fatal() {
        let err = lower(
            &registry(),
            &StyleDescription::from_json(&json!({"colour": "red"})).unwrap(),
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::UnknownProperty { name } if name == "colour"));
    }
}
