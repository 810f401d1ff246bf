//! Selection procedures: rule forests compiled to a small decision IR.
//!
//! Each longhand becomes a [`PropertyGroup`] holding a list of [`Node`]s. A
//! node list is evaluated like this:
//!
//! - the first node with a dynamic predicate that matches the render state
//!   (in declared order) is evaluated, and its siblings are not;
//! - otherwise every [`Predicate::Always`] node is evaluated.
//!
//! Theme-condition branches compile to `Always` nodes, so all of their tokens
//! are emitted and the renderer picks between them through the cascade.
//!
//! Groups run in reverse declaration order. A group is skipped when a later
//! group for the same property unit already produced tokens, which is how
//! `paddingTop` overrides the `paddingTop` part of an earlier `padding`.

use std::collections::HashSet;

use super::state::RenderState;
use crate::style::{Rule, RuleBody, RuleForest, RuntimeCondition, Selector};

/// When a node applies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Predicate {
    Always,
    Flag(String),
    Variant { name: String, tag: String },
}

impl Predicate {
    pub fn is_dynamic(&self) -> bool {
        !matches!(self, Predicate::Always)
    }

    fn matches(&self, state: &RenderState) -> bool {
        match self {
            Predicate::Always => true,
            Predicate::Flag(name) => state.is_set(name),
            Predicate::Variant { name, tag } => state.is_variant(name, tag),
        }
    }
}

/// One decision point.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub predicate: Predicate,
    /// Tokens emitted when this node is evaluated.
    pub tokens: Vec<String>,
    pub children: Vec<Node>,
}

impl Node {
    fn run<'p>(&'p self, state: &RenderState, out: &mut Vec<&'p str>) {
        out.extend(self.tokens.iter().map(String::as_str));
        run_nodes(&self.children, state, out);
    }
}

fn run_nodes<'p>(nodes: &'p [Node], state: &RenderState, out: &mut Vec<&'p str>) {
    let chosen = nodes
        .iter()
        .find(|node| node.predicate.is_dynamic() && node.predicate.matches(state));

    match chosen {
        Some(node) => node.run(state, out),
        None => {
            for node in nodes.iter().filter(|node| !node.predicate.is_dynamic()) {
                node.run(state, out);
            }
        }
    }
}

/// The decision nodes for one longhand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyGroup {
    /// The property unit shared by every token of this group.
    pub property: String,
    pub nodes: Vec<Node>,
}

/// Maps render state to the class tokens of one style description.
///
/// Procedures are immutable, `Send + Sync`, and never fail.
///
/// # Example
///
/// ```rust
/// use stylemacro::{RenderState, StyleCompiler, StyleDescription};
/// use stylemacro::theme::default_theme;
/// use serde_json::json;
///
/// let mut compiler = StyleCompiler::new(default_theme());
/// let compiled = compiler
///     .compile(&StyleDescription::from_json(&json!({
///         "backgroundColor": {"default": "white", "isHovered": "gray-100"}
///     })).unwrap())
///     .unwrap();
///
/// let idle = compiled.procedure.select(&RenderState::new());
/// let hovered = compiled.procedure.select(&RenderState::new().flag("isHovered", true));
/// assert_ne!(idle, hovered);
/// assert_eq!(compiled.procedure.dynamic_conditions(), ["isHovered"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionProcedure {
    groups: Vec<PropertyGroup>,
    dynamic: Vec<String>,
}

impl SelectionProcedure {
    /// Compiles a rule forest.
    pub fn from_rules(forest: &RuleForest) -> Self {
        let mut dynamic = Vec::new();
        let groups = forest
            .groups
            .iter()
            .map(|group| PropertyGroup {
                property: group.unit.clone(),
                nodes: compile_nodes(&group.rules, &mut dynamic),
            })
            .collect();
        Self { groups, dynamic }
    }

    /// The class list for `state`, space separated.
    pub fn select(&self, state: &RenderState) -> String {
        let mut produced: Vec<Vec<&str>> = vec![Vec::new(); self.groups.len()];
        let mut decided: HashSet<&str> = HashSet::new();

        for (index, group) in self.groups.iter().enumerate().rev() {
            if decided.contains(group.property.as_str()) {
                continue;
            }
            let mut tokens = Vec::new();
            run_nodes(&group.nodes, state, &mut tokens);
            if !tokens.is_empty() {
                decided.insert(group.property.as_str());
                produced[index] = tokens;
            }
        }

        let mut seen = HashSet::new();
        let mut out = String::new();
        for token in produced.into_iter().flatten() {
            if !seen.insert(token) {
                continue;
            }
            if !out.is_empty() {
                out.push(' ');
            }
            out.push_str(token);
        }
        out
    }

    /// The class list when no dynamic conditions are involved.
    ///
    /// Returns `None` if the description references any flag or variant.
    pub fn select_static(&self) -> Option<String> {
        self.dynamic
            .is_empty()
            .then(|| self.select(&RenderState::default()))
    }

    /// Flag and variant names the procedure reads, in first-use order.
    pub fn dynamic_conditions(&self) -> &[String] {
        &self.dynamic
    }

    pub fn groups(&self) -> &[PropertyGroup] {
        &self.groups
    }
}

fn compile_nodes(rules: &[Rule], dynamic: &mut Vec<String>) -> Vec<Node> {
    rules
        .iter()
        .map(|rule| {
            let predicate = match &rule.condition {
                None => Predicate::Always,
                Some(condition) => {
                    if !dynamic.iter().any(|name| name == condition.name()) {
                        dynamic.push(condition.name().to_string());
                    }
                    match condition {
                        RuntimeCondition::Flag(name) => Predicate::Flag(name.clone()),
                        RuntimeCondition::Variant { name, tag } => Predicate::Variant {
                            name: name.clone(),
                            tag: tag.clone(),
                        },
                    }
                }
            };

            match (&rule.selector, &rule.body) {
                (_, RuleBody::Rules(children)) => Node {
                    predicate,
                    tokens: Vec::new(),
                    children: compile_nodes(children, dynamic),
                },
                (Selector::Class(class), RuleBody::Declarations(_)) => Node {
                    predicate,
                    tokens: vec![class.token.clone()],
                    children: Vec::new(),
                },
                (_, RuleBody::Declarations(_)) => Node {
                    predicate,
                    tokens: Vec::new(),
                    children: Vec::new(),
                },
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::{lower, StyleDescription};
    use crate::theme::{PropertyDefinition, ThemeRegistry};
    use serde_json::json;

    fn registry() -> ThemeRegistry {
        ThemeRegistry::builder()
            .property("display", PropertyDefinition::list(["block", "flex", "none"]))
            .property("color", PropertyDefinition::list(["black", "red", "blue", "gray"]))
            .property("paddingTop", PropertyDefinition::values([("2", "0.5rem"), ("4", "1rem")]))
            .property("paddingBottom", PropertyDefinition::values([("2", "0.5rem"), ("4", "1rem")]))
            .shorthand("paddingY", ["paddingTop", "paddingBottom"])
            .condition("dark", "@media (prefers-color-scheme: dark)")
            .runtime_condition("selected")
            .build()
            .unwrap()
    }

    fn procedure(json: serde_json::Value) -> SelectionProcedure {
        let forest = lower(&registry(), &StyleDescription::from_json(&json).unwrap()).unwrap();
        SelectionProcedure::from_rules(&forest)
    }

    #[test]
    fn test_static_procedure() {
        let p = procedure(json!({"display": "flex", "color": "red"}));
        assert_eq!(p.select_static().as_deref(), Some("ab bb"));
        assert!(p.dynamic_conditions().is_empty());
    }

    #[test]
    fn test_theme_branches_emit_every_token() {
        let p = procedure(json!({"display": {"default": "block", "dark": "flex"}}));
        assert_eq!(p.select_static().as_deref(), Some("aa aab"));
    }

    #[test]
    fn test_first_matching_flag_wins() {
        let p = procedure(json!({"color": {"isA": "red", "isB": "blue", "default": "black"}}));
        let both = RenderState::new().flag("isA", true).flag("isB", true);
        assert_eq!(p.select(&both), "bb");
        assert_eq!(p.select(&RenderState::new().flag("isB", true)), "bc");
        assert_eq!(p.select(&RenderState::new()), "ba");
        assert_eq!(p.select_static(), None);
        assert_eq!(p.dynamic_conditions(), ["isA", "isB"]);
    }

    #[test]
    fn test_variant_selection() {
        let p = procedure(json!({"color": {"default": "black", "tone": {"warm": "red", "cool": "blue"}}}));
        assert_eq!(p.select(&RenderState::new().variant("tone", "cool")), "bc");
        assert_eq!(p.select(&RenderState::new().variant("tone", "neon")), "ba");
    }

    #[test]
    fn test_registry_runtime_condition_is_a_flag() {
        let p = procedure(json!({"color": {"default": "black", "selected": "blue"}}));
        assert_eq!(p.select(&RenderState::new().flag("selected", true)), "bc");
    }

    #[test]
    fn test_unknown_state_keys_are_ignored() {
        let p = procedure(json!({"color": {"default": "black", "isA": "red"}}));
        let state = RenderState::new().flag("isZ", true).variant("other", "x");
        assert_eq!(p.select(&state), "ba");
    }

    #[test]
    fn test_later_longhand_overrides_shorthand_part() {
        let p = procedure(json!({"paddingY": 2, "paddingTop": 4}));
        assert_eq!(p.select_static().as_deref(), Some("da cb"));
    }

    #[test]
    fn test_empty_later_group_falls_back_to_earlier() {
        let p = procedure(json!({"paddingY": 2, "paddingTop": {"isCompact": 4}}));
        assert_eq!(p.select(&RenderState::new()), "ca da");
        assert_eq!(p.select(&RenderState::new().flag("isCompact", true)), "da cb");
    }

    #[test]
    fn test_propagated_default_applies_inside_matched_branch() {
        let p = procedure(json!({"color": {"default": "gray", "isHovered": {"isPressed": "red"}}}));
        let hovered = RenderState::new().flag("isHovered", true);
        assert_eq!(p.select(&hovered), "bd");
        assert_eq!(p.select(&hovered.clone().flag("isPressed", true)), "bb");
    }

    #[test]
    fn test_theme_alternative_survives_matched_flag() {
        let p = procedure(json!({
            "color": {"default": "gray", "dark": "black", "isHovered": {"isPressed": "red"}}
        }));
        assert_eq!(p.select(&RenderState::new()), "bd baa");
        let hovered = RenderState::new().flag("isHovered", true);
        assert_eq!(p.select(&hovered), "bd baa");
        assert_eq!(p.select(&hovered.flag("isPressed", true)), "bb");
    }

    #[test]
    fn test_default_tag_applies_to_unmatched_variant() {
        let p = procedure(json!({"color": {"tone": {"warm": "red", "default": "gray"}}}));
        assert_eq!(p.select(&RenderState::new().variant("tone", "warm")), "bb");
        assert_eq!(p.select(&RenderState::new().variant("tone", "cool")), "bd");
        assert_eq!(p.select(&RenderState::new()), "bd");
        assert_eq!(p.dynamic_conditions(), ["tone"]);
    }

    #[test]
    fn test_procedure_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<SelectionProcedure>();
    }
}
