//! Layered CSS emission.
//!
//! Every stylesheet starts by declaring the full layer order, so that rules
//! under a later theme condition beat rules under an earlier one no matter
//! which stylesheet loads first:
//!
//! ```css
//! @layer _, _a, _b;
//! ```
//!
//! `_` is the base layer. Each deduplicated condition prelude gets the layer
//! `_` followed by its ordinal unit. A rule nested under several conditions
//! lives in the layer of the highest one.
//!
//! Class rules are grouped by their condition set and nested under the
//! preludes in ascending ordinal order:
//!
//! ```css
//! @layer _b {
//!   @media (prefers-color-scheme: dark) {
//!     @media (min-width: 1024px) {
//!       .aabc { display: none; }
//!     }
//!   }
//! }
//! ```

use std::collections::{BTreeMap, HashSet};
use std::fmt::Write;

use cssparser::serialize_identifier;
use log::trace;

use crate::codec;
use crate::style::RuleForest;
use crate::theme::{ConditionId, Declaration, ThemeRegistry};

/// Name of the base cascade layer.
pub const BASE_LAYER: &str = "_";

/// The layer name for rules whose highest condition is `condition`.
pub fn layer_name(condition: Option<ConditionId>) -> String {
    let mut name = String::from(BASE_LAYER);
    if let Some(id) = condition {
        codec::push_ordinal(&mut name, id.0);
    }
    name
}

/// The `@layer` statement fixing the order of every layer in `registry`.
///
/// ```rust
/// use stylemacro::emit::layer_declaration;
/// use stylemacro::theme::ThemeRegistry;
///
/// let registry = ThemeRegistry::builder()
///     .condition("dark", "@media (prefers-color-scheme: dark)")
///     .condition("lg", "@media (min-width: 1024px)")
///     .build()
///     .unwrap();
/// assert_eq!(layer_declaration(&registry), "@layer _, _a, _b;");
/// ```
pub fn layer_declaration(registry: &ThemeRegistry) -> String {
    let mut out = String::from("@layer ");
    out.push_str(BASE_LAYER);
    for (id, _) in registry.preludes() {
        out.push_str(", ");
        out.push_str(&layer_name(Some(id)));
    }
    out.push(';');
    out
}

/// Serializes rule forests, printing each class rule at most once.
///
/// One emitter covers one compilation scope. Two emitters never share
/// state, so compiling the same description with a fresh emitter always
/// yields the same text.
#[derive(Debug, Default)]
pub struct CssEmitter {
    printed: HashSet<String>,
}

impl CssEmitter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `token` has already been printed by this emitter.
    pub fn is_printed(&self, token: &str) -> bool {
        self.printed.contains(token)
    }

    /// Number of class rules printed so far.
    pub fn printed_count(&self) -> usize {
        self.printed.len()
    }

    /// Emits the class rules of `forest` not printed before.
    ///
    /// Returns an empty string when every rule was already printed.
    pub fn emit(&mut self, registry: &ThemeRegistry, forest: &RuleForest) -> String {
        let mut buckets: BTreeMap<&[ConditionId], Vec<(&str, &[Declaration])>> = BTreeMap::new();

        for (class, declarations) in forest.classes() {
            if !self.printed.insert(class.token.clone()) {
                trace!(target: "stylemacro::emit", "skipping already printed .{}", class.token);
                continue;
            }
            buckets
                .entry(class.conditions.as_slice())
                .or_default()
                .push((class.token.as_str(), declarations));
        }

        if buckets.is_empty() {
            return String::new();
        }

        let mut css = layer_declaration(registry);
        css.push('\n');

        let mut selector = String::new();
        for (conditions, rules) in buckets {
            let _ = writeln!(css, "@layer {} {{", layer_name(conditions.last().copied()));
            let depth = conditions.len() + 1;

            for (level, id) in conditions.iter().enumerate() {
                let _ = writeln!(css, "{}{} {{", indent(level + 1), registry.prelude(*id));
            }

            for (token, declarations) in rules {
                selector.clear();
                let _ = serialize_identifier(token, &mut selector);
                let _ = write!(css, "{}.{} {{", indent(depth), selector);
                for declaration in declarations {
                    let _ = write!(css, " {declaration};");
                }
                css.push_str(" }\n");
            }

            for level in (0..conditions.len()).rev() {
                let _ = writeln!(css, "{}}}", indent(level + 1));
            }
            css.push_str("}\n");
        }

        css
    }
}

fn indent(level: usize) -> String {
    "  ".repeat(level)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::{lower, StyleDescription};
    use crate::theme::PropertyDefinition;
    use serde_json::json;

    fn registry() -> ThemeRegistry {
        ThemeRegistry::builder()
            .property("display", PropertyDefinition::list(["block", "flex", "none"]))
            .condition("dark", "@media (prefers-color-scheme: dark)")
            .condition("lg", "@media (min-width: 1024px)")
            .build()
            .unwrap()
    }

    fn emit(emitter: &mut CssEmitter, json: serde_json::Value) -> String {
        let registry = registry();
        let forest = lower(&registry, &StyleDescription::from_json(&json).unwrap()).unwrap();
        emitter.emit(&registry, &forest)
    }

    #[test]
    fn test_layer_names() {
        assert_eq!(layer_name(None), "_");
        assert_eq!(layer_name(Some(ConditionId(0))), "_a");
        assert_eq!(layer_name(Some(ConditionId(62))), "__a");
    }

    #[test]
    fn test_base_and_condition_layers() {
        let css = emit(
            &mut CssEmitter::new(),
            json!({"display": {"default": "block", "dark": "flex"}}),
        );
        assert_eq!(
            css,
            "@layer _, _a, _b;\n\
             @layer _ {\n  .aa { display: block; }\n}\n\
             @layer _a {\n  @media (prefers-color-scheme: dark) {\n    .aab { display: flex; }\n  }\n}\n"
        );
    }

    #[test]
    fn test_nested_conditions_use_highest_layer() {
        let css = emit(&mut CssEmitter::new(), json!({"display": {"lg": {"dark": "none"}}}));
        assert!(css.contains("@layer _b {\n  @media (prefers-color-scheme: dark) {\n    @media (min-width: 1024px) {\n      .aabc { display: none; }"));
    }

    #[test]
    fn test_rules_print_once_per_emitter() {
        let mut emitter = CssEmitter::new();
        let first = emit(&mut emitter, json!({"display": "flex"}));
        assert!(first.contains(".ab {"));
        assert!(emitter.is_printed("ab"));

        let second = emit(&mut emitter, json!({"display": "flex"}));
        assert_eq!(second, "");
        assert_eq!(emitter.printed_count(), 1);

        let fresh = emit(&mut CssEmitter::new(), json!({"display": "flex"}));
        assert_eq!(first, fresh);
    }

    #[test]
    fn test_leading_digit_tokens_are_escaped() {
        let registry = ThemeRegistry::builder()
            .property("display", PropertyDefinition::list(["block"]))
            .build()
            .unwrap();
        let mut forest = lower(
            &registry,
            &StyleDescription::from_json(&json!({"display": "block"})).unwrap(),
        )
        .unwrap();
        if let crate::style::Selector::Class(class) = &mut forest.groups[0].rules[0].selector {
            class.token = "0a".to_string();
        }
        let css = CssEmitter::new().emit(&registry, &forest);
        assert!(css.contains(".\\30 a {"), "{css}");
    }
}
