//! Render state passed to selection procedures.

use indexmap::IndexMap;
use serde_json::Value;

/// The value of one render-state entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StateValue {
    Flag(bool),
    Variant(String),
}

/// Interaction flags and variant tags for one render.
///
/// # Example
///
/// ```rust
/// use stylemacro::runtime::RenderState;
/// use serde_json::json;
///
/// let built = RenderState::new().flag("isHovered", true).variant("size", "lg");
/// let parsed = RenderState::from_json(&json!({"isHovered": true, "size": "lg"}));
/// assert_eq!(built, parsed);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderState {
    values: IndexMap<String, StateValue>,
}

impl RenderState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a boolean flag.
    pub fn flag(mut self, name: impl Into<String>, value: bool) -> Self {
        self.values.insert(name.into(), StateValue::Flag(value));
        self
    }

    /// Sets a variant tag.
    pub fn variant(mut self, name: impl Into<String>, tag: impl Into<String>) -> Self {
        self.values
            .insert(name.into(), StateValue::Variant(tag.into()));
        self
    }

    /// Reads state from a JSON object.
    ///
    /// Booleans become flags; strings and numbers become variant tags. Nulls
    /// and nested values are skipped, as is anything that is not an object.
    pub fn from_json(value: &Value) -> Self {
        let mut state = Self::new();
        let Value::Object(map) = value else {
            return state;
        };
        for (name, value) in map {
            let entry = match value {
                Value::Bool(b) => StateValue::Flag(*b),
                Value::String(s) => StateValue::Variant(s.clone()),
                Value::Number(n) => StateValue::Variant(n.to_string()),
                _ => continue,
            };
            state.values.insert(name.clone(), entry);
        }
        state
    }

    /// Looks up an entry.
    pub fn get(&self, name: &str) -> Option<&StateValue> {
        self.values.get(name)
    }

    /// Whether flag `name` is set.
    ///
    /// A non-empty variant counts as set.
    pub fn is_set(&self, name: &str) -> bool {
        match self.values.get(name) {
            Some(StateValue::Flag(value)) => *value,
            Some(StateValue::Variant(tag)) => !tag.is_empty(),
            None => false,
        }
    }

    /// Whether variant `name` currently equals `tag`.
    ///
    /// Flags match the tags `"true"` and `"false"`.
    pub fn is_variant(&self, name: &str, tag: &str) -> bool {
        match self.values.get(name) {
            Some(StateValue::Variant(value)) => value == tag,
            Some(StateValue::Flag(true)) => tag == "true",
            Some(StateValue::Flag(false)) => tag == "false",
            None => false,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_json_skips_null_and_nested() {
        let state = RenderState::from_json(&json!({
            "isPressed": false,
            "size": 2,
            "theme": null,
            "extra": {"a": 1}
        }));
        assert_eq!(state.get("isPressed"), Some(&StateValue::Flag(false)));
        assert_eq!(state.get("size"), Some(&StateValue::Variant("2".into())));
        assert_eq!(state.get("theme"), None);
        assert_eq!(state.get("extra"), None);
    }

    #[test]
    fn test_non_object_is_empty_state() {
        assert!(RenderState::from_json(&json!([true])).is_empty());
    }

    #[test]
    fn test_flag_and_variant_matching() {
        let state = RenderState::new()
            .flag("isHovered", true)
            .flag("isDisabled", false)
            .variant("size", "lg")
            .variant("tone", "");
        assert!(state.is_set("isHovered"));
        assert!(!state.is_set("isDisabled"));
        assert!(state.is_set("size"));
        assert!(!state.is_set("tone"));
        assert!(!state.is_set("isFocused"));

        assert!(state.is_variant("size", "lg"));
        assert!(!state.is_variant("size", "sm"));
        assert!(state.is_variant("isHovered", "true"));
        assert!(state.is_variant("isDisabled", "false"));
    }
}
