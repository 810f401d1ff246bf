//! Configuration errors.
//!
//! Every error in this crate is a [`ConfigError`]: a mismatch between the
//! theme registry and a style description, or a malformed registry. They are
//! raised at compile time and are never recovered from. Selection procedures
//! and merging cannot fail.

use std::path::PathBuf;

use thiserror::Error;

/// Error returned when a registry or style description is invalid.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A style description names a property the registry does not define.
    #[error("unknown style property '{name}'")]
    UnknownProperty { name: String },

    /// A value is not part of the property's value set.
    #[error("unknown value '{value}' for property '{property}'")]
    UnknownValue { property: String, value: String },

    /// A property was registered twice.
    #[error("property '{name}' is already defined")]
    DuplicateProperty { name: String },

    /// A shorthand expands to a property that does not exist.
    #[error("shorthand '{shorthand}' references unknown property '{property}'")]
    UnknownShorthandTarget { shorthand: String, property: String },

    /// A condition uses a reserved name such as `default`.
    #[error("'{name}' is reserved and cannot be used as a condition name")]
    ReservedCondition { name: String },

    /// A conditional key is neither `default`, a theme condition, a boolean
    /// flag, nor a variant with a tag map.
    #[error("condition '{key}' on property '{property}' must map variant tags to values")]
    InvalidConditionKey { property: String, key: String },

    /// A conditional value declares a fallback both as `default` and as a
    /// variant's `default` tag, or in several variants.
    #[error("property '{property}' has more than one 'default' (again in variant '{key}')")]
    ConflictingDefault { property: String, key: String },

    /// A bracketed `[...]` value is not valid CSS value text.
    #[error("invalid arbitrary value '{value}' for property '{property}': {reason}")]
    InvalidArbitraryValue {
        property: String,
        value: String,
        reason: String,
    },

    /// The opacity part of a `color/opacity` value is out of range.
    #[error("invalid opacity '{opacity}' for property '{property}': expected 0-100")]
    InvalidOpacity { property: String, opacity: String },

    /// A custom property definition is malformed.
    #[error("invalid custom property '{name}': {reason}")]
    InvalidCustomProperty { name: String, reason: String },

    /// A registry configuration entry could not be interpreted.
    #[error("invalid registry entry '{name}': {reason}")]
    InvalidDefinition { name: String, reason: String },

    /// A style description could not be deserialized.
    #[error("invalid style description: {0}")]
    Description(#[source] serde_json::Error),

    /// YAML registry configuration failed to parse.
    #[error("failed to parse YAML theme config")]
    Yaml(#[from] serde_yaml::Error),

    /// JSON registry configuration failed to parse.
    #[error("failed to parse JSON theme config")]
    Json(#[from] serde_json::Error),

    /// A registry configuration file could not be read.
    #[error("failed to read theme config '{}'", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_property_display() {
        let err = ConfigError::UnknownProperty {
            name: "colour".to_string(),
        };
        assert_eq!(err.to_string(), "unknown style property 'colour'");
    }

    #[test]
    fn test_invalid_condition_key_display() {
        let err = ConfigError::InvalidConditionKey {
            property: "color".to_string(),
            key: "size".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("size"));
        assert!(msg.contains("color"));
    }

    #[test]
    fn test_io_error_display_includes_path() {
        let err = ConfigError::Io {
            path: PathBuf::from("/themes/missing.yaml"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        };
        assert!(err.to_string().contains("/themes/missing.yaml"));
    }
}
