//! Theme registry and value resolution.
//!
//! This module provides:
//!
//! - [`ThemeRegistry`]: immutable property, condition, and shorthand tables
//! - [`PropertyDefinition`]: how one property's values turn into declarations
//! - [`ThemeConfig`]: a serde model for loading registries from YAML or JSON
//! - [`default_theme`]: a built-in registry with a Tailwind-style scale
//!
//! Ordinals for properties and condition preludes are assigned once, in
//! declaration order, when the registry is built. Every compilation against
//! the same registry therefore produces the same class tokens, whatever
//! order descriptions are compiled in.

mod config;
mod default;
mod property;
mod registry;

pub use config::{DetailedProperty, PropertyConfig, PropertyKind, ThemeConfig, ValueMap};
pub use default::default_theme;
pub use property::{
    css_property_name, ArbitraryResolver, Declaration, DeclarationMapper, PropertyDefinition,
    ResolvedValue, ValueSet,
};
pub use registry::{
    is_flag_name, ConditionId, ConditionKind, PropertyId, ThemeRegistry, ThemeRegistryBuilder,
};
