//! # stylemacro - atomic CSS compiled from conditional style descriptions
//!
//! `stylemacro` turns declarative, conditionally branching style descriptions
//! into two artifacts:
//!
//! - a deduplicated, layered **atomic stylesheet**, one class per
//!   property/condition/value combination, and
//! - a **selection procedure**: a pure function from render state
//!   (interaction flags such as `isHovered`, variant tags such as
//!   `size: "lg"`) to the class list to apply.
//!
//! Class lists from several procedures can be combined with
//! [`merge_styles`], where later lists override earlier ones per property.
//!
//! ## Quick Start
//!
//! ```rust
//! use stylemacro::{merge_styles, RenderState, StyleCompiler, StyleDescription};
//! use stylemacro::theme::default_theme;
//! use serde_json::json;
//!
//! let mut compiler = StyleCompiler::new(default_theme());
//!
//! let button = compiler.compile(&StyleDescription::from_json(&json!({
//!     "paddingX": 4,
//!     "backgroundColor": {
//!         "default": "blue-500",
//!         "isHovered": "blue-700",
//!         "dark": "blue-900"
//!     },
//!     "display": {"default": "block", "lg": "flex"}
//! })).unwrap()).unwrap();
//!
//! // The stylesheet declares every layer up front.
//! assert!(button.css.starts_with("@layer _,"));
//!
//! let idle = button.procedure.select(&RenderState::new());
//! let hovered = button.procedure.select(&RenderState::new().flag("isHovered", true));
//! assert_ne!(idle, hovered);
//!
//! // An override from the caller replaces the display classes only.
//! let overrides = compiler
//!     .compile(&StyleDescription::new().set("display", "none"))
//!     .unwrap()
//!     .procedure
//!     .select_static()
//!     .unwrap();
//! let merged = merge_styles!(idle.as_str(), overrides.as_str());
//! assert!(merged.ends_with(&overrides));
//! ```
//!
//! ## Conditions
//!
//! Inside a conditional value, keys are read as:
//!
//! - `default`: the fallback when no dynamic sibling matches
//! - a theme condition such as `dark` or `lg`: emitted as CSS under the
//!   condition's prelude, in its own cascade layer
//! - a flag (`isHovered`, or a registry condition without a prelude): decided
//!   by the selection procedure
//! - anything else: a variant whose value maps tags to values; a `default`
//!   tag is the fallback for unmatched tags
//!
//! A nested flag or variant object inherits the enclosing `default` and
//! theme-condition values it does not set itself.
//!
//! ## Modules
//!
//! - [`theme`]: the registry of properties, conditions, and shorthands
//! - [`codec`]: compact class-name encoding
//! - [`style`]: descriptions, normalization, and lowering to rules
//! - [`emit`]: layered CSS output
//! - [`runtime`]: selection procedures, render state, and merging
//! - [`compiler`]: the per-compilation-unit front door

pub mod codec;
pub mod compiler;
pub mod emit;
mod error;
pub mod runtime;
pub mod style;
pub mod theme;

pub use compiler::{Asset, AssetKind, AssetSink, CompiledStyle, StyleCompiler};
pub use error::ConfigError;
pub use runtime::{merge_procedures, merge_styles, RenderState, SelectionProcedure, StateValue};
pub use style::{Literal, StyleDescription, StyleValue};
pub use theme::{default_theme, ThemeConfig, ThemeRegistry};
