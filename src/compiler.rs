//! The compiler front door.
//!
//! A [`StyleCompiler`] covers one compilation unit (typically one source
//! file). It owns the emitted-rule set, so an atomic rule used by several
//! descriptions in the unit is printed once. Separate compilers share
//! nothing but the registry, and may run in any order.

use log::debug;

use crate::emit::CssEmitter;
use crate::error::ConfigError;
use crate::runtime::SelectionProcedure;
use crate::style::{lower, RuleForest, StyleDescription};
use crate::theme::ThemeRegistry;

/// Kind of asset handed to an [`AssetSink`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssetKind {
    Css,
}

/// A generated asset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Asset {
    pub kind: AssetKind,
    pub content: String,
}

/// Receives generated assets, e.g. a bundler hook.
pub trait AssetSink {
    fn emit_asset(&mut self, asset: Asset);
}

impl AssetSink for Vec<Asset> {
    fn emit_asset(&mut self, asset: Asset) {
        self.push(asset);
    }
}

/// Everything produced for one style description.
#[derive(Debug, Clone)]
pub struct CompiledStyle {
    /// CSS for rules not printed earlier in this compilation unit. May be empty.
    pub css: String,
    pub procedure: SelectionProcedure,
    pub rules: RuleForest,
}

/// Compiles style descriptions against a theme registry.
///
/// # Example
///
/// ```rust
/// use stylemacro::{StyleCompiler, StyleDescription};
/// use stylemacro::compiler::Asset;
/// use stylemacro::theme::default_theme;
///
/// let mut compiler = StyleCompiler::new(default_theme());
/// let mut assets: Vec<Asset> = Vec::new();
///
/// let description = StyleDescription::new().set("display", "flex");
/// let procedure = compiler.compile_into(&description, &mut assets).unwrap();
/// compiler.compile_into(&description, &mut assets).unwrap();
///
/// assert_eq!(assets.len(), 1);
/// assert!(procedure.select_static().is_some());
/// ```
#[derive(Debug)]
pub struct StyleCompiler<'r> {
    registry: &'r ThemeRegistry,
    emitter: CssEmitter,
}

impl<'r> StyleCompiler<'r> {
    /// Starts a compilation unit.
    pub fn new(registry: &'r ThemeRegistry) -> Self {
        Self {
            registry,
            emitter: CssEmitter::new(),
        }
    }

    pub fn registry(&self) -> &'r ThemeRegistry {
        self.registry
    }

    /// Compiles one description.
    pub fn compile(&mut self, description: &StyleDescription) -> Result<CompiledStyle, ConfigError> {
        let rules = lower(self.registry, description)?;
        let css = self.emitter.emit(self.registry, &rules);
        let procedure = SelectionProcedure::from_rules(&rules);

        debug!(
            target: "stylemacro::compiler",
            "compiled {} entries: {} property groups, {} bytes of css, {} dynamic conditions",
            description.len(),
            rules.groups.len(),
            css.len(),
            procedure.dynamic_conditions().len()
        );

        Ok(CompiledStyle {
            css,
            procedure,
            rules,
        })
    }

    /// Compiles one description, handing any new CSS to `sink`.
    pub fn compile_into(
        &mut self,
        description: &StyleDescription,
        sink: &mut dyn AssetSink,
    ) -> Result<SelectionProcedure, ConfigError> {
        let compiled = self.compile(description)?;
        if !compiled.css.is_empty() {
            sink.emit_asset(Asset {
                kind: AssetKind::Css,
                content: compiled.css,
            });
        }
        Ok(compiled.procedure)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::default_theme;
    use serde_json::json;

    #[test]
    fn test_error_emits_nothing() {
        let mut compiler = StyleCompiler::new(default_theme());
        let mut assets: Vec<Asset> = Vec::new();
        let err = compiler
            .compile_into(
                &StyleDescription::from_json(&json!({"display": "sideways"})).unwrap(),
                &mut assets,
            )
            .unwrap_err();
        assert!(matches!(err, ConfigError::UnknownValue { .. }));
        assert!(assets.is_empty());
    }

    #[test]
    fn test_shared_rules_print_once_per_unit() {
        let mut compiler = StyleCompiler::new(default_theme());
        let a = compiler
            .compile(&StyleDescription::new().set("display", "flex").set("position", "relative"))
            .unwrap();
        let b = compiler
            .compile(&StyleDescription::new().set("display", "flex").set("position", "absolute"))
            .unwrap();

        assert!(a.css.contains("display: flex"));
        assert!(!b.css.contains("display: flex"));
        assert!(b.css.contains("position: absolute"));
        assert_eq!(a.rules.tokens()[0], b.rules.tokens()[0]);
    }

    #[test]
    fn test_asset_kind_is_css() {
        let mut compiler = StyleCompiler::new(default_theme());
        let mut assets: Vec<Asset> = Vec::new();
        compiler
            .compile_into(&StyleDescription::new().set("opacity", 0.5), &mut assets)
            .unwrap();
        assert_eq!(assets[0].kind, AssetKind::Css);
        assert!(assets[0].content.contains("opacity: 0.5"));
    }
}
