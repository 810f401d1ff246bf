//! Built-in Tailwind-style theme.
//!
//! A compact registry covering the common scales (colors, spacing, sizing,
//! type, layout, transitions) with logical-direction properties and the
//! `dark`, `forcedColors`, and breakpoint conditions. Projects with their own
//! design tokens should build a registry with [`ThemeRegistry::builder`] or
//! load one through [`ThemeConfig`](super::ThemeConfig).

use once_cell::sync::Lazy;

use super::property::{Declaration, PropertyDefinition};
use super::registry::ThemeRegistry;
use crate::error::ConfigError;
use crate::style::Literal;

static DEFAULT_THEME: Lazy<ThemeRegistry> =
    Lazy::new(|| build().expect("built-in theme is valid"));

/// Returns the built-in theme, building it on first use.
///
/// # Example
///
/// ```rust
/// use stylemacro::theme::default_theme;
///
/// let theme = default_theme();
/// assert!(theme.property_id("backgroundColor").is_some());
/// assert_eq!(theme.expand("paddingX").unwrap().len(), 2);
/// ```
pub fn default_theme() -> &'static ThemeRegistry {
    &DEFAULT_THEME
}

const COLORS: &[(&str, &str)] = &[
    ("transparent", "transparent"),
    ("black", "black"),
    ("white", "white"),
    ("gray-50", "#f9fafb"),
    ("gray-100", "#f3f4f6"),
    ("gray-200", "#e5e7eb"),
    ("gray-300", "#d1d5db"),
    ("gray-400", "#9ca3af"),
    ("gray-500", "#6b7280"),
    ("gray-600", "#4b5563"),
    ("gray-700", "#374151"),
    ("gray-800", "#1f2937"),
    ("gray-900", "#111827"),
    ("red-100", "#fee2e2"),
    ("red-300", "#fca5a5"),
    ("red-500", "#ef4444"),
    ("red-700", "#b91c1c"),
    ("red-900", "#7f1d1d"),
    ("green-100", "#dcfce7"),
    ("green-300", "#86efac"),
    ("green-500", "#22c55e"),
    ("green-700", "#15803d"),
    ("green-900", "#14532d"),
    ("blue-100", "#dbeafe"),
    ("blue-300", "#93c5fd"),
    ("blue-500", "#3b82f6"),
    ("blue-700", "#1d4ed8"),
    ("blue-900", "#1e3a8a"),
    ("ButtonBorder", "ButtonBorder"),
    ("ButtonText", "ButtonText"),
    ("Field", "Field"),
    ("Highlight", "Highlight"),
    ("HighlightText", "HighlightText"),
    ("GrayText", "GrayText"),
    ("Mark", "Mark"),
];

const SPACING: &[(&str, &str)] = &[
    ("px", "1px"),
    ("0", "0px"),
    ("0.5", "0.125rem"),
    ("1", "0.25rem"),
    ("1.5", "0.375rem"),
    ("2", "0.5rem"),
    ("2.5", "0.625rem"),
    ("3", "0.75rem"),
    ("4", "1rem"),
    ("5", "1.25rem"),
    ("6", "1.5rem"),
    ("8", "2rem"),
    ("10", "2.5rem"),
    ("12", "3rem"),
    ("16", "4rem"),
    ("20", "5rem"),
    ("24", "6rem"),
    ("32", "8rem"),
];

const FRACTIONS: &[(&str, &str)] = &[
    ("auto", "auto"),
    ("1/2", "50%"),
    ("1/3", "33.333333%"),
    ("2/3", "66.666667%"),
    ("1/4", "25%"),
    ("3/4", "75%"),
    ("full", "100%"),
];

const INTRINSIC: &[(&str, &str)] = &[
    ("screen", "100vh"),
    ("min", "min-content"),
    ("max", "max-content"),
    ("fit", "fit-content"),
];

const BORDER_WIDTH: &[(&str, &str)] = &[
    ("0", "0px"),
    ("1", "1px"),
    ("2", "2px"),
    ("4", "4px"),
    ("8", "8px"),
];

const RADIUS: &[(&str, &str)] = &[
    ("none", "0px"),
    ("sm", "0.125rem"),
    ("default", "0.25rem"),
    ("md", "0.375rem"),
    ("lg", "0.5rem"),
    ("xl", "0.75rem"),
    ("2xl", "1rem"),
    ("full", "9999px"),
];

const DURATIONS: &[(&str, &str)] = &[
    ("0", "0s"),
    ("75", "75ms"),
    ("100", "100ms"),
    ("150", "150ms"),
    ("200", "200ms"),
    ("300", "300ms"),
    ("500", "500ms"),
    ("700", "700ms"),
    ("1000", "1000ms"),
];

const AUTO: &[(&str, &str)] = &[("auto", "auto")];

const NONE: &[(&str, &str)] = &[("none", "none")];

const MEASURES: &[(&str, &str)] = &[
    ("none", "none"),
    ("sm", "24rem"),
    ("md", "28rem"),
    ("lg", "32rem"),
    ("xl", "36rem"),
    ("prose", "65ch"),
];

const EASE_DEFAULT: &str = "cubic-bezier(0.4, 0, 0.2, 1)";

fn scale(parts: &[&[(&'static str, &'static str)]]) -> Vec<(&'static str, &'static str)> {
    parts.iter().flat_map(|part| part.iter().copied()).collect()
}

fn color() -> PropertyDefinition {
    PropertyDefinition::color(COLORS.iter().copied())
}

fn spacing() -> PropertyDefinition {
    PropertyDefinition::values(SPACING.iter().copied())
}

fn logical(values: Vec<(&'static str, &'static str)>, target: &str) -> PropertyDefinition {
    PropertyDefinition::values(values).targets([target])
}

/// Numbers become `{n}{unit}`, strings pass through.
fn numeric(unit: &'static str) -> PropertyDefinition {
    PropertyDefinition::arbitrary(move |value| match value {
        Literal::Number(_) => Some(format!("{}{unit}", value.key())),
        Literal::String(s) => Some(s.clone()),
        Literal::Bool(_) => None,
    })
}

fn build() -> Result<ThemeRegistry, ConfigError> {
    let margin = scale(&[SPACING, AUTO]);
    let inset = scale(&[SPACING, FRACTIONS]);
    let sizing = scale(&[SPACING, FRACTIONS, INTRINSIC]);

    ThemeRegistry::builder()
        // colors
        .property("color", color())
        .property("backgroundColor", color())
        .property("borderColor", color())
        .property("outlineColor", color())
        .property("textDecorationColor", color())
        .property(
            "fill",
            PropertyDefinition::color(scale(&[NONE, COLORS])),
        )
        .property(
            "stroke",
            PropertyDefinition::color(scale(&[NONE, COLORS])),
        )
        // dimensions
        .property("width", PropertyDefinition::values(sizing.clone()))
        .property("height", PropertyDefinition::values(sizing.clone()))
        .property("minWidth", PropertyDefinition::values(sizing.clone()))
        .property("minHeight", PropertyDefinition::values(sizing.clone()))
        .property(
            "maxWidth",
            PropertyDefinition::values(scale(&[sizing.as_slice(), MEASURES])),
        )
        .property("maxHeight", PropertyDefinition::values(sizing))
        .property("rowGap", spacing())
        .property("columnGap", spacing())
        .property("paddingTop", spacing())
        .property("paddingBottom", spacing())
        .property("paddingStart", logical(SPACING.to_vec(), "paddingInlineStart"))
        .property("paddingEnd", logical(SPACING.to_vec(), "paddingInlineEnd"))
        .property("marginTop", PropertyDefinition::values(margin.clone()))
        .property("marginBottom", PropertyDefinition::values(margin.clone()))
        .property("marginStart", logical(margin.clone(), "marginInlineStart"))
        .property("marginEnd", logical(margin, "marginInlineEnd"))
        .property("top", PropertyDefinition::values(inset.clone()))
        .property("bottom", PropertyDefinition::values(inset.clone()))
        .property("insetStart", logical(inset.clone(), "insetInlineStart"))
        .property("insetEnd", logical(inset, "insetInlineEnd"))
        // borders
        .property("borderTopWidth", PropertyDefinition::values(BORDER_WIDTH.iter().copied()))
        .property("borderBottomWidth", PropertyDefinition::values(BORDER_WIDTH.iter().copied()))
        .property("borderStartWidth", logical(BORDER_WIDTH.to_vec(), "borderInlineStartWidth"))
        .property("borderEndWidth", logical(BORDER_WIDTH.to_vec(), "borderInlineEndWidth"))
        .property(
            "borderStyle",
            PropertyDefinition::list(["solid", "dashed", "dotted", "double", "hidden", "none"]),
        )
        .property("borderTopStartRadius", logical(RADIUS.to_vec(), "borderStartStartRadius"))
        .property("borderTopEndRadius", logical(RADIUS.to_vec(), "borderStartEndRadius"))
        .property("borderBottomStartRadius", logical(RADIUS.to_vec(), "borderEndStartRadius"))
        .property("borderBottomEndRadius", logical(RADIUS.to_vec(), "borderEndEndRadius"))
        .property("outlineStyle", PropertyDefinition::list(["none", "solid", "dashed", "dotted", "double"]))
        .property("outlineWidth", PropertyDefinition::values(BORDER_WIDTH.iter().copied()))
        .property("outlineOffset", PropertyDefinition::values(BORDER_WIDTH.iter().copied()))
        // text
        .property(
            "fontFamily",
            PropertyDefinition::values([
                ("sans", "ui-sans-serif, system-ui, sans-serif"),
                ("serif", "ui-serif, Georgia, Cambria, \"Times New Roman\", Times, serif"),
                ("mono", "ui-monospace, Menlo, Monaco, \"Courier New\", monospace"),
            ]),
        )
        .property(
            "fontSize",
            PropertyDefinition::values([
                ("xs", "0.75rem"),
                ("sm", "0.875rem"),
                ("base", "1rem"),
                ("lg", "1.125rem"),
                ("xl", "1.25rem"),
                ("2xl", "1.5rem"),
                ("3xl", "1.875rem"),
                ("4xl", "2.25rem"),
            ]),
        )
        .property(
            "fontWeight",
            PropertyDefinition::values([
                ("thin", "100"),
                ("light", "300"),
                ("normal", "400"),
                ("medium", "500"),
                ("semibold", "600"),
                ("bold", "700"),
                ("black", "900"),
            ]),
        )
        .property("fontStyle", PropertyDefinition::list(["normal", "italic"]))
        .property(
            "lineHeight",
            PropertyDefinition::values([
                ("none", "1"),
                ("tight", "1.25"),
                ("snug", "1.375"),
                ("normal", "1.5"),
                ("relaxed", "1.625"),
                ("loose", "2"),
            ]),
        )
        .property("textAlign", PropertyDefinition::list(["start", "center", "end", "justify"]))
        .property(
            "textTransform",
            PropertyDefinition::list(["uppercase", "lowercase", "capitalize", "none"]),
        )
        .property(
            "textDecoration",
            PropertyDefinition::list(["underline", "overline", "line-through", "none"]),
        )
        .property("textOverflow", PropertyDefinition::list(["ellipsis", "clip"]))
        .property(
            "whitespace",
            PropertyDefinition::list(["normal", "nowrap", "pre", "pre-line", "pre-wrap"])
                .targets(["whiteSpace"]),
        )
        .property(
            "truncate",
            PropertyDefinition::arbitrary(|value| match value {
                Literal::Bool(true) => Some(String::new()),
                _ => None,
            })
            .map_to(|_| {
                vec![
                    Declaration::new("overflow", "hidden"),
                    Declaration::new("text-overflow", "ellipsis"),
                    Declaration::new("white-space", "nowrap"),
                ]
            }),
        )
        .property(
            "lineClamp",
            PropertyDefinition::arbitrary(|value| value.as_number().map(|_| value.key().into_owned()))
                .map_to(|lines| {
                    vec![
                        Declaration::new("overflow", "hidden"),
                        Declaration::new("display", "-webkit-box"),
                        Declaration::new("-webkit-box-orient", "vertical"),
                        Declaration::new("-webkit-line-clamp", lines),
                    ]
                }),
        )
        // effects
        .property(
            "boxShadow",
            PropertyDefinition::values([
                ("sm", "0 1px 2px 0 rgb(0 0 0 / 0.05)"),
                (
                    "default",
                    "0 1px 3px 0 rgb(0 0 0 / 0.1), 0 1px 2px -1px rgb(0 0 0 / 0.1)",
                ),
                (
                    "md",
                    "0 4px 6px -1px rgb(0 0 0 / 0.1), 0 2px 4px -2px rgb(0 0 0 / 0.1)",
                ),
                ("none", "none"),
            ]),
        )
        .property("opacity", numeric(""))
        .property("rotate", numeric("deg"))
        .property("forcedColorAdjust", PropertyDefinition::list(["auto", "none"]))
        // transitions
        .property(
            "transition",
            PropertyDefinition::values([
                (
                    "default",
                    "color, background-color, border-color, text-decoration-color, fill, stroke, opacity, box-shadow, transform",
                ),
                (
                    "colors",
                    "color, background-color, border-color, text-decoration-color, fill, stroke",
                ),
                ("opacity", "opacity"),
                ("shadow", "box-shadow"),
                ("transform", "transform"),
                ("all", "all"),
                ("none", "none"),
            ])
            .map_to(|value| {
                vec![
                    Declaration::new("transition-property", value),
                    Declaration::new("transition-duration", "150ms"),
                    Declaration::new("transition-timing-function", EASE_DEFAULT),
                ]
            }),
        )
        .property("transitionDuration", PropertyDefinition::values(DURATIONS.iter().copied()))
        .property("transitionDelay", PropertyDefinition::values(DURATIONS.iter().copied()))
        .property(
            "transitionTimingFunction",
            PropertyDefinition::values([
                ("default", EASE_DEFAULT),
                ("linear", "linear"),
                ("in", "cubic-bezier(0.4, 0, 1, 1)"),
                ("out", "cubic-bezier(0, 0, 0.2, 1)"),
                ("in-out", EASE_DEFAULT),
            ]),
        )
        // layout
        .property(
            "display",
            PropertyDefinition::list([
                "block",
                "inline-block",
                "inline",
                "flex",
                "inline-flex",
                "grid",
                "inline-grid",
                "contents",
                "none",
            ]),
        )
        .property(
            "position",
            PropertyDefinition::list(["absolute", "fixed", "relative", "sticky", "static"]),
        )
        .property(
            "alignItems",
            PropertyDefinition::list(["start", "end", "center", "baseline", "stretch"]),
        )
        .property(
            "alignContent",
            PropertyDefinition::list(["normal", "center", "start", "end", "space-between", "stretch"]),
        )
        .property(
            "alignSelf",
            PropertyDefinition::list(["auto", "start", "end", "center", "stretch", "baseline"]),
        )
        .property(
            "justifyContent",
            PropertyDefinition::list(["normal", "start", "end", "center", "space-between", "stretch"]),
        )
        .property("justifyItems", PropertyDefinition::list(["start", "end", "center", "stretch"]))
        .property(
            "justifySelf",
            PropertyDefinition::list(["auto", "start", "end", "center", "stretch"]),
        )
        .property(
            "flexDirection",
            PropertyDefinition::list(["row", "column", "row-reverse", "column-reverse"]),
        )
        .property("flexWrap", PropertyDefinition::list(["wrap", "wrap-reverse", "nowrap"]))
        .property("flexGrow", numeric(""))
        .property("flexShrink", numeric(""))
        .property("order", numeric(""))
        .property("zIndex", numeric(""))
        .property(
            "overflowX",
            PropertyDefinition::list(["auto", "hidden", "clip", "visible", "scroll"]),
        )
        .property(
            "overflowY",
            PropertyDefinition::list(["auto", "hidden", "clip", "visible", "scroll"]),
        )
        .property("boxSizing", PropertyDefinition::list(["border-box", "content-box"]))
        .property("pointerEvents", PropertyDefinition::list(["none", "auto"]))
        .property("userSelect", PropertyDefinition::list(["none", "text", "all", "auto"]))
        .property("visibility", PropertyDefinition::list(["visible", "hidden", "collapse"]))
        .property(
            "cursor",
            PropertyDefinition::list([
                "auto",
                "default",
                "pointer",
                "wait",
                "text",
                "move",
                "not-allowed",
                "grab",
                "grabbing",
            ]),
        )
        .shorthand(
            "padding",
            ["paddingTop", "paddingBottom", "paddingStart", "paddingEnd"],
        )
        .shorthand("paddingX", ["paddingStart", "paddingEnd"])
        .shorthand("paddingY", ["paddingTop", "paddingBottom"])
        .shorthand("margin", ["marginTop", "marginBottom", "marginStart", "marginEnd"])
        .shorthand("marginX", ["marginStart", "marginEnd"])
        .shorthand("marginY", ["marginTop", "marginBottom"])
        .shorthand(
            "borderWidth",
            ["borderTopWidth", "borderBottomWidth", "borderStartWidth", "borderEndWidth"],
        )
        .shorthand("borderXWidth", ["borderStartWidth", "borderEndWidth"])
        .shorthand("borderYWidth", ["borderTopWidth", "borderBottomWidth"])
        .shorthand(
            "borderRadius",
            [
                "borderTopStartRadius",
                "borderTopEndRadius",
                "borderBottomStartRadius",
                "borderBottomEndRadius",
            ],
        )
        .shorthand("insetX", ["insetStart", "insetEnd"])
        .shorthand("insetY", ["top", "bottom"])
        .shorthand("placeItems", ["alignItems", "justifyItems"])
        .shorthand("placeContent", ["alignContent", "justifyContent"])
        .shorthand("placeSelf", ["alignSelf", "justifySelf"])
        .shorthand("gap", ["rowGap", "columnGap"])
        .shorthand("size", ["width", "height"])
        .shorthand("overflow", ["overflowX", "overflowY"])
        .condition("dark", "@media (prefers-color-scheme: dark)")
        .condition("forcedColors", "@media (forced-colors: active)")
        .condition("sm", "@media (min-width: 640px)")
        .condition("md", "@media (min-width: 768px)")
        .condition("lg", "@media (min-width: 1024px)")
        .condition("xl", "@media (min-width: 1280px)")
        .condition("2xl", "@media (min-width: 1536px)")
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::ConditionKind;

    #[test]
    fn test_default_theme_builds() {
        let theme = build().unwrap();
        assert_eq!(theme.layer_count(), 7);
        assert!(matches!(theme.condition("dark"), Some(ConditionKind::Theme(_))));
    }

    #[test]
    fn test_default_theme_is_shared() {
        assert!(std::ptr::eq(default_theme(), default_theme()));
    }

    #[test]
    fn test_logical_padding() {
        let theme = default_theme();
        let id = theme.property_id("paddingStart").unwrap();
        let resolved = theme.resolve(id, &Literal::Number(4.0)).unwrap();
        assert_eq!(
            resolved.declarations,
            vec![Declaration::new("padding-inline-start", "1rem")]
        );
    }

    #[test]
    fn test_transition_sets_three_declarations() {
        let theme = default_theme();
        let id = theme.property_id("transition").unwrap();
        let resolved = theme.resolve(id, &Literal::from("colors")).unwrap();
        assert_eq!(resolved.declarations.len(), 3);
        assert_eq!(resolved.declarations[1], Declaration::new("transition-duration", "150ms"));
    }

    #[test]
    fn test_truncate_and_line_clamp() {
        let theme = default_theme();
        let truncate = theme.property_id("truncate").unwrap();
        assert_eq!(
            theme.resolve(truncate, &Literal::Bool(true)).unwrap().declarations.len(),
            3
        );
        assert!(theme.resolve(truncate, &Literal::Bool(false)).is_err());

        let clamp = theme.property_id("lineClamp").unwrap();
        let resolved = theme.resolve(clamp, &Literal::Number(3.0)).unwrap();
        assert_eq!(
            resolved.declarations[3],
            Declaration::new("-webkit-line-clamp", "3")
        );
    }

    #[test]
    fn test_rotate_appends_degrees() {
        let theme = default_theme();
        let rotate = theme.property_id("rotate").unwrap();
        let resolved = theme.resolve(rotate, &Literal::Number(45.0)).unwrap();
        assert_eq!(resolved.declarations[0].value, "45deg");
        let resolved = theme.resolve(rotate, &Literal::from("0.5turn")).unwrap();
        assert_eq!(resolved.declarations[0].value, "0.5turn");
    }
}
