//! Merging class lists with override semantics.

use indexmap::IndexMap;

use super::procedure::SelectionProcedure;
use super::state::RenderState;
use crate::codec::parse_token;

/// Merges class lists so later lists override earlier ones per property.
///
/// Tokens are grouped by their property unit. Within one list every token of
/// a property is kept; a later list's tokens for a property replace the
/// earlier list's tokens for it, in the earlier position. Tokens that do not
/// parse as class tokens are kept under their own text. `None` entries are
/// skipped.
///
/// # Example
///
/// ```rust
/// use stylemacro::merge_styles;
///
/// // "ab": property a, value b. "aab": property a under condition a.
/// let merged = merge_styles([Some("ab cd"), None, Some("ac aac")]);
/// assert_eq!(merged, "ac aac cd");
/// ```
pub fn merge_styles<'a, I>(styles: I) -> String
where
    I: IntoIterator<Item = Option<&'a str>>,
{
    let mut groups: IndexMap<&'a str, Vec<&'a str>> = IndexMap::new();

    for style in styles.into_iter().flatten() {
        let mut local: IndexMap<&'a str, Vec<&'a str>> = IndexMap::new();
        for token in style.split_ascii_whitespace() {
            let key = parse_token(token).map_or(token, |parts| parts.property);
            let tokens = local.entry(key).or_default();
            if !tokens.contains(&token) {
                tokens.push(token);
            }
        }
        for (key, tokens) in local {
            groups.insert(key, tokens);
        }
    }

    groups
        .into_values()
        .flatten()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Merges class lists given as separate arguments.
///
/// Each argument is anything convertible to `Option<&str>`.
///
/// ```rust
/// use stylemacro::merge_styles;
///
/// let base = "ab cd";
/// let overrides: Option<&str> = Some("ac");
/// assert_eq!(merge_styles!(base, None::<&str>, overrides), "ac cd");
/// ```
#[macro_export]
macro_rules! merge_styles {
    ($($style:expr),+ $(,)?) => {
        $crate::runtime::merge_styles([
            $(::std::option::Option::<&str>::from($style)),+
        ])
    };
}

/// Composes procedures into one function whose output is the merge of each
/// procedure's output, later procedures overriding earlier ones.
pub fn merge_procedures<'p>(
    procedures: &'p [&'p SelectionProcedure],
) -> impl Fn(&RenderState) -> String + Send + Sync + 'p {
    move |state: &RenderState| {
        let outputs: Vec<String> = procedures.iter().map(|p| p.select(state)).collect();
        merge_styles(outputs.iter().map(|s| Some(s.as_str())))
    }
}
