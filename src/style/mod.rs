//! Style descriptions and the style tree compiler.
//!
//! A [`StyleDescription`] maps properties to literal or conditional values.
//! Compiling one happens in two passes:
//!
//! 1. [`normalize`] classifies every conditional key once, producing a tree of
//!    [`Branch`]es tagged `Default`, `Theme`, `Flag`, or `Variant`.
//! 2. [`lower`] walks that tree per longhand, resolves leaves through the
//!    theme registry, and builds a [`RuleForest`] whose class rules carry
//!    their tokens and declarations.
//!
//! Conditional keys are read as follows:
//!
//! | Key | Meaning |
//! |-----|---------|
//! | `default` | fallback when no dynamic sibling matches |
//! | registry condition with a prelude | CSS condition, decided by the renderer |
//! | registry condition without a prelude, or `isX` | boolean render-state flag |
//! | anything else | variant name; the value maps tags to values |

mod lower;
mod normalize;
mod rule;
mod value;

pub use lower::lower;
pub use normalize::{normalize, Branch, BranchCondition, StyleNode};
pub use rule::{ClassSelector, PropertyRules, Rule, RuleBody, RuleForest, RuntimeCondition, Selector};
pub use value::{Literal, StyleDescription, StyleValue};
