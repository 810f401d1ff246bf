//! Runtime side: selection procedures, render state, and class-list merging.
//!
//! Nothing here can fail. Procedures are pure functions of a
//! [`RenderState`]; unknown state keys are ignored, and merging keeps
//! anything it cannot parse.

mod merge;
mod procedure;
mod state;

pub use merge::{merge_procedures, merge_styles};
pub use procedure::{Node, Predicate, PropertyGroup, SelectionProcedure};
pub use state::{RenderState, StateValue};
