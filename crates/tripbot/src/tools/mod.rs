//! Tool Dispatcher: the closed set of operations the model may select.
//!
//! Unlike an open tool registry, the operation set here is fixed at
//! compile time, so dispatch is a tagged enum ([`ToolOp`]) rather than a
//! runtime lookup table. [`ToolOp::resolve`] is the only validation
//! performed on a model-selected name; argument shapes are checked by
//! nothing beyond each operation's own deserialization.
//!
//! # Submodules
//!
//! - [`dispatch`] — [`ToolOp`], typed argument structs, definition
//!   export, and the dispatch entry point.
//! - [`names`] — canonical operation name constants.

pub mod dispatch;
pub mod names;

pub use dispatch::{
    AccommodationArgs, BudgetArgs, FoodArgs, SearchArgs, ToolOp, UnknownOperation, dispatch,
    parse_tool_args, tool_definitions,
};
