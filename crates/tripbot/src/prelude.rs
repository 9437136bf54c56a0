//! Convenience re-exports for common `tripbot` types.
//!
//! Meant to be glob-imported when embedding the bot:
//!
//! ```ignore
//! use tripbot::prelude::*;
//! ```

// ── Core types ──────────────────────────────────────────────────────
pub use crate::{ChatRequest, Message, OpenRouterClient, ToolDef, json_schema_for};

// ── Data ────────────────────────────────────────────────────────────
pub use crate::data::{Datasets, FoodRecord, TravelRecord};

// ── Engine ──────────────────────────────────────────────────────────
pub use crate::engine::{AccommodationSummary, BudgetEstimate, Engine, TravelPreferences};

// ── Dispatch and routing ────────────────────────────────────────────
pub use crate::router::{RouterConfig, route_query};
pub use crate::tools::{ToolOp, UnknownOperation, dispatch, tool_definitions};
