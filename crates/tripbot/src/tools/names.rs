//! Canonical operation name constants.
//!
//! All tool-name string literals should reference these constants to avoid
//! scattered magic strings. When an operation is renamed, only this file
//! needs to change.

pub const SEARCH_DESTINATIONS: &str = "search_destinations";
pub const ACCOMMODATION_RECOMMENDATIONS: &str = "get_accommodation_recommendations";
pub const FOOD_RECOMMENDATIONS: &str = "get_food_recommendations";
pub const CALCULATE_BUDGET: &str = "calculate_budget";
