//! Operation enum, typed arguments, and dispatch.

use schemars::JsonSchema;
use serde::Deserialize;
use tracing::{debug, info};

use crate::data::Datasets;
use crate::engine::{Engine, TravelPreferences};
use crate::tools::names;
use crate::{ToolDef, format, json_schema_for};

// ── Operation enum ─────────────────────────────────────────────────

/// The closed enumeration of operations the model may select.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolOp {
    SearchDestinations,
    AccommodationRecommendations,
    FoodRecommendations,
    CalculateBudget,
}

/// Error returned when a model-selected name is not one of the four
/// recognized operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownOperation(pub String);

impl std::fmt::Display for UnknownOperation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown operation '{}'", self.0)
    }
}

impl std::error::Error for UnknownOperation {}

impl ToolOp {
    /// Resolve an operation name. This is the only validation performed
    /// on a tool selection.
    pub fn resolve(name: &str) -> Result<Self, UnknownOperation> {
        match name {
            names::SEARCH_DESTINATIONS => Ok(Self::SearchDestinations),
            names::ACCOMMODATION_RECOMMENDATIONS => Ok(Self::AccommodationRecommendations),
            names::FOOD_RECOMMENDATIONS => Ok(Self::FoodRecommendations),
            names::CALCULATE_BUDGET => Ok(Self::CalculateBudget),
            other => Err(UnknownOperation(other.to_string())),
        }
    }

    /// The canonical name for this operation.
    pub fn name(self) -> &'static str {
        match self {
            Self::SearchDestinations => names::SEARCH_DESTINATIONS,
            Self::AccommodationRecommendations => names::ACCOMMODATION_RECOMMENDATIONS,
            Self::FoodRecommendations => names::FOOD_RECOMMENDATIONS,
            Self::CalculateBudget => names::CALCULATE_BUDGET,
        }
    }
}

// ── Typed arguments ────────────────────────────────────────────────

/// Arguments for `search_destinations`.
#[derive(Deserialize, JsonSchema, Debug, Default)]
pub struct SearchArgs {
    /// Maximum trip duration in days.
    #[serde(default)]
    pub duration: Option<u32>,
    /// Maximum combined accommodation and transportation cost.
    #[serde(default)]
    pub budget: Option<f64>,
    /// Traveler age.
    #[serde(default)]
    pub age: Option<u32>,
    /// Destination name.
    #[serde(default)]
    pub destination: Option<String>,
}

impl From<SearchArgs> for TravelPreferences {
    fn from(args: SearchArgs) -> Self {
        TravelPreferences {
            duration: args.duration,
            budget: args.budget,
            age: args.age,
            destination: args.destination,
        }
    }
}

/// Arguments for `get_accommodation_recommendations`.
#[derive(Deserialize, JsonSchema, Debug)]
pub struct AccommodationArgs {
    /// Destination name (case-insensitive exact match).
    pub destination: String,
}

/// Arguments for `get_food_recommendations`.
#[derive(Deserialize, JsonSchema, Debug)]
pub struct FoodArgs {
    /// Location name. Accepted for compatibility; does not filter the
    /// food table.
    pub location: String,
    /// Maximum menu item price.
    #[serde(default)]
    pub budget: Option<f64>,
}

/// Arguments for `calculate_budget`.
#[derive(Deserialize, JsonSchema, Debug)]
pub struct BudgetArgs {
    /// Destination name (case-insensitive exact match).
    pub destination: String,
    /// Trip duration in days.
    pub duration: u32,
}

// ── Definition export ──────────────────────────────────────────────

/// The tool definitions advertised to the model.
///
/// `calculate_budget` is resolvable by [`ToolOp::resolve`] but not
/// exported here, matching the upstream schema which never exposed it.
pub fn tool_definitions() -> Vec<ToolDef> {
    vec![
        ToolDef::new(
            names::SEARCH_DESTINATIONS,
            "Search travel destinations matching the user's constraints. \
             Filters by maximum trip duration in days and maximum combined \
             accommodation and transportation budget; returns up to five \
             destinations in dataset order.",
            json_schema_for::<SearchArgs>(),
        ),
        ToolDef::new(
            names::ACCOMMODATION_RECOMMENDATIONS,
            "List accommodation options for a destination with the average \
             cost per accommodation type.",
            json_schema_for::<AccommodationArgs>(),
        ),
        ToolDef::new(
            names::FOOD_RECOMMENDATIONS,
            "Recommend popular menu items, optionally capped at a maximum \
             price. Returns the top five items by sales quantity.",
            json_schema_for::<FoodArgs>(),
        ),
    ]
}

// ── Dispatch ───────────────────────────────────────────────────────

/// Parse raw JSON arguments into a typed struct.
///
/// Returns a formatted error string suitable for returning directly to
/// the user-facing reply path.
pub fn parse_tool_args<T: serde::de::DeserializeOwned>(arguments: &str) -> Result<T, String> {
    serde_json::from_str(arguments)
        .map_err(|e| format!("Error: invalid tool arguments: {e}"))
}

/// Execute a resolved operation against the datasets and render the
/// result as display text.
///
/// Argument parse failures produce an `"Error: ..."` string rather than
/// propagating; the engine operations themselves never fail.
pub fn dispatch(op: ToolOp, arguments: &str, datasets: &Datasets) -> String {
    log_tool_call(op.name(), arguments);
    let engine = Engine::new(datasets);

    match op {
        ToolOp::SearchDestinations => {
            let args: SearchArgs = match parse_tool_args(arguments) {
                Ok(a) => a,
                Err(e) => return e,
            };
            let prefs = TravelPreferences::from(args);
            let results = engine.search_destinations(&prefs);
            format::destinations(&results)
        }
        ToolOp::AccommodationRecommendations => {
            let args: AccommodationArgs = match parse_tool_args(arguments) {
                Ok(a) => a,
                Err(e) => return e,
            };
            let summaries = engine.accommodation_recommendations(&args.destination);
            format::accommodations(&summaries, &args.destination)
        }
        ToolOp::FoodRecommendations => {
            let args: FoodArgs = match parse_tool_args(arguments) {
                Ok(a) => a,
                Err(e) => return e,
            };
            let results = engine.food_recommendations(&args.location, args.budget);
            format::food(&results)
        }
        ToolOp::CalculateBudget => {
            let args: BudgetArgs = match parse_tool_args(arguments) {
                Ok(a) => a,
                Err(e) => return e,
            };
            let estimate = engine.budget_estimate(&args.destination, args.duration);
            format::budget(&estimate, &args.destination, args.duration)
        }
    }
}

/// Log a tool call at INFO level with a truncated preview of arguments.
fn log_tool_call(name: &str, arguments: &str) {
    let args_preview: String = arguments.chars().take(120).collect();
    info!(
        "[tool] {}({args_preview}{})",
        name,
        if arguments.len() > 120 { "..." } else { "" }
    );
    debug!("[tool] {name} full args ({} bytes)", arguments.len());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{FoodRecord, TravelRecord};

    fn sample_datasets() -> Datasets {
        Datasets {
            travel: vec![TravelRecord {
                destination: "Paris".to_string(),
                duration_days: Some(5),
                accommodation_type: "Hotel".to_string(),
                accommodation_cost: Some(800.0),
                transportation_type: "Flight".to_string(),
                transportation_cost: Some(400.0),
                traveler_age: Some(30),
            }],
            food: vec![FoodRecord {
                store_name: "Cafe Rio".to_string(),
                menu_item: "Tacos".to_string(),
                category: "Mexican".to_string(),
                price: Some(8.0),
                sales_qty: Some(120),
                gross_sales: None,
                net_sales: None,
            }],
        }
    }

    #[test]
    fn resolve_known_names() {
        assert_eq!(
            ToolOp::resolve("search_destinations").unwrap(),
            ToolOp::SearchDestinations
        );
        assert_eq!(
            ToolOp::resolve("get_accommodation_recommendations").unwrap(),
            ToolOp::AccommodationRecommendations
        );
        assert_eq!(
            ToolOp::resolve("get_food_recommendations").unwrap(),
            ToolOp::FoodRecommendations
        );
        assert_eq!(
            ToolOp::resolve("calculate_budget").unwrap(),
            ToolOp::CalculateBudget
        );
    }

    #[test]
    fn resolve_unknown_name_errors() {
        let err = ToolOp::resolve("book_flight").unwrap_err();
        assert_eq!(err, UnknownOperation("book_flight".to_string()));
        assert_eq!(err.to_string(), "unknown operation 'book_flight'");
    }

    #[test]
    fn definitions_exclude_calculate_budget() {
        let defs = tool_definitions();
        let names: Vec<&str> = defs.iter().map(|d| d.function.name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "search_destinations",
                "get_accommodation_recommendations",
                "get_food_recommendations"
            ]
        );
        assert!(!names.contains(&"calculate_budget"));
    }

    #[test]
    fn definitions_carry_derived_schemas() {
        let defs = tool_definitions();
        let search = &defs[0].function.parameters;
        assert_eq!(search["type"], "object");
        assert!(search["properties"].get("duration").is_some());
        assert!(search["properties"].get("budget").is_some());

        let accommodation = &defs[1].function.parameters;
        assert!(
            accommodation["required"]
                .as_array()
                .unwrap()
                .contains(&"destination".into())
        );
    }

    #[test]
    fn dispatch_search_renders_results() {
        let datasets = sample_datasets();
        let out = dispatch(ToolOp::SearchDestinations, r#"{"duration": 7}"#, &datasets);
        assert!(out.contains("Paris"), "{out}");
        assert!(out.contains("800.00"), "{out}");
    }

    #[test]
    fn dispatch_empty_args_object_means_no_constraints() {
        let datasets = sample_datasets();
        let out = dispatch(ToolOp::SearchDestinations, "{}", &datasets);
        assert!(out.contains("Paris"), "{out}");
    }

    #[test]
    fn dispatch_bad_json_returns_error_string() {
        let datasets = sample_datasets();
        let out = dispatch(ToolOp::SearchDestinations, "not json", &datasets);
        assert!(out.starts_with("Error: invalid tool arguments"), "{out}");
    }

    #[test]
    fn dispatch_missing_required_argument_returns_error_string() {
        let datasets = sample_datasets();
        let out = dispatch(ToolOp::CalculateBudget, r#"{"destination": "Paris"}"#, &datasets);
        assert!(out.starts_with("Error: invalid tool arguments"), "{out}");
    }

    #[test]
    fn dispatch_budget_renders_estimate() {
        let datasets = sample_datasets();
        let out = dispatch(
            ToolOp::CalculateBudget,
            r#"{"destination": "Paris", "duration": 5}"#,
            &datasets,
        );
        // 800 × 5 accommodation, 400 transport, 8 × 3 × 5 = 120 food.
        assert!(out.contains("4000.00"), "{out}");
        assert!(out.contains("400.00"), "{out}");
        assert!(out.contains("120.00"), "{out}");
    }
}
