//! Recommendation Engine: the four query operations over the loaded tables.
//!
//! Every operation degrades rather than fails: invalid input yields an
//! empty result set or a zeroed estimate (logged at `warn` for the
//! operator), never an error to the caller. Missing numeric values are
//! excluded from aggregates — a mean over all-missing data is itself
//! missing, not zero — so the two outcomes stay distinguishable all the
//! way to the formatter.

use std::collections::BTreeMap;

use tracing::{debug, warn};

use crate::data::{Datasets, FoodRecord, TravelRecord};

/// Maximum number of records returned by the list-shaped operations.
pub const MAX_RESULTS: usize = 5;

/// Fixed meals-per-day multiplier for the daily food cost estimate.
pub const MEALS_PER_DAY: f64 = 3.0;

// ── Value types ────────────────────────────────────────────────────

/// Query parameter bundle for destination search. Every field is
/// independently optional; absence means "no constraint", not zero.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TravelPreferences {
    /// Ceiling on trip duration in days.
    pub duration: Option<u32>,
    /// Ceiling on accommodation + transportation cost.
    pub budget: Option<f64>,
    /// Traveler age. Accepted but not used as a filter.
    pub age: Option<u32>,
    /// Destination name. Accepted but not used as a filter.
    pub destination: Option<String>,
}

/// Per-accommodation-type aggregation for one destination.
#[derive(Debug, Clone, PartialEq)]
pub struct AccommodationSummary {
    pub accommodation_type: String,
    /// Mean accommodation cost across matching rows; `None` when every
    /// cost in the group was missing.
    pub mean_cost: Option<f64>,
}

/// Derived cost estimate for a trip. `None` fields mean "no data";
/// the canonical zero estimate (all fields `Some(0.0)`) is reserved for
/// the internal-error path. The two must not be conflated: the formatter
/// renders them differently.
#[derive(Debug, Clone, PartialEq)]
pub struct BudgetEstimate {
    /// Mean accommodation cost × duration.
    pub accommodation_cost: Option<f64>,
    /// Mean transportation cost (not scaled by duration).
    pub transportation_cost: Option<f64>,
    /// Mean menu price × 3 meals × duration.
    pub food_cost: Option<f64>,
    /// Sum of the three; missing when any component is missing.
    pub total: Option<f64>,
}

impl BudgetEstimate {
    /// The canonical zero estimate returned on an internal error.
    pub fn zero() -> Self {
        Self {
            accommodation_cost: Some(0.0),
            transportation_cost: Some(0.0),
            food_cost: Some(0.0),
            total: Some(0.0),
        }
    }
}

// ── Aggregation helper ─────────────────────────────────────────────

/// Arithmetic mean over the present values, excluding `None`. Returns
/// `None` when the input is empty or every value is missing.
pub fn mean(values: impl Iterator<Item = Option<f64>>) -> Option<f64> {
    let mut sum = 0.0;
    let mut count = 0usize;
    for v in values.flatten() {
        sum += v;
        count += 1;
    }
    if count == 0 { None } else { Some(sum / count as f64) }
}

// ── Engine ─────────────────────────────────────────────────────────

/// Read-only view over the loaded datasets exposing the four query
/// operations.
#[derive(Debug, Clone, Copy)]
pub struct Engine<'a> {
    travel: &'a [TravelRecord],
    food: &'a [FoodRecord],
}

impl<'a> Engine<'a> {
    pub fn new(datasets: &'a Datasets) -> Self {
        Self {
            travel: &datasets.travel,
            food: &datasets.food,
        }
    }

    /// Filter the travel table by the active preference ceilings and
    /// return the first [`MAX_RESULTS`] survivors in original dataset
    /// order. No ranking is applied; ties and ordering are purely a
    /// function of input order.
    ///
    /// A row whose duration or costs are missing never satisfies an
    /// active `<=` filter and is excluded.
    pub fn search_destinations(&self, prefs: &TravelPreferences) -> Vec<TravelRecord> {
        let results: Vec<TravelRecord> = self
            .travel
            .iter()
            .filter(|row| {
                let duration_ok = match prefs.duration {
                    None => true,
                    Some(max) => row.duration_days.is_some_and(|d| d <= max),
                };
                let budget_ok = match prefs.budget {
                    None => true,
                    Some(max) => row
                        .accommodation_cost
                        .zip(row.transportation_cost)
                        .is_some_and(|(a, t)| a + t <= max),
                };
                duration_ok && budget_ok
            })
            .take(MAX_RESULTS)
            .cloned()
            .collect();

        debug!(
            "search_destinations: duration<={:?}, budget<={:?} -> {} row(s)",
            prefs.duration,
            prefs.budget,
            results.len()
        );
        results
    }

    /// Group rows case-insensitively matching `destination` by
    /// accommodation type and compute the mean accommodation cost per
    /// group, excluding missing costs. A group whose costs are all
    /// missing keeps a `None` mean.
    ///
    /// Groups are returned sorted by accommodation type name — the
    /// upstream order was unspecified, so we pick a deterministic one and
    /// keep it consistent for tests.
    pub fn accommodation_recommendations(&self, destination: &str) -> Vec<AccommodationSummary> {
        let mut groups: BTreeMap<&str, Vec<Option<f64>>> = BTreeMap::new();
        for row in self.travel {
            if row.destination.trim().eq_ignore_ascii_case(destination.trim()) {
                groups
                    .entry(row.accommodation_type.as_str())
                    .or_default()
                    .push(row.accommodation_cost);
            }
        }

        let summaries: Vec<AccommodationSummary> = groups
            .into_iter()
            .map(|(ty, costs)| AccommodationSummary {
                accommodation_type: ty.to_string(),
                mean_cost: mean(costs.into_iter()),
            })
            .collect();

        debug!(
            "accommodation_recommendations: '{destination}' -> {} group(s)",
            summaries.len()
        );
        summaries
    }

    /// Top menu items by sales quantity, optionally filtered by price.
    ///
    /// `location` is accepted but deliberately not applied to the food
    /// table — the upstream behavior never filtered on it, and callers
    /// depend on identical output across location strings. This is a
    /// documented no-op, not an oversight.
    pub fn food_recommendations(&self, location: &str, budget: Option<f64>) -> Vec<FoodRecord> {
        let _ = location;

        let mut items: Vec<FoodRecord> = self
            .food
            .iter()
            .filter(|row| match budget {
                None => true,
                Some(max) => row.price.is_some_and(|p| p <= max),
            })
            .cloned()
            .collect();

        // Stable sort: descending by sales quantity, missing quantities
        // last, equal quantities keep file order.
        items.sort_by_key(|r| (r.sales_qty.is_none(), std::cmp::Reverse(r.sales_qty.unwrap_or(0))));
        items.truncate(MAX_RESULTS);

        debug!(
            "food_recommendations: budget<={budget:?} -> {} item(s)",
            items.len()
        );
        items
    }

    /// Estimate trip cost for a destination over `duration` days.
    ///
    /// Accommodation and transportation means come from travel rows
    /// case-insensitively matching the destination; the daily food cost
    /// is the mean price across the entire food table times
    /// [`MEALS_PER_DAY`], independent of destination. An unmatched
    /// destination therefore yields missing accommodation/transportation
    /// costs but a defined food cost.
    ///
    /// `duration == 0` is treated as an internal error and yields the
    /// canonical zero estimate — distinct from the missing-data case.
    pub fn budget_estimate(&self, destination: &str, duration: u32) -> BudgetEstimate {
        if duration == 0 {
            warn!("budget_estimate: non-positive duration for '{destination}', returning zero estimate");
            return BudgetEstimate::zero();
        }
        let days = f64::from(duration);

        let matches = || {
            self.travel
                .iter()
                .filter(|row| row.destination.trim().eq_ignore_ascii_case(destination.trim()))
        };
        let mean_accommodation = mean(matches().map(|r| r.accommodation_cost));
        let mean_transportation = mean(matches().map(|r| r.transportation_cost));
        let daily_food = mean(self.food.iter().map(|r| r.price)).map(|m| m * MEALS_PER_DAY);

        if mean_accommodation.is_none() {
            warn!("budget_estimate: no cost data for destination '{destination}'");
        }

        let accommodation_cost = mean_accommodation.map(|m| m * days);
        let food_cost = daily_food.map(|d| d * days);
        let total = match (accommodation_cost, mean_transportation, food_cost) {
            (Some(a), Some(t), Some(f)) => Some(a + t + f),
            _ => None,
        };

        BudgetEstimate {
            accommodation_cost,
            transportation_cost: mean_transportation,
            food_cost,
            total,
        }
    }
}
