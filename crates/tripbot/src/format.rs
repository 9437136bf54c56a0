//! Response Formatter: pure functions rendering typed result lists into
//! templated multi-line text blocks.
//!
//! Currency values use 2-decimal formatting; a missing numeric value is
//! rendered as `N/A` rather than zero, so "no data" stays visible to the
//! user. Empty inputs produce a fixed not-found sentence naming the query
//! parameter.

use crate::data::{FoodRecord, TravelRecord};
use crate::engine::{AccommodationSummary, BudgetEstimate};

/// Render an optional cost with a currency sign and two decimals.
fn money(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("${v:.2}"),
        None => "N/A".to_string(),
    }
}

fn count(value: Option<u32>) -> String {
    match value {
        Some(v) => v.to_string(),
        None => "N/A".to_string(),
    }
}

/// Render destination search results as a numbered list.
pub fn destinations(results: &[TravelRecord]) -> String {
    if results.is_empty() {
        return "No destinations found matching your preferences.".to_string();
    }

    let mut out = String::from("Here are some destinations you might like:\n");
    for (i, r) in results.iter().enumerate() {
        out.push_str(&format!(
            "{}. {}\n   Duration: {} days\n   Accommodation: {} ({})\n   Transportation: {} ({})\n",
            i + 1,
            r.destination,
            count(r.duration_days),
            r.accommodation_type,
            money(r.accommodation_cost),
            r.transportation_type,
            money(r.transportation_cost),
        ));
    }
    out
}

/// Render per-type accommodation averages for a destination.
pub fn accommodations(summaries: &[AccommodationSummary], destination: &str) -> String {
    if summaries.is_empty() {
        return format!("No accommodations found for {destination}.");
    }

    let mut out = format!("Accommodation options in {destination}:\n");
    for (i, s) in summaries.iter().enumerate() {
        out.push_str(&format!(
            "{}. {} — average cost {}\n",
            i + 1,
            s.accommodation_type,
            money(s.mean_cost),
        ));
    }
    out
}

/// Render the top menu items as a numbered list.
pub fn food(items: &[FoodRecord]) -> String {
    if items.is_empty() {
        return "No menu items found for that location.".to_string();
    }

    let mut out = String::from("Popular menu items:\n");
    for (i, r) in items.iter().enumerate() {
        out.push_str(&format!(
            "{}. {} at {}\n   Category: {}\n   Price: {}\n   Sold: {}\n",
            i + 1,
            r.menu_item,
            r.store_name,
            r.category,
            money(r.price),
            count(r.sales_qty),
        ));
    }
    out
}

/// Render a budget estimate for a destination and duration.
pub fn budget(estimate: &BudgetEstimate, destination: &str, duration: u32) -> String {
    format!(
        "Estimated budget for {duration} days in {destination}:\n\
         Accommodation: {}\n\
         Transportation: {}\n\
         Food: {}\n\
         Total: {}\n",
        money(estimate.accommodation_cost),
        money(estimate.transportation_cost),
        money(estimate.food_cost),
        money(estimate.total),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn travel_record() -> TravelRecord {
        TravelRecord {
            destination: "Paris".to_string(),
            duration_days: Some(5),
            accommodation_type: "Hotel".to_string(),
            accommodation_cost: Some(800.0),
            transportation_type: "Flight".to_string(),
            transportation_cost: Some(400.5),
            traveler_age: Some(30),
        }
    }

    #[test]
    fn empty_destinations_sentence() {
        assert_eq!(
            destinations(&[]),
            "No destinations found matching your preferences."
        );
    }

    #[test]
    fn destinations_numbered_with_two_decimal_currency() {
        let out = destinations(&[travel_record()]);
        assert!(out.starts_with("Here are some destinations"));
        assert!(out.contains("1. Paris"), "{out}");
        assert!(out.contains("$800.00"), "{out}");
        assert!(out.contains("$400.50"), "{out}");
    }

    #[test]
    fn destinations_missing_cost_renders_na() {
        let mut r = travel_record();
        r.accommodation_cost = None;
        let out = destinations(&[r]);
        assert!(out.contains("Hotel (N/A)"), "{out}");
    }

    #[test]
    fn empty_accommodations_names_the_destination() {
        assert_eq!(
            accommodations(&[], "Lima"),
            "No accommodations found for Lima."
        );
    }

    #[test]
    fn accommodations_missing_mean_renders_na() {
        let out = accommodations(
            &[AccommodationSummary {
                accommodation_type: "Cabin".to_string(),
                mean_cost: None,
            }],
            "Oslo",
        );
        assert!(out.contains("Cabin — average cost N/A"), "{out}");
    }

    #[test]
    fn empty_food_sentence() {
        assert_eq!(food(&[]), "No menu items found for that location.");
    }

    #[test]
    fn food_blocks_render_all_fields() {
        let out = food(&[FoodRecord {
            store_name: "Cafe Rio".to_string(),
            menu_item: "Tacos".to_string(),
            category: "Mexican".to_string(),
            price: Some(8.5),
            sales_qty: Some(120),
            gross_sales: None,
            net_sales: None,
        }]);
        assert!(out.contains("1. Tacos at Cafe Rio"), "{out}");
        assert!(out.contains("Price: $8.50"), "{out}");
        assert!(out.contains("Sold: 120"), "{out}");
    }

    #[test]
    fn budget_renders_zero_and_missing_differently() {
        let zero = budget(&BudgetEstimate::zero(), "Paris", 5);
        assert!(zero.contains("Total: $0.00"), "{zero}");

        let missing = budget(
            &BudgetEstimate {
                accommodation_cost: None,
                transportation_cost: None,
                food_cost: Some(135.0),
                total: None,
            },
            "Atlantis",
            5,
        );
        assert!(missing.contains("Accommodation: N/A"), "{missing}");
        assert!(missing.contains("Food: $135.00"), "{missing}");
        assert!(missing.contains("Total: N/A"), "{missing}");
    }
}
