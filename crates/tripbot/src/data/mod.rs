//! Dataset Store: CSV ingest for the travel and food tables.
//!
//! Each loader parses a delimited file with a header row into strongly
//! typed records. Numeric columns are coerced independently — a value
//! that fails to parse becomes `None` rather than raising, so downstream
//! aggregation can exclude it instead of treating it as zero. A missing
//! file, unreadable content, or an absent required column is a fatal load
//! error; the process must not proceed with a partially loaded dataset.
//!
//! Records are kept in file order and never deduplicated; no referential
//! integrity is enforced between the two tables.

pub mod food;
pub mod travel;

pub use food::FoodRecord;
pub use travel::TravelRecord;

use std::collections::HashMap;
use std::path::Path;

/// Both tables, loaded once at startup and read-only thereafter.
#[derive(Debug, Clone)]
pub struct Datasets {
    pub travel: Vec<TravelRecord>,
    pub food: Vec<FoodRecord>,
}

impl Datasets {
    /// Load both datasets, failing fast on the first load error.
    pub fn load(travel_path: &Path, food_path: &Path) -> Result<Self, String> {
        Ok(Self {
            travel: travel::load(travel_path)?,
            food: food::load(food_path)?,
        })
    }
}

// ── Shared parsing helpers ─────────────────────────────────────────

pub(crate) fn build_header_map(headers: &csv::StringRecord) -> HashMap<String, usize> {
    headers
        .iter()
        .enumerate()
        .map(|(idx, name)| (normalize_header_name(name), idx))
        .collect()
}

fn normalize_header_name(name: &str) -> String {
    // Spreadsheet exports sometimes emit UTF-8 CSVs with a BOM prefix on
    // the first header. If we don't strip it, schema validation will
    // incorrectly report missing columns.
    let name = name.trim().trim_start_matches('\u{feff}');
    name.to_ascii_lowercase().replace([' ', '-'], "_")
}

/// Look up a column by its canonical name or any accepted alias.
/// Returns the index of the first alias present in the header row.
pub(crate) fn find_column(header_map: &HashMap<String, usize>, aliases: &[&str]) -> Option<usize> {
    aliases.iter().find_map(|name| header_map.get(*name).copied())
}

pub(crate) fn get_field<'a>(record: &'a csv::StringRecord, idx: Option<usize>) -> Option<&'a str> {
    record.get(idx?).map(str::trim).filter(|s| !s.is_empty())
}

/// Coerce a cell to a non-negative finite decimal. Empty cells, parse
/// failures, negative values, and non-finite values all become `None`.
pub(crate) fn parse_opt_cost(s: Option<&str>) -> Option<f64> {
    let v = parse_money(s?)?;
    if v.is_finite() && v >= 0.0 { Some(v) } else { None }
}

/// Coerce a cell to a non-negative integer.
pub(crate) fn parse_opt_u32(s: Option<&str>) -> Option<u32> {
    s?.parse::<u32>().ok()
}

/// Parse a decimal that may carry a currency sign or thousands separators
/// ("$1,200.00" → 1200.0).
fn parse_money(s: &str) -> Option<f64> {
    let cleaned: String = s
        .chars()
        .filter(|c| !matches!(c, '$' | ',' | ' '))
        .collect();
    cleaned.parse::<f64>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_normalization() {
        assert_eq!(normalize_header_name("  Duration (days)"), "duration_(days)");
        assert_eq!(normalize_header_name("\u{feff}Destination"), "destination");
        assert_eq!(normalize_header_name("Accommodation cost"), "accommodation_cost");
    }

    #[test]
    fn cost_coercion_rejects_negatives_and_junk() {
        assert_eq!(parse_opt_cost(Some("1200.50")), Some(1200.50));
        assert_eq!(parse_opt_cost(Some("$1,200.50")), Some(1200.50));
        assert_eq!(parse_opt_cost(Some("-5")), None);
        assert_eq!(parse_opt_cost(Some("abc")), None);
        assert_eq!(parse_opt_cost(None), None);
    }

    #[test]
    fn u32_coercion() {
        assert_eq!(parse_opt_u32(Some("7")), Some(7));
        assert_eq!(parse_opt_u32(Some("-1")), None);
        assert_eq!(parse_opt_u32(Some("7.5")), None);
    }
}
