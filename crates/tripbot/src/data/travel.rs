//! Travel dataset loader.

use std::fs::File;
use std::path::Path;

use tracing::info;

use super::{build_header_map, find_column, get_field, parse_opt_cost, parse_opt_u32};

/// One row of the travel dataset. Immutable once loaded.
#[derive(Debug, Clone, PartialEq)]
pub struct TravelRecord {
    pub destination: String,
    /// Trip length in days; `None` when the cell failed numeric coercion.
    pub duration_days: Option<u32>,
    pub accommodation_type: String,
    pub accommodation_cost: Option<f64>,
    pub transportation_type: String,
    pub transportation_cost: Option<f64>,
    pub traveler_age: Option<u32>,
}

/// Column indices resolved from the header row.
struct TravelColumns {
    destination: usize,
    duration: usize,
    accommodation_type: usize,
    accommodation_cost: usize,
    transportation_type: usize,
    transportation_cost: usize,
    traveler_age: usize,
}

impl TravelColumns {
    fn resolve(header_map: &std::collections::HashMap<String, usize>) -> Result<Self, String> {
        let require = |canonical: &str, aliases: &[&str]| {
            find_column(header_map, aliases)
                .ok_or_else(|| format!("travel dataset: missing required column `{canonical}`"))
        };
        Ok(Self {
            destination: require("destination", &["destination"])?,
            duration: require("duration", &["duration", "duration_(days)", "duration_days"])?,
            accommodation_type: require("accommodation_type", &["accommodation_type"])?,
            accommodation_cost: require("accommodation_cost", &["accommodation_cost"])?,
            transportation_type: require("transportation_type", &["transportation_type"])?,
            transportation_cost: require("transportation_cost", &["transportation_cost"])?,
            traveler_age: require("traveler_age", &["traveler_age", "traveler_age_(years)"])?,
        })
    }
}

/// Parse the travel CSV into an ordered sequence of [`TravelRecord`]s.
///
/// Text fields are taken verbatim (trimmed); numeric fields are coerced
/// independently, with unparseable values becoming `None`. A missing file
/// or absent required column is a fatal load error.
pub fn load(path: &Path) -> Result<Vec<TravelRecord>, String> {
    let file = File::open(path)
        .map_err(|e| format!("failed to open travel dataset '{}': {e}", path.display()))?;

    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(file);

    let headers = reader
        .headers()
        .map_err(|e| format!("failed to read travel dataset headers: {e}"))?
        .clone();
    let header_map = build_header_map(&headers);
    let cols = TravelColumns::resolve(&header_map)?;

    let mut records = Vec::new();
    for (idx, result) in reader.records().enumerate() {
        // Header is line 1; data lines are 1-based after it.
        let line = idx + 2;
        let record = result
            .map_err(|e| format!("travel dataset line {line}: CSV parse error: {e}"))?;

        records.push(TravelRecord {
            destination: get_field(&record, Some(cols.destination))
                .unwrap_or_default()
                .to_string(),
            duration_days: parse_opt_u32(get_field(&record, Some(cols.duration))),
            accommodation_type: get_field(&record, Some(cols.accommodation_type))
                .unwrap_or_default()
                .to_string(),
            accommodation_cost: parse_opt_cost(get_field(&record, Some(cols.accommodation_cost))),
            transportation_type: get_field(&record, Some(cols.transportation_type))
                .unwrap_or_default()
                .to_string(),
            transportation_cost: parse_opt_cost(get_field(&record, Some(cols.transportation_cost))),
            traveler_age: parse_opt_u32(get_field(&record, Some(cols.traveler_age))),
        });
    }

    info!("Loaded {} travel records from {}", records.len(), path.display());
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_csv(content: &str) -> tempfile::NamedTempFile {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        f.write_all(content.as_bytes()).unwrap();
        f
    }

    const HEADER: &str = "Destination,Duration (days),Accommodation type,Accommodation cost,Transportation type,Transportation cost,Traveler age\n";

    #[test]
    fn loads_rows_in_file_order() {
        let f = write_csv(&format!(
            "{HEADER}Paris,5,Hotel,800,Flight,400,30\nTokyo,7,Hostel,300,Flight,900,25\n"
        ));
        let records = load(f.path()).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].destination, "Paris");
        assert_eq!(records[0].duration_days, Some(5));
        assert_eq!(records[0].accommodation_cost, Some(800.0));
        assert_eq!(records[1].destination, "Tokyo");
    }

    #[test]
    fn unparseable_numerics_become_none() {
        let f = write_csv(&format!("{HEADER}Paris,five,Hotel,n/a,Flight,,30\n"));
        let records = load(f.path()).unwrap();
        assert_eq!(records[0].duration_days, None);
        assert_eq!(records[0].accommodation_cost, None);
        assert_eq!(records[0].transportation_cost, None);
        assert_eq!(records[0].traveler_age, Some(30));
    }

    #[test]
    fn currency_formatted_costs_parse() {
        let f = write_csv(&format!("{HEADER}Paris,5,Hotel,\"$1,200.00\",Flight,$400,30\n"));
        let records = load(f.path()).unwrap();
        assert_eq!(records[0].accommodation_cost, Some(1200.0));
        assert_eq!(records[0].transportation_cost, Some(400.0));
    }

    #[test]
    fn missing_required_column_is_fatal() {
        let f = write_csv("Destination,Duration (days)\nParis,5\n");
        let err = load(f.path()).unwrap_err();
        assert!(err.contains("missing required column"), "{err}");
        assert!(err.contains("accommodation_type"), "{err}");
    }

    #[test]
    fn missing_file_is_fatal() {
        let err = load(Path::new("/nonexistent/travel.csv")).unwrap_err();
        assert!(err.contains("failed to open"), "{err}");
    }
}
