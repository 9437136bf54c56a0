//! Food dataset loader.

use std::fs::File;
use std::path::Path;

use tracing::info;

use super::{build_header_map, find_column, get_field, parse_opt_cost, parse_opt_u32};

/// One row of the food dataset. Immutable once loaded.
#[derive(Debug, Clone, PartialEq)]
pub struct FoodRecord {
    pub store_name: String,
    pub menu_item: String,
    pub category: String,
    pub price: Option<f64>,
    pub sales_qty: Option<u32>,
    pub gross_sales: Option<f64>,
    pub net_sales: Option<f64>,
}

struct FoodColumns {
    store_name: usize,
    menu_item: usize,
    category: usize,
    price: usize,
    sales_qty: usize,
    // Gross/net sales are informational and tolerated as absent columns.
    gross_sales: Option<usize>,
    net_sales: Option<usize>,
}

impl FoodColumns {
    fn resolve(header_map: &std::collections::HashMap<String, usize>) -> Result<Self, String> {
        let require = |canonical: &str, aliases: &[&str]| {
            find_column(header_map, aliases)
                .ok_or_else(|| format!("food dataset: missing required column `{canonical}`"))
        };
        Ok(Self {
            store_name: require("store_name", &["store_name", "store"])?,
            menu_item: require("menu_item", &["menu_item", "item", "item_name"])?,
            category: require("category", &["category"])?,
            price: require("price", &["price"])?,
            sales_qty: require("sales_qty", &["sales_qty", "sales_quantity", "qty", "quantity"])?,
            gross_sales: find_column(header_map, &["gross_sales"]),
            net_sales: find_column(header_map, &["net_sales"]),
        })
    }
}

/// Parse the food CSV into an ordered sequence of [`FoodRecord`]s.
pub fn load(path: &Path) -> Result<Vec<FoodRecord>, String> {
    let file = File::open(path)
        .map_err(|e| format!("failed to open food dataset '{}': {e}", path.display()))?;

    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(file);

    let headers = reader
        .headers()
        .map_err(|e| format!("failed to read food dataset headers: {e}"))?
        .clone();
    let header_map = build_header_map(&headers);
    let cols = FoodColumns::resolve(&header_map)?;

    let mut records = Vec::new();
    for (idx, result) in reader.records().enumerate() {
        let line = idx + 2;
        let record =
            result.map_err(|e| format!("food dataset line {line}: CSV parse error: {e}"))?;

        records.push(FoodRecord {
            store_name: get_field(&record, Some(cols.store_name))
                .unwrap_or_default()
                .to_string(),
            menu_item: get_field(&record, Some(cols.menu_item))
                .unwrap_or_default()
                .to_string(),
            category: get_field(&record, Some(cols.category))
                .unwrap_or_default()
                .to_string(),
            price: parse_opt_cost(get_field(&record, Some(cols.price))),
            sales_qty: parse_opt_u32(get_field(&record, Some(cols.sales_qty))),
            gross_sales: parse_opt_cost(get_field(&record, cols.gross_sales)),
            net_sales: parse_opt_cost(get_field(&record, cols.net_sales)),
        });
    }

    info!("Loaded {} food records from {}", records.len(), path.display());
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

    const HEADER: &str = "Store name,Menu item,Category,Price,Sales qty,Gross sales,Net sales\n";

    #[test]
    fn loads_rows_with_optional_sales_columns() {
        let f = write_csv(&format!(
            "{HEADER}Cafe Rio,Tacos,Mexican,8.50,120,1020,950\nNoodle Bar,Ramen,Japanese,12,80,,\n"
        ));
        let records = load(f.path()).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].menu_item, "Tacos");
        assert_eq!(records[0].price, Some(8.50));
        assert_eq!(records[0].sales_qty, Some(120));
        assert_eq!(records[1].gross_sales, None);
    }

    #[test]
    fn gross_net_columns_may_be_absent_entirely() {
        let f = write_csv("Store,Item,Category,Price,Qty\nCafe Rio,Tacos,Mexican,8.50,120\n");
        let records = load(f.path()).unwrap();
        assert_eq!(records[0].store_name, "Cafe Rio");
        assert_eq!(records[0].gross_sales, None);
        assert_eq!(records[0].net_sales, None);
    }

    #[test]
    fn missing_price_column_is_fatal() {
        let f = write_csv("Store,Item,Category,Qty\nCafe Rio,Tacos,Mexican,120\n");
        let err = load(f.path()).unwrap_err();
        assert!(err.contains("missing required column `price`"), "{err}");
    }

    #[test]
    fn bad_price_becomes_none_not_zero() {
        let f = write_csv(&format!("{HEADER}Cafe Rio,Tacos,Mexican,free,120,,\n"));
        let records = load(f.path()).unwrap();
        assert_eq!(records[0].price, None);
    }
}
