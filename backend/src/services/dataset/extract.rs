//! The in-memory sales dataset and the per-role catalog extraction that
//! runs at ingest time.
//!
//! Catalogs map a role name to the ordered unique values found in the
//! matching dataset column. They are computed once per upload and shipped
//! to the frontend, where they replace the static picker fallback role by
//! role.

use rayon::prelude::*;
use std::collections::{HashMap, HashSet};

/// Role-name to header-alias table. The left side must match the role
/// display names the frontend catalog lookup uses; columns without a role
/// counterpart (Region, Channel, Channel Head) are still extracted and
/// served, the picker simply never asks for them.
const CATALOG_COLUMNS: &[(&str, &[&str])] = &[
    ("OEM", &["oem", "oem name"]),
    ("Partner", &["partner", "partner name"]),
    ("Region", &["region"]),
    ("Vertical Account", &["vertical account", "vertical"]),
    ("Channel", &["channel"]),
    ("Business Head", &["business head"]),
    (
        "Regional Commercial Business Manager",
        &["business manager", "regional commercial business manager", "rcbm"],
    ),
    ("Group Business Manager", &["group business manager", "gbm"]),
    ("Channel Head", &["channel head"]),
    ("Group Channel Champ", &["group channel champ", "gcc"]),
    ("End Customer", &["end customer", "end customer name", "customer"]),
    ("Year", &["year", "financial year", "fy"]),
];

/// The semantic columns in extraction order, for callers that need a
/// deterministic walk over the catalogs.
pub fn catalog_columns() -> &'static [(&'static str, &'static [&'static str])] {
    CATALOG_COLUMNS
}

/// One uploaded sales dataset: the raw CSV grid plus the catalogs derived
/// from it. Rebuilt wholesale on every upload, never patched.
#[derive(Debug, Clone)]
pub struct Dataset {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
    pub catalogs: HashMap<String, Vec<String>>,
}

impl Dataset {
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        let catalogs = extract_catalogs(&headers, &rows);
        Self {
            headers,
            rows,
            catalogs,
        }
    }

    /// Index of the first column whose normalized header equals one of
    /// `aliases`; falls back to a contains match so headers like
    /// "OEM Name " still resolve.
    pub fn column_index(&self, aliases: &[&str]) -> Option<usize> {
        column_index(&self.headers, aliases)
    }
}

/// Scans every semantic column in parallel and collects its unique values
/// in first-appearance order. Columns missing from the dataset, or with no
/// non-empty values, are left out of the map entirely.
pub fn extract_catalogs(
    headers: &[String],
    rows: &[Vec<String>],
) -> HashMap<String, Vec<String>> {
    CATALOG_COLUMNS
        .par_iter()
        .filter_map(|(role_name, aliases)| {
            let idx = column_index(headers, aliases)?;
            let values = unique_column_values(rows, idx);
            if values.is_empty() {
                None
            } else {
                Some((role_name.to_string(), values))
            }
        })
        .collect()
}

pub fn column_index(headers: &[String], aliases: &[&str]) -> Option<usize> {
    let normalized: Vec<String> = headers.iter().map(|h| normalize_header(h)).collect();
    for alias in aliases {
        if let Some(idx) = normalized.iter().position(|h| h == alias) {
            return Some(idx);
        }
    }
    for alias in aliases {
        if let Some(idx) = normalized.iter().position(|h| h.contains(alias)) {
            return Some(idx);
        }
    }
    None
}

fn normalize_header(header: &str) -> String {
    header
        .to_lowercase()
        .replace('_', " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Trims a cell, strips one layer of surrounding quotes and replaces
/// non-breaking spaces.
pub fn normalize_cell(cell: &str) -> String {
    let s = cell.trim();
    let s = s
        .strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .or_else(|| s.strip_prefix('\'').and_then(|s| s.strip_suffix('\'')))
        .unwrap_or(s);
    s.replace('\u{00A0}', " ").trim().to_string()
}

fn unique_column_values(rows: &[Vec<String>], idx: usize) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut values = Vec::new();
    for row in rows {
        let Some(cell) = row.get(idx) else { continue };
        let value = normalize_cell(cell);
        if value.is_empty() || value == "-" {
            continue;
        }
        if seen.insert(value.clone()) {
            values.push(value);
        }
    }
    values
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Dataset {
        let headers = vec![
            "Region".to_string(),
            "OEM_Name".to_string(),
            "Partner".to_string(),
            "Business Head".to_string(),
            "Year".to_string(),
            "Revenue".to_string(),
        ];
        let rows = vec![
            row(&["South", "Cisco", "Redington", "Rajesh Kumar", "2023", "1200"]),
            row(&["North", "Veeam", "Tech Data", "Priya Sharma", "2024", "800"]),
            row(&["South", "Cisco", "Redington", "Rajesh Kumar", "2023", "450"]),
            row(&["West", " \"Fortinet\" ", "", "-", "2024", "975"]),
        ];
        Dataset::new(headers, rows)
    }

    fn row(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|c| c.to_string()).collect()
    }

    #[test]
    fn catalogs_keep_first_appearance_order_and_dedupe() {
        let ds = sample();
        assert_eq!(ds.catalogs["OEM"], vec!["Cisco", "Veeam", "Fortinet"]);
        assert_eq!(ds.catalogs["Region"], vec!["South", "North", "West"]);
        assert_eq!(ds.catalogs["Year"], vec!["2023", "2024"]);
    }

    #[test]
    fn blank_and_dash_cells_are_skipped() {
        let ds = sample();
        assert_eq!(ds.catalogs["Partner"], vec!["Redington", "Tech Data"]);
        assert_eq!(
            ds.catalogs["Business Head"],
            vec!["Rajesh Kumar", "Priya Sharma"]
        );
    }

    #[test]
    fn absent_columns_produce_no_catalog() {
        let ds = sample();
        assert!(!ds.catalogs.contains_key("End Customer"));
        assert!(!ds.catalogs.contains_key("Group Channel Champ"));
    }

    #[test]
    fn header_matching_ignores_case_and_underscores() {
        let ds = sample();
        // "OEM_Name" resolves through the "oem name" alias.
        assert_eq!(ds.column_index(&["oem", "oem name"]), Some(1));
        assert_eq!(ds.column_index(&["revenue"]), Some(5));
        assert_eq!(ds.column_index(&["margin"]), None);
    }

    #[test]
    fn cell_normalization_strips_quotes_and_nbsp() {
        assert_eq!(normalize_cell("  \"Fortinet\"  "), "Fortinet");
        assert_eq!(normalize_cell("'South'"), "South");
        assert_eq!(normalize_cell("a\u{00A0}b"), "a b");
    }
}
