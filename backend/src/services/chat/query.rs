//! Answers chat queries from the in-memory dataset.
//!
//! The responder is keyword-driven and covers the query families the
//! suggestion panel advertises: totals, transaction counts, top-N
//! breakdowns by an entity column, year-over-year comparison, and
//! "regional performance for X" filters. Tabular answers are returned as
//! embedded HTML `<table>` markup inside the response string; the frontend
//! renders that markup as-is. Unrecognized queries always get a help
//! answer, never an error.

use actix_web::{web, HttpResponse, Responder};
use common::model::chat::QueryResponse;
use common::requests::QueryRequest;
use common::tokens::segment;
use num_format::{Locale, ToFormattedString};
use std::collections::HashMap;

use crate::config;
use crate::job_controller::state::DatasetState;
use crate::services::dataset::extract::{catalog_columns, normalize_cell, Dataset};

const REVENUE_ALIASES: &[&str] = &["revenue", "amount", "sales value", "net value", "value"];
const MARGIN_ALIASES: &[&str] = &["margin", "gross margin", "gm"];

/// Groupable entity columns: query keyword, table label, header aliases.
const GROUPS: &[(&str, &str, &[&str])] = &[
    ("region", "Region", &["region"]),
    ("partner", "Partner", &["partner", "partner name"]),
    ("oem", "OEM", &["oem", "oem name"]),
    ("vertical", "Vertical", &["vertical account", "vertical"]),
    ("customer", "End Customer", &["end customer", "end customer name", "customer"]),
    ("business head", "Business Head", &["business head"]),
];

/// Handler for `POST /api/chat/query`.
///
/// - `400` when the query is blank or no dataset has been uploaded yet.
/// - `200` with a `QueryResponse` otherwise.
pub(crate) async fn process(
    state: web::Data<DatasetState>,
    payload: web::Json<QueryRequest>,
) -> impl Responder {
    let query = payload.query.trim().to_string();
    if query.is_empty() {
        return HttpResponse::BadRequest()
            .json(serde_json::json!({ "error": "No query provided" }));
    }

    let guard = state.dataset.read().await;
    match guard.as_ref() {
        None => HttpResponse::BadRequest().json(serde_json::json!({
            "error": "No data loaded. Please upload a file first."
        })),
        Some(ds) => HttpResponse::Ok().json(QueryResponse {
            response: answer_query(ds, &query),
        }),
    }
}

/// Pure responder core, kept free of HTTP types so it can be exercised
/// directly in tests.
pub fn answer_query(ds: &Dataset, query: &str) -> String {
    let q = query.to_lowercase();

    // Placeholders the user never filled in are a usage error, answered in
    // prose instead of being aggregated over literally.
    let pending: Vec<String> = segment::parse(query)
        .iter()
        .filter(|s| s.is_token())
        .map(|s| s.raw.clone())
        .collect();
    if !pending.is_empty() {
        return format!(
            "Your query still contains the placeholder(s) {}. Pick a value for each token before sending.",
            pending.join(", ")
        );
    }

    if q.contains("how many transactions") || q.contains("transaction count") {
        return format!(
            "The dataset holds {} transactions across {} columns.",
            ds.rows.len().to_formatted_string(&Locale::en),
            ds.headers.len()
        );
    }

    if q.contains("total revenue") {
        return total_metric(ds, REVENUE_ALIASES, "revenue");
    }
    if q.contains("total margin") {
        return total_metric(ds, MARGIN_ALIASES, "margin");
    }

    if q.contains("year over year") || q.contains("between years") || q.contains("revenue growth")
    {
        return year_comparison(ds);
    }

    if q.contains("regional performance") {
        return regional_performance(ds, &q);
    }

    if q.contains("top") {
        if let Some(answer) = top_breakdown(ds, &q) {
            return answer;
        }
    }

    help_text()
}

fn total_metric(ds: &Dataset, aliases: &[&str], label: &str) -> String {
    match metric_column(ds, aliases) {
        Some(idx) => {
            let total: f64 = ds
                .rows
                .iter()
                .filter_map(|row| row.get(idx))
                .filter_map(|cell| parse_amount(cell))
                .sum();
            format!("Total {} is {}.", label, format_amount(total))
        }
        None => format!("The dataset has no {} column.", label),
    }
}

fn year_comparison(ds: &Dataset) -> String {
    let Some(year_idx) = ds.column_index(&["year", "financial year", "fy"]) else {
        return "The dataset has no year column, so I cannot compare years.".to_string();
    };
    let Some(value_idx) = metric_column(ds, REVENUE_ALIASES) else {
        return "The dataset has no revenue column, so I cannot compare years.".to_string();
    };

    let mut totals = sum_by(ds, year_idx, value_idx);
    totals.sort_by(|a, b| a.0.cmp(&b.0));
    let rows: Vec<Vec<String>> = totals
        .into_iter()
        .map(|(year, total)| vec![year, format_amount(total)])
        .collect();
    render_table("Revenue by year", &["Year", "Revenue"], rows)
}

/// "Show regional performance for Cisco" — match any known catalog value
/// inside the query, filter the rows to it, then break revenue down by
/// region.
fn regional_performance(ds: &Dataset, q: &str) -> String {
    let Some(region_idx) = ds.column_index(&["region"]) else {
        return "The dataset has no region column.".to_string();
    };
    let Some(value_idx) = metric_column(ds, REVENUE_ALIASES) else {
        return "The dataset has no revenue column.".to_string();
    };

    for (role_name, aliases) in catalog_columns() {
        let Some(values) = ds.catalogs.get(*role_name) else {
            continue;
        };
        let Some(entity) = values.iter().find(|v| q.contains(&v.to_lowercase())) else {
            continue;
        };
        let Some(entity_idx) = ds.column_index(aliases) else {
            continue;
        };

        let mut totals: Vec<(String, f64)> = Vec::new();
        let mut order: HashMap<String, usize> = HashMap::new();
        for row in &ds.rows {
            let matches = row
                .get(entity_idx)
                .map(|cell| normalize_cell(cell).eq_ignore_ascii_case(entity))
                .unwrap_or(false);
            if !matches {
                continue;
            }
            let region = row.get(region_idx).map(|c| normalize_cell(c)).unwrap_or_default();
            if region.is_empty() {
                continue;
            }
            let amount = row.get(value_idx).and_then(|c| parse_amount(c)).unwrap_or(0.0);
            match order.get(&region) {
                Some(&i) => totals[i].1 += amount,
                None => {
                    order.insert(region.clone(), totals.len());
                    totals.push((region, amount));
                }
            }
        }

        if totals.is_empty() {
            return format!("No rows found for {} ({}).", entity, role_name);
        }
        totals.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
        let rows: Vec<Vec<String>> = totals
            .into_iter()
            .map(|(region, total)| vec![region, format_amount(total)])
            .collect();
        return render_table(
            &format!("Regional performance for {}", entity),
            &["Region", "Revenue"],
            rows,
        );
    }

    "Tell me which partner, OEM, vertical or customer you mean, e.g. \
     \"Show regional performance for [Partner]\" and pick a value."
        .to_string()
}

fn top_breakdown(ds: &Dataset, q: &str) -> Option<String> {
    let &(_, label, aliases) = GROUPS.iter().find(|group| q.contains(group.0))?;
    let group_idx = ds.column_index(aliases)?;

    let (metric_aliases, metric_label) = if q.contains("margin") {
        (MARGIN_ALIASES, "Margin")
    } else {
        (REVENUE_ALIASES, "Revenue")
    };
    let value_idx = metric_column(ds, metric_aliases)?;

    let mut totals = sum_by(ds, group_idx, value_idx);
    totals.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
    totals.truncate(config::TOP_N);

    let rows: Vec<Vec<String>> = totals
        .into_iter()
        .map(|(name, total)| vec![name, format_amount(total)])
        .collect();
    Some(render_table(
        &format!("Top {}s by {}", label.to_lowercase(), metric_label.to_lowercase()),
        &[label, metric_label],
        rows,
    ))
}

fn help_text() -> String {
    "I can answer questions like \"What's the total revenue?\", \
     \"Show top partners by revenue\", \"Show top OEMs by margin\", \
     \"Compare sales between years\" or \"Show regional performance for\" \
     a partner, OEM, vertical or customer."
        .to_string()
}

fn metric_column(ds: &Dataset, aliases: &[&str]) -> Option<usize> {
    ds.column_index(aliases)
}

/// Groups `value_idx` sums by the values of `group_idx`, preserving
/// first-appearance order.
fn sum_by(ds: &Dataset, group_idx: usize, value_idx: usize) -> Vec<(String, f64)> {
    let mut totals: Vec<(String, f64)> = Vec::new();
    let mut order: HashMap<String, usize> = HashMap::new();
    for row in &ds.rows {
        let key = row.get(group_idx).map(|c| normalize_cell(c)).unwrap_or_default();
        if key.is_empty() || key == "-" {
            continue;
        }
        let amount = row.get(value_idx).and_then(|c| parse_amount(c)).unwrap_or(0.0);
        match order.get(&key) {
            Some(&i) => totals[i].1 += amount,
            None => {
                order.insert(key.clone(), totals.len());
                totals.push((key, amount));
            }
        }
    }
    totals
}

/// Parses a currency-ish cell: strips symbols, separators and whitespace.
fn parse_amount(cell: &str) -> Option<f64> {
    let cleaned: String = cell
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
        .collect();
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse::<f64>().ok()
}

/// Thousands-separated amount with two decimals.
fn format_amount(v: f64) -> String {
    let cents = (v * 100.0).round() as i64;
    let whole = cents / 100;
    let frac = (cents % 100).abs();
    format!("{}.{:02}", whole.to_formatted_string(&Locale::en), frac)
}

fn render_table(title: &str, headers: &[&str], rows: Vec<Vec<String>>) -> String {
    let mut html = String::new();
    html.push_str(&format!("{}:<table><thead><tr>", title));
    for header in headers {
        html.push_str(&format!("<th>{}</th>", header));
    }
    html.push_str("</tr></thead><tbody>");
    for row in rows {
        html.push_str("<tr>");
        for cell in row {
            html.push_str(&format!("<td>{}</td>", escape_html(&cell)));
        }
        html.push_str("</tr>");
    }
    html.push_str("</tbody></table>");
    html
}

/// Escapes cell content so dataset values cannot inject markup into the
/// rendered table.
fn escape_html(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Dataset {
        let headers = ["Region", "OEM", "Partner", "Year", "Revenue", "Margin"]
            .iter()
            .map(|h| h.to_string())
            .collect();
        let rows = vec![
            row(&["South", "Cisco", "Redington", "2023", "1,200", "120"]),
            row(&["North", "Veeam", "Tech Data", "2023", "800", "90"]),
            row(&["South", "Cisco", "Redington", "2024", "450", "40"]),
            row(&["West", "Fortinet", "Savex", "2024", "975", "200"]),
        ];
        Dataset::new(headers, rows)
    }

    fn row(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|c| c.to_string()).collect()
    }

    #[test]
    fn total_revenue_sums_every_row() {
        let answer = answer_query(&sample(), "What's the total revenue?");
        assert_eq!(answer, "Total revenue is 3,425.00.");
    }

    #[test]
    fn transaction_count_reports_rows_and_columns() {
        let answer = answer_query(&sample(), "How many transactions do we have?");
        assert!(answer.contains("4 transactions"));
        assert!(answer.contains("6 columns"));
    }

    #[test]
    fn top_oems_renders_a_ranked_table() {
        let answer = answer_query(&sample(), "Show top OEMs by revenue");
        assert!(answer.contains("<table>"));
        // Cisco 1650 outranks Fortinet 975 outranks Veeam 800.
        let cisco = answer.find("Cisco").unwrap();
        let fortinet = answer.find("Fortinet").unwrap();
        let veeam = answer.find("Veeam").unwrap();
        assert!(cisco < fortinet && fortinet < veeam);
        assert!(answer.contains("1,650.00"));
    }

    #[test]
    fn top_breakdown_can_use_margin() {
        let answer = answer_query(&sample(), "Show top OEMs by margin");
        let fortinet = answer.find("Fortinet").unwrap();
        let cisco = answer.find("Cisco").unwrap();
        assert!(fortinet < cisco, "margin ranking differs from revenue");
    }

    #[test]
    fn year_comparison_lists_each_year_once() {
        let answer = answer_query(&sample(), "Compare sales between years");
        assert!(answer.contains("2023"));
        assert!(answer.contains("2024"));
        assert!(answer.contains("2,000.00"));
        assert!(answer.contains("1,425.00"));
    }

    #[test]
    fn regional_performance_filters_by_entity() {
        let answer = answer_query(&sample(), "Show regional performance for Cisco");
        assert!(answer.contains("Regional performance for Cisco"));
        assert!(answer.contains("South"));
        assert!(answer.contains("1,650.00"));
        assert!(!answer.contains("North"));
    }

    #[test]
    fn unresolved_placeholders_get_a_usage_answer() {
        let answer = answer_query(&sample(), "Show regional performance for [Partner]");
        assert!(answer.contains("[Partner]"));
        assert!(answer.contains("placeholder"));
        assert!(!answer.contains("<table>"));
    }

    #[test]
    fn unknown_queries_fall_back_to_help() {
        let answer = answer_query(&sample(), "sing me a song");
        assert!(answer.contains("total revenue"));
    }

    #[test]
    fn amount_parsing_handles_currency_noise() {
        assert_eq!(parse_amount("$1,234.50"), Some(1234.50));
        assert_eq!(parse_amount(" 800 "), Some(800.0));
        assert_eq!(parse_amount("n/a"), None);
        assert_eq!(parse_amount("-42"), Some(-42.0));
    }

    #[test]
    fn amounts_format_with_separators() {
        assert_eq!(format_amount(1650.0), "1,650.00");
        assert_eq!(format_amount(0.5), "0.50");
        assert_eq!(format_amount(1234567.891), "1,234,567.89");
    }
}
