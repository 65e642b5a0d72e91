//! Monthly revenue balance: completed service orders plus sales.
//!
//! Records are opaque mappings, so the well-known fields are read
//! leniently: numbers may arrive as JSON numbers or numeric strings, and a
//! record without `month`/`year` counts toward the queried period.

use serde::Serialize;
use serde_json::Value;

use oficina_store::{Document, Record};

const FIELD_STATUS: &str = "status";
const FIELD_REPAIR_COST: &str = "repairCost";
const FIELD_AMOUNT: &str = "amount";
const FIELD_MONTH: &str = "month";
const FIELD_YEAR: &str = "year";

const STATUS_COMPLETED: &str = "completed";

/// Revenue totals for one month of one user's document.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlySummary {
    pub month: u32,
    pub year: i32,
    pub orders_total: f64,
    pub sales_total: f64,
    pub total: f64,
}

/// Compute the summary for `month`/`year`.
///
/// Orders contribute their `repairCost` only when `status` is
/// `"completed"`; sales always contribute their `amount`. Both are
/// filtered to the queried period.
pub fn monthly_summary(document: &Document, month: u32, year: i32) -> MonthlySummary {
    let orders_total: f64 = document
        .orders
        .iter()
        .filter(|r| in_period(r, month, year))
        .filter(|r| field_str(r, FIELD_STATUS) == Some(STATUS_COMPLETED))
        .map(|r| field_number(r, FIELD_REPAIR_COST))
        .sum();

    let sales_total: f64 = document
        .sales
        .iter()
        .filter(|r| in_period(r, month, year))
        .map(|r| field_number(r, FIELD_AMOUNT))
        .sum();

    MonthlySummary {
        month,
        year,
        orders_total,
        sales_total,
        total: orders_total + sales_total,
    }
}

fn field_str<'a>(record: &'a Record, field: &str) -> Option<&'a str> {
    record.get(field).and_then(Value::as_str)
}

/// Numeric field, accepting numbers and numeric strings; anything else
/// contributes zero.
fn field_number(record: &Record, field: &str) -> f64 {
    match record.get(field) {
        Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0),
        Some(Value::String(s)) => s.trim().parse().unwrap_or(0.0),
        _ => 0.0,
    }
}

/// Integer field with the same leniency as [`field_number`].
fn field_int(record: &Record, field: &str) -> Option<i64> {
    match record.get(field) {
        Some(Value::Number(n)) => n.as_i64(),
        Some(Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    }
}

fn in_period(record: &Record, month: u32, year: i32) -> bool {
    let record_month = field_int(record, FIELD_MONTH).unwrap_or(month as i64);
    let record_year = field_int(record, FIELD_YEAR).unwrap_or(year as i64);
    record_month == month as i64 && record_year == year as i64
}
