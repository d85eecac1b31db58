//! Range resolver
//!
//! The single lookup primitive behind every code fragment: given a
//! reference table, categorical filters and a numeric measurement, pick
//! the best-matching row and return its code. Pure function over the
//! catalog context; all failure modes are typed outcomes.

use crate::context::{CatalogContext, TableId};
use crate::error::{Result, SelectionError};
use crate::types::ReferenceRow;
use std::cmp::Ordering;
use tracing::debug;

/// Resolve a code fragment from a reference table.
///
/// Selection steps:
/// 1. the table must exist ([`SelectionError::TableMissing`] otherwise);
/// 2. rows are narrowed to those whose `filter_keys` match every supplied
///    filter exactly;
/// 3. of those, rows whose interval contains `measurement` (both bounds
///    inclusive) are candidates;
/// 4. no candidate -> [`SelectionError::NoMatch`];
/// 5. several candidates -> narrowest span wins; equal spans break ties by
///    lower bound ascending, then return code ascending, so the outcome
///    never depends on row load order;
/// 6. the winning code is zero-padded to the table's `code_width` when the
///    table declares one.
pub fn resolve(
    ctx: &CatalogContext,
    table_id: TableId,
    filters: &[(&str, &str)],
    measurement: f64,
) -> Result<String> {
    let table = ctx.table(table_id)?;

    let selected = table
        .rows
        .iter()
        .filter(|row| row.matches_filters(filters) && row.contains(measurement))
        .min_by(|a, b| candidate_order(a, b));

    match selected {
        Some(row) => {
            debug!(
                table = %table_id,
                measurement,
                code = %row.return_code,
                "range resolved"
            );
            Ok(render_code(&row.return_code, table.code_width))
        },
        None => Err(SelectionError::no_match(table_id.to_string(), measurement)),
    }
}

/// Tie-break ordering for candidate rows: span, then lower bound, then code
fn candidate_order(a: &ReferenceRow, b: &ReferenceRow) -> Ordering {
    a.span()
        .partial_cmp(&b.span())
        .unwrap_or(Ordering::Equal)
        .then_with(|| {
            a.lower_bound
                .partial_cmp(&b.lower_bound)
                .unwrap_or(Ordering::Equal)
        })
        .then_with(|| a.return_code.cmp(&b.return_code))
}

/// Apply the table's fixed-width zero-padding contract to a numeric code.
/// Non-numeric codes (letter-bearing range codes) are passed through as-is.
fn render_code(code: &str, width: Option<usize>) -> String {
    match (width, code.trim().parse::<u64>()) {
        (Some(width), Ok(numeric)) => format!("{:0width$}", numeric, width = width),
        _ => code.trim().to_string(),
    }
}
