//! Integration tests for the selection laws the catalog logic guarantees
//!
//! Exercises the resolver, assembler and auditor together the way the
//! configurator and the audit driver use them.

#![allow(clippy::disallowed_methods)] // Test code - unwrap is acceptable

use catalog_model::{
    assemble, audit, resolve, CableRecord, CatalogContext, CurrentClass, FailureReason, Fragment,
    JoinStyle, ReferenceRow, ReferenceTable, SelectionError, TableId, TerminationRecord,
};
use std::collections::HashMap;

const RANGE_15KV: TableId = TableId::CableRange {
    voltage_kv: 15,
    current: CurrentClass::A200,
};

fn row(lower: f64, upper: f64, code: &str) -> ReferenceRow {
    ReferenceRow {
        lower_bound: lower,
        upper_bound: upper,
        return_code: code.to_string(),
        filter_keys: HashMap::new(),
    }
}

/// Inclusive boundary law: for every row, both bounds resolve to the
/// row's own code
#[test]
fn every_row_boundary_resolves_to_its_own_code() {
    let rows = vec![
        row(10.0, 14.9, "1"),
        row(15.0, 20.0, "2"),
        row(20.1, 26.0, "3"),
    ];
    let mut ctx = CatalogContext::new();
    ctx.insert_table(RANGE_15KV, ReferenceTable::new(rows.clone()));

    for reference in &rows {
        for bound in [reference.lower_bound, reference.upper_bound] {
            assert_eq!(
                resolve(&ctx, RANGE_15KV, &[], bound).unwrap(),
                reference.return_code,
                "bound {} should select code {}",
                bound,
                reference.return_code
            );
        }
    }
}

#[test]
fn measurements_between_disjoint_ranges_never_match() {
    let mut ctx = CatalogContext::new();
    ctx.insert_table(
        RANGE_15KV,
        ReferenceTable::new(vec![row(10.0, 14.0, "1"), row(16.0, 20.0, "2")]),
    );

    for gap in [14.5, 15.0, 15.9] {
        assert!(matches!(
            resolve(&ctx, RANGE_15KV, &[], gap),
            Err(SelectionError::NoMatch { .. })
        ));
    }
}

#[test]
fn overlapping_ranges_prefer_the_tightest_fit() {
    let mut ctx = CatalogContext::new();
    // r1 span 5, r2 span 2, both containing 17.0
    ctx.insert_table(
        RANGE_15KV,
        ReferenceTable::new(vec![row(14.0, 19.0, "r1"), row(16.0, 18.0, "r2")]),
    );
    assert_eq!(resolve(&ctx, RANGE_15KV, &[], 17.0).unwrap(), "r2");
}

#[test]
fn assembled_part_number_never_carries_error_markers() {
    let fragments = [
        Fragment::literal("T"),
        Fragment::Missing(SelectionError::no_match("conductor_codes_200a", 300.0)),
        Fragment::Code("03".to_string()),
    ];
    let part_number = assemble("15-LE200", &fragments, JoinStyle::Concat);
    assert_eq!(part_number, "15-LE200T03");
    assert!(!part_number.contains("N/A"));
    assert!(!part_number.contains("ERR"));
}

/// The spec.md §8 audit scenario: 3 cables at (25 kV, 95 mm2), one window
#[test]
fn audit_reports_the_outlier_construction_at_a_covered_nominal_size() {
    let cables: Vec<CableRecord> = [18.0, 19.5, 25.0]
        .iter()
        .enumerate()
        .map(|(idx, od)| CableRecord {
            voltage_class: "25 kV".to_string(),
            cross_section_mm2: 95.0,
            brand: "Acme".to_string(),
            cable_name: format!("XLPE-{}", idx),
            outer_diameter_mm: *od,
        })
        .collect();
    let terminations = vec![TerminationRecord {
        voltage_class: "25 kV".to_string(),
        part_number: "CSTO-25".to_string(),
        od_min_mm: 17.0,
        od_max_mm: 20.0,
    }];

    let report = audit(&cables, &terminations);

    assert_eq!(report.total, 3);
    assert_eq!(report.covered, 2);
    assert_eq!(report.findings.len(), 1);
    assert_eq!(report.findings[0].cable_name, "XLPE-2");
    assert_eq!(report.findings[0].reason, FailureReason::TooThick);
    assert_eq!(format!("{:.2}", report.coverage_rate()), "66.67");
}

#[test]
fn audit_of_empty_database_is_vacuously_covered() {
    let report = audit(&[], &[]);
    assert_eq!(report.total, 0);
    assert!(report.findings.is_empty());
    assert_eq!(report.coverage_rate(), 100.0);
}
