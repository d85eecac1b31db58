//! Catalog type definitions
//!
//! Core types shared by the resolver and the coverage auditor:
//! - ReferenceRow / ReferenceTable: range-to-code reference data
//! - CableRecord: one physical cable SKU in the audit database
//! - TerminationRecord: one termination option with its OD window
//! - AuditFinding / FailureReason: audit output
//! - ProductBase / ProductFamily: configurable base products

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

// ============================================================================
// Reference Data
// ============================================================================

/// One entry in a range table: a measurement interval mapped to a catalog code
///
/// Bounds are inclusive on both ends and share the unit of the query the
/// table answers (mm for diameter tables, mm2 for cross-section tables).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReferenceRow {
    /// Lower bound of the interval (inclusive)
    pub lower_bound: f64,

    /// Upper bound of the interval (inclusive), `>= lower_bound`
    pub upper_bound: f64,

    /// Catalog code fragment returned when this row is selected
    pub return_code: String,

    /// Categorical filters that must match exactly for the row to be a
    /// candidate (e.g. conductor type). Empty for pure range tables.
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub filter_keys: HashMap<String, String>,
}

impl ReferenceRow {
    /// Whether the measurement falls inside the row's interval,
    /// boundary values included
    pub fn contains(&self, measurement: f64) -> bool {
        self.lower_bound <= measurement && measurement <= self.upper_bound
    }

    /// Interval width, used for narrowest-span tie-breaking
    pub fn span(&self) -> f64 {
        self.upper_bound - self.lower_bound
    }

    /// Whether every supplied categorical filter matches this row exactly
    pub fn matches_filters(&self, filters: &[(&str, &str)]) -> bool {
        filters
            .iter()
            .all(|(key, value)| self.filter_keys.get(*key).map(String::as_str) == Some(*value))
    }
}

/// An ordered collection of [`ReferenceRow`] sharing one schema
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReferenceTable {
    /// Rows in load order (row order never affects selection results)
    pub rows: Vec<ReferenceRow>,

    /// Fixed display width for numeric codes from this table.
    /// Zero-padding is a presentation contract of the catalog: conductor
    /// codes print as 2 digits, compression-lug codes as 4.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code_width: Option<usize>,
}

impl ReferenceTable {
    pub fn new(rows: Vec<ReferenceRow>) -> Self {
        Self {
            rows,
            code_width: None,
        }
    }

    pub fn with_code_width(rows: Vec<ReferenceRow>, width: usize) -> Self {
        Self {
            rows,
            code_width: Some(width),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }
}

// ============================================================================
// Audit Database
// ============================================================================

/// One physical cable SKU in the audit database
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CableRecord {
    /// Voltage class as printed on the datasheet (not yet normalized)
    pub voltage_class: String,

    /// Conductor cross-section in mm2
    pub cross_section_mm2: f64,

    /// Manufacturer
    pub brand: String,

    /// Commercial cable name
    pub cable_name: String,

    /// Outer diameter over insulation in mm
    pub outer_diameter_mm: f64,
}

/// One termination/fitting option with its cable OD tolerance window
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TerminationRecord {
    /// Voltage class label; normalized before any comparison
    pub voltage_class: String,

    /// Catalog part number of the termination
    pub part_number: String,

    /// Minimum accepted cable OD in mm (inclusive)
    pub od_min_mm: f64,

    /// Maximum accepted cable OD in mm (inclusive)
    pub od_max_mm: f64,
}

impl TerminationRecord {
    /// OD window width, used for narrowest-span tie-breaking
    pub fn span(&self) -> f64 {
        self.od_max_mm - self.od_min_mm
    }

    /// Whether the OD falls inside the window, boundaries included
    pub fn accepts(&self, od_mm: f64) -> bool {
        self.od_min_mm <= od_mm && od_mm <= self.od_max_mm
    }
}

// ============================================================================
// Audit Output
// ============================================================================

/// Why a cable failed coverage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FailureReason {
    /// No termination window contains the group's median OD
    #[serde(rename = "No Termination Found")]
    NoTerminationFound,

    /// Cable OD below the selected termination's minimum
    #[serde(rename = "Too Thin")]
    TooThin,

    /// Cable OD above the selected termination's maximum
    #[serde(rename = "Too Thick")]
    TooThick,
}

impl fmt::Display for FailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            FailureReason::NoTerminationFound => "No Termination Found",
            FailureReason::TooThin => "Too Thin",
            FailureReason::TooThick => "Too Thick",
        };
        write!(f, "{}", label)
    }
}

/// One uncovered cable, as reported by the coverage auditor
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditFinding {
    pub voltage_class: String,
    pub cross_section_mm2: f64,
    pub brand: String,
    pub cable_name: String,
    pub reason: FailureReason,
}

// ============================================================================
// Base Products
// ============================================================================

/// Assembly recipe a base product follows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProductFamily {
    /// 200 A loadbreak elbow: test point + cable range + conductor + material
    #[serde(rename = "elbow_200a")]
    Elbow200A,

    /// 600 A deadbreak T-body: amp rating + cable range + lug
    #[serde(rename = "tbody_600a")]
    TBody600A,
}

/// One configurable base product from the product catalog
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductBase {
    /// Normative standard (e.g. "IEEE 386", "IEC")
    pub standard: String,

    /// Voltage class in kV
    pub voltage_class_kv: u16,

    /// Current class in A
    pub current_class_a: u16,

    /// Human-readable product name
    pub display_name: String,

    /// Leading code every part number for this product starts with
    pub base_code: String,

    /// Which assembly recipe applies
    pub family: ProductFamily,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_contains_is_inclusive() {
        let row = ReferenceRow {
            lower_bound: 15.0,
            upper_bound: 20.0,
            return_code: "2".to_string(),
            filter_keys: HashMap::new(),
        };
        assert!(row.contains(15.0));
        assert!(row.contains(20.0));
        assert!(row.contains(17.3));
        assert!(!row.contains(14.999));
        assert!(!row.contains(20.001));
        assert_eq!(row.span(), 5.0);
    }

    #[test]
    fn test_row_filter_matching() {
        let mut filter_keys = HashMap::new();
        filter_keys.insert("conductor_type".to_string(), "Copper".to_string());

        let row = ReferenceRow {
            lower_bound: 50.0,
            upper_bound: 50.0,
            return_code: "3".to_string(),
            filter_keys,
        };

        assert!(row.matches_filters(&[("conductor_type", "Copper")]));
        assert!(!row.matches_filters(&[("conductor_type", "Aluminum")]));
        // A filter key the row does not carry never matches
        assert!(!row.matches_filters(&[("material", "Copper")]));
        // No filters at all means any row qualifies
        assert!(row.matches_filters(&[]));
    }

    #[test]
    fn test_termination_window() {
        let term = TerminationRecord {
            voltage_class: "25 kV".to_string(),
            part_number: "CSTO-25-A".to_string(),
            od_min_mm: 17.0,
            od_max_mm: 20.0,
        };
        assert!(term.accepts(17.0));
        assert!(term.accepts(20.0));
        assert!(!term.accepts(20.1));
        assert_eq!(term.span(), 3.0);
    }

    #[test]
    fn test_failure_reason_labels() {
        assert_eq!(
            FailureReason::NoTerminationFound.to_string(),
            "No Termination Found"
        );
        assert_eq!(FailureReason::TooThin.to_string(), "Too Thin");
        assert_eq!(FailureReason::TooThick.to_string(), "Too Thick");
    }
}
