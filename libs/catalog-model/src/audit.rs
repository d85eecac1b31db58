//! Coverage auditor
//!
//! Cross-checks the full cable database against the termination tables by
//! replaying the configurator's selection behavior: one termination is
//! chosen per (voltage, cross-section) group from the group's median OD,
//! then every individual cable is re-checked against that termination's
//! exact window. Cables whose construction falls outside the chosen
//! window are exactly the defect class this audit exists to surface.

use crate::types::{AuditFinding, CableRecord, FailureReason, TerminationRecord};
use crate::voltage::VoltageClass;
use std::cmp::Ordering;
use std::collections::BTreeMap;
use tracing::debug;

/// Result of a coverage audit
#[derive(Debug, Clone)]
pub struct AuditReport {
    /// One entry per uncovered cable, in deterministic group order
    pub findings: Vec<AuditFinding>,

    /// Total cables in the database
    pub total: usize,

    /// Cables whose OD fits the termination selected for their group
    pub covered: usize,
}

impl AuditReport {
    /// Coverage percentage with vacuous 100% for an empty database
    /// (documented policy: no cables means nothing is uncovered)
    pub fn coverage_rate(&self) -> f64 {
        if self.total == 0 {
            100.0
        } else {
            self.covered as f64 / self.total as f64 * 100.0
        }
    }

    pub fn uncovered(&self) -> usize {
        self.findings.len()
    }
}

/// Grouping key: voltage label plus cross-section in hundredths of mm2,
/// so f64 sections order totally and group deterministically
type GroupKey = (String, i64);

fn group_key(cable: &CableRecord) -> GroupKey {
    (
        cable.voltage_class.clone(),
        (cable.cross_section_mm2 * 100.0).round() as i64,
    )
}

/// Audit every cable in the database against the termination tables.
///
/// Two-pass per group: the median OD picks the representative termination
/// (narrowest window on ties, as the resolver would), then each cable is
/// checked against that termination's exact window. A group with no
/// matching termination contributes one `NoTerminationFound` finding per
/// cable instead of aborting the run.
pub fn audit(cables: &[CableRecord], terminations: &[TerminationRecord]) -> AuditReport {
    let mut groups: BTreeMap<GroupKey, Vec<&CableRecord>> = BTreeMap::new();
    for cable in cables {
        groups.entry(group_key(cable)).or_default().push(cable);
    }

    let mut findings = Vec::new();

    for ((voltage_label, _), group) in &groups {
        let diameters: Vec<f64> = group.iter().map(|c| c.outer_diameter_mm).collect();
        let od_median = median(&diameters);
        let normalized = VoltageClass::normalize(voltage_label);

        let selected = terminations
            .iter()
            .filter(|t| VoltageClass::normalize(&t.voltage_class) == normalized)
            .filter(|t| t.accepts(od_median))
            .min_by(|a, b| termination_order(a, b));

        match selected {
            None => {
                debug!(
                    voltage = %voltage_label,
                    od_median,
                    cables = group.len(),
                    "no termination window contains group median"
                );
                for cable in group {
                    findings.push(finding(cable, FailureReason::NoTerminationFound));
                }
            },
            Some(termination) => {
                for cable in group {
                    if cable.outer_diameter_mm < termination.od_min_mm {
                        findings.push(finding(cable, FailureReason::TooThin));
                    } else if cable.outer_diameter_mm > termination.od_max_mm {
                        findings.push(finding(cable, FailureReason::TooThick));
                    }
                }
            },
        }
    }

    let total = cables.len();
    let covered = total - findings.len();
    AuditReport {
        findings,
        total,
        covered,
    }
}

/// Tie-break ordering for candidate terminations: window span, then lower
/// edge, then part number (mirrors the resolver's determinism rule)
fn termination_order(a: &TerminationRecord, b: &TerminationRecord) -> Ordering {
    a.span()
        .partial_cmp(&b.span())
        .unwrap_or(Ordering::Equal)
        .then_with(|| {
            a.od_min_mm
                .partial_cmp(&b.od_min_mm)
                .unwrap_or(Ordering::Equal)
        })
        .then_with(|| a.part_number.cmp(&b.part_number))
}

fn finding(cable: &CableRecord, reason: FailureReason) -> AuditFinding {
    AuditFinding {
        voltage_class: cable.voltage_class.clone(),
        cross_section_mm2: cable.cross_section_mm2,
        brand: cable.brand.clone(),
        cable_name: cable.cable_name.clone(),
        reason,
    }
}

/// Median of a non-empty slice; chosen over the mean to resist outlier
/// cable constructions within one nominal size
fn median(values: &[f64]) -> f64 {
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cable(voltage: &str, section: f64, name: &str, od: f64) -> CableRecord {
        CableRecord {
            voltage_class: voltage.to_string(),
            cross_section_mm2: section,
            brand: "Acme".to_string(),
            cable_name: name.to_string(),
            outer_diameter_mm: od,
        }
    }

    fn termination(voltage: &str, part: &str, min: f64, max: f64) -> TerminationRecord {
        TerminationRecord {
            voltage_class: voltage.to_string(),
            part_number: part.to_string(),
            od_min_mm: min,
            od_max_mm: max,
        }
    }

    #[test]
    fn test_median_odd_and_even() {
        assert_eq!(median(&[18.0, 25.0, 19.5]), 19.5);
        assert_eq!(median(&[18.0, 19.0, 20.0, 25.0]), 19.5);
    }

    #[test]
    fn test_median_picks_part_then_each_cable_is_rechecked() {
        // Median 19.5 sits inside the window, but the 25.0 mm construction
        // at the same nominal size does not
        let cables = vec![
            cable("25 kV", 95.0, "XLPE-A", 18.0),
            cable("25 kV", 95.0, "XLPE-B", 19.5),
            cable("25 kV", 95.0, "XLPE-C", 25.0),
        ];
        let terminations = vec![termination("25 kV", "CSTO-25", 17.0, 20.0)];

        let report = audit(&cables, &terminations);
        assert_eq!(report.total, 3);
        assert_eq!(report.covered, 2);
        assert_eq!(report.findings.len(), 1);
        assert_eq!(report.findings[0].cable_name, "XLPE-C");
        assert_eq!(report.findings[0].reason, FailureReason::TooThick);
        assert!((report.coverage_rate() - 66.67).abs() < 0.01);
    }

    #[test]
    fn test_too_thin_reason() {
        let cables = vec![
            cable("25 kV", 95.0, "A", 14.0),
            cable("25 kV", 95.0, "B", 18.0),
            cable("25 kV", 95.0, "C", 18.5),
        ];
        let terminations = vec![termination("25 kV", "CSTO-25", 17.0, 20.0)];

        let report = audit(&cables, &terminations);
        assert_eq!(report.findings.len(), 1);
        assert_eq!(report.findings[0].reason, FailureReason::TooThin);
    }

    #[test]
    fn test_group_without_termination_fails_whole_group() {
        let cables = vec![
            cable("35 kV", 150.0, "A", 28.0),
            cable("35 kV", 150.0, "B", 29.0),
        ];
        // Only 25 kV windows available
        let terminations = vec![termination("25 kV", "CSTO-25", 17.0, 20.0)];

        let report = audit(&cables, &terminations);
        assert_eq!(report.total, 2);
        assert_eq!(report.covered, 0);
        assert!(report
            .findings
            .iter()
            .all(|f| f.reason == FailureReason::NoTerminationFound));
        assert_eq!(report.coverage_rate(), 0.0);
    }

    #[test]
    fn test_voltage_labels_normalize_before_matching() {
        // "24 kV" datasheet label matches a "25 kV" termination
        let cables = vec![cable("24 kV", 95.0, "A", 18.0)];
        let terminations = vec![termination("25 kV", "CSTO-25", 17.0, 20.0)];

        let report = audit(&cables, &terminations);
        assert_eq!(report.covered, 1);
        assert!(report.findings.is_empty());
    }

    #[test]
    fn test_narrowest_window_is_selected() {
        // Both windows contain the median; the tight one governs, so the
        // 21.5 mm cable is out of tolerance
        let cables = vec![
            cable("25 kV", 95.0, "A", 18.0),
            cable("25 kV", 95.0, "B", 19.0),
            cable("25 kV", 95.0, "C", 21.5),
        ];
        let terminations = vec![
            termination("25 kV", "CSTO-WIDE", 15.0, 25.0),
            termination("25 kV", "CSTO-TIGHT", 17.0, 20.0),
        ];

        let report = audit(&cables, &terminations);
        assert_eq!(report.findings.len(), 1);
        assert_eq!(report.findings[0].cable_name, "C");
        assert_eq!(report.findings[0].reason, FailureReason::TooThick);
    }

    #[test]
    fn test_empty_database_policy() {
        let report = audit(&[], &[termination("25 kV", "CSTO-25", 17.0, 20.0)]);
        assert_eq!(report.total, 0);
        assert_eq!(report.covered, 0);
        assert!(report.findings.is_empty());
        assert_eq!(report.coverage_rate(), 100.0);
    }

    #[test]
    fn test_groups_with_mixed_outcomes_aggregate() {
        let cables = vec![
            cable("15 kV", 50.0, "A", 16.0),  // covered
            cable("15 kV", 50.0, "B", 16.5),  // covered
            cable("25 kV", 95.0, "C", 30.0),  // no termination for median
            cable("35 kV", 150.0, "D", 28.0), // no 35 kV termination at all
        ];
        let terminations = vec![
            termination("15 kV", "CSTO-15", 15.0, 18.0),
            termination("25 kV", "CSTO-25", 17.0, 20.0),
        ];

        let report = audit(&cables, &terminations);
        assert_eq!(report.total, 4);
        assert_eq!(report.covered, 2);
        assert_eq!(report.uncovered(), 2);
        assert_eq!(report.coverage_rate(), 50.0);
    }
}
