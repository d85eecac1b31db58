//! Voltage class normalization
//!
//! Cable datasheets label the same electrical class with different
//! historical voltage ratings (nominal vs. full-insulation level, "24 kV"
//! vs. "25 kV", "20 kV" vs. "25 kV"). The normalizer collapses these onto
//! the termination table's canonical classes via ordered substring rules.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Canonical voltage class
///
/// The set is closed for a given deployment. Labels that match no rule are
/// carried through as [`VoltageClass::Unclassified`] and can never equal a
/// canonical class, which downstream consumers treat as "no match possible".
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VoltageClass {
    #[serde(rename = "15 kV")]
    Kv15,
    #[serde(rename = "25 kV")]
    Kv25,
    #[serde(rename = "35 kV")]
    Kv35,
    #[serde(untagged)]
    Unclassified(String),
}

impl VoltageClass {
    /// Normalize a raw voltage label onto a canonical class.
    ///
    /// Rules are substring containment, evaluated in this exact priority
    /// order (order-sensitive and lossy; "15/25 kV" resolves to 15 kV
    /// because rule 1 fires first):
    /// 1. contains "15" -> 15 kV
    /// 2. contains "25", "24" or "20" -> 25 kV
    /// 3. contains "35" -> 35 kV
    /// 4. otherwise -> unclassified passthrough
    pub fn normalize(raw: &str) -> Self {
        if raw.contains("15") {
            VoltageClass::Kv15
        } else if raw.contains("25") || raw.contains("24") || raw.contains("20") {
            VoltageClass::Kv25
        } else if raw.contains("35") {
            VoltageClass::Kv35
        } else {
            VoltageClass::Unclassified(raw.to_string())
        }
    }

    /// Whether the class is one of the canonical deployment classes
    pub fn is_canonical(&self) -> bool {
        !matches!(self, VoltageClass::Unclassified(_))
    }

    /// Nominal rating in kV for canonical classes
    pub fn rating_kv(&self) -> Option<u16> {
        match self {
            VoltageClass::Kv15 => Some(15),
            VoltageClass::Kv25 => Some(25),
            VoltageClass::Kv35 => Some(35),
            VoltageClass::Unclassified(_) => None,
        }
    }
}

impl fmt::Display for VoltageClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VoltageClass::Kv15 => write!(f, "15 kV"),
            VoltageClass::Kv25 => write!(f, "25 kV"),
            VoltageClass::Kv35 => write!(f, "35 kV"),
            VoltageClass::Unclassified(raw) => write!(f, "{}", raw),
        }
    }
}
