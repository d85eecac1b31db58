//! Catalog data context
//!
//! All reference data is loaded once per run into a [`CatalogContext`] and
//! passed explicitly to the resolver and auditor. Tables are addressed by a
//! typed composite key ([`TableId`]) so the one generic lookup serves every
//! product family; a table absent from the context is a distinct
//! [`SelectionError::TableMissing`] outcome, never an empty match.

use crate::error::{Result, SelectionError};
use crate::types::{CableRecord, ProductBase, ReferenceTable, TerminationRecord};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Current class a cable-range table applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CurrentClass {
    /// 200 A loadbreak products
    #[serde(rename = "200A")]
    A200,
    /// 600 A (and 900 A) deadbreak products
    #[serde(rename = "600A")]
    A600,
}

/// Composite key addressing one reference table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TableId {
    /// Cable-diameter range table for one voltage/current combination
    CableRange {
        voltage_kv: u16,
        current: CurrentClass,
    },

    /// Conductor code table for 200 A elbows (2-digit codes)
    Conductor200,

    /// Compression lug table for 600 A T-bodies (4-digit codes)
    CompressionLug600,

    /// Shear-bolt connector table (range over conductor mm2)
    ShearBolt,
}

impl fmt::Display for TableId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TableId::CableRange {
                voltage_kv,
                current: CurrentClass::A200,
            } => write!(f, "cable_range_{}kv", voltage_kv),
            TableId::CableRange {
                voltage_kv,
                current: CurrentClass::A600,
            } => write!(f, "cable_range_{}kv_600a", voltage_kv),
            TableId::Conductor200 => write!(f, "conductor_codes_200a"),
            TableId::CompressionLug600 => write!(f, "compression_lugs_600a"),
            TableId::ShearBolt => write!(f, "shear_bolt_lugs"),
        }
    }
}

/// Immutable, explicitly passed catalog data
///
/// Replaces the ambient cached table dictionary of earlier tooling: the
/// context is built once by the ingestion layer and only read afterwards.
#[derive(Debug, Clone, Default)]
pub struct CatalogContext {
    tables: HashMap<TableId, ReferenceTable>,

    /// Full cable database used by the coverage auditor
    pub cables: Vec<CableRecord>,

    /// Termination options with OD windows
    pub terminations: Vec<TerminationRecord>,

    /// Configurable base products
    pub products: Vec<ProductBase>,
}

impl CatalogContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a reference table under its composite key
    pub fn insert_table(&mut self, id: TableId, table: ReferenceTable) {
        self.tables.insert(id, table);
    }

    /// Look up a reference table, failing with the table's name if absent
    pub fn table(&self, id: TableId) -> Result<&ReferenceTable> {
        self.tables
            .get(&id)
            .ok_or_else(|| SelectionError::table_missing(id.to_string()))
    }

    pub fn has_table(&self, id: TableId) -> bool {
        self.tables.contains_key(&id)
    }

    /// Iterate over loaded tables (iteration order is unspecified)
    pub fn tables(&self) -> impl Iterator<Item = (&TableId, &ReferenceTable)> {
        self.tables.iter()
    }

    pub fn table_count(&self) -> usize {
        self.tables.len()
    }
}
