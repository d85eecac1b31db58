//! Catalog Model Library
//!
//! Core selection and audit logic for the cable-accessory catalog.
//! This library provides pure business logic without I/O dependencies.
//!
//! # Modules
//!
//! - `voltage`: voltage class normalization (substring-priority classifier)
//! - `resolver`: generic range-table lookup with narrowest-span tie-breaking
//! - `assembler`: part-number assembly from tagged code fragments
//! - `families`: per-product-family assembly recipes over the resolver
//! - `audit`: cable-database coverage audit against termination windows
//! - `context`: immutable catalog data context, passed explicitly
//!
//! # Example
//!
//! ```
//! use catalog_model::{resolve, CatalogContext, CurrentClass, ReferenceRow, ReferenceTable, TableId};
//! use std::collections::HashMap;
//!
//! let mut ctx = CatalogContext::new();
//! ctx.insert_table(
//!     TableId::CableRange { voltage_kv: 25, current: CurrentClass::A200 },
//!     ReferenceTable::new(vec![ReferenceRow {
//!         lower_bound: 15.0,
//!         upper_bound: 20.0,
//!         return_code: "2".to_string(),
//!         filter_keys: HashMap::new(),
//!     }]),
//! );
//!
//! let code = resolve(
//!     &ctx,
//!     TableId::CableRange { voltage_kv: 25, current: CurrentClass::A200 },
//!     &[],
//!     18.3,
//! ).unwrap();
//! assert_eq!(code, "2");
//! ```

pub mod assembler;
pub mod audit;
pub mod context;
pub mod error;
pub mod families;
pub mod resolver;
pub mod types;
pub mod voltage;

// Re-exports for convenience
pub use assembler::{assemble, Fragment, JoinStyle};
pub use audit::{audit, AuditReport};
pub use context::{CatalogContext, CurrentClass, TableId};
pub use error::{Result, SelectionError};
pub use families::{
    build_elbow200, build_tbody600, AmpRating, BuildFailure, ConductorSpec, Elbow200Selection,
    ElbowMaterial, LugChoice, LugMaterial, TBody600Selection,
};
pub use resolver::resolve;
pub use types::{
    AuditFinding, CableRecord, FailureReason, ProductBase, ProductFamily, ReferenceRow,
    ReferenceTable, TerminationRecord,
};
pub use voltage::VoltageClass;
