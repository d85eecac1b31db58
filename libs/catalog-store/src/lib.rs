//! Catalog Store Library
//!
//! Ingestion boundary for the cable-accessory catalog: reads the flat
//! reference CSVs, normalizes their many header spellings onto canonical
//! column names, and builds the immutable `CatalogContext` the core logic
//! runs on. All data cleaning lives here so the model layer stays pure.
//!
//! # Modules
//!
//! - `aliases`: column-name alias table and header normalization
//! - `loader`: per-file CSV readers and the data-directory loader
//! - `error`: typed ingestion errors

pub mod aliases;
pub mod error;
pub mod loader;

// Re-exports for convenience
pub use error::{Result, StoreError};
pub use loader::{CatalogLoader, CABLES_FILE, DEPLOYED_VOLTAGES_KV, PRODUCTS_FILE, TERMINATIONS_FILE};
