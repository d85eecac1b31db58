//! CSV loader for the catalog data directory
//!
//! Loads every reference CSV into one immutable [`CatalogContext`].
//! Range-table files that are absent are simply not registered; the
//! resolver reports `TableMissing` by name when such a table is asked
//! for, which is the contract the configurator relies on.

use crate::aliases::{canonical, canonical_column};
use crate::error::{Result, StoreError};
use catalog_model::{
    CableRecord, CatalogContext, CurrentClass, ProductBase, ProductFamily, ReferenceRow,
    ReferenceTable, TableId, TerminationRecord,
};
use csv::StringRecord;
use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Voltage classes a deployment ships range tables for
pub const DEPLOYED_VOLTAGES_KV: [u16; 3] = [15, 25, 35];

/// Data-directory file names (canonical, English)
pub const CABLES_FILE: &str = "cables.csv";
pub const TERMINATIONS_FILE: &str = "terminations.csv";
pub const PRODUCTS_FILE: &str = "products.csv";

/// Loads a data directory of reference CSVs into a [`CatalogContext`]
pub struct CatalogLoader {
    data_dir: PathBuf,
}

impl CatalogLoader {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Load everything the data directory offers.
    ///
    /// The directory itself must exist; individual files are optional so a
    /// resolve-only or audit-only data set still loads.
    pub fn load(&self) -> Result<CatalogContext> {
        if !self.data_dir.is_dir() {
            return Err(StoreError::DataDirNotFound(self.data_dir.clone()));
        }

        let mut ctx = CatalogContext::new();

        for voltage_kv in DEPLOYED_VOLTAGES_KV {
            for (current, suffix) in [(CurrentClass::A200, ""), (CurrentClass::A600, "_600a")] {
                let id = TableId::CableRange {
                    voltage_kv,
                    current,
                };
                let path = self
                    .data_dir
                    .join(format!("cable_range_{}kv{}.csv", voltage_kv, suffix));
                if let Some(table) = self.try_load_range_table(&path)? {
                    info!(table = %id, rows = table.len(), "loaded cable range table");
                    ctx.insert_table(id, table);
                }
            }
        }

        let conductor_path = self.data_dir.join("conductor_codes_200a.csv");
        if let Some(table) = self.try_load_conductor_table(&conductor_path, 2)? {
            info!(rows = table.len(), "loaded 200A conductor codes");
            ctx.insert_table(TableId::Conductor200, table);
        }

        let lugs_path = self.data_dir.join("compression_lugs_600a.csv");
        if let Some(table) = self.try_load_conductor_table(&lugs_path, 4)? {
            info!(rows = table.len(), "loaded 600A compression lugs");
            ctx.insert_table(TableId::CompressionLug600, table);
        }

        let shear_path = self.data_dir.join("shear_bolt_lugs.csv");
        if let Some(table) = self.try_load_range_table(&shear_path)? {
            info!(rows = table.len(), "loaded shear bolt lugs");
            ctx.insert_table(TableId::ShearBolt, table);
        }

        ctx.cables = self.load_cables()?;
        ctx.terminations = self.load_terminations()?;
        ctx.products = self.load_products()?;

        info!(
            tables = ctx.table_count(),
            cables = ctx.cables.len(),
            terminations = ctx.terminations.len(),
            products = ctx.products.len(),
            "catalog loaded from {}",
            self.data_dir.display()
        );
        Ok(ctx)
    }

    /// Load the cable database, empty if the file is absent
    pub fn load_cables(&self) -> Result<Vec<CableRecord>> {
        let path = self.data_dir.join(CABLES_FILE);
        if !path.exists() {
            warn!("cable database not found at {}", path.display());
            return Ok(Vec::new());
        }

        let (headers, mut reader) = open_csv(&path)?;
        let voltage = headers.require(canonical::VOLTAGE_CLASS)?;
        let section = headers.require(canonical::CROSS_SECTION_MM2)?;
        let brand = headers.require(canonical::BRAND)?;
        let name = headers.require(canonical::CABLE_NAME)?;
        let od = headers.require(canonical::OUTER_DIAMETER_MM)?;

        let mut cables = Vec::new();
        for result in reader.records() {
            let record = result?;
            cables.push(CableRecord {
                voltage_class: field(&record, voltage).to_string(),
                cross_section_mm2: headers.parse_f64(&record, section)?,
                brand: field(&record, brand).to_string(),
                cable_name: field(&record, name).to_string(),
                outer_diameter_mm: headers.parse_f64(&record, od)?,
            });
        }
        debug!(count = cables.len(), "cable database loaded");
        Ok(cables)
    }

    /// Load the termination OD-window table, empty if the file is absent
    pub fn load_terminations(&self) -> Result<Vec<TerminationRecord>> {
        let path = self.data_dir.join(TERMINATIONS_FILE);
        if !path.exists() {
            warn!("termination table not found at {}", path.display());
            return Ok(Vec::new());
        }

        let (headers, mut reader) = open_csv(&path)?;
        let voltage = headers.require(canonical::VOLTAGE_CLASS)?;
        let part = headers.require(canonical::PART_NUMBER)?;
        let od_min = headers.require(canonical::OD_MIN_MM)?;
        let od_max = headers.require(canonical::OD_MAX_MM)?;

        let mut terminations = Vec::new();
        for result in reader.records() {
            let record = result?;
            terminations.push(TerminationRecord {
                voltage_class: field(&record, voltage).to_string(),
                part_number: field(&record, part).to_string(),
                od_min_mm: headers.parse_f64(&record, od_min)?,
                od_max_mm: headers.parse_f64(&record, od_max)?,
            });
        }
        Ok(terminations)
    }

    /// Load the configurable base products, empty if the file is absent
    pub fn load_products(&self) -> Result<Vec<ProductBase>> {
        let path = self.data_dir.join(PRODUCTS_FILE);
        if !path.exists() {
            return Ok(Vec::new());
        }

        let (headers, mut reader) = open_csv(&path)?;
        let standard = headers.require(canonical::STANDARD)?;
        let voltage = headers.require(canonical::VOLTAGE_CLASS_KV)?;
        let current = headers.require(canonical::CURRENT_CLASS_A)?;
        let display = headers.require(canonical::DISPLAY_NAME)?;
        let base = headers.require(canonical::BASE_CODE)?;
        let family = headers.require(canonical::FAMILY)?;

        let mut products = Vec::new();
        for result in reader.records() {
            let record = result?;
            products.push(ProductBase {
                standard: field(&record, standard).to_string(),
                voltage_class_kv: headers.parse_u16(&record, voltage)?,
                current_class_a: headers.parse_u16(&record, current)?,
                display_name: field(&record, display).to_string(),
                base_code: field(&record, base).to_string(),
                family: headers.parse_family(&record, family)?,
            });
        }
        Ok(products)
    }

    /// Load a pure range table (lower/upper bound + code), `None` if the
    /// file does not exist
    fn try_load_range_table(&self, path: &Path) -> Result<Option<ReferenceTable>> {
        if !path.exists() {
            debug!("range table not present: {}", path.display());
            return Ok(None);
        }

        let (headers, mut reader) = open_csv(path)?;
        let lower = headers.require(canonical::LOWER_BOUND)?;
        let upper = headers.require(canonical::UPPER_BOUND)?;
        let code = headers.require(canonical::CODE)?;

        let mut rows = Vec::new();
        for result in reader.records() {
            let record = result?;
            rows.push(ReferenceRow {
                lower_bound: headers.parse_f64(&record, lower)?,
                upper_bound: headers.parse_f64(&record, upper)?,
                return_code: field(&record, code).to_string(),
                filter_keys: HashMap::new(),
            });
        }

        Ok(Some(ReferenceTable::new(rows)))
    }

    /// Load a conductor-code table (conductor type + exact cross-section +
    /// code). Expressed as degenerate ranges (lower == upper) with the
    /// conductor type as categorical filter, so the generic resolver
    /// serves these tables too.
    fn try_load_conductor_table(
        &self,
        path: &Path,
        code_width: usize,
    ) -> Result<Option<ReferenceTable>> {
        if !path.exists() {
            debug!("conductor table not present: {}", path.display());
            return Ok(None);
        }

        let (headers, mut reader) = open_csv(path)?;
        let conductor_type = headers.require(canonical::CONDUCTOR_TYPE)?;
        let section = headers.require(canonical::CROSS_SECTION_MM2)?;
        let code = headers.require(canonical::CODE)?;

        let mut rows = Vec::new();
        for result in reader.records() {
            let record = result?;
            let size = headers.parse_f64(&record, section)?;
            rows.push(ReferenceRow {
                lower_bound: size,
                upper_bound: size,
                return_code: field(&record, code).to_string(),
                filter_keys: HashMap::from([(
                    canonical::CONDUCTOR_TYPE.to_string(),
                    field(&record, conductor_type).to_string(),
                )]),
            });
        }

        Ok(Some(ReferenceTable::with_code_width(rows, code_width)))
    }
}

/// Header indices after alias normalization, with the source file kept
/// for error reporting
struct HeaderMap {
    file: PathBuf,
    indices: HashMap<&'static str, usize>,
}

impl HeaderMap {
    fn require(&self, column: &'static str) -> Result<usize> {
        self.indices
            .get(column)
            .copied()
            .ok_or_else(|| StoreError::missing_column(&self.file, column))
    }

    fn parse_f64(&self, record: &StringRecord, index: usize) -> Result<f64> {
        let raw = field(record, index);
        raw.trim().parse::<f64>().map_err(|_| {
            StoreError::invalid_value(&self.file, record_line(record), self.name_of(index), raw)
        })
    }

    fn parse_u16(&self, record: &StringRecord, index: usize) -> Result<u16> {
        let raw = field(record, index);
        raw.trim().parse::<u16>().map_err(|_| {
            StoreError::invalid_value(&self.file, record_line(record), self.name_of(index), raw)
        })
    }

    fn parse_family(&self, record: &StringRecord, index: usize) -> Result<ProductFamily> {
        let raw = field(record, index);
        match raw.trim().to_ascii_lowercase().as_str() {
            // legacy logic ids kept as accepted input aliases
            "elbow_200a" | "logica_cotovelo_200a" => Ok(ProductFamily::Elbow200A),
            "tbody_600a" | "logica_corpo_t_600a" => Ok(ProductFamily::TBody600A),
            _ => Err(StoreError::invalid_value(
                &self.file,
                record_line(record),
                self.name_of(index),
                raw,
            )),
        }
    }

    fn name_of(&self, index: usize) -> &'static str {
        self.indices
            .iter()
            .find(|(_, i)| **i == index)
            .map(|(name, _)| *name)
            .unwrap_or("?")
    }
}

fn field(record: &StringRecord, index: usize) -> &str {
    record.get(index).unwrap_or("").trim()
}

fn record_line(record: &StringRecord) -> u64 {
    record.position().map(|p| p.line()).unwrap_or(0)
}

/// Open a CSV file and normalize its headers through the alias table.
/// Unrecognized headers are kept out of the map (and logged) rather than
/// rejected, so vendor extras don't break ingestion.
fn open_csv(path: &Path) -> Result<(HeaderMap, csv::Reader<BufReader<File>>)> {
    let file = File::open(path)?;
    let mut reader = csv::Reader::from_reader(BufReader::new(file));

    let mut indices = HashMap::new();
    for (index, raw) in reader.headers()?.iter().enumerate() {
        match canonical_column(raw) {
            Some(name) => {
                // first occurrence wins on duplicate aliases
                indices.entry(name).or_insert(index);
            },
            None => debug!("ignoring unrecognized column '{}' in {}", raw, path.display()),
        }
    }

    Ok((
        HeaderMap {
            file: path.to_path_buf(),
            indices,
        },
        reader,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    fn write_file(dir: &Path, name: &str, contents: &str) {
        let mut f = File::create(dir.join(name)).unwrap();
        f.write_all(contents.as_bytes()).unwrap();
    }

    #[test]
    fn test_missing_data_dir_is_an_error() {
        let loader = CatalogLoader::new("/definitely/not/here");
        assert!(matches!(
            loader.load(),
            Err(StoreError::DataDirNotFound(_))
        ));
    }

    #[test]
    fn test_absent_files_load_as_empty_catalog() {
        let dir = TempDir::new().unwrap();
        let ctx = CatalogLoader::new(dir.path()).load().unwrap();
        assert_eq!(ctx.table_count(), 0);
        assert!(ctx.cables.is_empty());
        assert!(ctx.terminations.is_empty());
    }

    #[test]
    fn test_range_table_with_portuguese_headers() {
        let dir = TempDir::new().unwrap();
        write_file(
            dir.path(),
            "cable_range_15kv.csv",
            "min_mm,max_mm,codigo_retorno\n15.0,20.0,2\n20.1,26.0,3\n",
        );

        let ctx = CatalogLoader::new(dir.path()).load().unwrap();
        let table = ctx
            .table(TableId::CableRange {
                voltage_kv: 15,
                current: CurrentClass::A200,
            })
            .unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.rows[0].return_code, "2");
        assert_eq!(table.rows[1].upper_bound, 26.0);
    }

    #[test]
    fn test_conductor_table_becomes_degenerate_ranges() {
        let dir = TempDir::new().unwrap();
        write_file(
            dir.path(),
            "conductor_codes_200a.csv",
            "tipo_condutor,secao_mm2,codigo_retorno\nCopper,50,3\nAluminum,50,13\n",
        );

        let ctx = CatalogLoader::new(dir.path()).load().unwrap();
        let table = ctx.table(TableId::Conductor200).unwrap();
        assert_eq!(table.code_width, Some(2));
        assert_eq!(table.rows[0].lower_bound, table.rows[0].upper_bound);
        assert_eq!(
            table.rows[0].filter_keys.get(canonical::CONDUCTOR_TYPE),
            Some(&"Copper".to_string())
        );
    }

    #[test]
    fn test_cable_database_with_spreadsheet_headers() {
        let dir = TempDir::new().unwrap();
        write_file(
            dir.path(),
            CABLES_FILE,
            "Cable Voltage,S_mm2,Brand,Cable,OD_iso_mm\n25 kV,95,Acme,XLPE-95,18.7\n",
        );

        let cables = CatalogLoader::new(dir.path()).load_cables().unwrap();
        assert_eq!(cables.len(), 1);
        assert_eq!(cables[0].voltage_class, "25 kV");
        assert_eq!(cables[0].cross_section_mm2, 95.0);
        assert_eq!(cables[0].outer_diameter_mm, 18.7);
    }

    #[test]
    fn test_missing_required_column_is_named() {
        let dir = TempDir::new().unwrap();
        write_file(
            dir.path(),
            TERMINATIONS_FILE,
            "Voltage Class,Part Number,OD Min (mm)\n25 kV,CSTO-25,17.0\n",
        );

        let err = CatalogLoader::new(dir.path())
            .load_terminations()
            .unwrap_err();
        match err {
            StoreError::MissingColumn { column, .. } => assert_eq!(column, "od_max_mm"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_unparseable_cell_reports_file_line_and_column() {
        let dir = TempDir::new().unwrap();
        write_file(
            dir.path(),
            CABLES_FILE,
            "voltage_class,cross_section_mm2,brand,cable_name,outer_diameter_mm\n25 kV,ninety-five,Acme,XLPE,18.7\n",
        );

        let err = CatalogLoader::new(dir.path()).load_cables().unwrap_err();
        match err {
            StoreError::InvalidValue {
                line,
                column,
                value,
                ..
            } => {
                assert_eq!(line, 2);
                assert_eq!(column, "cross_section_mm2");
                assert_eq!(value, "ninety-five");
            },
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_products_accept_legacy_family_ids() {
        let dir = TempDir::new().unwrap();
        write_file(
            dir.path(),
            PRODUCTS_FILE,
            "padrao,classe_tensao,classe_corrente,nome_exibicao,codigo_base,id_logica\n\
             IEEE 386,15,200,Loadbreak Elbow,15-LE200,LOGICA_COTOVELO_200A\n\
             IEEE 386,25,600,Deadbreak T-Body,DT625,tbody_600a\n",
        );

        let products = CatalogLoader::new(dir.path()).load_products().unwrap();
        assert_eq!(products.len(), 2);
        assert_eq!(products[0].family, ProductFamily::Elbow200A);
        assert_eq!(products[0].base_code, "15-LE200");
        assert_eq!(products[1].family, ProductFamily::TBody600A);
        assert_eq!(products[1].current_class_a, 600);
    }
}
