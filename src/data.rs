//! Data Loading and Management
//!
//! Discovers regions and factors from the data directory and loads per-region
//! factor tables with Polars. Tables are read at most once per `DataStore` and
//! served from memory afterwards.
//!
//! Table files are named `output__<region>__<factor>.csv`. The first row holds
//! the DBH breakpoints (after a label cell); every following row is a species
//! code followed by one benefit value per breakpoint.

use crate::cache::{KeyedCache, Memo};
use crate::error::{BenefitError, Result};
use crate::utils::parsing::parse_row;
use polars::prelude::*;
use rayon::prelude::*;
use rustc_hash::FxHashMap;
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

const TABLE_PREFIX: &str = "output__";
const TABLE_SUFFIX: &str = ".csv";

/// Benefit samples for one (region, factor) pair
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FactorTable {
    /// DBH breakpoints in cm, ascending
    breakpoints: Vec<f64>,

    /// Species code → value per breakpoint
    values: FxHashMap<String, Vec<f64>>,
}

impl FactorTable {
    pub fn new(breakpoints: Vec<f64>, values: FxHashMap<String, Vec<f64>>) -> Self {
        Self { breakpoints, values }
    }

    /// Build a table from raw CSV rows
    ///
    /// Row 0 is the breakpoint row; its first cell is a label. Each later row
    /// is keyed by its first cell, and rows without a key are skipped. Cells
    /// are read up to the first empty one and unparseable numbers become 0.0.
    pub fn from_rows<'a, I, R>(rows: I) -> Self
    where
        I: IntoIterator<Item = R>,
        R: IntoIterator<Item = Option<&'a str>>,
    {
        let mut rows = rows.into_iter();

        let breakpoints = rows
            .next()
            .map(|header| parse_row(header.into_iter().skip(1)))
            .unwrap_or_default();

        let mut values = FxHashMap::default();
        for row in rows {
            let mut cells = row.into_iter();
            let code = match cells.next().flatten().map(str::trim) {
                Some(code) if !code.is_empty() => code.to_string(),
                _ => continue,
            };
            values.insert(code, parse_row(cells));
        }

        Self::new(breakpoints, values)
    }

    pub fn breakpoints(&self) -> &[f64] {
        &self.breakpoints
    }

    pub fn species_values(&self, species_code: &str) -> Option<&[f64]> {
        self.values.get(species_code).map(Vec::as_slice)
    }

    pub fn has_species(&self, species_code: &str) -> bool {
        self.values.contains_key(species_code)
    }

    pub fn species_count(&self) -> usize {
        self.values.len()
    }

    /// Species codes, sorted
    pub fn species_codes(&self) -> Vec<&str> {
        let mut codes: Vec<&str> = self.values.keys().map(String::as_str).collect();
        codes.sort_unstable();
        codes
    }

    fn is_ascending(&self) -> bool {
        self.breakpoints.windows(2).all(|w| w[0] < w[1])
    }
}

/// Regions and their factors, as found on disk
#[derive(Debug, Default)]
struct Catalog {
    factors: BTreeMap<String, BTreeSet<String>>,
}

/// Split `output__<region>__<factor>.csv` into (region, factor)
///
/// The region is everything up to the last `__`.
pub fn parse_table_file_name(file_name: &str) -> Option<(&str, &str)> {
    let stem = file_name
        .strip_prefix(TABLE_PREFIX)?
        .strip_suffix(TABLE_SUFFIX)?;
    let (region, factor) = stem.rsplit_once("__")?;

    (!region.is_empty() && !factor.is_empty()).then_some((region, factor))
}

/// File-backed store of factor tables
///
/// Owns its caches; nothing is shared between stores.
#[derive(Debug)]
pub struct DataStore {
    data_dir: PathBuf,
    catalog: Memo<Catalog>,
    tables: KeyedCache<(String, String), FactorTable>,
}

impl DataStore {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            catalog: Memo::new(),
            tables: KeyedCache::new(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// All regions with at least one table (scanned once)
    pub fn regions(&self) -> Result<BTreeSet<String>> {
        Ok(self.catalog()?.factors.keys().cloned().collect())
    }

    /// Factors available for `region`
    pub fn factors_for_region(&self, region: &str) -> Result<BTreeSet<String>> {
        self.catalog()?
            .factors
            .get(region)
            .cloned()
            .ok_or_else(|| BenefitError::InvalidRegion(region.to_string()))
    }

    /// Fail with `InvalidRegion` unless `region` has tables
    pub fn check_region(&self, region: &str) -> Result<()> {
        if self.catalog()?.factors.contains_key(region) {
            Ok(())
        } else {
            Err(BenefitError::InvalidRegion(region.to_string()))
        }
    }

    /// Table for (region, factor), read from disk on first request only
    pub fn load_table(&self, region: &str, factor: &str) -> Result<Arc<FactorTable>> {
        let catalog = self.catalog()?;
        let factors = catalog
            .factors
            .get(region)
            .ok_or_else(|| BenefitError::InvalidRegion(region.to_string()))?;

        if !factors.contains(factor) {
            return Err(BenefitError::InvalidFactor {
                region: region.to_string(),
                factor: factor.to_string(),
            });
        }

        self.tables
            .get_or_try_init((region.to_string(), factor.to_string()), || {
                self.read_table(region, factor)
            })
    }

    pub fn is_cached(&self, region: &str, factor: &str) -> bool {
        self.tables
            .get(&(region.to_string(), factor.to_string()))
            .is_some()
    }

    /// Number of tables currently held in memory
    pub fn cached_tables(&self) -> usize {
        self.tables.len()
    }

    /// Load every factor table of `region` up front
    ///
    /// After this the region's tables are served without any initialisation,
    /// so the store can be shared freely across threads.
    pub fn prewarm(&self, region: &str) -> Result<usize> {
        let factors: Vec<String> = self.factors_for_region(region)?.into_iter().collect();

        factors
            .par_iter()
            .try_for_each(|factor| self.load_table(region, factor).map(|_| ()))?;

        tracing::info!("Prewarmed {} factor tables for region {}", factors.len(), region);
        Ok(factors.len())
    }

    fn catalog(&self) -> Result<Arc<Catalog>> {
        self.catalog.get_or_try_init(|| scan_catalog(&self.data_dir))
    }

    fn table_path(&self, region: &str, factor: &str) -> PathBuf {
        self.data_dir
            .join(format!("{}{}__{}{}", TABLE_PREFIX, region, factor, TABLE_SUFFIX))
    }

    fn read_table(&self, region: &str, factor: &str) -> Result<FactorTable> {
        let path = self.table_path(region, factor);
        let df = read_string_csv(&path)?;

        let table = FactorTable::from_rows(string_rows(&df).map_err(|source| {
            BenefitError::Csv {
                path: path.clone(),
                source,
            }
        })?);

        if !table.is_ascending() {
            tracing::warn!(
                "DBH breakpoints in {:?} are not strictly ascending: {:?}",
                path,
                table.breakpoints()
            );
        }

        tracing::debug!(
            "Loaded factor table {}/{}: {} breakpoints, {} species",
            region,
            factor,
            table.breakpoints().len(),
            table.species_count()
        );

        Ok(table)
    }
}

fn scan_catalog(data_dir: &Path) -> Result<Catalog> {
    let io_err = |source| BenefitError::Io {
        path: data_dir.to_path_buf(),
        source,
    };

    let mut catalog = Catalog::default();
    for entry in fs::read_dir(data_dir).map_err(io_err)? {
        let entry = entry.map_err(io_err)?;
        let file_name = entry.file_name();
        let Some(file_name) = file_name.to_str() else {
            continue;
        };

        if let Some((region, factor)) = parse_table_file_name(file_name) {
            catalog
                .factors
                .entry(region.to_string())
                .or_default()
                .insert(factor.to_string());
        }
    }

    tracing::debug!(
        "Scanned {:?}: {} regions",
        data_dir,
        catalog.factors.len()
    );

    Ok(catalog)
}

/// Upper bound on the number of cells in any line
///
/// Quoted commas are counted as separators, so this can only overestimate.
fn max_row_width(contents: &str) -> usize {
    contents
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| line.split(',').count())
        .max()
        .unwrap_or(0)
}

/// Read a header-less CSV with every column as a string
///
/// The schema is as wide as the widest line, so no row is ever cut short;
/// shorter rows come back padded with nulls. An empty file is an empty frame.
pub(crate) fn read_string_csv(path: &Path) -> Result<DataFrame> {
    let contents = fs::read_to_string(path).map_err(|source| BenefitError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let width = max_row_width(&contents);
    if width == 0 {
        return Ok(DataFrame::empty());
    }

    let mut schema = Schema::with_capacity(width);
    for idx in 1..=width {
        schema.with_column(format!("column_{}", idx).into(), DataType::String);
    }

    CsvReadOptions::default()
        .with_has_header(false)
        .with_schema(Some(Arc::new(schema)))
        .into_reader_with_file_handle(std::io::Cursor::new(contents.into_bytes()))
        .finish()
        .map_err(|source| BenefitError::Csv {
            path: path.to_path_buf(),
            source,
        })
}

/// Row-major view of an all-string DataFrame
pub(crate) fn string_rows(df: &DataFrame) -> PolarsResult<Vec<Vec<Option<&str>>>> {
    let columns = df
        .get_columns()
        .iter()
        .map(|column| column.str())
        .collect::<PolarsResult<Vec<&StringChunked>>>()?;

    Ok((0..df.height())
        .map(|idx| columns.iter().map(|column| column.get(idx)).collect())
        .collect())
}
