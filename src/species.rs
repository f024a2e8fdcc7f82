//! Species Resolution
//!
//! Maps a scientific name (genus, species, cultivar) to the species code used
//! by a region's factor tables, via `species_master_list.csv`.
//!
//! Master list columns (positional):
//! `SpeciesCode, ScientificName, CommonName, TreeType, SppValueAssignment,
//! SpeciesRating, BasicPrice, PalmTrunkCost, ReplacementCost, TAr, region`

use crate::cache::Memo;
use crate::data::{read_string_csv, string_rows};
use crate::error::{BenefitError, Result};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;

pub const SPECIES_MASTER_LIST: &str = "species_master_list.csv";

/// Column holding the code used as the row key in factor tables
const BENEFIT_CODE_COLUMN: usize = 4;

/// One row of the species master list
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpeciesRecord {
    pub species_code: String,
    pub scientific_name: String,
    pub common_name: String,
    pub tree_type: String,

    /// Row key into this region's factor tables (SppValueAssignment)
    pub benefit_code: String,

    pub region: String,

    #[serde(skip)]
    name_key: String,
}

impl SpeciesRecord {
    /// Build a record from trimmed row cells; `None` if the row is too short
    fn from_cells(cells: &[&str]) -> Option<Self> {
        if cells.len() <= BENEFIT_CODE_COLUMN {
            return None;
        }

        let scientific_name = cells[1].to_string();
        Some(Self {
            species_code: cells[0].to_string(),
            name_key: scientific_name.to_lowercase(),
            scientific_name,
            common_name: cells[2].to_string(),
            tree_type: cells[3].to_string(),
            benefit_code: cells[BENEFIT_CODE_COLUMN].to_string(),
            region: cells[cells.len() - 1].to_string(),
        })
    }

    fn matches(&self, region: &str, name_key: &str) -> bool {
        self.name_key == name_key && self.region == region
    }
}

/// Scientific name to look up
///
/// Composed as `genus[ species][ 'cultivar']`. Empty parts count as absent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpeciesQuery {
    pub genus: String,
    pub species: Option<String>,
    pub cultivar: Option<String>,
}

impl SpeciesQuery {
    pub fn new(genus: impl Into<String>) -> Self {
        Self {
            genus: genus.into(),
            species: None,
            cultivar: None,
        }
    }

    pub fn with_species(mut self, species: impl Into<String>) -> Self {
        self.species = non_empty(species.into());
        self
    }

    pub fn with_cultivar(mut self, cultivar: impl Into<String>) -> Self {
        self.cultivar = non_empty(cultivar.into());
        self
    }

    /// Case-folded composite name used for matching
    ///
    /// # Errors
    /// `InvalidSpeciesQuery` if the genus is empty or a cultivar is given
    /// without a species.
    pub fn search_key(&self) -> Result<String> {
        let genus = self.genus.trim();
        if genus.is_empty() {
            return Err(BenefitError::InvalidSpeciesQuery(
                "genus must not be empty".to_string(),
            ));
        }

        let species = self.species.as_deref().map(str::trim).filter(|s| !s.is_empty());
        let cultivar = self.cultivar.as_deref().map(str::trim).filter(|s| !s.is_empty());

        let mut name = genus.to_string();
        match (species, cultivar) {
            (Some(species), Some(cultivar)) => {
                name.push_str(&format!(" {} '{}'", species, cultivar));
            }
            (Some(species), None) => {
                name.push(' ');
                name.push_str(species);
            }
            (None, Some(cultivar)) => {
                return Err(BenefitError::InvalidSpeciesQuery(format!(
                    "cultivar '{}' given without a species",
                    cultivar
                )));
            }
            (None, None) => {}
        }

        Ok(name.to_lowercase())
    }
}

fn non_empty(s: String) -> Option<String> {
    if s.trim().is_empty() {
        None
    } else {
        Some(s)
    }
}

/// Lazily loaded species master list
///
/// Region validity is not checked here; `BenefitCalculator` checks the region
/// against the factor tables before resolving.
#[derive(Debug)]
pub struct SpeciesResolver {
    path: PathBuf,
    records: Memo<Vec<SpeciesRecord>>,
}

impl SpeciesResolver {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            records: Memo::new(),
        }
    }

    /// Resolver for the master list inside `data_dir`
    pub fn in_data_dir(data_dir: &Path) -> Self {
        Self::new(data_dir.join(SPECIES_MASTER_LIST))
    }

    /// All records, read from disk on first call only
    pub fn load(&self) -> Result<Arc<Vec<SpeciesRecord>>> {
        self.records.get_or_try_init(|| read_master_list(&self.path))
    }

    /// First record in `region` whose scientific name matches `query`
    ///
    /// Name comparison ignores case; region comparison does not.
    pub fn lookup(&self, region: &str, query: &SpeciesQuery) -> Result<Option<SpeciesRecord>> {
        let key = query.search_key()?;
        let records = self.load()?;

        Ok(records
            .iter()
            .find(|record| record.matches(region, &key))
            .cloned())
    }

    /// Benefit code for `query` in `region`, or `None` if not listed
    pub fn resolve(&self, region: &str, query: &SpeciesQuery) -> Result<Option<String>> {
        Ok(self
            .lookup(region, query)?
            .map(|record| record.benefit_code))
    }
}

fn read_master_list(path: &Path) -> Result<Vec<SpeciesRecord>> {
    let df = read_string_csv(path)?;
    let rows = string_rows(&df).map_err(|source| BenefitError::Csv {
        path: path.to_path_buf(),
        source,
    })?;

    let mut records = Vec::with_capacity(rows.len());
    let mut skipped = 0;

    for row in rows {
        let mut cells: Vec<&str> = row.iter().map(|cell| cell.unwrap_or("").trim()).collect();

        // Rows narrower than the widest line are padded to its width
        while cells.last().is_some_and(|cell| cell.is_empty()) {
            cells.pop();
        }
        if cells.is_empty() {
            continue;
        }

        match SpeciesRecord::from_cells(&cells) {
            Some(record) => records.push(record),
            None => skipped += 1,
        }
    }

    if skipped > 0 {
        tracing::warn!("Skipped {} short rows in {:?}", skipped, path);
    }
    tracing::debug!("Loaded {} species records from {:?}", records.len(), path);

    Ok(records)
}
