//! Benefit Calculator - Main entry point for tree benefit calculations
//!
//! Owns the table store, the species resolver and the conversion registry.
//! Every operation takes a region plus a list of (species code, DBH)
//! observations and returns summed benefits for all of them.

use crate::config::BenefitsConfig;
use crate::conversion::ConversionRegistry;
use crate::data::DataStore;
use crate::error::{BenefitError, Result};
use crate::metrics::factors::*;
use crate::metrics::{
    air_quality_from_factors, co2_from_factors, energy_from_factors, stormwater_from_factor,
    AirQualityFactors, AirQualityStats, BenefitReport, Co2Stats, FactorValue,
};
use crate::species::{SpeciesQuery, SpeciesRecord, SpeciesResolver};
use crate::utils::sum_piecewise_linear;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::collections::BTreeSet;
use std::path::PathBuf;

/// One tree: its benefit species code and trunk diameter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub species_code: String,

    /// Diameter at breast height in cm; negative values count as 0
    pub dbh_cm: f64,
}

impl Observation {
    pub fn new(species_code: impl Into<String>, dbh_cm: f64) -> Self {
        Self {
            species_code: species_code.into(),
            dbh_cm,
        }
    }
}

/// DBH values per species code, in order of first appearance
type SpeciesGroups<'a> = Vec<(&'a str, SmallVec<[f64; 8]>)>;

fn group_by_species(observations: &[Observation]) -> SpeciesGroups<'_> {
    let mut index: FxHashMap<&str, usize> = FxHashMap::default();
    let mut groups: SpeciesGroups<'_> = Vec::new();

    for obs in observations {
        let code = obs.species_code.as_str();
        let slot = *index.entry(code).or_insert_with(|| {
            groups.push((code, SmallVec::new()));
            groups.len() - 1
        });
        groups[slot].1.push(obs.dbh_cm);
    }

    groups
}

/// Main benefit calculator
#[derive(Debug)]
pub struct BenefitCalculator {
    store: DataStore,
    species: SpeciesResolver,
    conversions: ConversionRegistry,
}

impl BenefitCalculator {
    /// Calculator over `data_dir` with no conversions
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self::with_conversions(data_dir, ConversionRegistry::default())
    }

    pub fn with_conversions(data_dir: impl Into<PathBuf>, conversions: ConversionRegistry) -> Self {
        let store = DataStore::new(data_dir);
        let species = SpeciesResolver::in_data_dir(store.data_dir());

        Self {
            store,
            species,
            conversions,
        }
    }

    /// Build from configuration, prewarming the configured regions
    pub fn from_config(config: &BenefitsConfig) -> Result<Self> {
        let calculator =
            Self::with_conversions(config.data_dir.clone(), config.factor_conversions.clone());

        for region in &config.prewarm_regions {
            calculator.prewarm(region)?;
        }

        Ok(calculator)
    }

    pub fn data_store(&self) -> &DataStore {
        &self.store
    }

    pub fn species_resolver(&self) -> &SpeciesResolver {
        &self.species
    }

    pub fn conversions(&self) -> &ConversionRegistry {
        &self.conversions
    }

    pub fn regions(&self) -> Result<BTreeSet<String>> {
        self.store.regions()
    }

    pub fn factors_for_region(&self, region: &str) -> Result<BTreeSet<String>> {
        self.store.factors_for_region(region)
    }

    /// Load every table of `region` so later calls never touch the disk
    pub fn prewarm(&self, region: &str) -> Result<usize> {
        self.store.prewarm(region)
    }

    /// Benefit species code for a scientific name, `None` if not listed
    pub fn resolve_species(&self, region: &str, query: &SpeciesQuery) -> Result<Option<String>> {
        self.store.check_region(region)?;
        self.species.resolve(region, query)
    }

    /// Full master list record for a scientific name
    pub fn lookup_species(&self, region: &str, query: &SpeciesQuery) -> Result<Option<SpeciesRecord>> {
        self.store.check_region(region)?;
        self.species.lookup(region, query)
    }

    /// Summed raw benefit of `factor` over all observations
    pub fn factor_value(&self, region: &str, factor: &str, observations: &[Observation]) -> Result<f64> {
        Ok(self
            .factor_value_and_conversion(region, factor, observations)?
            .raw)
    }

    /// Summed benefit of `factor` plus its conversion, if one is registered
    ///
    /// # Errors
    /// Fails as a whole with `MissingSpeciesData` if any observed species
    /// code is absent from the table.
    pub fn factor_value_and_conversion(
        &self,
        region: &str,
        factor: &str,
        observations: &[Observation],
    ) -> Result<FactorValue> {
        let table = self.store.load_table(region, factor)?;
        let groups = group_by_species(observations);

        // Resolve every curve before evaluating anything
        let curves = groups
            .iter()
            .map(|(code, dbhs)| {
                table
                    .species_values(code)
                    .map(|values| (values, dbhs))
                    .ok_or_else(|| BenefitError::MissingSpeciesData {
                        region: region.to_string(),
                        factor: factor.to_string(),
                        species_code: code.to_string(),
                    })
            })
            .collect::<Result<Vec<_>>>()?;

        let mut raw = 0.0;
        for (values, dbhs) in curves {
            raw += sum_piecewise_linear(table.breakpoints(), values, dbhs)?;
        }

        Ok(FactorValue::new(raw, self.conversions.convert(factor, raw)))
    }

    /// kWh of building energy conserved
    pub fn energy_conserved(&self, region: &str, observations: &[Observation]) -> Result<FactorValue> {
        let natural_gas = self.factor_value_and_conversion(region, NATURAL_GAS, observations)?;
        let electricity = self.factor_value_and_conversion(region, ELECTRICITY, observations)?;

        Ok(energy_from_factors(natural_gas, electricity))
    }

    /// Gallons of stormwater intercepted
    pub fn stormwater_management(&self, region: &str, observations: &[Observation]) -> Result<FactorValue> {
        let hydro = self.factor_value_and_conversion(region, HYDRO_INTERCEPTION, observations)?;

        Ok(stormwater_from_factor(hydro))
    }

    /// Pounds of CO2 sequestered, avoided, stored and reduced
    pub fn co2_stats(&self, region: &str, observations: &[Observation]) -> Result<Co2Stats> {
        let factor = |name: &str| self.factor_value_and_conversion(region, name, observations);

        Ok(co2_from_factors(
            factor(CO2_SEQUESTERED)?,
            factor(CO2_AVOIDED)?,
            factor(CO2_STORAGE)?,
        ))
    }

    /// Pounds of air pollutants removed or avoided
    pub fn air_quality_stats(&self, region: &str, observations: &[Observation]) -> Result<AirQualityStats> {
        let factor = |name: &str| self.factor_value_and_conversion(region, name, observations);

        let factors = AirQualityFactors {
            ozone_dep: factor(AQ_OZONE_DEP)?,
            nox_dep: factor(AQ_NOX_DEP)?,
            nox_avoided: factor(AQ_NOX_AVOIDED)?,
            pm10_dep: factor(AQ_PM10_DEP)?,
            pm10_avoided: factor(AQ_PM10_AVOIDED)?,
            sox_dep: factor(AQ_SOX_DEP)?,
            sox_avoided: factor(AQ_SOX_AVOIDED)?,
            voc_avoided: factor(AQ_VOC_AVOIDED)?,
            bvoc: factor(BVOC)?,
        };

        Ok(air_quality_from_factors(&factors))
    }

    /// Every derived metric in one report
    pub fn benefit_report(&self, region: &str, observations: &[Observation]) -> Result<BenefitReport> {
        Ok(BenefitReport {
            energy_conserved: self.energy_conserved(region, observations)?,
            stormwater_management: self.stormwater_management(region, observations)?,
            co2: self.co2_stats(region, observations)?,
            air_quality: self.air_quality_stats(region, observations)?,
        })
    }
}
