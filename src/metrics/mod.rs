//! Benefit metrics
//!
//! Each derived metric lives in its own module and combines one or more
//! factor values. Raw sides are physical quantities; converted sides exist
//! only for factors with a registered multiplier.

pub mod air_quality;
pub mod co2;
pub mod energy;
pub mod stormwater;

pub use air_quality::{air_quality_from_factors, AirQualityFactors, AirQualityStats};
pub use co2::{co2_from_factors, Co2Stats};
pub use energy::energy_from_factors;
pub use stormwater::stormwater_from_factor;

use crate::utils::sum_ignore_none;
use serde::{Deserialize, Serialize};
use std::iter::Sum;
use std::ops::Add;

/// kWh per kBTU (natural gas tables are in kBTU)
pub const KWH_PER_KBTU: f64 = 0.29307107;

/// US gallons per cubic meter
pub const GAL_PER_CUBIC_M: f64 = 264.172052;

/// Pounds per kilogram
pub const LBS_PER_KG: f64 = 2.20462;

/// Factor names as they appear in table file names
pub mod factors {
    pub const ELECTRICITY: &str = "electricity";
    pub const NATURAL_GAS: &str = "natural_gas";
    pub const HYDRO_INTERCEPTION: &str = "hydro_interception";
    pub const CO2_SEQUESTERED: &str = "co2_sequestered";
    pub const CO2_AVOIDED: &str = "co2_avoided";
    pub const CO2_STORAGE: &str = "co2_storage";
    pub const AQ_OZONE_DEP: &str = "aq_ozone_dep";
    pub const AQ_NOX_DEP: &str = "aq_nox_dep";
    pub const AQ_NOX_AVOIDED: &str = "aq_nox_avoided";
    pub const AQ_PM10_DEP: &str = "aq_pm10_dep";
    pub const AQ_PM10_AVOIDED: &str = "aq_pm10_avoided";
    pub const AQ_SOX_DEP: &str = "aq_sox_dep";
    pub const AQ_SOX_AVOIDED: &str = "aq_sox_avoided";
    pub const AQ_VOC_AVOIDED: &str = "aq_voc_avoided";
    pub const BVOC: &str = "bvoc";

    /// Every factor the derived metrics read
    pub const KNOWN_FACTORS: [&str; 15] = [
        ELECTRICITY,
        NATURAL_GAS,
        HYDRO_INTERCEPTION,
        CO2_SEQUESTERED,
        CO2_AVOIDED,
        CO2_STORAGE,
        AQ_OZONE_DEP,
        AQ_NOX_DEP,
        AQ_NOX_AVOIDED,
        AQ_PM10_DEP,
        AQ_PM10_AVOIDED,
        AQ_SOX_DEP,
        AQ_SOX_AVOIDED,
        AQ_VOC_AVOIDED,
        BVOC,
    ];
}

/// A raw benefit and its optional converted counterpart
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct FactorValue {
    pub raw: f64,

    /// `None` when no conversion multiplier is registered
    pub converted: Option<f64>,
}

impl FactorValue {
    pub fn new(raw: f64, converted: Option<f64>) -> Self {
        Self { raw, converted }
    }

    /// Scale both sides (unit change that applies to converted values too)
    pub fn scale(self, factor: f64) -> Self {
        Self {
            raw: self.raw * factor,
            converted: self.converted.map(|c| c * factor),
        }
    }

    /// Scale the raw side only
    pub fn scale_raw(self, factor: f64) -> Self {
        Self {
            raw: self.raw * factor,
            converted: self.converted,
        }
    }
}

impl Add for FactorValue {
    type Output = FactorValue;

    fn add(self, other: FactorValue) -> FactorValue {
        FactorValue {
            raw: self.raw + other.raw,
            converted: sum_ignore_none([self.converted, other.converted]),
        }
    }
}

impl Sum for FactorValue {
    fn sum<I: Iterator<Item = FactorValue>>(iter: I) -> Self {
        iter.fold(FactorValue::default(), Add::add)
    }
}

/// All derived metrics for one set of observations
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BenefitReport {
    /// kWh
    pub energy_conserved: FactorValue,
    /// Gallons
    pub stormwater_management: FactorValue,
    /// Pounds
    pub co2: Co2Stats,
    /// Pounds
    pub air_quality: AirQualityStats,
}
