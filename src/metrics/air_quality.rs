//! Air Quality Benefits
//!
//! Pollutants removed by deposition on leaves and emissions avoided through
//! energy savings, in pounds per year. NOx, PM10 and SOx combine both routes;
//! ozone is deposition only and VOC is avoidance only. BVOC (emitted by the
//! tree itself) is usually negative in the source tables.

use super::{FactorValue, LBS_PER_KG};
use serde::Serialize;

/// The nine air quality factor values, in kg as read from the tables
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AirQualityFactors {
    pub ozone_dep: FactorValue,
    pub nox_dep: FactorValue,
    pub nox_avoided: FactorValue,
    pub pm10_dep: FactorValue,
    pub pm10_avoided: FactorValue,
    pub sox_dep: FactorValue,
    pub sox_avoided: FactorValue,
    pub voc_avoided: FactorValue,
    pub bvoc: FactorValue,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AirQualityStats {
    pub ozone: FactorValue,
    pub nox: FactorValue,
    pub pm10: FactorValue,
    pub sox: FactorValue,
    pub voc: FactorValue,
    pub bvoc: FactorValue,
    /// Sum of the six indicators above
    pub improvement: FactorValue,
}

/// Convert to pounds and combine deposition/avoidance pairs
pub fn air_quality_from_factors(f: &AirQualityFactors) -> AirQualityStats {
    let lbs = |v: FactorValue| v.scale(LBS_PER_KG);

    let ozone = lbs(f.ozone_dep);
    let nox = lbs(f.nox_dep) + lbs(f.nox_avoided);
    let pm10 = lbs(f.pm10_dep) + lbs(f.pm10_avoided);
    let sox = lbs(f.sox_dep) + lbs(f.sox_avoided);
    let voc = lbs(f.voc_avoided);
    let bvoc = lbs(f.bvoc);

    AirQualityStats {
        ozone,
        nox,
        pm10,
        sox,
        voc,
        bvoc,
        improvement: [ozone, nox, pm10, sox, voc, bvoc].into_iter().sum(),
    }
}
