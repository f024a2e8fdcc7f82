//! CO2 Benefits
//!
//! Annual CO2 sequestered by growth and avoided through energy savings, plus
//! the CO2 stored in the tree so far. All values in pounds.

use super::{FactorValue, LBS_PER_KG};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Co2Stats {
    pub sequestered: FactorValue,
    pub avoided: FactorValue,
    pub stored: FactorValue,
    /// sequestered + avoided
    pub reduced: FactorValue,
}

/// Build CO2 stats from the three factor values (kg)
pub fn co2_from_factors(sequestered_kg: FactorValue, avoided_kg: FactorValue, stored_kg: FactorValue) -> Co2Stats {
    let sequestered = sequestered_kg.scale(LBS_PER_KG);
    let avoided = avoided_kg.scale(LBS_PER_KG);

    Co2Stats {
        sequestered,
        avoided,
        stored: stored_kg.scale(LBS_PER_KG),
        reduced: sequestered + avoided,
    }
}
