//! Stormwater Management
//!
//! Rainfall intercepted by the canopy, reported in gallons.

use super::{FactorValue, GAL_PER_CUBIC_M};

/// Convert `hydro_interception` (m³) to gallons on both sides
pub fn stormwater_from_factor(hydro_interception_m3: FactorValue) -> FactorValue {
    hydro_interception_m3.scale(GAL_PER_CUBIC_M)
}
