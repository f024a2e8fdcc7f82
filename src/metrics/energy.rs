//! Energy Conserved
//!
//! Building energy saved by tree shade and wind shielding, in kWh.

use super::{FactorValue, KWH_PER_KBTU};

/// Combine natural gas (kBTU) and electricity (kWh) into kWh
///
/// Only the raw natural gas value changes unit. Converted values are already
/// in the caller's unit, so the two converted sides are added as they are.
pub fn energy_from_factors(natural_gas_kbtu: FactorValue, electricity_kwh: FactorValue) -> FactorValue {
    natural_gas_kbtu.scale_raw(KWH_PER_KBTU) + electricity_kwh
}
