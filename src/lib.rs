//! Urban Tree Eco-Benefits
//!
//! Computes energy, stormwater, CO2 and air quality benefits of urban trees
//! from per-region lookup tables indexed by species and trunk diameter (DBH).
//!
//! Module layout:
//! - `data`: Table discovery and cached CSV loading with Polars
//! - `species`: Scientific name → species code resolution
//! - `utils/`: Interpolation, permissive parsing, ignore-None sums
//! - `metrics/`: Derived metrics (energy, stormwater, CO2, air quality)
//! - `calculator`: The `BenefitCalculator` entry point
//!
//! ```no_run
//! use eco_benefits::{BenefitCalculator, Observation, SpeciesQuery};
//!
//! # fn main() -> eco_benefits::Result<()> {
//! let calculator = BenefitCalculator::new("data");
//! let query = SpeciesQuery::new("cedrus").with_species("atlantica");
//!
//! if let Some(code) = calculator.resolve_species("NoEastXXX", &query)? {
//!     let trees = [Observation::new(code, 40.0)];
//!     let energy = calculator.energy_conserved("NoEastXXX", &trees)?;
//!     println!("{:.1} kWh", energy.raw);
//! }
//! # Ok(())
//! # }
//! ```

pub mod cache;
pub mod calculator;
pub mod config;
pub mod conversion;
pub mod data;
pub mod error;
pub mod metrics;
pub mod species;
pub mod utils;

// Re-export commonly used types
pub use calculator::{BenefitCalculator, Observation};
pub use config::BenefitsConfig;
pub use conversion::ConversionRegistry;
pub use data::{DataStore, FactorTable};
pub use error::{BenefitError, Result};
pub use metrics::{factors, AirQualityStats, BenefitReport, Co2Stats, FactorValue};
pub use species::{SpeciesQuery, SpeciesRecord, SpeciesResolver};
pub use utils::{linear_interp, piecewise_linear, sum_ignore_none};
