//! Factor Conversions
//!
//! Caller-supplied multipliers that turn a raw physical benefit (kWh, m³, kg)
//! into the caller's own unit, usually money saved. The registry is fixed once
//! the engine is built.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Immutable factor → multiplier map
///
/// A factor with no entry has no converted value at all, which is not the
/// same as a multiplier of zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConversionRegistry {
    multipliers: FxHashMap<String, f64>,
}

impl ConversionRegistry {
    /// Registry with no conversions
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder step: register `multiplier` for `factor`
    pub fn with(mut self, factor: impl Into<String>, multiplier: f64) -> Self {
        self.multipliers.insert(factor.into(), multiplier);
        self
    }

    /// Same multiplier for every listed factor
    pub fn uniform<'a>(factors: impl IntoIterator<Item = &'a str>, multiplier: f64) -> Self {
        factors.into_iter().map(|f| (f.to_string(), multiplier)).collect()
    }

    pub fn multiplier(&self, factor: &str) -> Option<f64> {
        self.multipliers.get(factor).copied()
    }

    /// `raw * multiplier`, or `None` if `factor` has no conversion
    pub fn convert(&self, factor: &str, raw: f64) -> Option<f64> {
        self.multiplier(factor).map(|m| raw * m)
    }

    pub fn len(&self) -> usize {
        self.multipliers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.multipliers.is_empty()
    }
}

impl FromIterator<(String, f64)> for ConversionRegistry {
    fn from_iter<T: IntoIterator<Item = (String, f64)>>(iter: T) -> Self {
        Self {
            multipliers: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_factor_is_not_zero() {
        let registry = ConversionRegistry::new().with("electricity", 0.0);

        assert_eq!(registry.convert("electricity", 12.0), Some(0.0));
        assert_eq!(registry.convert("natural_gas", 12.0), None);
    }

    #[test]
    fn test_uniform_and_override() {
        let registry = ConversionRegistry::uniform(["bvoc", "natural_gas"], 2.0)
            .with("natural_gas", 0.5);

        assert_eq!(registry.len(), 2);
        assert_eq!(registry.multiplier("bvoc"), Some(2.0));
        assert_eq!(registry.convert("natural_gas", 4.0), Some(2.0));
    }

    #[test]
    fn test_deserialize_plain_map() {
        let registry: ConversionRegistry =
            serde_json::from_str(r#"{"electricity": 0.1316, "co2_avoided": 0.0045}"#).unwrap();

        assert_eq!(registry.multiplier("electricity"), Some(0.1316));
        assert_eq!(registry.multiplier("bvoc"), None);
    }
}
