//! Reference Data Tests
//!
//! Sanity checks against the published regional tables. There is no canonical
//! benefits library to compare with, so these pin values taken from existing
//! deployments.
//!
//! Run with: ECO_BENEFITS_DATA_DIR=/path/to/data cargo test --test reference_data_tests

use approx::assert_relative_eq;
use eco_benefits::factors::{KNOWN_FACTORS, NATURAL_GAS};
use eco_benefits::metrics::KWH_PER_KBTU;
use eco_benefits::{BenefitCalculator, ConversionRegistry, Observation, SpeciesQuery};
use std::collections::BTreeSet;
use std::path::PathBuf;

fn data_dir() -> Option<PathBuf> {
    let dir = PathBuf::from(std::env::var("ECO_BENEFITS_DATA_DIR").ok()?);
    if dir.is_dir() {
        Some(dir)
    } else {
        None
    }
}

macro_rules! calculator_or_skip {
    ($conversions:expr) => {
        match data_dir() {
            Some(dir) => BenefitCalculator::with_conversions(dir, $conversions),
            None => {
                eprintln!("Skipping test (ECO_BENEFITS_DATA_DIR not set)");
                return;
            }
        }
    };
}

fn cedar_trees(calculator: &BenefitCalculator) -> Vec<Observation> {
    let code = calculator
        .resolve_species("NoEastXXX", &SpeciesQuery::new("cedrus").with_species("atlantica"))
        .unwrap()
        .expect("cedrus atlantica should be listed for NoEastXXX");

    vec![Observation::new(code, 1630.0)]
}

#[test]
fn test_regions() {
    let calculator = calculator_or_skip!(ConversionRegistry::default());

    let regions = calculator.regions().unwrap();
    assert!(regions.contains("NoEastXXX"));
    assert!(regions.len() > 1);
}

#[test]
fn test_factors() {
    let calculator = calculator_or_skip!(ConversionRegistry::default());

    let factor_sets: BTreeSet<BTreeSet<String>> = calculator
        .regions()
        .unwrap()
        .iter()
        .map(|region| calculator.factors_for_region(region).unwrap())
        .collect();

    assert_eq!(factor_sets.len(), 1);
    let factors = factor_sets.into_iter().next().unwrap();
    for factor in KNOWN_FACTORS {
        assert!(factors.contains(factor), "missing factor {}", factor);
    }
}

#[test]
fn test_species_lookup() {
    let calculator = calculator_or_skip!(ConversionRegistry::default());

    let expected = [
        ("PiedmtCLT", "BDS OTHER"),
        ("NoEastXXX", "BDS OTHER"),
        ("CaNCCoJBK", "BDS OTHER"),
        ("InlValMOD", "MAGR"),
        ("SoCalCSMA", "BDS OTHER"),
        ("GulfCoCHS", "BDS OTHER"),
        ("CenFlaXXX", "BDS OTHER"),
        ("PacfNWLOG", "BDS OTHER"),
        ("InlEmpCLM", "MAGR"),
    ];
    let magnolia = SpeciesQuery::new("Magnolia").with_species("x soulangiana");

    for region in calculator.regions().unwrap() {
        let missing = calculator
            .resolve_species(&region, &SpeciesQuery::new("Ecoputius"))
            .unwrap();
        assert_eq!(missing, None);

        let code = calculator.resolve_species(&region, &magnolia).unwrap();
        let want = expected
            .iter()
            .find(|(r, _)| *r == region)
            .map(|(_, code)| code.to_string());
        assert_eq!(code, want, "region {}", region);
    }
}

#[test]
fn test_benefit_calc() {
    let calculator = calculator_or_skip!(ConversionRegistry::default());
    let region = "NoEastXXX";
    let trees = cedar_trees(&calculator);

    let kwh = calculator.energy_conserved(region, &trees).unwrap();
    assert_eq!(kwh.raw as i64, 1896);

    let gal = calculator.stormwater_management(region, &trees).unwrap();
    assert_eq!(gal.raw as i64, 3185);

    let co2 = calculator.co2_stats(region, &trees).unwrap();
    assert_eq!(co2.reduced.raw as i64, 563);

    let aq = calculator.air_quality_stats(region, &trees).unwrap();
    assert_eq!((aq.improvement.raw * 10.0) as i64, 63);
}

#[test]
fn test_benefit_calc_with_conversions() {
    let conversions =
        ConversionRegistry::uniform(KNOWN_FACTORS, 2.0).with(NATURAL_GAS, 2.0 * KWH_PER_KBTU);
    let calculator = calculator_or_skip!(conversions);
    let region = "NoEastXXX";
    let trees = cedar_trees(&calculator);

    let kwh = calculator.energy_conserved(region, &trees).unwrap();
    assert_eq!(kwh.raw as i64, 1896);
    assert_relative_eq!(kwh.converted.unwrap(), 2.0 * kwh.raw, max_relative = 1e-9);

    let gal = calculator.stormwater_management(region, &trees).unwrap();
    assert_relative_eq!(gal.converted.unwrap(), 2.0 * gal.raw, max_relative = 1e-9);

    let co2 = calculator.co2_stats(region, &trees).unwrap();
    assert_relative_eq!(
        co2.reduced.converted.unwrap(),
        2.0 * co2.reduced.raw,
        max_relative = 1e-9
    );

    let aq = calculator.air_quality_stats(region, &trees).unwrap();
    assert_relative_eq!(
        aq.improvement.converted.unwrap(),
        2.0 * aq.improvement.raw,
        max_relative = 1e-9
    );
}
