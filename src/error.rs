//! Error type for benefit calculations
//!
//! Every structural problem aborts the whole calculation. Missing species names
//! and missing conversions are not errors; they surface as `None`.

use polars::prelude::PolarsError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BenefitError {
    #[error("Invalid region {0}")]
    InvalidRegion(String),

    #[error("Invalid factor, {factor}, for region {region}")]
    InvalidFactor { region: String, factor: String },

    /// Breakpoints and values disagree in length (malformed source table)
    #[error("break and values arrays should be the same length\n{breakpoints:?} and {values:?}")]
    ShapeMismatch {
        breakpoints: Vec<f64>,
        values: Vec<f64>,
    },

    #[error("Could not find data for factor {factor} in region {region} for species {species_code}")]
    MissingSpeciesData {
        region: String,
        factor: String,
        species_code: String,
    },

    #[error("Factor table has no DBH breakpoints")]
    EmptyCurve,

    #[error("DBH must be a number, got {0}")]
    InvalidDbh(f64),

    #[error("Invalid species query: {0}")]
    InvalidSpeciesQuery(String),

    #[error("Failed to read {path:?}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to load CSV {path:?}")]
    Csv {
        path: PathBuf,
        #[source]
        source: PolarsError,
    },
}

pub type Result<T> = std::result::Result<T, BenefitError>;
