//! Utility modules for benefit calculations
//!
//! Contains shared functionality used across the engine:
//! - Interpolation: Piecewise-linear DBH curves
//! - Parsing: Permissive numeric cell parsing for table ingestion
//! - Sums: Ignore-None summation for optional converted values

pub mod interpolation;
pub mod parsing;
pub mod sums;

// Re-export commonly used functions
pub use interpolation::{linear_interp, piecewise_linear, sum_piecewise_linear};
pub use parsing::{parse_or_zero, parse_row};
pub use sums::sum_ignore_none;
