//! Piecewise-Linear DBH Interpolation
//!
//! Factor tables sample a benefit at a handful of DBH breakpoints. Between
//! breakpoints the benefit is linear; below the first breakpoint it ramps up
//! from the origin; beyond the last breakpoint it saturates.

use crate::error::{BenefitError, Result};

/// Evaluate the line through (x1, y1) and (x2, y2) at `x`
pub fn linear_interp(x1: f64, y1: f64, x2: f64, y2: f64, x: f64) -> f64 {
    let m = (y2 - y1) / (x2 - x1);
    let b = y1 - m * x1;

    m * x + b
}

/// Interpolate `values` sampled at `breakpoints` at DBH `x`
///
/// # Algorithm
/// 1. Negative DBH is treated as 0
/// 2. Below the first breakpoint: line through (0, 0) and the first sample
/// 3. Above the last breakpoint: the last value, unchanged
/// 4. Otherwise: line through the samples bounding the half-open interval
///    `[breakpoints[i-1], breakpoints[i])` that contains `x`
///
/// # Errors
/// `ShapeMismatch` if the slices differ in length, `EmptyCurve` if there are
/// no breakpoints, `InvalidDbh` if `x` is NaN.
pub fn piecewise_linear(breakpoints: &[f64], values: &[f64], x: f64) -> Result<f64> {
    check_shape(breakpoints, values)?;
    eval_checked(breakpoints, values, x)
}

/// Sum of `piecewise_linear` over many DBH values against one curve
///
/// The shape is validated once; each lookup is a binary search.
pub fn sum_piecewise_linear(breakpoints: &[f64], values: &[f64], xs: &[f64]) -> Result<f64> {
    check_shape(breakpoints, values)?;

    let mut total = 0.0;
    for &x in xs {
        total += eval_checked(breakpoints, values, x)?;
    }

    Ok(total)
}

fn check_shape(breakpoints: &[f64], values: &[f64]) -> Result<()> {
    if breakpoints.len() != values.len() {
        return Err(BenefitError::ShapeMismatch {
            breakpoints: breakpoints.to_vec(),
            values: values.to_vec(),
        });
    }
    if breakpoints.is_empty() {
        return Err(BenefitError::EmptyCurve);
    }
    Ok(())
}

/// Caller guarantees equal, non-zero lengths
fn eval_checked(breakpoints: &[f64], values: &[f64], x: f64) -> Result<f64> {
    if x.is_nan() {
        return Err(BenefitError::InvalidDbh(x));
    }

    let x = if x < 0.0 { 0.0 } else { x };
    let last = breakpoints.len() - 1;

    if x < breakpoints[0] {
        return Ok(linear_interp(0.0, 0.0, breakpoints[0], values[0], x));
    }

    // x == last breakpoint falls outside every half-open interval
    if x >= breakpoints[last] {
        return Ok(values[last]);
    }

    // First index whose breakpoint is strictly above x; 1..=last here
    let i = breakpoints.partition_point(|&b| b <= x);

    Ok(linear_interp(
        breakpoints[i - 1],
        values[i - 1],
        breakpoints[i],
        values[i],
        x,
    ))
}
