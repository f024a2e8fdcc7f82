//! Ignore-None Summation
//!
//! Converted benefit values are optional: a factor without a registered
//! multiplier has no converted value. Totals across factors skip the missing
//! values, and a total with nothing to add stays missing.

/// Sum the present values; `None` if there are none
///
/// # Example
/// ```
/// use eco_benefits::utils::sum_ignore_none;
///
/// assert_eq!(sum_ignore_none([Some(1.0), None, Some(2.0)]), Some(3.0));
/// assert_eq!(sum_ignore_none([None, None]), None);
/// ```
pub fn sum_ignore_none<I>(values: I) -> Option<f64>
where
    I: IntoIterator<Item = Option<f64>>,
{
    values
        .into_iter()
        .flatten()
        .fold(None, |total, v| Some(total.unwrap_or(0.0) + v))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_present() {
        assert_eq!(sum_ignore_none([Some(1.5), Some(2.5)]), Some(4.0));
    }

    #[test]
    fn test_some_missing() {
        assert_eq!(sum_ignore_none([None, Some(2.0), None]), Some(2.0));
    }

    #[test]
    fn test_all_missing_or_empty() {
        assert_eq!(sum_ignore_none([None, None]), None);
        assert_eq!(sum_ignore_none(std::iter::empty()), None);
    }

    #[test]
    fn test_zero_is_a_value() {
        assert_eq!(sum_ignore_none([Some(0.0), None]), Some(0.0));
    }
}
