//! Permissive cell parsing for factor tables
//!
//! Source tables come from spreadsheet exports. A bad cell must never take a
//! row (or the table) down with it; it is read as zero instead.

/// Parse a numeric cell, falling back to 0.0
pub fn parse_or_zero(cell: &str) -> f64 {
    cell.trim().parse::<f64>().unwrap_or(0.0)
}

/// Cells up to (not including) the first empty one
///
/// Exports pad short rows with empty cells; anything from the first empty
/// cell onwards is dropped. `None` counts as empty.
pub fn take_until_empty<'a, I>(cells: I) -> impl Iterator<Item = &'a str>
where
    I: IntoIterator<Item = Option<&'a str>>,
{
    cells
        .into_iter()
        .map(|cell| cell.unwrap_or(""))
        .take_while(|cell| !cell.is_empty())
}

/// Parse a row of cells into numbers, trimming the padding first
pub fn parse_row<'a, I>(cells: I) -> Vec<f64>
where
    I: IntoIterator<Item = Option<&'a str>>,
{
    take_until_empty(cells).map(parse_or_zero).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_or_zero() {
        assert_eq!(parse_or_zero("12.5"), 12.5);
        assert_eq!(parse_or_zero(" 3 "), 3.0);
        assert_eq!(parse_or_zero("1e2"), 100.0);
        assert_eq!(parse_or_zero("n/a"), 0.0);
        assert_eq!(parse_or_zero(""), 0.0);
        assert_eq!(parse_or_zero("-0.25\r"), -0.25);
    }

    #[test]
    fn test_parse_row_trims_trailing_padding() {
        let row = [Some("1"), Some("2.5"), Some("x"), None, Some("")];
        assert_eq!(parse_row(row), vec![1.0, 2.5, 0.0]);
    }

    #[test]
    fn test_parse_row_stops_at_first_gap() {
        let row = [Some("1"), Some(""), Some("3")];
        assert_eq!(parse_row(row), vec![1.0]);
    }

    #[test]
    fn test_parse_row_empty() {
        let row: [Option<&str>; 0] = [];
        assert!(parse_row(row).is_empty());
        assert!(parse_row([None, None]).is_empty());
    }
}
