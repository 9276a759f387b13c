//! Cell addressing in spreadsheet notation.
//!
//! This module converts between grid coordinates and the labels used in
//! spreadsheets:
//! - column letters (`"A"`, `"Z"`, `"AA"`, bijective base 26)
//! - positions (`"A1"`, `"AA11"`)
//! - ranges (`"A1:C55"`)
//!
//! All numeric coordinates are 0-based.

use crate::common::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Convert column letters to a 0-based column index.
///
/// Only uppercase `A`-`Z` are accepted: A=0, B=1, ..., Z=25, AA=26, etc.
///
/// # Examples
///
/// ```
/// use docnav::table::to_column_num;
///
/// assert_eq!(to_column_num("A").unwrap(), 0);
/// assert_eq!(to_column_num("Z").unwrap(), 25);
/// assert_eq!(to_column_num("AA").unwrap(), 26);
/// assert_eq!(to_column_num("ZZ").unwrap(), 701);
/// assert!(to_column_num("a").is_err());
/// ```
pub fn to_column_num(letters: &str) -> Result<u32> {
    if letters.is_empty() {
        return Err(Error::InvalidArgument(
            "Column value is empty".to_string(),
        ));
    }

    let mut column = 0u32;
    for b in letters.bytes() {
        if !b.is_ascii_uppercase() {
            return Err(Error::InvalidArgument(format!(
                "Illegal character in column '{}'",
                letters
            )));
        }
        column = column
            .checked_mul(26)
            .and_then(|c| c.checked_add((b - b'A') as u32 + 1))
            .ok_or_else(|| Error::InvalidArgument(format!("Column '{}' is too large", letters)))?;
    }

    Ok(column - 1)
}

/// Convert a 0-based column index to column letters.
///
/// # Examples
///
/// ```
/// use docnav::table::to_column_string;
///
/// assert_eq!(to_column_string(0), "A");
/// assert_eq!(to_column_string(25), "Z");
/// assert_eq!(to_column_string(26), "AA");
/// assert_eq!(to_column_string(702), "AAA");
/// ```
pub fn to_column_string(column: u32) -> String {
    // u32::MAX + 1 needs 7 letters
    let mut letters = [0u8; 7];
    let mut start = letters.len();
    let mut remaining = column as u64 + 1;

    while remaining > 0 {
        start -= 1;
        letters[start] = b'A' + ((remaining - 1) % 26) as u8;
        remaining = (remaining - 1) / 26;
    }

    letters[start..].iter().map(|&b| b as char).collect()
}

/// Convert a 1-based row label to a 0-based row index.
///
/// # Examples
///
/// ```
/// use docnav::table::to_row_num;
///
/// assert_eq!(to_row_num("1").unwrap(), 0);
/// assert!(to_row_num("0").is_err());
/// ```
pub fn to_row_num(digits: &str) -> Result<u32> {
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(Error::InvalidArgument(format!(
            "Malformed row number '{}'",
            digits
        )));
    }
    let row: u32 = digits.parse().map_err(|_| {
        Error::InvalidArgument(format!("Row number '{}' is out of range", digits))
    })?;
    if row == 0 {
        return Err(Error::InvalidArgument(
            "Row number must be >= 1".to_string(),
        ));
    }
    Ok(row - 1)
}

/// Convert a 0-based row index to its 1-based label.
pub fn to_row_string(row: u32) -> String {
    let mut buffer = itoa::Buffer::new();
    buffer.format(row as u64 + 1).to_string()
}

/// A grid coordinate, both axes 0-based.
///
/// # Examples
///
/// ```
/// use docnav::table::TablePosition;
///
/// let position = TablePosition::new(10, 26);
/// assert_eq!(position.to_string(), "AA11");
///
/// let position: TablePosition = "B3".parse().unwrap();
/// assert_eq!(position.row(), 2);
/// assert_eq!(position.column(), 1);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TablePosition {
    row: u32,
    column: u32,
}

impl TablePosition {
    #[inline]
    pub const fn new(row: u32, column: u32) -> Self {
        Self { row, column }
    }

    /// Get row index (0-indexed)
    #[inline]
    pub const fn row(&self) -> u32 {
        self.row
    }

    /// Get column index (0-indexed)
    #[inline]
    pub const fn column(&self) -> u32 {
        self.column
    }

    /// Parse spreadsheet notation such as `"A1"` or `"AA11"`.
    ///
    /// The text is split at its first digit: the prefix is the column, the
    /// suffix the 1-based row.
    pub fn parse(s: &str) -> Result<Self> {
        let split = s.bytes().position(|b| b.is_ascii_digit()).ok_or_else(|| {
            Error::InvalidArgument(format!("Malformed table position '{}'", s))
        })?;
        let (letters, digits) = s.split_at(split);
        let row = to_row_num(digits)?;
        let column = to_column_num(letters)?;
        Ok(Self::new(row, column))
    }
}

impl FromStr for TablePosition {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for TablePosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut buffer = itoa::Buffer::new();
        f.write_str(&to_column_string(self.column))?;
        f.write_str(buffer.format(self.row as u64 + 1))
    }
}

/// A half-open rectangle `[from, to)` of grid coordinates.
///
/// # Examples
///
/// ```
/// use docnav::table::{TablePosition, TableRange};
///
/// let range: TableRange = "A1:C55".parse().unwrap();
/// assert_eq!(range.from(), TablePosition::new(0, 0));
/// assert_eq!(range.to(), TablePosition::new(54, 2));
/// assert_eq!(range.to_string(), "A1:C55");
///
/// assert!(range.contains(TablePosition::new(53, 1)));
/// assert!(!range.contains(TablePosition::new(54, 1)));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TableRange {
    from: TablePosition,
    to: TablePosition,
}

impl TableRange {
    #[inline]
    pub const fn new(from: TablePosition, to: TablePosition) -> Self {
        Self { from, to }
    }

    /// Inclusive start corner
    #[inline]
    pub const fn from(&self) -> TablePosition {
        self.from
    }

    /// Exclusive end corner
    #[inline]
    pub const fn to(&self) -> TablePosition {
        self.to
    }

    /// Number of rows covered.
    #[inline]
    pub fn rows(&self) -> u32 {
        self.to.row.saturating_sub(self.from.row)
    }

    /// Number of columns covered.
    #[inline]
    pub fn columns(&self) -> u32 {
        self.to.column.saturating_sub(self.from.column)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rows() == 0 || self.columns() == 0
    }

    /// Per-axis half-open containment test.
    #[inline]
    pub fn contains(&self, position: TablePosition) -> bool {
        self.from.column <= position.column
            && position.column < self.to.column
            && self.from.row <= position.row
            && position.row < self.to.row
    }

    /// Overlap of two ranges; empty (at the clamped start) when disjoint.
    pub fn intersection(&self, other: &TableRange) -> TableRange {
        let from = TablePosition::new(
            self.from.row.max(other.from.row),
            self.from.column.max(other.from.column),
        );
        let to = TablePosition::new(
            self.to.row.min(other.to.row).max(from.row),
            self.to.column.min(other.to.column).max(from.column),
        );
        TableRange::new(from, to)
    }

    /// Parse `"A1:B3"` notation.
    pub fn parse(s: &str) -> Result<Self> {
        let colon = memchr::memchr(b':', s.as_bytes()).ok_or_else(|| {
            Error::InvalidArgument(format!(
                "Invalid range format '{}', expected 'A1:B3'",
                s
            ))
        })?;
        let from = TablePosition::parse(&s[..colon])?;
        let to = TablePosition::parse(&s[colon + 1..])?;
        Ok(Self::new(from, to))
    }
}

impl FromStr for TableRange {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for TableRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.from, self.to)
    }
}

/// Size of a table grid.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TableDimensions {
    pub rows: u32,
    pub columns: u32,
}

impl TableDimensions {
    #[inline]
    pub const fn new(rows: u32, columns: u32) -> Self {
        Self { rows, columns }
    }

    /// The whole grid as a range anchored at `A1`.
    #[inline]
    pub const fn to_range(&self) -> TableRange {
        TableRange::new(
            TablePosition::new(0, 0),
            TablePosition::new(self.rows, self.columns),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_to_column_num() {
        assert_eq!(to_column_num("A").unwrap(), 0);
        assert_eq!(to_column_num("B").unwrap(), 1);
        assert_eq!(to_column_num("Z").unwrap(), 25);
        assert_eq!(to_column_num("AA").unwrap(), 26);
        assert_eq!(to_column_num("AZ").unwrap(), 51);
        assert_eq!(to_column_num("BA").unwrap(), 52);
        assert_eq!(to_column_num("ZZ").unwrap(), 701);
        assert_eq!(to_column_num("AAA").unwrap(), 702);

        // Errors
        assert!(to_column_num("").is_err());
        assert!(to_column_num("a").is_err());
        assert!(to_column_num("A1").is_err());
        assert!(to_column_num("ZZZZZZZZ").is_err());
    }

    #[test]
    fn test_to_column_string() {
        assert_eq!(to_column_string(0), "A");
        assert_eq!(to_column_string(25), "Z");
        assert_eq!(to_column_string(26), "AA");
        assert_eq!(to_column_string(51), "AZ");
        assert_eq!(to_column_string(52), "BA");
        assert_eq!(to_column_string(701), "ZZ");
        assert_eq!(to_column_string(702), "AAA");
        assert_eq!(to_column_num(&to_column_string(u32::MAX - 1)).unwrap(), u32::MAX - 1);
    }

    #[test]
    fn test_position_parse() {
        assert_eq!(TablePosition::parse("A1").unwrap(), TablePosition::new(0, 0));
        assert_eq!(TablePosition::parse("AA11").unwrap(), TablePosition::new(10, 26));
        assert_eq!(TablePosition::parse("ZZ1").unwrap(), TablePosition::new(0, 701));
        assert_eq!(TablePosition::parse("AAA1").unwrap(), TablePosition::new(0, 702));

        // Errors
        assert!(TablePosition::parse("A0").is_err());
        assert!(TablePosition::parse("1A").is_err());
        assert!(TablePosition::parse("A").is_err());
        assert!(TablePosition::parse("A1B").is_err());
        assert!(matches!(
            TablePosition::parse(""),
            Err(Error::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_range_parse() {
        let range = TableRange::parse("A1:C55").unwrap();
        assert_eq!(range.from(), TablePosition::new(0, 0));
        assert_eq!(range.to(), TablePosition::new(54, 2));
        assert_eq!(range.to_string(), "A1:C55");
        assert_eq!(range.rows(), 54);
        assert_eq!(range.columns(), 2);

        assert!(TableRange::parse("A1").is_err());
        assert!(TableRange::parse("A1:").is_err());
        assert!(TableRange::parse(":B3").is_err());
    }

    #[test]
    fn test_range_contains_is_half_open() {
        let range = TableRange::parse("B2:D5").unwrap();
        assert!(range.contains(TablePosition::new(1, 1)));
        assert!(range.contains(TablePosition::new(3, 2)));
        assert!(!range.contains(TablePosition::new(4, 2)));
        assert!(!range.contains(TablePosition::new(3, 3)));
        assert!(!range.contains(TablePosition::new(0, 1)));
    }

    #[test]
    fn test_range_intersection() {
        let a = TableRange::new(TablePosition::new(0, 0), TablePosition::new(10, 10));
        let b = TableRange::new(TablePosition::new(5, 8), TablePosition::new(20, 20));
        let overlap = a.intersection(&b);
        assert_eq!(overlap.from(), TablePosition::new(5, 8));
        assert_eq!(overlap.to(), TablePosition::new(10, 10));

        let c = TableRange::new(TablePosition::new(30, 30), TablePosition::new(40, 40));
        assert!(a.intersection(&c).is_empty());
    }

    proptest! {
        #[test]
        fn prop_position_round_trip(s in "[A-Z]{1,4}[1-9][0-9]{0,6}") {
            let position = TablePosition::parse(&s).unwrap();
            prop_assert_eq!(position.to_string(), s);
        }

        #[test]
        fn prop_column_round_trip(column in 0u32..u32::MAX) {
            prop_assert_eq!(to_column_num(&to_column_string(column)).unwrap(), column);
        }
    }
}
