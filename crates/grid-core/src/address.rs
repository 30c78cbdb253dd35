//! A1-style cell references
//!
//! Column letters use bijective base-26: every letter is a digit from 1 (A)
//! to 26 (Z) and there is no zero digit, so "Z" is followed by "AA" rather
//! than "BA". The accumulated 1-based value is shifted down by one to get the
//! zero-based column index.

use crate::error::{Error, Result};
use std::fmt;
use std::str::FromStr;

/// A parsed cell reference such as `B3`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellRef {
    /// Column letters, upper-cased
    pub letters: String,
    /// Row number (1-based)
    pub row: u32,
}

impl CellRef {
    /// Zero-based (row, column) indices for this reference
    pub fn indices(&self) -> Result<(usize, usize)> {
        to_indices(&self.letters, self.row)
    }
}

impl FromStr for CellRef {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let (letters, row) = split_reference(s)?;
        Ok(Self { letters, row })
    }
}

impl fmt::Display for CellRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.letters, self.row)
    }
}

/// Split a reference into upper-cased column letters and its row number.
///
/// The whole string must be ASCII letters followed by a row number with no
/// leading zero. Anything else is an `InvalidReference`.
pub fn split_reference(reference: &str) -> Result<(String, u32)> {
    let invalid = || Error::InvalidReference(reference.to_string());

    let digits_at = reference
        .find(|c: char| !c.is_ascii_alphabetic())
        .ok_or_else(invalid)?;
    let (letters, digits) = reference.split_at(digits_at);

    if letters.is_empty() || digits.starts_with('0') {
        return Err(invalid());
    }
    if !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }

    // Overflowing u32 is the only way a digit run can fail to parse here
    let row: u32 = digits.parse().map_err(|_| invalid())?;

    Ok((letters.to_ascii_uppercase(), row))
}

/// Translate column letters and a 1-based row number into zero-based
/// (row, column) indices.
pub fn to_indices(letters: &str, row: u32) -> Result<(usize, usize)> {
    let invalid = || Error::InvalidReference(format!("{}{}", letters, row));

    if row == 0 || letters.is_empty() {
        return Err(invalid());
    }

    let mut col: u32 = 0;
    for b in letters.bytes() {
        if !b.is_ascii_alphabetic() {
            return Err(invalid());
        }
        let digit = u32::from(b.to_ascii_uppercase() - b'A' + 1);
        col = col
            .checked_mul(26)
            .and_then(|c| c.checked_add(digit))
            .ok_or_else(invalid)?;
    }

    Ok(((row - 1) as usize, (col - 1) as usize))
}

/// Resolve a reference string straight to zero-based (row, column) indices
pub fn reference_to_indices(reference: &str) -> Result<(usize, usize)> {
    let (letters, row) = split_reference(reference)?;
    to_indices(&letters, row)
}

/// Convert a zero-based column index to letters (0 = A, 25 = Z, 26 = AA)
pub fn column_letters(index: usize) -> String {
    let mut letters = Vec::new();
    // Widened so that `usize::MAX` still has a successor
    let mut n = index as u128 + 1;

    while n > 0 {
        n -= 1;
        letters.push(b'A' + (n % 26) as u8);
        n /= 26;
    }

    letters.reverse();
    String::from_utf8(letters).unwrap_or_default()
}

/// Parse a textual 1-based row number
pub fn parse_row_number(text: &str) -> Result<i64> {
    let n: i64 = text
        .trim()
        .parse()
        .map_err(|_| Error::InvalidRowNumber(text.to_string()))?;
    row_index(n)?;
    Ok(n)
}

/// Convert a 1-based row number into a zero-based index
pub fn row_index(row: i64) -> Result<usize> {
    if row <= 0 {
        return Err(Error::InvalidRowNumber(row.to_string()));
    }
    usize::try_from(row - 1).map_err(|_| Error::InvalidRowNumber(row.to_string()))
}
