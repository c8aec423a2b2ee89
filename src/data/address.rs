//! Spreadsheet-style cell addresses ("A1", "C12", "AA3").
//!
//! Columns are letters (bijective base-26), rows are 1-based numbers. The
//! grid itself is owned by the pane; this type only parses, formats and moves.

use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellAddress {
    /// Zero-based column index (A = 0)
    pub col: u16,
    /// Zero-based row index (row "1" = 0)
    pub row: u16,
}

impl CellAddress {
    pub fn new(col: u16, row: u16) -> Self {
        Self { col, row }
    }

    /// Column label for a zero-based index: 0 -> "A", 25 -> "Z", 26 -> "AA"
    pub fn column_label(col: u16) -> String {
        let mut n = col as u32 + 1;
        let mut label = Vec::new();
        while n > 0 {
            let rem = ((n - 1) % 26) as u8;
            label.push((b'A' + rem) as char);
            n = (n - 1) / 26;
        }
        label.iter().rev().collect()
    }

    /// Move by a delta, clamped to `[0, cols) x [0, rows)`
    pub fn offset(self, d_col: i32, d_row: i32, cols: u16, rows: u16) -> Self {
        let clamp = |v: i32, max: u16| -> u16 {
            if max == 0 {
                return 0;
            }
            v.clamp(0, max as i32 - 1) as u16
        };
        Self {
            col: clamp(self.col as i32 + d_col, cols),
            row: clamp(self.row as i32 + d_row, rows),
        }
    }
}

impl fmt::Display for CellAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", Self::column_label(self.col), self.row as u32 + 1)
    }
}

impl FromStr for CellAddress {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let split = s
            .find(|c: char| c.is_ascii_digit())
            .ok_or_else(|| anyhow::anyhow!("Cell address '{}' has no row number", s))?;
        let (letters, digits) = s.split_at(split);

        if letters.is_empty() || !letters.chars().all(|c| c.is_ascii_alphabetic()) {
            anyhow::bail!("Cell address '{}' has an invalid column", s);
        }

        let mut col: u32 = 0;
        for c in letters.chars() {
            col = col * 26 + (c.to_ascii_uppercase() as u32 - 'A' as u32 + 1);
            if col > u16::MAX as u32 {
                anyhow::bail!("Column in '{}' is out of range", s);
            }
        }

        let row: u32 = digits
            .parse()
            .map_err(|_| anyhow::anyhow!("Cell address '{}' has an invalid row", s))?;
        if row == 0 || row > u16::MAX as u32 {
            anyhow::bail!("Row in '{}' is out of range", s);
        }

        Ok(Self {
            col: (col - 1) as u16,
            row: (row - 1) as u16,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_format() {
        let addr: CellAddress = "A1".parse().unwrap();
        assert_eq!(addr, CellAddress::new(0, 0));
        assert_eq!(addr.to_string(), "A1");

        let addr: CellAddress = "c12".parse().unwrap();
        assert_eq!(addr, CellAddress::new(2, 11));
        assert_eq!(addr.to_string(), "C12");

        let addr: CellAddress = "AA3".parse().unwrap();
        assert_eq!(addr.col, 26);
        assert_eq!(addr.to_string(), "AA3");
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!("".parse::<CellAddress>().is_err());
        assert!("A".parse::<CellAddress>().is_err());
        assert!("12".parse::<CellAddress>().is_err());
        assert!("A0".parse::<CellAddress>().is_err());
        assert!("A1B".parse::<CellAddress>().is_err());
    }

    #[test]
    fn test_column_labels() {
        assert_eq!(CellAddress::column_label(0), "A");
        assert_eq!(CellAddress::column_label(25), "Z");
        assert_eq!(CellAddress::column_label(26), "AA");
        assert_eq!(CellAddress::column_label(51), "AZ");
        assert_eq!(CellAddress::column_label(52), "BA");
    }

    #[test]
    fn test_offset_clamps_to_grid() {
        let addr = CellAddress::new(0, 0);
        assert_eq!(addr.offset(-1, -1, 8, 16), CellAddress::new(0, 0));
        assert_eq!(addr.offset(3, 2, 8, 16), CellAddress::new(3, 2));
        assert_eq!(addr.offset(100, 100, 8, 16), CellAddress::new(7, 15));
    }
}
