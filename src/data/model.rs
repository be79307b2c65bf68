use std::collections::{BTreeSet, HashSet};
use std::fmt;

use serde::Serialize;

// ---------------------------------------------------------------------------
// Cell – a single value in a raw source table
// ---------------------------------------------------------------------------

/// A dynamically-typed cell mirroring common dataframe dtypes.
///
/// CSV, JSON and Parquet sources all decode into this before cleaning, so
/// the cleaning rules only have to be written once.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Text(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    Null,
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Text(s) => write!(f, "{s}"),
            Cell::Integer(i) => write!(f, "{i}"),
            Cell::Float(v) => write!(f, "{v}"),
            Cell::Bool(b) => write!(f, "{b}"),
            Cell::Null => write!(f, "<null>"),
        }
    }
}

impl Cell {
    /// Whether this cell counts as a missing value.
    pub fn is_missing(&self) -> bool {
        match self {
            Cell::Null => true,
            Cell::Float(v) => v.is_nan(),
            Cell::Text(_) | Cell::Integer(_) | Cell::Bool(_) => false,
        }
    }

    /// Truncating integer conversion (`2006.0` → 2006, `82.74` → 82).
    pub fn to_truncated_i64(&self) -> Option<i64> {
        match self {
            Cell::Integer(i) => Some(*i),
            Cell::Float(v) if v.is_finite() => Some(v.trunc() as i64),
            Cell::Text(s) => {
                let s = s.trim();
                if let Ok(i) = s.parse::<i64>() {
                    return Some(i);
                }
                s.parse::<f64>()
                    .ok()
                    .filter(|v| v.is_finite())
                    .map(|v| v.trunc() as i64)
            }
            Cell::Bool(b) => Some(i64::from(*b)),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// RawTable – a source table before cleaning
// ---------------------------------------------------------------------------

/// Column names plus row-major cells. Every row has `columns.len()` cells.
#[derive(Debug, Clone, Default)]
pub struct RawTable {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
}

impl RawTable {
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }
}

// ---------------------------------------------------------------------------
// SalesRecord – one row of the cleaned dataset
// ---------------------------------------------------------------------------

/// A single game/platform sales entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SalesRecord {
    pub name: String,
    pub platform: String,
    pub year: i64,
    pub genre: String,
    /// Global sales, truncated to an integer during cleaning.
    pub global_sales: i64,
}

// ---------------------------------------------------------------------------
// SalesDataset – the complete cleaned collection
// ---------------------------------------------------------------------------

/// The cleaned, read-only dataset with pre-computed selector indices.
#[derive(Debug, Clone, Default)]
pub struct SalesDataset {
    /// All records, in source order.
    pub records: Vec<SalesRecord>,
    /// Distinct genres in order of first appearance.
    pub genres: Vec<String>,
    /// Distinct platforms in order of first appearance.
    pub platforms: Vec<String>,
    /// Sorted distinct years.
    pub years: BTreeSet<i64>,
}

impl SalesDataset {
    /// Build selector indices from cleaned records.
    pub fn from_records(records: Vec<SalesRecord>) -> Self {
        let mut genres = Vec::new();
        let mut platforms = Vec::new();
        let mut seen_genres = HashSet::new();
        let mut seen_platforms = HashSet::new();
        let mut years = BTreeSet::new();

        for rec in &records {
            if seen_genres.insert(rec.genre.as_str()) {
                genres.push(rec.genre.clone());
            }
            if seen_platforms.insert(rec.platform.as_str()) {
                platforms.push(rec.platform.clone());
            }
            years.insert(rec.year);
        }

        SalesDataset {
            records,
            genres,
            platforms,
            years,
        }
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// `(min, max)` year, or `None` for an empty dataset.
    pub fn year_bounds(&self) -> Option<(i64, i64)> {
        Some((*self.years.first()?, *self.years.last()?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(name: &str, platform: &str, year: i64, genre: &str, sales: i64) -> SalesRecord {
        SalesRecord {
            name: name.into(),
            platform: platform.into(),
            year,
            genre: genre.into(),
            global_sales: sales,
        }
    }

    #[test]
    fn null_and_nan_are_missing() {
        assert!(Cell::Null.is_missing());
        assert!(Cell::Float(f64::NAN).is_missing());
        assert!(!Cell::Text("N/A".into()).is_missing());
        assert!(!Cell::Text("Wii".into()).is_missing());
        assert!(!Cell::Integer(0).is_missing());
    }

    #[test]
    fn truncating_conversion() {
        assert_eq!(Cell::Text("2006.0".into()).to_truncated_i64(), Some(2006));
        assert_eq!(Cell::Text("82.74".into()).to_truncated_i64(), Some(82));
        assert_eq!(Cell::Float(0.99).to_truncated_i64(), Some(0));
        assert_eq!(Cell::Text("soon".into()).to_truncated_i64(), None);
    }

    #[test]
    fn indices_keep_first_appearance_order() {
        let ds = SalesDataset::from_records(vec![
            rec("A", "Wii", 2006, "Sports", 82),
            rec("B", "NES", 1985, "Platform", 40),
            rec("C", "Wii", 2008, "Racing", 35),
            rec("D", "NES", 1989, "Sports", 30),
        ]);
        assert_eq!(ds.platforms, vec!["Wii", "NES"]);
        assert_eq!(ds.genres, vec!["Sports", "Platform", "Racing"]);
        assert_eq!(ds.year_bounds(), Some((1985, 2008)));
    }

    #[test]
    fn empty_dataset_has_no_bounds() {
        let ds = SalesDataset::from_records(Vec::new());
        assert!(ds.is_empty());
        assert_eq!(ds.year_bounds(), None);
    }
}
