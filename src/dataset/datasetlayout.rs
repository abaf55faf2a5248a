use std::fmt;
use std::str::FromStr;

use serde::{
    Deserialize,
    Serialize
};
use thiserror::Error;

use crate::math::number::Complex64;

pub const ROW_WIDTH: usize = 7;

/// Frequencies (GHz) tabulated by the Pocklington boundary-element runs.
pub const POCKLINGTON_FREQUENCIES_GHZ: [f64; 10] =
    [3., 6., 10., 15., 20., 30., 40., 60., 80., 100.];

/// Frequencies (GHz) tabulated by the free-space current runs.
pub const FREE_SPACE_FREQUENCIES_GHZ: [f64; 11] =
    [3., 3.5, 6., 10., 15., 20., 30., 40., 60., 80., 100.];

#[derive(Debug, Error, PartialEq)]
#[error("unknown dataset layout '{0}', expected `pocklington` or `free_space`")]
pub struct ParseLayoutError(String);

/// Column order of a current-distribution table.
#[derive(PartialEq, Eq, Clone, Copy, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DatasetLayout {
    /// `[L, N, r, f, x, ireal, iimag]`
    #[default]
    Pocklington,
    /// `[N, f, L, V, x, ireal, iimag]`
    FreeSpace
}

impl DatasetLayout {
    pub fn supported_frequencies_ghz(&self) -> &'static [f64] {
        match self {
            DatasetLayout::Pocklington => &POCKLINGTON_FREQUENCIES_GHZ,
            DatasetLayout::FreeSpace   => &FREE_SPACE_FREQUENCIES_GHZ
        }
    }

    pub fn is_supported(&self, frequency_hz: f64) -> bool {
        let ghz = frequency_hz / 1e9;
        self.supported_frequencies_ghz()
            .iter()
            .any(|&f| same_frequency(f, ghz))
    }

    fn frequency_column(&self) -> usize {
        match self {
            DatasetLayout::Pocklington => 3,
            DatasetLayout::FreeSpace   => 1
        }
    }

    /// Frequency stored in a row, in Hz.
    pub(crate) fn row_frequency(&self, row: &[f64]) -> f64 {
        row[self.frequency_column()]
    }

    pub(crate) fn parse_row(&self, row: &[f64]) -> CurrentSample {
        let current = Complex64::new(row[5], row[6]);
        match self {
            DatasetLayout::Pocklington => CurrentSample {
                length: row[0],
                segments: row[1],
                radius: Some(row[2]),
                voltage: None,
                frequency: row[3],
                x: row[4],
                current,
            },
            DatasetLayout::FreeSpace => CurrentSample {
                segments: row[0],
                frequency: row[1],
                length: row[2],
                voltage: Some(row[3]),
                radius: None,
                x: row[4],
                current,
            }
        }
    }
}

impl fmt::Display for DatasetLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DatasetLayout::Pocklington => write!(f, "pocklington"),
            DatasetLayout::FreeSpace   => write!(f, "free_space")
        }
    }
}

impl FromStr for DatasetLayout {
    type Err = ParseLayoutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pocklington" => Ok(DatasetLayout::Pocklington),
            "free_space" | "free-space" => Ok(DatasetLayout::FreeSpace),
            _ => Err(ParseLayoutError(s.to_owned()))
        }
    }
}

/// Relative comparison for frequencies given as floating point values.
pub(crate) fn same_frequency(lhs: f64, rhs: f64) -> bool {
    (lhs - rhs).abs() <= 1e-9 * lhs.abs().max(rhs.abs())
}

/// One row of a current-distribution table.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CurrentSample {
    /// Wire length `L`.
    pub length: f64,
    /// Number of boundary elements `N`.
    pub segments: f64,
    /// Wire radius `r` (Pocklington layout only).
    pub radius: Option<f64>,
    /// Feed voltage `V` (free-space layout only).
    pub voltage: Option<f64>,
    /// Operating frequency in Hz.
    pub frequency: f64,
    /// Position along the wire.
    pub x: f64,
    pub current: Complex64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_names_parse_and_display() {
        assert_eq!("pocklington".parse::<DatasetLayout>(), Ok(DatasetLayout::Pocklington));
        assert_eq!("free-space".parse::<DatasetLayout>(), Ok(DatasetLayout::FreeSpace));
        assert_eq!(DatasetLayout::FreeSpace.to_string(), "free_space");
        assert_eq!(
            "dipole".parse::<DatasetLayout>(),
            Err(ParseLayoutError("dipole".to_owned()))
        );
    }

    #[test]
    fn rows_follow_their_layout() {
        let row = [41.0, 1e10, 0.015, 1.0, 0.002, 0.5, -0.25];
        let sample = DatasetLayout::FreeSpace.parse_row(&row);
        assert_eq!(DatasetLayout::FreeSpace.row_frequency(&row), 1e10);
        assert_eq!(sample.length, 0.015);
        assert_eq!(sample.voltage, Some(1.0));
        assert_eq!(sample.current, Complex64::new(0.5, -0.25));
        assert!(DatasetLayout::Pocklington.is_supported(3e9));
        assert!(!DatasetLayout::Pocklington.is_supported(3.5e9));
    }
}
