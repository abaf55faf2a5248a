use std::fs::File;
use std::io::{
    BufReader,
    Read
};
use std::path::{
    Path,
    PathBuf
};

use serde::{
    Deserialize,
    Serialize
};
use thiserror::Error;
use tracing::{
    debug,
    info
};

use crate::dataset::datasetlayout::{
    same_frequency,
    CurrentSample,
    DatasetLayout,
    ROW_WIDTH
};
use crate::math::number::Complex64;

pub const DEFAULT_TABLE: &str = "output";

// ─────────────────────────────────────────────
// DatasetError
// ─────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("{ghz} GHz is not supported. Supported frequency values: {supported:?}")]
    UnsupportedFrequency {
        ghz: f64,
        supported: &'static [f64]
    },
    #[error("table '{0}' not found in dataset")]
    MissingTable(String),
    #[error("row {index} has {width} columns, expected {ROW_WIDTH}")]
    MalformedRow {
        index: usize,
        width: usize
    },
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error)
}

// ─────────────────────────────────────────────
// DatasetSource
// ─────────────────────────────────────────────

/// Where a current-distribution table lives and how it is laid out.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DatasetSource {
    pub path: PathBuf,
    #[serde(default)]
    pub layout: DatasetLayout,
    #[serde(default = "DatasetSource::default_table")]
    pub table: String,
}

impl DatasetSource {
    fn default_table() -> String {
        DEFAULT_TABLE.to_owned()
    }

    pub fn new<P: Into<PathBuf>>(path: P, layout: DatasetLayout) -> DatasetSource {
        DatasetSource { path: path.into(), layout, table: Self::default_table() }
    }

    pub fn load(&self, frequency_hz: f64) -> Result<CurrentDistribution, DatasetError> {
        check_frequency(self.layout, frequency_hz)?;
        let file = File::open(&self.path)?;
        info!(path = %self.path.display(), layout = %self.layout, "loading current distribution");
        read_antenna_el_properties(BufReader::new(file), self.layout, &self.table, frequency_hz)
    }
}

// ─────────────────────────────────────────────
// CurrentDistribution
// ─────────────────────────────────────────────

/// Rows of one operating frequency, renumbered from zero in file order.
#[derive(Clone, Debug, PartialEq)]
pub struct CurrentDistribution {
    layout: DatasetLayout,
    frequency: f64,
    samples: Vec<CurrentSample>,
}

impl CurrentDistribution {
    pub fn layout(&self) -> DatasetLayout {
        self.layout
    }

    /// Requested frequency in Hz.
    pub fn frequency(&self) -> f64 {
        self.frequency
    }

    pub fn samples(&self) -> &[CurrentSample] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn positions(&self) -> Vec<f64> {
        self.samples.iter().map(|s| s.x).collect()
    }

    pub fn currents(&self) -> Vec<Complex64> {
        self.samples.iter().map(|s| s.current).collect()
    }
}

// ─────────────────────────────────────────────
// Loading
// ─────────────────────────────────────────────

fn check_frequency(layout: DatasetLayout, frequency_hz: f64) -> Result<(), DatasetError> {
    if layout.is_supported(frequency_hz) {
        Ok(())
    } else {
        Err(DatasetError::UnsupportedFrequency {
            ghz: frequency_hz / 1e9,
            supported: layout.supported_frequencies_ghz(),
        })
    }
}

/// Current distribution over the thin-wire half-dipole antenna at
/// `frequency_hz`, read from the default `output` table of a JSON dataset.
///
/// The tabulated currents come from solving the Pocklington
/// integro-differential equation with the indirect boundary element method.
pub fn load_antenna_el_properties<P: AsRef<Path>>(
    path: P,
    layout: DatasetLayout,
    frequency_hz: f64,
) -> Result<CurrentDistribution, DatasetError> {
    DatasetSource::new(path.as_ref(), layout).load(frequency_hz)
}

pub fn read_antenna_el_properties<R: Read>(
    reader: R,
    layout: DatasetLayout,
    table: &str,
    frequency_hz: f64,
) -> Result<CurrentDistribution, DatasetError> {
    check_frequency(layout, frequency_hz)?;

    let mut document: serde_json::Map<String, serde_json::Value> = serde_json::from_reader(reader)?;
    let raw = document
        .remove(table)
        .ok_or_else(|| DatasetError::MissingTable(table.to_owned()))?;
    let rows: Vec<Vec<f64>> = serde_json::from_value(raw)?;

    if let Some((index, row)) = rows.iter().enumerate().find(|(_, row)| row.len() != ROW_WIDTH) {
        return Err(DatasetError::MalformedRow { index, width: row.len() });
    }

    let samples: Vec<CurrentSample> = rows
        .iter()
        .filter(|row| same_frequency(layout.row_frequency(row), frequency_hz))
        .map(|row| layout.parse_row(row))
        .collect();
    debug!(total = rows.len(), selected = samples.len(), frequency_hz, "filtered dataset rows");

    Ok(CurrentDistribution { layout, frequency: frequency_hz, samples })
}
