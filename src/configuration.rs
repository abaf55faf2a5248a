use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::{
    Deserialize,
    Serialize
};
use thiserror::Error;
use tracing::debug;

use crate::dataset::antennacurrent::DatasetSource;
use crate::figure::figurestyle::{
    FigureStyle,
    FigureStyleError
};
use crate::math::differentiation::centraldifference::{
    check_step,
    DEFAULT_STEP
};
use crate::math::differentiation::differentiationerror::DifferentiationError;
use crate::math::integration::gausslegendre::{
    DEFAULT_DBLQUAD_POINTS,
    DEFAULT_QUAD_POINTS
};

#[derive(Debug, Error)]
pub enum ConfigurationError {
    #[error("io error: {0}")]
    IOError(#[from] std::io::Error),
    #[error("json parse error: {0}")]
    JsonParseError(#[from] serde_json::Error),
    #[error("quadrature `{field}` must be at least 1")]
    InvalidQuadraturePoints {
        field: &'static str
    },
    #[error(transparent)]
    Differentiation(#[from] DifferentiationError),
    #[error(transparent)]
    Figure(#[from] FigureStyleError)
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuadratureSettings {
    pub points: usize,
    pub surface_points: usize,
}

impl Default for QuadratureSettings {
    fn default() -> Self {
        QuadratureSettings {
            points: DEFAULT_QUAD_POINTS,
            surface_points: DEFAULT_DBLQUAD_POINTS,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DifferentiationSettings {
    pub eps: f64,
}

impl Default for DifferentiationSettings {
    fn default() -> Self {
        DifferentiationSettings { eps: DEFAULT_STEP }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FigureSettings {
    pub latex: bool,
    pub nrows: usize,
    pub ncols: usize,
    pub scaler: f64,
}

impl Default for FigureSettings {
    fn default() -> Self {
        let style = FigureStyle::default();
        FigureSettings {
            latex: style.latex(),
            nrows: style.nrows(),
            ncols: style.ncols(),
            scaler: style.scaler(),
        }
    }
}

/// Run settings read from a JSON file. Every section may be omitted.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Configuration {
    pub quadrature: QuadratureSettings,
    pub differentiation: DifferentiationSettings,
    pub dataset: Option<DatasetSource>,
    pub figure: FigureSettings,
}

impl Configuration {
    pub fn from_reader<P: AsRef<Path>>(file_path: P) -> Result<Configuration, ConfigurationError> {
        let file = File::open(file_path.as_ref())?;
        let reader = BufReader::new(file);
        let configuration: Configuration = serde_json::from_reader(reader)?;
        debug!(path = %file_path.as_ref().display(), "read configuration");
        configuration.validate()?;
        Ok(configuration)
    }

    pub fn from_json_str(json: &str) -> Result<Configuration, ConfigurationError> {
        let configuration: Configuration = serde_json::from_str(json)?;
        configuration.validate()?;
        Ok(configuration)
    }

    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if self.quadrature.points == 0 {
            return Err(ConfigurationError::InvalidQuadraturePoints { field: "points" });
        }
        if self.quadrature.surface_points == 0 {
            return Err(ConfigurationError::InvalidQuadraturePoints { field: "surface_points" });
        }
        check_step(self.differentiation.eps)?;
        self.figure_style()?;
        Ok(())
    }

    pub fn figure_style(&self) -> Result<FigureStyle, FigureStyleError> {
        let f = &self.figure;
        FigureStyle::new(f.latex, f.nrows, f.ncols, f.scaler)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::datasetlayout::DatasetLayout;

    #[test]
    fn empty_document_gives_defaults() {
        let configuration = Configuration::from_json_str("{}").unwrap();
        assert_eq!(configuration, Configuration::default());
        assert_eq!(configuration.quadrature.points, 3);
        assert_eq!(configuration.quadrature.surface_points, 9);
        assert_eq!(configuration.figure_style().unwrap(), FigureStyle::default());
        assert!(configuration.dataset.is_none());
    }

    #[test]
    fn full_document() {
        let json = r#"{
            "quadrature": { "points": 12 },
            "differentiation": { "eps": 1e-6 },
            "dataset": { "path": "data/current.json", "layout": "free_space" },
            "figure": { "latex": true, "nrows": 2, "ncols": 1, "scaler": 1.5 }
        }"#;
        let configuration = Configuration::from_json_str(json).unwrap();
        assert_eq!(configuration.quadrature.points, 12);
        assert_eq!(configuration.quadrature.surface_points, 9);
        assert_eq!(configuration.differentiation.eps, 1e-6);
        let dataset = configuration.dataset.as_ref().unwrap();
        assert_eq!(dataset.layout, DatasetLayout::FreeSpace);
        assert_eq!(dataset.table, "output");
        assert!(configuration.figure_style().unwrap().latex());
    }

    #[test]
    fn invalid_values_are_rejected() {
        assert!(matches!(
            Configuration::from_json_str(r#"{"quadrature": {"points": 0}}"#),
            Err(ConfigurationError::InvalidQuadraturePoints { field: "points" })
        ));
        assert!(matches!(
            Configuration::from_json_str(r#"{"differentiation": {"eps": 0.5}}"#),
            Err(ConfigurationError::Differentiation(DifferentiationError::StepOutOfRange { .. }))
        ));
        assert!(matches!(
            Configuration::from_json_str(r#"{"figure": {"ncols": 0}}"#),
            Err(ConfigurationError::Figure(FigureStyleError::EmptyGrid { .. }))
        ));
        assert!(matches!(
            Configuration::from_json_str("[1, 2]"),
            Err(ConfigurationError::JsonParseError(_))
        ));
    }
}
