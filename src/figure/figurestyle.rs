use serde::{
    Deserialize,
    Serialize
};
use serde_json::{
    json,
    Map,
    Value
};
use thiserror::Error;

const BASE_WIDTH: f64 = 4.774;
const BASE_HEIGHT: f64 = 2.950;

#[derive(Debug, Error, PartialEq)]
pub enum FigureStyleError {
    #[error("figure grid needs at least one row and one column, got {nrows}x{ncols}")]
    EmptyGrid {
        nrows: usize,
        ncols: usize
    },
    #[error("figure scaler must be positive and finite, got {0}")]
    InvalidScaler(f64)
}

/// Plot style for a grid of `nrows × ncols` figures.
///
/// Values are fixed at construction; a renderer reads them through
/// [`FigureStyle::rc_params`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FigureStyle {
    latex: bool,
    nrows: usize,
    ncols: usize,
    scaler: f64,
}

impl Default for FigureStyle {
    fn default() -> Self {
        FigureStyle { latex: false, nrows: 1, ncols: 1, scaler: 1.0 }
    }
}

impl FigureStyle {
    pub const FONT_FAMILY: &'static str = "serif";
    pub const FONT_SIZE: f64 = 14.0;
    pub const LINE_WIDTH: f64 = 3.0;
    pub const DASHED_PATTERN: (f64, f64) = (3.0, 5.0);
    pub const MARKER_SIZE: f64 = 10.0;
    pub const MARKER_EDGE_COLOR: &'static str = "k";
    pub const MARKER_EDGE_WIDTH: f64 = 0.5;
    pub const IMAGE_ORIGIN: &'static str = "lower";
    pub const AXES_FONT_SIZE: f64 = 16.0;
    pub const GRID_LINE_WIDTH: f64 = 0.5;
    pub const LEGEND_FONT_SIZE: f64 = 14.0;
    pub const TICK_FONT_SIZE: f64 = 14.0;

    pub fn new(latex: bool, nrows: usize, ncols: usize, scaler: f64) -> Result<FigureStyle, FigureStyleError> {
        if nrows == 0 || ncols == 0 {
            return Err(FigureStyleError::EmptyGrid { nrows, ncols });
        }
        if !(scaler.is_finite() && scaler > 0.0) {
            return Err(FigureStyleError::InvalidScaler(scaler));
        }
        Ok(FigureStyle { latex, nrows, ncols, scaler })
    }

    pub fn latex(&self) -> bool {
        self.latex
    }

    pub fn nrows(&self) -> usize {
        self.nrows
    }

    pub fn ncols(&self) -> usize {
        self.ncols
    }

    pub fn scaler(&self) -> f64 {
        self.scaler
    }

    /// `(width, height)` in inches.
    pub fn figure_size(&self) -> (f64, f64) {
        (
            BASE_WIDTH * self.scaler * self.ncols as f64,
            BASE_HEIGHT * self.scaler * self.nrows as f64,
        )
    }

    /// Renderer parameters keyed by their matplotlib-style names, in a
    /// stable order.
    pub fn rc_params(&self) -> Map<String, Value> {
        let (width, height) = self.figure_size();
        let mut params = Map::new();
        params.insert("text.usetex".into(), json!(self.latex));
        params.insert("font.family".into(), json!(Self::FONT_FAMILY));
        params.insert("font.size".into(), json!(Self::FONT_SIZE));
        params.insert("figure.figsize".into(), json!([width, height]));
        params.insert("lines.linewidth".into(), json!(Self::LINE_WIDTH));
        params.insert(
            "lines.dashed_pattern".into(),
            json!([Self::DASHED_PATTERN.0, Self::DASHED_PATTERN.1]),
        );
        params.insert("lines.markersize".into(), json!(Self::MARKER_SIZE));
        params.insert("lines.markeredgecolor".into(), json!(Self::MARKER_EDGE_COLOR));
        params.insert("lines.markeredgewidth".into(), json!(Self::MARKER_EDGE_WIDTH));
        params.insert("image.origin".into(), json!(Self::IMAGE_ORIGIN));
        params.insert("axes.labelsize".into(), json!(Self::AXES_FONT_SIZE));
        params.insert("axes.titlesize".into(), json!(Self::AXES_FONT_SIZE));
        params.insert("grid.linewidth".into(), json!(Self::GRID_LINE_WIDTH));
        params.insert("legend.fontsize".into(), json!(Self::LEGEND_FONT_SIZE));
        params.insert("xtick.labelsize".into(), json!(Self::TICK_FONT_SIZE));
        params.insert("ytick.labelsize".into(), json!(Self::TICK_FONT_SIZE));
        params
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn figure_size_scales_with_grid() {
        let style = FigureStyle::new(false, 2, 3, 0.5).unwrap();
        let (w, h) = style.figure_size();
        assert_relative_eq!(w, 4.774 * 1.5);
        assert_relative_eq!(h, 2.950);
        assert_eq!(FigureStyle::default().figure_size(), (BASE_WIDTH, BASE_HEIGHT));
    }

    #[test]
    fn rc_params_are_ordered_and_complete() {
        let params = FigureStyle::new(true, 1, 1, 1.0).unwrap().rc_params();
        assert_eq!(params.len(), 16);
        assert_eq!(params.keys().next().map(String::as_str), Some("text.usetex"));
        assert_eq!(params["text.usetex"], json!(true));
        assert_eq!(params["image.origin"], json!("lower"));
        assert_eq!(params["lines.dashed_pattern"], json!([3.0, 5.0]));
        assert_eq!(params.keys().last().map(String::as_str), Some("ytick.labelsize"));
    }

    #[test]
    fn rejects_degenerate_layouts() {
        assert_eq!(
            FigureStyle::new(false, 0, 1, 1.0),
            Err(FigureStyleError::EmptyGrid { nrows: 0, ncols: 1 })
        );
        assert_eq!(FigureStyle::new(false, 1, 1, -2.0), Err(FigureStyleError::InvalidScaler(-2.0)));
        assert!(matches!(
            FigureStyle::new(false, 1, 1, f64::NAN),
            Err(FigureStyleError::InvalidScaler(_))
        ));
    }
}
