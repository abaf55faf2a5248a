use crate::math::curve::curveerror::CurveError;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Point2D {
    x: f64,
    y: f64
}

impl Point2D {
    pub fn new(x: f64, y: f64) -> Point2D {
        Point2D { x, y }
    }

    pub fn x(&self) -> f64 {
        self.x
    }

    pub fn y(&self) -> f64 {
        self.y
    }

    /// Pairs `x[i]` with `y[i]`.
    pub fn zip(x: &[f64], y: &[f64]) -> Result<Vec<Point2D>, CurveError> {
        if x.len() != y.len() {
            return Err(CurveError::LengthMismatch { x: x.len(), y: y.len() });
        }
        Ok(x.iter().zip(y).map(|(&x, &y)| Point2D::new(x, y)).collect())
    }
}

/// Abscissae must be finite and strictly ascending.
pub fn check_ascending(x: &[f64]) -> Result<(), CurveError> {
    if let Some(i) = x.iter().position(|v| !v.is_finite()) {
        return Err(CurveError::NonFinite(i));
    }
    match x.windows(2).position(|w| w[1] <= w[0]) {
        Some(i) => Err(CurveError::UnsortedAbscissae(i + 1)),
        None => Ok(())
    }
}

pub trait NonparametricCurve {
    fn points(&self) -> Vec<Point2D>;

    fn min_x(&self) -> f64;

    fn max_x(&self) -> f64;
}
