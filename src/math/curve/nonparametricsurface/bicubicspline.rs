use nalgebra::DMatrix;
use tracing::debug;

use crate::math::curve::curve::{
    Curve,
    Surface
};
use crate::math::curve::curveerror::CurveError;
use crate::math::curve::nonparametriccurve::piecewisepolynomial::{
    PiecewisePolynomial,
    PolynomialType,
    SplineKnots
};

/// Tensor-product spline interpolating `z[(i, j)] = f(x[i], y[j])` on a
/// rectangular grid.
///
/// Each axis uses a not-a-knot cubic, falling back to a parabola for three
/// knots and to a straight line for two. Every grid column is fitted along `x`
/// up front; evaluation fits the intermediate values along `y` for each
/// requested `x`, reusing the prepared `y` knots.
#[derive(Clone, Debug)]
pub struct BicubicSpline {
    columns: Vec<PiecewisePolynomial>,
    y_knots: SplineKnots,
}

impl BicubicSpline {
    pub fn new(x: &[f64], y: &[f64], z: &DMatrix<f64>) -> Result<BicubicSpline, CurveError> {
        if z.shape() != (x.len(), y.len()) {
            return Err(CurveError::ShapeMismatch {
                expected: (x.len(), y.len()),
                given: z.shape(),
            });
        }
        let x_knots = SplineKnots::new(PolynomialType::cubic_or_linear(x.len()), x)?;
        let y_knots = SplineKnots::new(PolynomialType::cubic_or_linear(y.len()), y)?;

        let columns = z
            .column_iter()
            .map(|column| {
                let values: Vec<f64> = column.iter().copied().collect();
                x_knots.fit_aligned(&values)
            })
            .collect();
        debug!(
            nx = x.len(),
            ny = y.len(),
            x_kind = ?x_knots.polynomial_type(),
            y_kind = ?y_knots.polynomial_type(),
            "fitted bicubic spline"
        );

        Ok(BicubicSpline { columns, y_knots })
    }

    fn along_y(&self, x: f64) -> PiecewisePolynomial {
        let values: Vec<f64> = self.columns.iter().map(|c| c.value(x)).collect();
        self.y_knots.fit_aligned(&values)
    }
}

impl Surface for BicubicSpline {
    fn value(&self, y: f64, x: f64) -> f64 {
        self.along_y(x).value(y)
    }

    fn grid(&self, ys: &[f64], xs: &[f64]) -> DMatrix<f64> {
        let mut out = DMatrix::zeros(ys.len(), xs.len());
        for (j, &x) in xs.iter().enumerate() {
            let curve = self.along_y(x);
            for (i, &y) in ys.iter().enumerate() {
                out[(i, j)] = curve.value(y);
            }
        }
        out
    }
}
