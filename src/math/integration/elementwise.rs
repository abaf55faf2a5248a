use nalgebra::DMatrix;
use tracing::debug;

use crate::math::curve::curve::{
    Curve,
    Surface
};
use crate::math::curve::nonparametriccurve::piecewisepolynomial::{
    PiecewisePolynomial,
    PolynomialType
};
use crate::math::curve::nonparametricsurface::bicubicspline::BicubicSpline;
use crate::math::integration::gausslegendre::{
    dblquad_grid,
    quad,
    BoundingBox
};
use crate::math::integration::quadratureerror::QuadratureError;

fn require_samples(axis: char, given: usize) -> Result<(), QuadratureError> {
    if given < 2 {
        return Err(QuadratureError::TooFewSamples { axis, required: 2, given });
    }
    Ok(())
}

/// `(x, y)` pairs reordered by ascending `x`.
fn sorted_samples(x: &[f64], y: &[f64]) -> (Vec<f64>, Vec<f64>) {
    let mut order: Vec<usize> = (0..x.len()).collect();
    order.sort_by(|&i, &j| x[i].total_cmp(&x[j]));
    order.iter().map(|&i| (x[i], y[i])).unzip()
}

/// Integral of sampled data `y(x)` from `x[0]` to `x[N-1]`.
///
/// Samples may come in any order; the integral is signed, so descending
/// abscissae give the negated area. Repeated abscissae are rejected. The samples are interpolated with a not-a-knot cubic spline (a parabola
/// for three samples, a line for two) which is then integrated with the
/// `n_points` Gauss-Legendre rule.
pub fn elementwise_quad(y: &[f64], x: &[f64], n_points: usize) -> Result<f64, QuadratureError> {
    elementwise_quad_with(y, x, n_points, PolynomialType::cubic_or_linear(x.len()))
}

pub fn elementwise_quad_with(
    y: &[f64],
    x: &[f64],
    n_points: usize,
    polynomial_type: PolynomialType,
) -> Result<f64, QuadratureError> {
    if y.len() != x.len() {
        return Err(QuadratureError::ShapeMismatch {
            expected: (x.len(), 1),
            given: (y.len(), 1),
        });
    }
    require_samples('x', x.len())?;

    let (xs, ys) = sorted_samples(x, y);
    let curve = PiecewisePolynomial::from_samples(polynomial_type, &xs, &ys)?;
    let (a, b) = (x[0], x[x.len() - 1]);
    debug!(polynomial_type = ?curve.polynomial_type(), samples = x.len(), a, b, n_points, "elementwise quad");
    quad(|args| curve.value(args[0]), a, b, &[], n_points)
}

/// Integral of gridded data over `[y[0], y[M-1]] × [x[0], x[N-1]]`.
///
/// `z` has one row per `x` and one column per `y`, `z[(i, j)] = f(x[i], y[j])`.
/// Both axes must be strictly ascending.
pub fn elementwise_dblquad(
    z: &DMatrix<f64>,
    x: &[f64],
    y: &[f64],
    n_points: usize,
) -> Result<f64, QuadratureError> {
    require_samples('x', x.len())?;
    require_samples('y', y.len())?;
    if z.shape() != (x.len(), y.len()) {
        return Err(QuadratureError::ShapeMismatch {
            expected: (x.len(), y.len()),
            given: z.shape(),
        });
    }

    let surface = BicubicSpline::new(x, y, z)?;
    let bbox = BoundingBox::new(y[0], y[y.len() - 1], x[0], x[x.len() - 1]);
    debug!(?bbox, n_points, "elementwise dblquad");
    dblquad_grid(|ys, xs| surface.grid(ys, xs), bbox, n_points)
}
