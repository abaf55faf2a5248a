use nalgebra::{
    DMatrix,
    DVector
};
use tracing::debug;

use crate::math::curve::curve::Curve;
use crate::math::curve::curveerror::CurveError;
use crate::math::curve::nonparametriccurve::nonparametriccurve::{
    check_ascending,
    NonparametricCurve,
    Point2D
};

// ─────────────────────────────────────────────
// Subpolynomial
// ─────────────────────────────────────────────

#[derive(Clone, Debug)]
struct Subpolynomial {
    coefs: Vec<f64>,
    deriv_coefs: Vec<f64>,
    lhs_x: f64,
}

impl Subpolynomial {
    fn new(coefs: Vec<f64>, lhs_x: f64) -> Subpolynomial {
        let deriv_coefs = Self::compute_deriv_coefs(&coefs);
        Subpolynomial { coefs, deriv_coefs, lhs_x }
    }

    fn compute_deriv_coefs(coefs: &[f64]) -> Vec<f64> {
        let order = coefs.len() - 1;
        if order == 0 {
            vec![0.0]
        } else {
            (0..order)
                .map(|i| (order - i) as f64 * coefs[i])
                .collect()
        }
    }

    fn value(&self, x: f64) -> f64 {
        Self::evaluate(&self.coefs, x - self.lhs_x)
    }

    fn derivative(&self, x: f64) -> f64 {
        Self::evaluate(&self.deriv_coefs, x - self.lhs_x)
    }

    /// Horner evaluation, highest power first.
    fn evaluate(coefs: &[f64], x_diff: f64) -> f64 {
        let mut result = coefs[0];
        for &beta in &coefs[1..] {
            result = f64::mul_add(result, x_diff, beta);
        }
        result
    }
}

// ─────────────────────────────────────────────
// Coefficient generation
// ─────────────────────────────────────────────
//
// Cubic splines solve an (n+1)×(n+1) system for the knot second derivatives
// (moments) m[0..=n]. Interior rows come from C² continuity:
//   h[i-1]*m[i-1] + 2*(h[i-1]+h[i])*m[i] + h[i]*m[i+1]
//     = 6*( (y[i+1]-y[i])/h[i] - (y[i]-y[i-1])/h[i-1] )
// Rows 0 and n carry the boundary condition and have a zero right-hand side.
// The matrix depends on the abscissae only, so it is inverted once and reused
// for every ordinate set fitted over the same knots.

fn generate_linear_coef_list(h: &[f64], y: &[f64]) -> Vec<Vec<f64>> {
    (0..h.len())
        .map(|i| vec![(y[i + 1] - y[i]) / h[i], y[i]])
        .collect()
}

/// Segment i as [d, c, b, a]:
///   S_i(x) = a + b*(x-x_i) + c*(x-x_i)^2 + d*(x-x_i)^3
fn cubic_coefs_from_moments(h: &[f64], y: &[f64], m: &[f64]) -> Vec<Vec<f64>> {
    (0..h.len())
        .map(|i| {
            let d = (m[i + 1] - m[i]) / (6.0 * h[i]);
            let c = m[i] / 2.0;
            let b = (y[i + 1] - y[i]) / h[i] - h[i] * (2.0 * m[i] + m[i + 1]) / 6.0;
            let a = y[i];
            vec![d, c, b, a]
        })
        .collect()
}

fn build_interior_matrix(h: &[f64]) -> DMatrix<f64> {
    let n = h.len();
    let mut mat = DMatrix::<f64>::zeros(n + 1, n + 1);
    for i in 1..n {
        mat[(i, i - 1)] = h[i - 1];
        mat[(i, i)]     = 2.0 * (h[i - 1] + h[i]);
        mat[(i, i + 1)] = h[i];
    }
    mat
}

fn build_interior_rhs(h: &[f64], y: &[f64]) -> DVector<f64> {
    let n = h.len();
    let mut rhs = DVector::<f64>::zeros(n + 1);
    for i in 1..n {
        rhs[i] = 6.0 * ((y[i + 1] - y[i]) / h[i] - (y[i] - y[i - 1]) / h[i - 1]);
    }
    rhs
}

/// Natural: m[0] = m[n] = 0.
fn natural_cubic_matrix(h: &[f64]) -> DMatrix<f64> {
    let n = h.len();
    let mut mat = build_interior_matrix(h);
    mat[(0, 0)] = 1.0;
    mat[(n, n)] = 1.0;
    mat
}

/// Not-a-knot: the third derivative is continuous at x[1] and x[n-1]:
///   -h[1]*m[0] + (h[0]+h[1])*m[1] - h[0]*m[2] = 0
///   -h[n-1]*m[n-2] + (h[n-2]+h[n-1])*m[n-1] - h[n-2]*m[n] = 0
/// Needs at least 3 intervals for the two rows to be independent.
fn not_a_knot_cubic_matrix(h: &[f64]) -> DMatrix<f64> {
    let n = h.len();
    let mut mat = build_interior_matrix(h);

    mat[(0, 0)] = -h[1];
    mat[(0, 1)] =  h[0] + h[1];
    mat[(0, 2)] = -h[0];

    mat[(n, n - 2)] = -h[n - 1];
    mat[(n, n - 1)] =  h[n - 2] + h[n - 1];
    mat[(n, n)]     = -h[n - 2];
    mat
}

/// Three-point not-a-knot spline: the interpolating parabola, whose moments
/// all equal twice the second divided difference.
fn parabola_moments(h: &[f64], y: &[f64]) -> [f64; 3] {
    let s0 = (y[1] - y[0]) / h[0];
    let s1 = (y[2] - y[1]) / h[1];
    [2.0 * (s1 - s0) / (h[0] + h[1]); 3]
}

// ─────────────────────────────────────────────
// SplineKnots
// ─────────────────────────────────────────────

/// Abscissae prepared for fitting, with the inverted moment system when the
/// interpolant needs one.
#[derive(Clone, Debug)]
pub struct SplineKnots {
    polynomial_type: PolynomialType,
    x: Vec<f64>,
    h: Vec<f64>,
    inverse: Option<DMatrix<f64>>,
}

impl SplineKnots {
    pub fn new(polynomial_type: PolynomialType, x: &[f64]) -> Result<SplineKnots, CurveError> {
        let required = polynomial_type.necessary_points();
        if x.len() < required {
            return Err(CurveError::TooFewPoints {
                polynomial_type,
                required,
                given: x.len(),
            });
        }
        check_ascending(x)?;

        let h: Vec<f64> = x.windows(2).map(|pair| pair[1] - pair[0]).collect();
        let mat = match polynomial_type {
            PolynomialType::Linear => None,
            PolynomialType::NaturalCubic => Some(natural_cubic_matrix(&h)),
            PolynomialType::NotAKnotCubic if h.len() == 2 => None,
            PolynomialType::NotAKnotCubic => Some(not_a_knot_cubic_matrix(&h)),
        };
        let inverse = match mat {
            Some(mat) => Some(
                mat.try_inverse()
                    .ok_or(CurveError::SingularSystem(polynomial_type))?,
            ),
            None => None,
        };
        debug!(?polynomial_type, knots = x.len(), "prepared spline knots");

        Ok(SplineKnots {
            polynomial_type,
            x: x.to_vec(),
            h,
            inverse,
        })
    }

    pub fn polynomial_type(&self) -> PolynomialType {
        self.polynomial_type
    }

    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    pub fn fit(&self, y: &[f64]) -> Result<PiecewisePolynomial, CurveError> {
        if y.len() != self.x.len() {
            return Err(CurveError::LengthMismatch { x: self.x.len(), y: y.len() });
        }
        Ok(self.fit_aligned(y))
    }

    /// `y` must have one ordinate per knot.
    pub(crate) fn fit_aligned(&self, y: &[f64]) -> PiecewisePolynomial {
        let h = &self.h;
        let coef_list = match (&self.inverse, self.polynomial_type) {
            (_, PolynomialType::Linear) => generate_linear_coef_list(h, y),
            (Some(inverse), _) => {
                let m = inverse * build_interior_rhs(h, y);
                cubic_coefs_from_moments(h, y, m.as_slice())
            }
            (None, _) => cubic_coefs_from_moments(h, y, &parabola_moments(h, y)),
        };

        let subpolynomial_list = coef_list
            .into_iter()
            .zip(&self.x)
            .map(|(coefs, &lhs_x)| Subpolynomial::new(coefs, lhs_x))
            .collect();

        PiecewisePolynomial {
            subpolynomial_list,
            max_x: self.x[self.x.len() - 1],
            polynomial_type: self.polynomial_type,
        }
    }
}

// ─────────────────────────────────────────────
// PolynomialType
// ─────────────────────────────────────────────

#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum PolynomialType {
    Linear,
    NaturalCubic,
    /// Three points degrade to the interpolating parabola.
    NotAKnotCubic,
}

impl PolynomialType {
    pub fn necessary_points(&self) -> usize {
        match self {
            PolynomialType::Linear        => 2,
            PolynomialType::NaturalCubic  => 3,
            PolynomialType::NotAKnotCubic => 3,
        }
    }

    /// Not-a-knot cubic when there are enough points, linear otherwise.
    pub fn cubic_or_linear(point_count: usize) -> PolynomialType {
        if point_count >= PolynomialType::NotAKnotCubic.necessary_points() {
            PolynomialType::NotAKnotCubic
        } else {
            PolynomialType::Linear
        }
    }
}

// ─────────────────────────────────────────────
// PiecewisePolynomial
// ─────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct PiecewisePolynomial {
    max_x: f64,
    polynomial_type: PolynomialType,
    subpolynomial_list: Vec<Subpolynomial>,
}

impl PiecewisePolynomial {
    pub fn new(
        polynomial_type: PolynomialType,
        points: Vec<Point2D>,
    ) -> Result<PiecewisePolynomial, CurveError> {
        let xs: Vec<f64> = points.iter().map(|p| p.x()).collect();
        let ys: Vec<f64> = points.iter().map(|p| p.y()).collect();
        SplineKnots::new(polynomial_type, &xs)?.fit(&ys)
    }

    /// Fits `y` over `x` with the given interpolant.
    pub fn from_samples(
        polynomial_type: PolynomialType,
        x: &[f64],
        y: &[f64],
    ) -> Result<PiecewisePolynomial, CurveError> {
        Self::new(polynomial_type, Point2D::zip(x, y)?)
    }

    pub fn polynomial_type(&self) -> PolynomialType {
        self.polynomial_type
    }

    /// Outside the data range the end segments extrapolate.
    fn find_segment(&self, x: f64) -> usize {
        if x <= self.min_x() {
            0
        } else if x >= self.max_x {
            self.subpolynomial_list.len() - 1
        } else {
            self.subpolynomial_list
                .partition_point(|s| s.lhs_x <= x)
                - 1
        }
    }
}

impl NonparametricCurve for PiecewisePolynomial {
    fn points(&self) -> Vec<Point2D> {
        let mut pts: Vec<Point2D> = self
            .subpolynomial_list
            .iter()
            .map(|s| Point2D::new(s.lhs_x, s.value(s.lhs_x)))
            .collect();
        let last = &self.subpolynomial_list[self.subpolynomial_list.len() - 1];
        pts.push(Point2D::new(self.max_x, last.value(self.max_x)));
        pts
    }

    fn min_x(&self) -> f64 {
        self.subpolynomial_list[0].lhs_x
    }

    fn max_x(&self) -> f64 {
        self.max_x
    }
}

impl Curve for PiecewisePolynomial {
    fn value(&self, x: f64) -> f64 {
        let i = self.find_segment(x);
        self.subpolynomial_list[i].value(x)
    }

    fn derivative(&self, x: f64) -> f64 {
        let i = self.find_segment(x);
        self.subpolynomial_list[i].derivative(x)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn sample(f: impl Fn(f64) -> f64, xs: &[f64]) -> Vec<Point2D> {
        xs.iter().map(|&x| Point2D::new(x, f(x))).collect()
    }

    #[test]
    fn linear_interpolates_between_knots() {
        let curve = PiecewisePolynomial::from_samples(
            PolynomialType::Linear, &[0.0, 1.0, 3.0], &[0.0, 2.0, 0.0]).unwrap();
        assert_abs_diff_eq!(curve.value(0.5), 1.0);
        assert_abs_diff_eq!(curve.value(2.0), 1.0);
        assert_abs_diff_eq!(curve.derivative(2.0), -1.0);
    }

    #[test]
    fn not_a_knot_reproduces_cubics() {
        let f = |x: f64| 0.5 * x.powi(3) - x * x + 2.0;
        let xs = [-1.0, -0.2, 0.5, 1.1, 2.0, 3.5];
        let curve = PiecewisePolynomial::new(PolynomialType::NotAKnotCubic, sample(f, &xs)).unwrap();
        for x in [-0.9, -0.1, 0.3, 0.8, 1.7, 2.9, 3.4] {
            assert_abs_diff_eq!(curve.value(x), f(x), epsilon = 1e-10);
            assert_abs_diff_eq!(curve.derivative(x), 1.5 * x * x - 2.0 * x, epsilon = 1e-9);
        }
    }

    #[test]
    fn three_points_give_the_parabola() {
        let f = |x: f64| 3.0 * x * x - x + 1.0;
        let curve = PiecewisePolynomial::new(
            PolynomialType::NotAKnotCubic, sample(f, &[0.0, 0.4, 1.0])).unwrap();
        for x in [0.1, 0.25, 0.7, 0.95] {
            assert_abs_diff_eq!(curve.value(x), f(x), epsilon = 1e-12);
        }
    }

    #[test]
    fn natural_has_zero_end_curvature() {
        let curve = PiecewisePolynomial::new(
            PolynomialType::NaturalCubic,
            sample(|x| x.sin(), &[0.0, 0.5, 1.0, 1.5, 2.0])).unwrap();
        let h = 1e-4;
        let d2 = (curve.derivative(h) - curve.derivative(0.0)) / h;
        assert_abs_diff_eq!(d2, 0.0, epsilon = 1e-2);
        assert_abs_diff_eq!(curve.value(1.0), 1.0_f64.sin(), epsilon = 1e-12);
    }

    #[test]
    fn knots_are_reproduced() {
        let pts = sample(|x| x.exp(), &[0.0, 0.3, 0.9, 1.0, 1.6]);
        let curve = PiecewisePolynomial::new(PolynomialType::NotAKnotCubic, pts.clone()).unwrap();
        for (fitted, expected) in curve.points().iter().zip(&pts) {
            assert_abs_diff_eq!(fitted.x(), expected.x());
            assert_abs_diff_eq!(fitted.y(), expected.y(), epsilon = 1e-12);
        }
        assert_eq!(curve.min_x(), 0.0);
        assert_eq!(curve.max_x(), 1.6);
    }

    #[test]
    fn knots_are_reused_across_ordinates() {
        let knots = SplineKnots::new(PolynomialType::NotAKnotCubic, &[0.0, 0.5, 1.5, 2.0]).unwrap();
        assert_eq!(knots.polynomial_type(), PolynomialType::NotAKnotCubic);
        assert_eq!(knots.len(), 4);

        let line = knots.fit(&[1.0, 2.0, 4.0, 5.0]).unwrap();
        let square = knots.fit(&[0.0, 0.25, 2.25, 4.0]).unwrap();
        assert_eq!(line.polynomial_type(), PolynomialType::NotAKnotCubic);
        assert_abs_diff_eq!(line.value(1.0), 3.0, epsilon = 1e-12);
        assert_abs_diff_eq!(square.value(1.0), 1.0, epsilon = 1e-12);
        assert_eq!(
            knots.fit(&[1.0, 2.0]).err(),
            Some(CurveError::LengthMismatch { x: 4, y: 2 })
        );
    }

    #[test]
    fn invalid_inputs() {
        assert_eq!(
            PiecewisePolynomial::from_samples(PolynomialType::NotAKnotCubic, &[0.0, 1.0], &[1.0, 2.0]).err(),
            Some(CurveError::TooFewPoints {
                polynomial_type: PolynomialType::NotAKnotCubic,
                required: 3,
                given: 2,
            })
        );
        assert_eq!(
            PiecewisePolynomial::from_samples(PolynomialType::Linear, &[0.0, 2.0, 1.0], &[0.0; 3]).err(),
            Some(CurveError::UnsortedAbscissae(2))
        );
        assert_eq!(
            PiecewisePolynomial::from_samples(PolynomialType::Linear, &[0.0, 1.0], &[0.0]).err(),
            Some(CurveError::LengthMismatch { x: 2, y: 1 })
        );
        assert_eq!(PolynomialType::cubic_or_linear(2), PolynomialType::Linear);
        assert_eq!(PolynomialType::cubic_or_linear(5), PolynomialType::NotAKnotCubic);
    }
}
