use thiserror::Error;

use crate::math::curve::nonparametriccurve::piecewisepolynomial::PolynomialType;

#[derive(Debug, Error, PartialEq)]
pub enum CurveError {
    #[error("{polynomial_type:?} interpolation needs at least {required} points, got {given}")]
    TooFewPoints {
        polynomial_type: PolynomialType,
        required: usize,
        given: usize
    },
    #[error("abscissae and ordinates differ in length ({x} vs {y})")]
    LengthMismatch {
        x: usize,
        y: usize
    },
    #[error("grid values have shape {given:?}, expected {expected:?}")]
    ShapeMismatch {
        expected: (usize, usize),
        given: (usize, usize)
    },
    #[error("abscissae must be strictly ascending (violated at index {0})")]
    UnsortedAbscissae(usize),
    #[error("non-finite abscissa at index {0}")]
    NonFinite(usize),
    #[error("{0:?} spline system is singular")]
    SingularSystem(PolynomialType)
}
