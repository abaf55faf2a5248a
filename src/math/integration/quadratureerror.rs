use thiserror::Error;

use crate::math::curve::curveerror::CurveError;

#[derive(Debug, Error, PartialEq)]
pub enum QuadratureError {
    #[error("Gauss-Legendre degree must be at least 1, got {0}")]
    InvalidDegree(usize),
    #[error("integration bounds must be finite, got [{lower}, {upper}]")]
    InvalidBounds {
        lower: f64,
        upper: f64
    },
    #[error("at least {required} samples are needed along {axis}, got {given}")]
    TooFewSamples {
        axis: char,
        required: usize,
        given: usize
    },
    #[error("integrand has shape {given:?}, expected {expected:?}")]
    ShapeMismatch {
        expected: (usize, usize),
        given: (usize, usize)
    },
    #[error("interpolation failed: {0}")]
    Interpolation(#[from] CurveError)
}
