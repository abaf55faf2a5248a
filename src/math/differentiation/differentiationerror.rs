use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum DifferentiationError {
    #[error("axis '{0}' is not supported; `x`, `y` and `z` axis are supported")]
    UnsupportedAxis(String),
    #[error("differentiation order {0} is not supported")]
    UnsupportedOrder(i64),
    #[error("`eps` = {eps:e} must lie within [{min:e}, {max:e}]")]
    StepOutOfRange {
        eps: f64,
        min: f64,
        max: f64
    },
    #[error("axis {axis} needs {required} fixed coordinate(s), got {given}")]
    MissingCoordinates {
        axis: char,
        required: usize,
        given: usize
    },
    #[error("at least {required} samples are needed, got {given}")]
    TooFewSamples {
        required: usize,
        given: usize
    },
    #[error("sample spacing must be positive and finite, got {0}")]
    InvalidSpacing(f64)
}
