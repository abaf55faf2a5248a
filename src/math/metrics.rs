use nalgebra::{
    DMatrix,
    DVector
};
use thiserror::Error;

// ─────────────────────────────────────────────
// MetricInput
// ─────────────────────────────────────────────

/// Scalar or array accepted by the error metrics.
///
/// `shape` is `(rows, cols)`; scalars are `(1, 1)` and one-dimensional
/// containers are column vectors `(n, 1)`.
pub trait MetricInput {
    fn values(&self) -> &[f64];

    fn shape(&self) -> (usize, usize);
}

impl MetricInput for f64 {
    fn values(&self) -> &[f64] {
        std::slice::from_ref(self)
    }

    fn shape(&self) -> (usize, usize) {
        (1, 1)
    }
}

impl MetricInput for [f64] {
    fn values(&self) -> &[f64] {
        self
    }

    fn shape(&self) -> (usize, usize) {
        (self.len(), 1)
    }
}

impl<const N: usize> MetricInput for [f64; N] {
    fn values(&self) -> &[f64] {
        self
    }

    fn shape(&self) -> (usize, usize) {
        (N, 1)
    }
}

impl MetricInput for Vec<f64> {
    fn values(&self) -> &[f64] {
        self
    }

    fn shape(&self) -> (usize, usize) {
        (self.len(), 1)
    }
}

impl MetricInput for DVector<f64> {
    fn values(&self) -> &[f64] {
        self.as_slice()
    }

    fn shape(&self) -> (usize, usize) {
        (self.len(), 1)
    }
}

impl MetricInput for DMatrix<f64> {
    fn values(&self) -> &[f64] {
        self.as_slice()
    }

    fn shape(&self) -> (usize, usize) {
        (self.nrows(), self.ncols())
    }
}

impl<T: MetricInput + ?Sized> MetricInput for &T {
    fn values(&self) -> &[f64] {
        (**self).values()
    }

    fn shape(&self) -> (usize, usize) {
        (**self).shape()
    }
}

// ─────────────────────────────────────────────
// MetricError
// ─────────────────────────────────────────────

#[derive(Debug, Error, PartialEq)]
pub enum MetricError {
    #[error("shape mismatch: {truth:?} vs {pred:?}")]
    ShapeMismatch {
        truth: (usize, usize),
        pred: (usize, usize)
    },
    #[error("metric inputs must not be empty")]
    Empty
}

// ─────────────────────────────────────────────
// Metrics
// ─────────────────────────────────────────────

/// Mean of `loss(truth_i, pred_i)`, broadcasting a single-element side.
fn mean_of<T, P, F>(truth: &T, pred: &P, loss: F) -> Result<f64, MetricError>
where
    T: MetricInput + ?Sized,
    P: MetricInput + ?Sized,
    F: Fn(f64, f64) -> f64,
{
    let lhs = truth.values();
    let rhs = pred.values();
    if lhs.is_empty() || rhs.is_empty() {
        return Err(MetricError::Empty);
    }

    let total: f64 = match (lhs.len(), rhs.len()) {
        (1, _) => rhs.iter().map(|&p| loss(lhs[0], p)).sum(),
        (_, 1) => lhs.iter().map(|&t| loss(t, rhs[0])).sum(),
        _ if truth.shape() == pred.shape() => {
            lhs.iter().zip(rhs).map(|(&t, &p)| loss(t, p)).sum()
        }
        _ => {
            return Err(MetricError::ShapeMismatch {
                truth: truth.shape(),
                pred: pred.shape(),
            })
        }
    };
    Ok(total / lhs.len().max(rhs.len()) as f64)
}

/// Mean squared error.
pub fn mse<T, P>(truth: &T, pred: &P) -> Result<f64, MetricError>
where
    T: MetricInput + ?Sized,
    P: MetricInput + ?Sized,
{
    mean_of(truth, pred, |t, p| (t - p) * (t - p))
}

/// Root mean squared error.
pub fn rmse<T, P>(truth: &T, pred: &P) -> Result<f64, MetricError>
where
    T: MetricInput + ?Sized,
    P: MetricInput + ?Sized,
{
    mse(truth, pred).map(f64::sqrt)
}

/// Mean squared logarithmic error, `mse(ln(1 + truth), ln(1 + pred))`.
///
/// Values at or below -1 produce NaN.
pub fn msle<T, P>(truth: &T, pred: &P) -> Result<f64, MetricError>
where
    T: MetricInput + ?Sized,
    P: MetricInput + ?Sized,
{
    mean_of(truth, pred, |t, p| {
        let d = t.ln_1p() - p.ln_1p();
        d * d
    })
}

/// Mean absolute error.
pub fn mae<T, P>(truth: &T, pred: &P) -> Result<f64, MetricError>
where
    T: MetricInput + ?Sized,
    P: MetricInput + ?Sized,
{
    mean_of(truth, pred, |t, p| (t - p).abs())
}
