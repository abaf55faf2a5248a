use tracing::trace;

use crate::math::differentiation::differentiationerror::DifferentiationError;
use crate::math::number::{
    has_imaginary_part,
    scale,
    Complex64,
    Number
};

// Smooth noise-robust differentiator of length N = 5:
//   M = (N - 1) / 2 = 2,  m = (N - 3) / 2 = 1
//   c_k = (C(2m, m - k + 1) - C(2m, m - k - 1)) / 2^(2m + 1),  k = 1..=M
//   f'(x_i) ≈ 1/dx * Σ_k c_k * (f[i + k] - f[i - k])
// http://www.holoborodko.com/pavel/numerical-methods/numerical-derivative/smooth-low-noise-differentiators/

pub const FILTER_LENGTH: usize = 5;

const HALF_WIDTH: usize = (FILTER_LENGTH - 1) / 2;

/// Binomial coefficient, zero outside `0 <= k <= n`.
fn binomial(n: i64, k: i64) -> f64 {
    if k < 0 || k > n {
        return 0.0;
    }
    let k = k.min(n - k);
    (0..k).fold(1.0, |acc, i| acc * (n - i) as f64 / (i + 1) as f64)
}

fn coefficients() -> [f64; HALF_WIDTH] {
    let m = ((FILTER_LENGTH - 3) / 2) as i64;
    let denominator = 2.0_f64.powi((2 * m + 1) as i32);
    let mut ck = [0.0; HALF_WIDTH];
    for (idx, c) in ck.iter_mut().enumerate() {
        let k = idx as i64 + 1;
        *c = (binomial(2 * m, m - k + 1) - binomial(2 * m, m - k - 1)) / denominator;
    }
    ck
}

/// First derivative of uniformly sampled, possibly noisy data.
///
/// The two samples at each end use one-sided and centred two-point
/// differences; every other sample uses the 5-point smoothing stencil.
pub fn holoborodko<T: Number>(y: &[T], dx: f64) -> Result<Vec<T>, DifferentiationError> {
    let n = y.len();
    if n < FILTER_LENGTH {
        return Err(DifferentiationError::TooFewSamples {
            required: FILTER_LENGTH,
            given: n,
        });
    }
    if !(dx.is_finite() && dx > 0.0) {
        return Err(DifferentiationError::InvalidSpacing(dx));
    }

    let ck = coefficients();
    trace!(?ck, samples = n, dx, "holoborodko stencil");

    let inv_dx = 1.0 / dx;
    let mut y_x = vec![nalgebra::zero::<T>(); n];
    y_x[0] = (y[1] - y[0]) / T::from_real(dx);
    y_x[1] = (y[2] - y[0]) / T::from_real(2.0 * dx);
    y_x[n - 2] = (y[n - 1] - y[n - 3]) / T::from_real(2.0 * dx);
    y_x[n - 1] = (y[n - 1] - y[n - 2]) / T::from_real(dx);

    for i in HALF_WIDTH..(n - HALF_WIDTH) {
        let acc = ck
            .iter()
            .enumerate()
            .fold(nalgebra::zero::<T>(), |acc, (idx, &c)| {
                let k = idx + 1;
                acc + scale(y[i + k] - y[i - k], c)
            });
        y_x[i] = scale(acc, inv_dx);
    }
    Ok(y_x)
}

/// Derivative whose element type follows the data: real unless some sample
/// has a nonzero imaginary part.
#[derive(Debug, Clone, PartialEq)]
pub enum SampledDerivative {
    Real(Vec<f64>),
    Complex(Vec<Complex64>)
}

impl SampledDerivative {
    pub fn is_complex(&self) -> bool {
        matches!(self, SampledDerivative::Complex(_))
    }

    pub fn len(&self) -> usize {
        match self {
            SampledDerivative::Real(v) => v.len(),
            SampledDerivative::Complex(v) => v.len()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Magnitude of every derivative sample.
    pub fn magnitudes(&self) -> Vec<f64> {
        match self {
            SampledDerivative::Real(v) => v.iter().map(|d| d.abs()).collect(),
            SampledDerivative::Complex(v) => v.iter().map(|d| d.norm()).collect()
        }
    }
}

pub fn holoborodko_auto(y: &[Complex64], dx: f64) -> Result<SampledDerivative, DifferentiationError> {
    if has_imaginary_part(y) {
        holoborodko(y, dx).map(SampledDerivative::Complex)
    } else {
        let real: Vec<f64> = y.iter().map(|c| c.re).collect();
        holoborodko(&real, dx).map(SampledDerivative::Real)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn stencil_coefficients() {
        assert_eq!(coefficients(), [0.25, 0.125]);
        assert_eq!(binomial(2, 1), 2.0);
        assert_eq!(binomial(2, -1), 0.0);
        assert_eq!(binomial(5, 2), 10.0);
    }

    #[test]
    fn linear_ramp_has_unit_slope() {
        let y = [0.0, 1.0, 2.0, 3.0, 4.0, 5.0];
        let d = holoborodko(&y, 1.0).unwrap();
        assert_eq!(d, vec![1.0; 6]);
    }

    #[test]
    fn quadratic_interior_is_exact() {
        let dx = 0.1;
        let y: Vec<f64> = (0..20).map(|i| (i as f64 * dx).powi(2)).collect();
        let d = holoborodko(&y, dx).unwrap();
        for i in 2..18 {
            assert_abs_diff_eq!(d[i], 2.0 * i as f64 * dx, epsilon = 1e-12);
        }
    }

    #[test]
    fn shortest_signal_has_one_interior_sample() {
        let y = [0.0, 1.0, 4.0, 9.0, 16.0];
        let d = holoborodko(&y, 1.0).unwrap();
        for (value, expected) in d.iter().zip([1.0, 2.0, 4.0, 6.0, 7.0]) {
            assert_abs_diff_eq!(*value, expected, epsilon = 1e-12);
        }
    }

    #[test]
    fn too_few_samples() {
        assert_eq!(
            holoborodko(&[1.0, 2.0, 3.0, 4.0], 1.0),
            Err(DifferentiationError::TooFewSamples { required: 5, given: 4 })
        );
        assert!(holoborodko(&[0.0; 6], 0.0).is_err());
    }

    #[test]
    fn auto_typed_output() {
        let real: Vec<Complex64> = (0..6).map(|i| Complex64::new(i as f64, 0.0)).collect();
        let d = holoborodko_auto(&real, 1.0).unwrap();
        assert!(!d.is_complex());
        assert_eq!(d, SampledDerivative::Real(vec![1.0; 6]));

        let complex: Vec<Complex64> = (0..6).map(|i| Complex64::new(i as f64, 2.0 * i as f64)).collect();
        let d = holoborodko_auto(&complex, 0.5).unwrap();
        assert!(d.is_complex());
        if let SampledDerivative::Complex(v) = d {
            for c in v {
                assert_abs_diff_eq!(c.re, 2.0, epsilon = 1e-12);
                assert_abs_diff_eq!(c.im, 4.0, epsilon = 1e-12);
            }
        }
    }
}
