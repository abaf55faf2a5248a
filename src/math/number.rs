use nalgebra::{
    Complex,
    ComplexField
};

pub type Complex64 = Complex<f64>;

/// Real or complex sample value.
///
/// Every differentiation and quadrature routine is generic over this bound so
/// that real data stays real and complex data (e.g. antenna currents) stays
/// complex without a runtime type switch.
pub trait Number: ComplexField<RealField = f64> + Copy {}

impl<T> Number for T where T: ComplexField<RealField = f64> + Copy {}

/// `value * factor` for a real factor.
#[inline]
pub fn scale<T: Number>(value: T, factor: f64) -> T {
    value * T::from_real(factor)
}

/// True when at least one sample carries a nonzero imaginary part.
pub fn has_imaginary_part(samples: &[Complex64]) -> bool {
    samples.iter().any(|c| c.im != 0.0)
}
