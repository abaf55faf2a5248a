use nalgebra::DMatrix;

pub trait Curve {
    fn value(&self, x: f64) -> f64;

    fn derivative(&self, x: f64) -> f64;
}

/// Function of two variables, `f(y, x)`.
pub trait Surface {
    fn value(&self, y: f64, x: f64) -> f64;

    /// Values on the tensor grid, `grid[(i, j)] = f(ys[i], xs[j])`.
    fn grid(&self, ys: &[f64], xs: &[f64]) -> DMatrix<f64> {
        DMatrix::from_fn(ys.len(), xs.len(), |i, j| self.value(ys[i], xs[j]))
    }
}
