use std::f64::consts::PI;

use nalgebra::DMatrix;
use tracing::{
    debug,
    warn
};

use crate::math::integration::quadratureerror::QuadratureError;
use crate::math::number::{
    scale,
    Number
};

pub const DEFAULT_QUAD_POINTS: usize = 3;
pub const DEFAULT_DBLQUAD_POINTS: usize = 9;

const NEWTON_TOLERANCE: f64 = 1.0e-15;
const NEWTON_MAX_ITER: usize = 100;

// ─────────────────────────────────────────────
// GaussLegendre
// ─────────────────────────────────────────────

/// `(P_n(x), P_n'(x))` from the three-term recurrence
///   (k+1) P_{k+1} = (2k+1) x P_k - k P_{k-1}
fn legendre_with_derivative(n: usize, x: f64) -> (f64, f64) {
    let mut p_prev = 1.0;
    let mut p = x;
    for k in 1..n {
        let k = k as f64;
        let p_next = ((2.0 * k + 1.0) * x * p - k * p_prev) / (k + 1.0);
        p_prev = p;
        p = p_next;
    }
    let dp = n as f64 * (x * p - p_prev) / (x * x - 1.0);
    (p, dp)
}

/// Nodes and weights of the `n`-point Gauss-Legendre rule on [-1, 1].
///
/// Nodes are ascending and symmetric about the origin; the rule integrates
/// polynomials up to degree `2n - 1` exactly.
#[derive(Clone, Debug, PartialEq)]
pub struct GaussLegendre {
    nodes: Vec<f64>,
    weights: Vec<f64>,
}

impl GaussLegendre {
    pub fn new(n_points: usize) -> Result<GaussLegendre, QuadratureError> {
        if n_points == 0 {
            return Err(QuadratureError::InvalidDegree(n_points));
        }
        let n = n_points;
        let mut nodes = vec![0.0; n];
        let mut weights = vec![0.0; n];

        for i in 0..(n + 1) / 2 {
            let mut x = (PI * (i as f64 + 0.75) / (n as f64 + 0.5)).cos();
            let mut converged = false;
            for _ in 0..NEWTON_MAX_ITER {
                let (p, dp) = legendre_with_derivative(n, x);
                let step = p / dp;
                x -= step;
                if step.abs() <= NEWTON_TOLERANCE {
                    converged = true;
                    break;
                }
            }
            if !converged {
                warn!(n_points, root = i, "Legendre root did not reach full precision");
            }
            let (_, dp) = legendre_with_derivative(n, x);
            let w = 2.0 / ((1.0 - x * x) * dp * dp);
            nodes[i] = -x;
            nodes[n - 1 - i] = x;
            weights[i] = w;
            weights[n - 1 - i] = w;
        }
        debug!(n_points, "built Gauss-Legendre rule");

        Ok(GaussLegendre { nodes, weights })
    }

    pub fn degree(&self) -> usize {
        self.nodes.len()
    }

    pub fn nodes(&self) -> &[f64] {
        &self.nodes
    }

    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    /// Nodes mapped affinely onto `[a, b]`.
    pub fn mapped_nodes(&self, a: f64, b: f64) -> Vec<f64> {
        let half_width = (b - a) / 2.0;
        let mid = (a + b) / 2.0;
        self.nodes.iter().map(|&psi| half_width * psi + mid).collect()
    }

    /// Weighted sum over `[a, b]` of a one-argument integrand.
    pub fn integrate<T, F>(&self, mut func: F, a: f64, b: f64) -> T
    where
        T: Number,
        F: FnMut(f64) -> T,
    {
        let sum = self
            .mapped_nodes(a, b)
            .into_iter()
            .zip(&self.weights)
            .fold(nalgebra::zero::<T>(), |acc, (xi, &w)| acc + scale(func(xi), w));
        scale(sum, (b - a) / 2.0)
    }
}

// ─────────────────────────────────────────────
// BoundingBox
// ─────────────────────────────────────────────

/// Rectangle `[ay, by] × [ax, bx]` for `f(y, x)` integrands.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoundingBox {
    pub ay: f64,
    pub by: f64,
    pub ax: f64,
    pub bx: f64,
}

impl BoundingBox {
    pub fn new(ay: f64, by: f64, ax: f64, bx: f64) -> BoundingBox {
        BoundingBox { ay, by, ax, bx }
    }

    pub fn area(&self) -> f64 {
        (self.by - self.ay) * (self.bx - self.ax)
    }

    fn check(&self) -> Result<(), QuadratureError> {
        check_bounds(self.ay, self.by)?;
        check_bounds(self.ax, self.bx)
    }
}

impl From<[f64; 4]> for BoundingBox {
    fn from(bbox: [f64; 4]) -> Self {
        let [ay, by, ax, bx] = bbox;
        BoundingBox { ay, by, ax, bx }
    }
}

fn check_bounds(a: f64, b: f64) -> Result<(), QuadratureError> {
    if a.is_finite() && b.is_finite() {
        Ok(())
    } else {
        Err(QuadratureError::InvalidBounds { lower: a, upper: b })
    }
}

// ─────────────────────────────────────────────
// Quadrature over callables
// ─────────────────────────────────────────────

/// Gauss-Legendre integral of `func` over `[a, b]`.
///
/// `func` is called with the node followed by `args`.
pub fn quad<T, F>(func: F, a: f64, b: f64, args: &[f64], n_points: usize) -> Result<T, QuadratureError>
where
    T: Number,
    F: Fn(&[f64]) -> T,
{
    check_bounds(a, b)?;
    let rule = GaussLegendre::new(n_points)?;

    let mut coords = Vec::with_capacity(args.len() + 1);
    coords.push(0.0);
    coords.extend_from_slice(args);
    Ok(rule.integrate(
        |xi| {
            coords[0] = xi;
            func(coords.as_slice())
        },
        a,
        b,
    ))
}

/// Gauss-Legendre integral of `func(y, x, args..)` over `bbox`.
pub fn dblquad<T, F, B>(func: F, bbox: B, args: &[f64], n_points: usize) -> Result<T, QuadratureError>
where
    T: Number,
    F: Fn(&[f64]) -> T,
    B: Into<BoundingBox>,
{
    let mut coords = Vec::with_capacity(args.len() + 2);
    coords.extend_from_slice(&[0.0, 0.0]);
    coords.extend_from_slice(args);
    dblquad_grid(
        |ys: &[f64], xs: &[f64]| {
            let mut coords = coords.clone();
            DMatrix::from_fn(ys.len(), xs.len(), |i, j| {
                coords[0] = ys[i];
                coords[1] = xs[j];
                func(coords.as_slice())
            })
        },
        bbox,
        n_points,
    )
}

/// Gauss-Legendre integral over `bbox` of a vectorised integrand returning
/// `F[(i, j)] = f(ys[i], xs[j])`.
pub fn dblquad_grid<T, F, B>(func: F, bbox: B, n_points: usize) -> Result<T, QuadratureError>
where
    T: Number,
    F: Fn(&[f64], &[f64]) -> DMatrix<T>,
    B: Into<BoundingBox>,
{
    let bbox = bbox.into();
    bbox.check()?;
    let rule = GaussLegendre::new(n_points)?;

    let ys = rule.mapped_nodes(bbox.ay, bbox.by);
    let xs = rule.mapped_nodes(bbox.ax, bbox.bx);
    let values = func(&ys, &xs);
    if values.shape() != (n_points, n_points) {
        return Err(QuadratureError::ShapeMismatch {
            expected: (n_points, n_points),
            given: values.shape(),
        });
    }

    let w = rule.weights();
    let mut sum = nalgebra::zero::<T>();
    for i in 0..n_points {
        for j in 0..n_points {
            sum = sum + scale(values[(i, j)], w[i] * w[j]);
        }
    }
    Ok(scale(sum, bbox.area() / 4.0))
}
