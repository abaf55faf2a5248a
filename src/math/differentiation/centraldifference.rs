use std::fmt;
use std::str::FromStr;

use crate::math::differentiation::differentiationerror::DifferentiationError;
use crate::math::number::Number;

pub const MIN_STEP: f64 = 1.0e-9;
pub const MAX_STEP: f64 = 1.0e-2;
pub const DEFAULT_STEP: f64 = 1.0e-4;

// ─────────────────────────────────────────────
// Axis / Order
// ─────────────────────────────────────────────

#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum Axis {
    X,
    Y,
    Z
}

impl Axis {
    pub fn to_char(&self) -> char {
        match self {
            Axis::X => 'x',
            Axis::Y => 'y',
            Axis::Z => 'z'
        }
    }

    /// Position of the differentiated coordinate in the argument list, which
    /// is also the number of fixed coordinates that precede it.
    pub fn position(&self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

impl FromStr for Axis {
    type Err = DifferentiationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "x" => Ok(Axis::X),
            "y" => Ok(Axis::Y),
            "z" => Ok(Axis::Z),
            _ => Err(DifferentiationError::UnsupportedAxis(s.to_owned()))
        }
    }
}

#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum Order {
    First,
    Second
}

impl TryFrom<i64> for Order {
    type Error = DifferentiationError;

    fn try_from(order: i64) -> Result<Self, Self::Error> {
        match order {
            1 => Ok(Order::First),
            2 => Ok(Order::Second),
            _ => Err(DifferentiationError::UnsupportedOrder(order))
        }
    }
}

// ─────────────────────────────────────────────
// DifferenceScheme
// ─────────────────────────────────────────────

/// Every supported axis/order combination.
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum DifferenceScheme {
    XFirst,
    XSecond,
    YFirst,
    YSecond,
    ZFirst,
    ZSecond
}

impl DifferenceScheme {
    pub fn new(axis: Axis, order: Order) -> DifferenceScheme {
        match (axis, order) {
            (Axis::X, Order::First)  => DifferenceScheme::XFirst,
            (Axis::X, Order::Second) => DifferenceScheme::XSecond,
            (Axis::Y, Order::First)  => DifferenceScheme::YFirst,
            (Axis::Y, Order::Second) => DifferenceScheme::YSecond,
            (Axis::Z, Order::First)  => DifferenceScheme::ZFirst,
            (Axis::Z, Order::Second) => DifferenceScheme::ZSecond
        }
    }

    pub fn axis(&self) -> Axis {
        match self {
            DifferenceScheme::XFirst | DifferenceScheme::XSecond => Axis::X,
            DifferenceScheme::YFirst | DifferenceScheme::YSecond => Axis::Y,
            DifferenceScheme::ZFirst | DifferenceScheme::ZSecond => Axis::Z
        }
    }

    pub fn order(&self) -> Order {
        match self {
            DifferenceScheme::XFirst | DifferenceScheme::YFirst | DifferenceScheme::ZFirst => {
                Order::First
            }
            _ => Order::Second
        }
    }
}

// ─────────────────────────────────────────────
// CentralDifference
// ─────────────────────────────────────────────

pub fn check_step(eps: f64) -> Result<(), DifferentiationError> {
    if (MIN_STEP..=MAX_STEP).contains(&eps) {
        Ok(())
    } else {
        Err(DifferentiationError::StepOutOfRange { eps, min: MIN_STEP, max: MAX_STEP })
    }
}

/// Central finite difference of a multi-argument function along one axis.
///
/// `func` receives its positional coordinates followed by the extra
/// arguments as a single slice. For axis `y` the first fixed argument is put
/// back in front of the differentiated coordinate, for axis `z` the first
/// two are. Nothing is evaluated until [`CentralDifference::evaluate`].
#[derive(Clone)]
pub struct CentralDifference<F> {
    func: F,
    scheme: DifferenceScheme,
    args: Vec<f64>,
    eps: f64
}

impl<F, T> CentralDifference<F>
where
    F: Fn(&[f64]) -> T,
    T: Number,
{
    pub fn new(
        func: F,
        axis: Axis,
        args: &[f64],
        order: Order,
        eps: f64,
    ) -> Result<CentralDifference<F>, DifferentiationError> {
        check_step(eps)?;
        if args.len() < axis.position() {
            return Err(DifferentiationError::MissingCoordinates {
                axis: axis.to_char(),
                required: axis.position(),
                given: args.len(),
            });
        }
        Ok(CentralDifference {
            func,
            scheme: DifferenceScheme::new(axis, order),
            args: args.to_vec(),
            eps,
        })
    }

    /// First derivative along `x`, no extra arguments, `eps = 1e-4`.
    pub fn with_defaults(func: F) -> CentralDifference<F> {
        CentralDifference {
            func,
            scheme: DifferenceScheme::XFirst,
            args: Vec::new(),
            eps: DEFAULT_STEP,
        }
    }

    pub fn scheme(&self) -> DifferenceScheme {
        self.scheme
    }

    pub fn eps(&self) -> f64 {
        self.eps
    }

    pub fn args(&self) -> &[f64] {
        &self.args
    }

    /// Argument list with `point` at the differentiated position.
    fn coordinates(&self, point: f64) -> Vec<f64> {
        let split = self.scheme.axis().position();
        let mut coords = Vec::with_capacity(self.args.len() + 1);
        coords.extend_from_slice(&self.args[..split]);
        coords.push(point);
        coords.extend_from_slice(&self.args[split..]);
        coords
    }

    pub fn evaluate(&self, point: f64) -> T {
        let split = self.scheme.axis().position();
        let eps = self.eps;
        let mut coords = self.coordinates(point);
        let mut at = |p: f64| {
            coords[split] = p;
            (self.func)(coords.as_slice())
        };

        match self.scheme.order() {
            Order::First => {
                let forward = at(point + eps);
                let backward = at(point - eps);
                (forward - backward) / T::from_real(2.0 * eps)
            }
            Order::Second => {
                let forward = at(point + eps);
                let center = at(point);
                let backward = at(point - eps);
                (forward - center * T::from_real(2.0) + backward) / T::from_real(eps * eps)
            }
        }
    }

    pub fn into_fn(self) -> impl Fn(f64) -> T {
        move |point| self.evaluate(point)
    }
}
