//! Quadrature rules selected by each grid at construction.

use crate::scalar::Scalar;

/// Minimum number of points for Simpson's rule on a uniform real grid.
pub const SIMPSON_MIN_POINTS: usize = 8;

/// Integration strategy of a grid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum IntegrationRule {
    /// Composite Simpson's rule on equally spaced abscissae.
    Simpson,
    /// Trapezoidal rule on arbitrary sorted abscissae.
    Trapezoid,
    /// `measure * Σ f`, used by discrete and periodic grids.
    Sum { measure: f64 },
}

impl IntegrationRule {
    /// Integrate sampled values `samples[i] = f(abscissae[i])`.
    ///
    /// `abscissae` is only read by `Simpson` and `Trapezoid`.
    pub fn integrate<T: Scalar>(&self, abscissae: &[f64], samples: &[T]) -> T {
        match *self {
            IntegrationRule::Sum { measure } => samples.iter().copied().sum::<T>() * measure,
            IntegrationRule::Trapezoid => trapezoid(abscissae, samples),
            IntegrationRule::Simpson => simpson(abscissae, samples),
        }
    }
}

fn trapezoid<T: Scalar>(x: &[f64], f: &[T]) -> T {
    debug_assert_eq!(x.len(), f.len());
    x.windows(2)
        .zip(f.windows(2))
        .map(|(xs, fs)| (fs[0] + fs[1]) * (0.5 * (xs[1] - xs[0])))
        .sum()
}

// Composite Simpson over an even number of intervals; an odd interval
// count is closed with Simpson's 3/8 rule over the last three intervals.
fn simpson<T: Scalar>(x: &[f64], f: &[T]) -> T {
    debug_assert_eq!(x.len(), f.len());
    let n = f.len();
    if n < 3 {
        return trapezoid(x, f);
    }
    let h = (x[n - 1] - x[0]) / (n - 1) as f64;
    let intervals = n - 1;
    let even = if intervals % 2 == 0 { intervals } else { intervals - 3 };

    let mut result = T::zero();
    if even > 0 {
        let mut acc = f[0] + f[even];
        for (i, &fi) in f.iter().enumerate().take(even).skip(1) {
            acc += fi * if i % 2 == 1 { 4.0 } else { 2.0 };
        }
        result = acc * (h / 3.0);
    }
    if even < intervals {
        let g = &f[even..];
        result += (g[0] + (g[1] + g[2]) * 3.0 + g[3]) * (3.0 * h / 8.0);
    }
    result
}
