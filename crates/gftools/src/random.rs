//! Random container and grid object construction.
//!
//! Mostly used to seed algebra checks with non-trivial data.

use rand::Rng;
use rand::distr::StandardUniform;

use crate::container::Container;
use crate::grid_object::GridObject;
use crate::scalar::{Scalar, c64};

/// Trait for types that can be randomly sampled from a uniform distribution.
pub trait RandomUniform: Scalar {
    /// Sample a random value from the uniform distribution [0, 1)
    /// (per component for complex types).
    fn sample_uniform<R: Rng>(rng: &mut R) -> Self;
}

impl RandomUniform for f64 {
    fn sample_uniform<R: Rng>(rng: &mut R) -> Self {
        rng.sample(StandardUniform)
    }
}

impl RandomUniform for c64 {
    fn sample_uniform<R: Rng>(rng: &mut R) -> Self {
        c64::new(rng.sample(StandardUniform), rng.sample(StandardUniform))
    }
}

impl<T: RandomUniform> Container<T> {
    /// Create a container with uniform random values in [0, 1).
    pub fn random(shape: &[usize]) -> Self {
        Self::random_with_rng(shape, &mut rand::rng())
    }

    /// Create a container with uniform random values using a specific RNG.
    ///
    /// # Example
    ///
    /// ```
    /// use gftools::Container;
    /// use rand::SeedableRng;
    /// use rand::rngs::StdRng;
    ///
    /// let mut rng = StdRng::seed_from_u64(42);
    /// let c1: Container<f64> = Container::random_with_rng(&[2, 3], &mut rng);
    ///
    /// let mut rng = StdRng::seed_from_u64(42);
    /// let c2: Container<f64> = Container::random_with_rng(&[2, 3], &mut rng);
    ///
    /// assert_eq!(c1.data(), c2.data());
    /// ```
    pub fn random_with_rng<R: Rng>(shape: &[usize], rng: &mut R) -> Self {
        Self::from_fn(shape, |_| T::sample_uniform(rng))
    }
}

impl<T: RandomUniform> GridObject<T> {
    /// Overwrite the stored data with uniform random values.
    ///
    /// The tail is left untouched.
    pub fn randomize_with_rng<R: Rng>(&mut self, rng: &mut R) {
        for x in self.data_mut().data_mut() {
            *x = T::sample_uniform(rng);
        }
    }
}
