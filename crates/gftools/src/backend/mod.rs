//! Linear-algebra backend interop.
//!
//! Containers expose their row-major buffers to faer without copying; see
//! [`Container::as_matrix`](crate::Container::as_matrix) and friends.

mod faer_interop;
