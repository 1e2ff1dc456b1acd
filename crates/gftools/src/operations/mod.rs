//! Container operations.
//!
//! ```text
//! elementwise: conj, sum, apply, apply_binary, try_add/try_sub/try_mul/try_div
//! arith:       std operators (+ - * / and assign forms), scalar broadcast
//! ```

mod arith;
mod elementwise;

pub use elementwise::{apply, apply_binary, apply_binary_inplace, apply_inplace, conj, sum};
