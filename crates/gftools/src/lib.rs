//! gftools - numeric data sampled on structured grids
//!
//! This crate models physical quantities (Green's functions, self-energies,
//! dispersions) sampled on products of one-dimensional grids, with algebra,
//! an analytic tail for coordinates off the grids, periodic shifts and
//! lossless text round trips.
//!
//! # Architecture
//!
//! ```text
//! Level 1: GridObject (grid_object module)
//!     → fill, eval with tail fallback, shift, copy_interpolate, algebra, savetxt/loadtxt
//!
//! Level 2: GridTuple (grid_tuple module)
//!     → flat index <-> container indices <-> points <-> coordinates
//!
//! Level 3: Grid kinds (grid module)         Container (container, operations, backend)
//!     → EnumGrid, RealGrid, KMesh,           → row-major buffer, views, faer interop
//!       MatsubaraGrid
//! ```
//!
//! # Example
//!
//! ```
//! use gftools::grid::{Coord, KMesh, MatsubaraGrid};
//! use gftools::{GridObject, GridTuple, c64};
//!
//! let grids = GridTuple::new(vec![
//!     MatsubaraGrid::fermionic(10.0, 16).unwrap().into(),
//!     KMesh::new(8).unwrap().into(),
//! ]);
//! let mut g: GridObject<c64> = GridObject::new(grids);
//! g.fill(|a: &[Coord]| 1.0 / (a[0].to_complex() + 2.0 * a[1].to_real().cos()));
//!
//! // local Green's function: average over the k-mesh
//! let local = g.integrate();
//! assert!(local.re.is_finite());
//! ```

pub mod backend;
pub mod container;
pub mod error;
pub mod grid;
pub mod grid_object;
pub mod grid_tuple;
pub mod num_io;
pub mod operations;
pub mod random;
pub mod scalar;
pub mod strides;

pub use container::{Container, ContainerView, ContainerViewMut};
pub use error::{GridError, Result};
pub use grid::{Args, Coord, EnumGrid, Grid, GridBase, KMesh, MatsubaraGrid, Point, RealGrid, Statistics};
pub use grid_object::{GridObject, SharedTail, Tail};
pub use grid_tuple::GridTuple;
pub use num_io::{NumIo, TextFormat};
pub use random::RandomUniform;
pub use scalar::{Scalar, c64};
