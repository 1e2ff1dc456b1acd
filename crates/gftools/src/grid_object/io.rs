//! Plain-text persistence of grid objects.
//!
//! One line per element: the coordinate columns followed by the value
//! columns. Complex numbers take two columns. For objects of rank two or
//! more a blank line separates blocks of the outermost grid, which gnuplot
//! reads as separate data blocks. Lines starting with `#` are ignored on
//! load.

use std::fmt::Write as _;
use std::fs::File;
use std::io::{BufWriter, Write as _};
use std::path::Path;

use crate::error::{GridError, Result};
use crate::grid::Coord;
use crate::grid_object::GridObject;
use crate::grid_tuple::args_approx_eq;
use crate::num_io::{NumIo, TextFormat, tokens};
use crate::scalar::Scalar;

impl<T: Scalar + NumIo> GridObject<T> {
    /// Write the object with the default [`TextFormat`].
    pub fn savetxt(&self, path: impl AsRef<Path>) -> Result<()> {
        self.savetxt_with(path, &TextFormat::default())
    }

    pub fn savetxt_with(&self, path: impl AsRef<Path>, format: &TextFormat) -> Result<()> {
        let path = path.as_ref();
        let file = File::create(path).map_err(|e| GridError::io(path, e.to_string()))?;
        let mut out = BufWriter::new(file);
        let block = self.grids.dims().iter().skip(1).product::<usize>();
        let separate = format.block_separators && self.rank() > 1;

        let mut line = String::new();
        Self::for_each_args(&self.grids, |flat, args| {
            line.clear();
            for c in args {
                c.write_num(&mut line, format.precision)
                    .and_then(|_| line.write_char(' '))
                    .map_err(|e| GridError::io(path, e.to_string()))?;
            }
            self.data.data()[flat]
                .write_num(&mut line, format.precision)
                .map_err(|e| GridError::io(path, e.to_string()))?;
            writeln!(out, "{line}").map_err(|e| GridError::io(path, e.to_string()))?;
            if separate && (flat + 1) % block == 0 && flat + 1 < self.len() {
                writeln!(out).map_err(|e| GridError::io(path, e.to_string()))?;
            }
            Ok(())
        })?;
        out.flush().map_err(|e| GridError::io(path, e.to_string()))?;
        log::debug!("saved {} values to {}", self.len(), path.display());
        Ok(())
    }

    /// Read values written by [`savetxt`](Self::savetxt), accepting recorded
    /// coordinates within `tolerance` of this object's grids.
    pub fn loadtxt(&mut self, path: impl AsRef<Path>, tolerance: f64) -> Result<()> {
        self.loadtxt_with(path, &TextFormat::default().with_tolerance(tolerance))
    }

    /// Read values written by [`savetxt_with`](Self::savetxt_with).
    ///
    /// The coordinates recorded in the file must match this object's grids
    /// within `format.tolerance`. The tail is kept. On error the stored
    /// values are left untouched.
    ///
    /// # Errors
    ///
    /// `Io` when the file cannot be read, is malformed, is too short or too
    /// long, or records coordinates that do not match.
    pub fn loadtxt_with(&mut self, path: impl AsRef<Path>, format: &TextFormat) -> Result<()> {
        let path = path.as_ref();
        let tolerance = format.tolerance;
        let text = std::fs::read_to_string(path).map_err(|e| GridError::io(path, e.to_string()))?;
        let mut lines = text
            .lines()
            .enumerate()
            .map(|(i, l)| (i + 1, l.trim()))
            .filter(|(_, l)| !l.is_empty() && !l.starts_with('#'));

        let total = self.len();
        let mut values = Vec::with_capacity(total);
        Self::for_each_args(&self.grids, |flat, expected| {
            let (lineno, line) = lines.next().ok_or_else(|| {
                GridError::io(path, format!("file ends after {flat} of {total} values"))
            })?;
            let at_line = |msg: String| GridError::io(path, format!("line {lineno}: {msg}"));

            let mut toks = tokens(line);
            let recorded = expected
                .iter()
                .map(|c| c.read_like(&mut toks))
                .collect::<std::result::Result<Vec<Coord>, String>>()
                .map_err(at_line)?;
            if !args_approx_eq(&recorded, expected, tolerance) {
                return Err(at_line(format!(
                    "recorded coordinates {} do not match expected {}",
                    join(&recorded),
                    join(expected)
                )));
            }
            values.push(T::read_num(&mut toks).map_err(at_line)?);
            Ok(())
        })?;
        if let Some((lineno, _)) = lines.next() {
            return Err(GridError::io(
                path,
                format!("unexpected data at line {lineno} after {total} values"),
            ));
        }

        self.data.data_mut().copy_from_slice(&values);
        log::debug!("loaded {total} values from {}", path.display());
        Ok(())
    }
}

fn join(args: &[Coord]) -> String {
    args.iter()
        .map(|c| c.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
