//! Precision-controlled text serialization of scalars and coordinates.
//!
//! Values are written in scientific notation with enough digits to round
//! trip an `f64`. Complex numbers take two columns (real, imaginary). The
//! reader accepts whitespace, commas and parentheses as separators, so
//! `(1.0,2.0)` and `1.0 2.0` parse alike.

use std::fmt::{self, Write};

use crate::grid::Coord;
use crate::scalar::c64;

/// Digits after the decimal point that make an `f64` round trip exactly.
pub const MAX_PRECISION: usize = 16;

/// Settings for writing and reading grid object text files.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextFormat {
    /// Digits after the decimal point in scientific notation.
    pub precision: usize,
    /// Largest accepted difference between recorded and expected coordinates on load.
    pub tolerance: f64,
    /// Emit a blank line between blocks of the outermost grid.
    pub block_separators: bool,
}

impl Default for TextFormat {
    fn default() -> Self {
        Self {
            precision: MAX_PRECISION,
            tolerance: 1e-8,
            block_separators: true,
        }
    }
}

impl TextFormat {
    pub fn with_precision(mut self, precision: usize) -> Self {
        self.precision = precision;
        self
    }

    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    pub fn with_block_separators(mut self, on: bool) -> Self {
        self.block_separators = on;
        self
    }
}

/// Split a line into numeric tokens.
pub fn tokens(line: &str) -> impl Iterator<Item = &str> {
    line.split(|c: char| c.is_whitespace() || matches!(c, ',' | '(' | ')'))
        .filter(|t| !t.is_empty())
}

/// Types that can be written to and read from text columns.
pub trait NumIo: Sized {
    /// Number of text columns one value occupies.
    fn columns(&self) -> usize;

    /// Write the value, columns separated by single spaces.
    fn write_num<W: Write>(&self, w: &mut W, precision: usize) -> fmt::Result;

    /// Read one value from the token stream.
    fn read_num<'a, I: Iterator<Item = &'a str>>(tokens: &mut I) -> Result<Self, String>;
}

fn next_token<'a, I: Iterator<Item = &'a str>>(tokens: &mut I) -> Result<&'a str, String> {
    tokens.next().ok_or_else(|| "unexpected end of line".to_string())
}

impl NumIo for f64 {
    fn columns(&self) -> usize {
        1
    }

    fn write_num<W: Write>(&self, w: &mut W, precision: usize) -> fmt::Result {
        write!(w, "{:.*e}", precision, self)
    }

    fn read_num<'a, I: Iterator<Item = &'a str>>(tokens: &mut I) -> Result<Self, String> {
        let t = next_token(tokens)?;
        t.parse().map_err(|_| format!("cannot parse {t:?} as a real number"))
    }
}

impl NumIo for c64 {
    fn columns(&self) -> usize {
        2
    }

    fn write_num<W: Write>(&self, w: &mut W, precision: usize) -> fmt::Result {
        self.re.write_num(w, precision)?;
        w.write_char(' ')?;
        self.im.write_num(w, precision)
    }

    fn read_num<'a, I: Iterator<Item = &'a str>>(tokens: &mut I) -> Result<Self, String> {
        let re = f64::read_num(tokens)?;
        let im = f64::read_num(tokens)?;
        Ok(c64::new(re, im))
    }
}

impl NumIo for i64 {
    fn columns(&self) -> usize {
        1
    }

    fn write_num<W: Write>(&self, w: &mut W, _precision: usize) -> fmt::Result {
        write!(w, "{self}")
    }

    fn read_num<'a, I: Iterator<Item = &'a str>>(tokens: &mut I) -> Result<Self, String> {
        let t = next_token(tokens)?;
        t.parse().map_err(|_| format!("cannot parse {t:?} as an integer"))
    }
}

impl Coord {
    pub fn columns(&self) -> usize {
        match self {
            Coord::Int(n) => n.columns(),
            Coord::Real(x) => x.columns(),
            Coord::Complex(z) => z.columns(),
        }
    }

    pub fn write_num<W: Write>(&self, w: &mut W, precision: usize) -> fmt::Result {
        match self {
            Coord::Int(n) => n.write_num(w, precision),
            Coord::Real(x) => x.write_num(w, precision),
            Coord::Complex(z) => z.write_num(w, precision),
        }
    }

    /// Read a coordinate of the same kind as `self`.
    pub fn read_like<'a, I: Iterator<Item = &'a str>>(&self, tokens: &mut I) -> Result<Coord, String> {
        Ok(match self {
            Coord::Int(_) => Coord::Int(i64::read_num(tokens)?),
            Coord::Real(_) => Coord::Real(f64::read_num(tokens)?),
            Coord::Complex(_) => Coord::Complex(c64::read_num(tokens)?),
        })
    }
}
