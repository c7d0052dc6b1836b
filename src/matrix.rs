//! Dense rectangular matrices over GF(2^8).
//!
//! A [`Matrix`] is a row-major, densely packed byte buffer with logical
//! `rows x cols` dimensions. Every operation that can fail on shape or
//! singularity returns a [`Error`] rather than panicking, since these
//! failures are programmer errors in library usage and must be
//! surfaced, not silently swallowed.

use std::fmt;

use crate::error::Error;
use crate::field;

/// A dense `rows x cols` matrix of GF(2^8) elements.
#[derive(Clone, PartialEq, Eq)]
pub struct Matrix {
    rows: usize,
    cols: usize,
    data: Vec<u8>,
}

impl fmt::Debug for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Matrix")
            .field("rows", &self.rows)
            .field("cols", &self.cols)
            .finish()
    }
}

impl Matrix {
    /// A freshly allocated `rows x cols` matrix filled with zeroes.
    pub fn zero(rows: usize, cols: usize) -> Result<Self, Error> {
        if rows == 0 || cols == 0 {
            return Err(Error::InvalidParameters(format!(
                "matrix dimensions must be nonzero, got {rows}x{cols}"
            )));
        }
        Ok(Self {
            rows,
            cols,
            data: vec![0u8; rows * cols],
        })
    }

    /// The `n x n` identity matrix.
    pub fn identity(n: usize) -> Result<Self, Error> {
        let mut m = Self::zero(n, n)?;
        for i in 0..n {
            m.set(i, i, 1);
        }
        Ok(m)
    }

    /// A Vandermonde-derived matrix with `V[i][j] = exp[i * j mod 255]`.
    /// Any distinct choice of row evaluation points yields the
    /// Maximum-Distance-Separable property once reduced to systematic
    /// form by the caller.
    pub fn vandermonde(rows: usize, cols: usize) -> Result<Self, Error> {
        let mut m = Self::zero(rows, cols)?;
        for i in 0..rows {
            for j in 0..cols {
                let exponent = (i * j) % 255;
                m.set(i, j, field_exp(exponent));
            }
        }
        Ok(m)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    #[inline]
    pub fn get(&self, r: usize, c: usize) -> u8 {
        self.data[r * self.cols + c]
    }

    #[inline]
    pub fn set(&mut self, r: usize, c: usize, v: u8) {
        self.data[r * self.cols + c] = v;
    }

    /// The backing bytes of row `r`.
    pub fn row(&self, r: usize) -> &[u8] {
        &self.data[r * self.cols..(r + 1) * self.cols]
    }

    /// `self * other`, the standard O(rows * cols * other.cols) product
    /// over GF(2^8).
    pub fn multiply(&self, other: &Matrix) -> Result<Matrix, Error> {
        if self.cols != other.rows {
            return Err(Error::DimensionMismatch(format!(
                "cannot multiply {}x{} by {}x{}",
                self.rows, self.cols, other.rows, other.cols
            )));
        }
        let mut out = Matrix::zero(self.rows, other.cols)?;
        for i in 0..self.rows {
            for k in 0..self.cols {
                let a = self.get(i, k);
                if a == 0 {
                    continue;
                }
                for j in 0..other.cols {
                    let product = field::mul(a, other.get(k, j));
                    let existing = out.get(i, j);
                    out.set(i, j, field::add(existing, product));
                }
            }
        }
        Ok(out)
    }

    /// Horizontal concatenation of two matrices with the same row count.
    pub fn augment(&self, other: &Matrix) -> Result<Matrix, Error> {
        if self.rows != other.rows {
            return Err(Error::DimensionMismatch(format!(
                "cannot augment matrices with {} and {} rows",
                self.rows, other.rows
            )));
        }
        let mut out = Matrix::zero(self.rows, self.cols + other.cols)?;
        for i in 0..self.rows {
            for j in 0..self.cols {
                out.set(i, j, self.get(i, j));
            }
            for j in 0..other.cols {
                out.set(i, self.cols + j, other.get(i, j));
            }
        }
        Ok(out)
    }

    /// A copy of the contiguous rectangular region
    /// `[rmin, rmax) x [cmin, cmax)`.
    pub fn sub_matrix(&self, rmin: usize, rmax: usize, cmin: usize, cmax: usize) -> Matrix {
        let rows = rmax - rmin;
        let cols = cmax - cmin;
        let mut data = Vec::with_capacity(rows * cols);
        for r in rmin..rmax {
            data.extend_from_slice(&self.data[r * self.cols + cmin..r * self.cols + cmax]);
        }
        Matrix { rows, cols, data }
    }

    /// The inverse of a square, non-singular matrix, via Gauss-Jordan
    /// elimination: augment with the identity, row-reduce the left half
    /// to identity, and return what remains on the right.
    ///
    /// Pivot selection is the smallest row index `r >= c` with a nonzero
    /// entry in column `c`; [`Error::Singular`] is returned if no such
    /// row exists.
    pub fn invert(&self) -> Result<Matrix, Error> {
        if self.rows != self.cols {
            return Err(Error::DimensionMismatch(format!(
                "cannot invert non-square matrix {}x{}",
                self.rows, self.cols
            )));
        }
        let n = self.rows;
        let identity = Matrix::identity(n)?;
        let mut work = self.augment(&identity)?;

        for c in 0..n {
            let pivot = (c..n).find(|&r| work.get(r, c) != 0);
            let pivot = match pivot {
                Some(r) => r,
                None => return Err(Error::Singular),
            };
            if pivot != c {
                work.swap_rows(pivot, c);
            }
            let scale = field::inv(work.get(c, c))?;
            work.scale_row(c, scale);
            for r in 0..n {
                if r == c {
                    continue;
                }
                let factor = work.get(r, c);
                if factor == 0 {
                    continue;
                }
                work.axpy_row(r, c, factor);
            }
        }

        Ok(work.sub_matrix(0, n, n, 2 * n))
    }

    fn swap_rows(&mut self, a: usize, b: usize) {
        if a == b {
            return;
        }
        let cols = self.cols;
        let (lo, hi) = if a < b { (a, b) } else { (b, a) };
        let (left, right) = self.data.split_at_mut(hi * cols);
        left[lo * cols..lo * cols + cols].swap_with_slice(&mut right[0..cols]);
    }

    fn scale_row(&mut self, r: usize, scale: u8) {
        for c in 0..self.cols {
            let v = self.get(r, c);
            self.set(r, c, field::mul(v, scale));
        }
    }

    /// `row(dst) ^= factor * row(src)`, the elimination step of
    /// Gauss-Jordan.
    fn axpy_row(&mut self, dst: usize, src: usize, factor: u8) {
        let cols = self.cols;
        if dst == src {
            return;
        }
        let (lo, hi) = if dst < src { (dst, src) } else { (src, dst) };
        let (left, right) = self.data.split_at_mut(hi * cols);
        let (src_slice, dst_slice) = if dst < src {
            (&right[0..cols], &mut left[lo * cols..lo * cols + cols])
        } else {
            (&left[lo * cols..lo * cols + cols], &mut right[0..cols])
        };
        field::axpy(factor, src_slice, dst_slice);
    }
}

fn field_exp(exponent: usize) -> u8 {
    field::exp_of(exponent)
}
