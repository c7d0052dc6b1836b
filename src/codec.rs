//! Generator-matrix construction and the encode/decode protocol.
//!
//! [`Codec`] fixes a pair `(m, k)` and a data length `size`, builds the
//! `m x k` systematic generator matrix once, and exposes `encode`/`decode`
//! as pure functions of their inputs. Construction is the only place a
//! matrix inversion happens outside of `decode`; everything afterwards is
//! multiply-accumulate over byte slices.

use crate::error::Error;
use crate::field;
use crate::matrix::Matrix;
use crate::InverseCache;

/// A systematic Reed-Solomon codec for a fixed `(m, k, size)` triple.
///
/// Immutable after construction, aside from the internal [`InverseCache`]:
/// `encode` and `decode` are pure functions of their arguments and safe to
/// call concurrently from multiple threads on the same `Codec`, provided
/// callers don't mutate a buffer another call is reading.
pub struct Codec {
    m: usize,
    k: usize,
    size: usize,
    shard_len: usize,
    /// The `(m - k) x k` parity-generating submatrix. Rows `0..k` of the
    /// full generator are the identity and are never materialized.
    parity: Matrix,
    cache: InverseCache,
}

impl Codec {
    /// Build a codec for `m` total shards, `k` data shards, and a
    /// `size`-byte input buffer.
    ///
    /// # Errors
    /// Returns [`Error::InvalidParameters`] if `m <= k`, `k == 0`,
    /// `size == 0`, or `size` is not a multiple of `k`.
    pub fn new(m: usize, k: usize, size: usize) -> Result<Self, Error> {
        if k == 0 || m <= k {
            return Err(Error::InvalidParameters(format!(
                "require m > k >= 1, got m={m} k={k}"
            )));
        }
        if size == 0 {
            return Err(Error::InvalidParameters(
                "size must be nonzero".to_string(),
            ));
        }
        if size % k != 0 {
            return Err(Error::InvalidParameters(format!(
                "size {size} is not a multiple of k {k}"
            )));
        }
        let shard_len = size / k;

        let vandermonde = Matrix::vandermonde(m, k)?;
        let top = vandermonde.sub_matrix(0, k, 0, k);
        let top_inv = top.invert()?;
        let generator = vandermonde.multiply(&top_inv)?;
        let parity = generator.sub_matrix(k, m, 0, k);

        tracing::debug!(m, k, size, shard_len, "constructed systematic generator matrix");

        Ok(Self {
            m,
            k,
            size,
            shard_len,
            parity,
            cache: InverseCache::new(),
        })
    }

    /// Number of data shards (`k`).
    pub fn source_num(&self) -> usize {
        self.k
    }

    /// Total number of shards (`m`).
    pub fn code_num(&self) -> usize {
        self.m
    }

    /// Total number of shards (`m`), matching `source_num`/`code_num`
    /// naming for symmetry.
    pub fn block_num(&self) -> usize {
        self.m
    }

    /// Length in bytes of a single shard.
    pub fn shard_len(&self) -> usize {
        self.shard_len
    }

    /// Write the `(m - k) * shard_len` parity bytes for `source` into the
    /// caller-supplied `parity_out` buffer.
    ///
    /// Each parity shard `j` is `sum_i parity[j][i] * source_shard[i]`,
    /// computed with the [`field::axpy`] inner loop.
    pub fn encode_into(&self, source: &[u8], parity_out: &mut [u8]) -> Result<(), Error> {
        if source.len() != self.size {
            return Err(Error::InvalidParameters(format!(
                "source length {} does not match codec size {}",
                source.len(),
                self.size
            )));
        }
        let parity_shards = self.m - self.k;
        let expected_out = parity_shards * self.shard_len;
        if parity_out.len() != expected_out {
            return Err(Error::InvalidParameters(format!(
                "parity_out length {} does not match expected {}",
                parity_out.len(),
                expected_out
            )));
        }

        for j in 0..parity_shards {
            let out_shard = &mut parity_out[j * self.shard_len..(j + 1) * self.shard_len];
            for i in 0..self.k {
                let coeff = self.parity.get(j, i);
                let in_shard = &source[i * self.shard_len..(i + 1) * self.shard_len];
                field::axpy(coeff, in_shard, out_shard);
            }
        }
        Ok(())
    }

    /// Encode `source` (`size` bytes) into `(m - k) * shard_len` freshly
    /// allocated parity bytes.
    pub fn encode(&self, source: &[u8]) -> Result<Vec<u8>, Error> {
        let mut out = vec![0u8; (self.m - self.k) * self.shard_len];
        self.encode_into(source, &mut out)?;
        Ok(out)
    }

    /// Encode `source` and return `source || parity` concatenated, the
    /// canonical `m`-shard layout callers store or transmit.
    pub fn encode_layout(&self, source: &[u8]) -> Result<Vec<u8>, Error> {
        let parity = self.encode(source)?;
        let mut out = Vec::with_capacity(source.len() + parity.len());
        out.extend_from_slice(source);
        out.extend_from_slice(&parity);
        Ok(out)
    }

    /// Reconstruct the `k` data shards from `all_shards` (`m * shard_len`
    /// bytes, shard `i` occupying `[i*shard_len, (i+1)*shard_len)`), given
    /// the sorted, distinct list of erased shard indices.
    ///
    /// Short-circuits to a verbatim copy of the first `k * shard_len`
    /// bytes when no data shard is erased. Otherwise selects the first
    /// `k` surviving shard indices in ascending order, inverts the `k x k`
    /// submatrix of the generator those rows pick out, and multiplies
    /// that inverse by the surviving shards.
    ///
    /// When `use_cache` is true, the inverse is memoized in this codec's
    /// [`InverseCache`] keyed by `err_list`.
    pub fn decode(
        &self,
        all_shards: &[u8],
        err_list: &[usize],
        use_cache: bool,
    ) -> Result<Vec<u8>, Error> {
        self.validate_err_list(err_list)?;
        let expected_len = self.m * self.shard_len;
        if all_shards.len() != expected_len {
            return Err(Error::InvalidParameters(format!(
                "all_shards length {} does not match expected {}",
                all_shards.len(),
                expected_len
            )));
        }

        if err_list.iter().all(|&e| e >= self.k) {
            tracing::trace!("no data shard erased, short-circuiting decode");
            return Ok(all_shards[0..self.k * self.shard_len].to_vec());
        }

        let survivors: Vec<usize> = (0..self.m)
            .filter(|i| !err_list.contains(i))
            .take(self.k)
            .collect();
        debug_assert_eq!(survivors.len(), self.k);

        let selected = self.select_rows(&survivors);
        let inverse = if use_cache {
            self.cache
                .lookup_or_compute(err_list, || selected.invert())?
        } else {
            selected.invert()?
        };

        let mut out = vec![0u8; self.k * self.shard_len];
        for i in 0..self.k {
            let out_shard = &mut out[i * self.shard_len..(i + 1) * self.shard_len];
            for (j, &survivor_idx) in survivors.iter().enumerate() {
                let coeff = inverse.get(i, j);
                let in_shard =
                    &all_shards[survivor_idx * self.shard_len..(survivor_idx + 1) * self.shard_len];
                field::axpy(coeff, in_shard, out_shard);
            }
        }
        Ok(out)
    }

    /// Build the `k x k` matrix whose row `j` is the generator row for
    /// `survivors[j]`: the identity row if `survivors[j] < k`, else the
    /// corresponding row of the parity submatrix.
    fn select_rows(&self, survivors: &[usize]) -> Matrix {
        let mut selected = Matrix::zero(self.k, self.k).expect("k > 0 checked at construction");
        for (row, &src) in survivors.iter().enumerate() {
            if src < self.k {
                selected.set(row, src, 1);
            } else {
                let parity_row = src - self.k;
                for col in 0..self.k {
                    selected.set(row, col, self.parity.get(parity_row, col));
                }
            }
        }
        selected
    }

    fn validate_err_list(&self, err_list: &[usize]) -> Result<(), Error> {
        if err_list.len() > self.m - self.k {
            return Err(Error::InvalidParameters(format!(
                "erasure list length {} exceeds maximum {}",
                err_list.len(),
                self.m - self.k
            )));
        }
        if err_list.iter().any(|&e| e >= self.m) {
            return Err(Error::InvalidParameters(format!(
                "erasure index out of range 0..{}",
                self.m
            )));
        }
        if !err_list.windows(2).all(|w| w[0] < w[1]) {
            return Err(Error::InvalidParameters(
                "erasure list must be sorted ascending with no duplicates".to_string(),
            ));
        }
        Ok(())
    }
}
