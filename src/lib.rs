//! A systematic Reed-Solomon erasure coding core over GF(2^8).
//!
//! Given a fixed pair `(m, k)` with `m > k`, [`Codec`] transforms a
//! contiguous buffer of `k` equal-sized data shards into `m` shards such
//! that any `k` surviving shards suffice to reconstruct the original
//! data. This crate is a pure, synchronous, in-memory codec: shard
//! placement, integrity hashing, network transport, and file layout are
//! the caller's responsibility.
//!
//! ```
//! use rs_erasure_core::Codec;
//!
//! let shard_len = 16;
//! let code = Codec::new(12, 8, 8 * shard_len).unwrap();
//! let source: Vec<u8> = (0..8 * shard_len as u8).collect();
//! let layout = code.encode_layout(&source).unwrap();
//!
//! let mut corrupted = layout.clone();
//! for b in &mut corrupted[0..shard_len] {
//!     *b = 0;
//! }
//! let recovered = code.decode(&corrupted, &[0], false).unwrap();
//! assert_eq!(recovered, source);
//! ```

pub mod cache;
pub mod codec;
pub mod error;
pub mod field;
pub mod matrix;

pub use cache::InverseCache;
pub use codec::Codec;
pub use error::Error;
pub use matrix::Matrix;
