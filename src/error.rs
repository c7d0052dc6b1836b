//! Error types shared by every component of this crate.

/// The `Error` enum defines the possible errors that this crate can return.
///
/// All four kinds are synchronous, deterministic, and surfaced to the
/// caller rather than silently corrupting output. `Singular` and
/// `DivisionByZero` should never occur for well-formed `(m, k)` pairs and
/// erasure lists; seeing one indicates a bug in this crate or a corrupted
/// generator matrix, not a caller mistake.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The caller supplied parameters that violate a documented
    /// precondition: `m <= k`, `size` not a multiple of `k`, an
    /// unsorted/duplicated/out-of-range erasure list, or an erasure list
    /// longer than `m - k`.
    #[error("invalid parameters: {0}")]
    InvalidParameters(String),
    /// Two matrices were combined (multiply, augment) whose shapes are
    /// incompatible. This is always an internal bug, never a symptom of
    /// bad caller input.
    #[error("matrix dimension mismatch: {0}")]
    DimensionMismatch(String),
    /// Gauss-Jordan elimination found no nonzero pivot in some column.
    /// By the MDS construction invariant this must never happen during
    /// `Decode`; it would only happen if the generator matrix itself were
    /// corrupted.
    #[error("matrix is singular and cannot be inverted")]
    Singular,
    /// A field division or inversion was attempted with a zero divisor.
    #[error("division by zero in GF(2^8)")]
    DivisionByZero,
}
