// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Error type shared by the math core.
//!
//! Numeric degeneracies (zero-length normalize, singular inverse, zero-scale
//! decomposition) are not errors; they have defined fallbacks documented on
//! the respective methods. `MathError` covers caller misuse and failures at
//! the serialization boundary.

use thiserror::Error;

/// Errors reported by `echo-math`.
#[derive(Debug, Error)]
pub enum MathError {
    /// The operation is meaningless for the type (e.g. dividing quaternions).
    #[error("{operation} is not supported on {class_name}")]
    UnsupportedOperation {
        /// Class tag of the receiver (`"Quaternion"`, ...).
        class_name: &'static str,
        /// Name of the rejected operation.
        operation: &'static str,
    },
    /// A flat array did not hold enough elements at the requested offset.
    #[error("array too short: need {needed} values at offset {offset}, have {len}")]
    ArrayTooShort {
        /// Number of values the operation reads or writes.
        needed: usize,
        /// Starting index requested by the caller.
        offset: usize,
        /// Length of the provided slice.
        len: usize,
    },
    /// Matrix row index outside `0..4`.
    #[error("matrix row index {0} out of range (expected 0..=3)")]
    RowOutOfRange(usize),
    /// Matrix element index outside `0..16`.
    #[error("matrix element index {0} out of range (expected 0..=15)")]
    IndexOutOfRange(usize),
    /// The thread-local scratch pool is already lent out further up the stack.
    #[error("scratch pool already borrowed on this thread")]
    ScratchPoolBusy,
    /// Class tag not recognised at the serialization boundary.
    #[error("unknown class name: {0}")]
    UnknownClassName(String),
    /// JSON encoding or decoding failed.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    /// CBOR encoding or decoding failed.
    #[error("cbor error: {0}")]
    Cbor(String),
}

/// Validates that `len` can hold `needed` values starting at `offset`.
pub(crate) fn check_len(needed: usize, offset: usize, len: usize) -> Result<(), MathError> {
    match offset.checked_add(needed) {
        Some(end) if end <= len => Ok(()),
        _ => Err(MathError::ArrayTooShort {
            needed,
            offset,
            len,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn check_len_accepts_exact_fit() {
        assert!(check_len(3, 2, 5).is_ok());
    }

    #[test]
    fn check_len_rejects_overflowing_offset() {
        let err = check_len(3, usize::MAX, 5).unwrap_err();
        assert!(matches!(err, MathError::ArrayTooShort { needed: 3, .. }));
    }
}
