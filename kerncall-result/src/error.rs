use std::fmt;
use thiserror::Error;

use crate::engine_error::EngineError;

/// Unified error type for every kerncall operation.
///
/// The dispatch layer distinguishes two kinds of failure that callers care about:
/// arguments that were rejected before the compute engine was ever contacted
/// ([`Error::TypeError`], [`Error::InvalidArgumentError`]) and failures reported
/// by the engine itself ([`Error::Engine`]). The remaining variants cover Arrow
/// failures raised while this layer builds or reshapes values on its own.
///
/// # Error Handling Strategy
///
/// Errors propagate upward with the `?` operator. Nothing in kerncall retries,
/// masks, or reinterprets an engine failure; the [`EngineError`] reaches the
/// caller exactly as the engine produced it.
///
/// # Thread Safety
///
/// `Error` implements `Send` and `Sync`, so it can cross thread boundaries together
/// with the immutable values it describes.
#[derive(Error, Debug)]
pub enum Error {
    /// An argument is not one of the accepted columnar kinds.
    ///
    /// Raised by the function gateway (and by the value consolidator) before any
    /// engine interaction. Only the first offending argument is reported even when
    /// several are invalid.
    ///
    /// - `index` is the 0-based position of the offending argument.
    /// - `actual` names the runtime type that was found.
    /// - `expected` is the human-readable disjunction of accepted kinds.
    ///
    /// # Recovery
    ///
    /// Always a caller bug. Convert the argument to a columnar value and call again.
    #[error("argument {index} is of type {actual} but it must be one of {expected}")]
    TypeError {
        index: usize,
        actual: String,
        expected: String,
    },

    /// Failure reported by the compute engine.
    ///
    /// Unknown function names, arity or option mismatches and runtime computation
    /// faults all arrive here untouched.
    #[error(transparent)]
    Engine(#[from] EngineError),

    /// Arrow library error raised while this layer builds or reshapes values.
    ///
    /// This covers concatenating chunks, building arrays from host vectors and
    /// similar work done outside the engine.
    #[error("Arrow error: {0}")]
    Arrow(#[from] arrow::error::ArrowError),

    /// Invalid caller input that is not an argument-kind problem.
    ///
    /// Examples:
    /// - an empty function name
    /// - an option bag entry without a name
    /// - chunks of differing data types handed to a chunked array
    /// - a scalar built from an array whose length is not one
    #[error("Invalid argument: {0}")]
    InvalidArgumentError(String),

    /// The engine returned a value whose shape an adapter cannot use.
    ///
    /// For instance, a `min_max` result that is not a struct scalar. This points at
    /// a mismatch between the adapter and the engine it was wired to.
    #[error("An internal operation failed: {0}")]
    Internal(String),
}

impl Error {
    /// Build a [`Error::TypeError`] whose `expected` text lists `accepted` as a
    /// disjunction.
    ///
    /// # Examples
    ///
    /// ```
    /// use kerncall_result::Error;
    ///
    /// let err = Error::type_error(1, "Vec<i64>", &["Array", "ChunkedArray", "Scalar"]);
    /// assert_eq!(
    ///     err.to_string(),
    ///     "argument 1 is of type Vec<i64> but it must be one of Array, ChunkedArray, or Scalar"
    /// );
    /// ```
    pub fn type_error(index: usize, actual: impl fmt::Display, accepted: &[&str]) -> Self {
        Error::TypeError {
            index,
            actual: actual.to_string(),
            expected: join_disjunction(accepted),
        }
    }

    /// Create an internal error from any displayable error.
    #[inline]
    pub fn internal<E: fmt::Display>(err: E) -> Self {
        Error::Internal(err.to_string())
    }

    /// Whether this error was raised before the engine was contacted.
    pub fn is_argument_error(&self) -> bool {
        matches!(
            self,
            Error::TypeError { .. } | Error::InvalidArgumentError(_)
        )
    }
}

/// Join `items` as a readable "a, b, or c" list.
pub fn join_disjunction(items: &[&str]) -> String {
    match items {
        [] => String::new(),
        [only] => (*only).to_string(),
        [first, second] => format!("{first} or {second}"),
        [init @ .., last] => format!("{}, or {last}", init.join(", ")),
    }
}
