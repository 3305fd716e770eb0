//! Value types consumed and produced by the kerncall dispatch layer.
//!
//! Arrow supplies single-chunk arrays and record batches; this crate adds the
//! pieces a function-call layer needs on top of them:
//!
//! - [`Datum`] / [`DatumKind`]: the tagged union of accepted columnar kinds.
//! - [`ChunkedArray`] and [`Table`]: multi-chunk values.
//! - [`Scalar`]: a single, possibly missing, typed value.
//! - [`Value`] / [`HostValue`]: untyped arguments, including plain Rust vectors
//!   that are not columnar yet.
//! - [`OptionBag`]: named options passed opaquely to a compute function.
//! - [`CastOptions`]: lossy-conversion policy for casts.

pub mod cast_options;
pub mod chunked;
pub mod datum;
pub mod options;
pub mod scalar;
pub mod table;
pub mod value;

pub use cast_options::{CastOptions, CastOptionsBuilder, cast_options};
pub use chunked::ChunkedArray;
pub use datum::{Datum, DatumKind};
pub use options::{OptionBag, OptionValue};
pub use scalar::Scalar;
pub use table::Table;
pub use value::{HostValue, Value};
