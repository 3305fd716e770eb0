//! Builtin Arrow kernels registered by [`crate::KernelRegistry::builtin`].
//!
//! Kernels see arrays only: a chunked argument is concatenated first and a scalar
//! is its length-one array. Batches and tables are rejected.

pub mod aggregate;
pub mod cast;
pub mod set;

use std::sync::Arc;

use arrow::array::{Array, ArrayRef, new_empty_array};
use arrow::datatypes::DataType;
use kerncall_result::EngineError;
use kerncall_types::{Datum, Scalar};

pub use aggregate::sum_result_type;

/// Flatten argument `index` into one array.
pub(crate) fn flat_arg(name: &str, args: &[Datum], index: usize) -> Result<ArrayRef, EngineError> {
    let datum = args.get(index).ok_or_else(|| EngineError::InvalidArity {
        name: name.to_string(),
        expected: index + 1,
        actual: args.len(),
    })?;
    let chunks = datum
        .array_chunks()
        .ok_or_else(|| EngineError::UnsupportedArgument {
            name: name.to_string(),
            index,
            kind: datum.kind().to_string(),
        })?;
    match chunks.as_slice() {
        [] => {
            // Zero-chunk values still know their type.
            let dt = datum.data_type().cloned().unwrap_or(DataType::Null);
            Ok(new_empty_array(&dt))
        }
        [only] => Ok(Arc::clone(only)),
        many => {
            let parts: Vec<&dyn Array> = many.iter().map(|a| a.as_ref()).collect();
            Ok(arrow::compute::concat(&parts)?)
        }
    }
}

/// Wrap a length-one kernel output as a scalar datum.
pub(crate) fn scalar_datum(name: &str, array: ArrayRef) -> Result<Datum, EngineError> {
    Scalar::try_new(array)
        .map(Datum::Scalar)
        .map_err(|err| EngineError::execution(name, err.to_string()))
}

/// Convert a row position into a `take` index.
pub(crate) fn take_index(name: &str, position: usize) -> Result<u32, EngineError> {
    u32::try_from(position).map_err(|_| {
        EngineError::execution(name, format!("position {position} exceeds the u32 index range"))
    })
}
