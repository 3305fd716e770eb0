use kerncall_result::{Error, Result};
use kerncall_types::{ChunkedArray, Datum, DatumKind};

/// Merge array-like values into one value representing their concatenation.
///
/// A single input comes back as-is, kind included. Otherwise every input must be
/// an Array or a ChunkedArray; the result is one ChunkedArray holding each
/// input's chunks in input order. No buffers are copied.
pub fn collect_arrays(values: &[Datum]) -> Result<Datum> {
    match values {
        [] => Err(Error::InvalidArgumentError(
            "collect_arrays needs at least one value".into(),
        )),
        [only] => Ok(only.clone()),
        many => {
            let mut chunks = Vec::new();
            for (index, value) in many.iter().enumerate() {
                match value {
                    Datum::Array(array) => chunks.push(array.clone()),
                    Datum::ChunkedArray(chunked) => chunks.extend_from_slice(chunked.chunks()),
                    other => {
                        return Err(Error::type_error(
                            index,
                            other.kind(),
                            &[DatumKind::Array.name(), DatumKind::ChunkedArray.name()],
                        ));
                    }
                }
            }
            let data_type = many[0]
                .data_type()
                .cloned()
                .ok_or_else(|| Error::Internal("array-like value without a type".into()))?;
            Ok(Datum::ChunkedArray(ChunkedArray::try_new_with_type(
                data_type, chunks,
            )?))
        }
    }
}
