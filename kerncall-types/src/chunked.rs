use arrow::array::{Array, ArrayRef, make_array};
use arrow::datatypes::DataType;
use kerncall_result::{Error, Result};

/// An ordered sequence of same-typed Arrow arrays that logically reads as their
/// concatenation.
///
/// Chunk boundaries carry no meaning beyond ordering.
#[derive(Debug, Clone)]
pub struct ChunkedArray {
    data_type: DataType,
    chunks: Vec<ArrayRef>,
}

impl ChunkedArray {
    /// Build from one or more chunks, taking the element type from the first.
    pub fn try_new(chunks: Vec<ArrayRef>) -> Result<Self> {
        let data_type = chunks
            .first()
            .map(|chunk| chunk.data_type().clone())
            .ok_or_else(|| {
                Error::InvalidArgumentError(
                    "a chunked array needs at least one chunk to infer its type".into(),
                )
            })?;
        Self::try_new_with_type(data_type, chunks)
    }

    /// Build with an explicit element type. Zero chunks are allowed here.
    pub fn try_new_with_type(data_type: DataType, chunks: Vec<ArrayRef>) -> Result<Self> {
        if let Some((idx, chunk)) = chunks
            .iter()
            .enumerate()
            .find(|(_, chunk)| chunk.data_type() != &data_type)
        {
            return Err(Error::InvalidArgumentError(format!(
                "chunk {idx} has type {} but the chunked array holds {data_type}",
                chunk.data_type()
            )));
        }
        Ok(Self { data_type, chunks })
    }

    pub fn data_type(&self) -> &DataType {
        &self.data_type
    }

    pub fn chunks(&self) -> &[ArrayRef] {
        &self.chunks
    }

    pub fn into_chunks(self) -> Vec<ArrayRef> {
        self.chunks
    }

    pub fn num_chunks(&self) -> usize {
        self.chunks.len()
    }

    pub fn len(&self) -> usize {
        self.chunks.iter().map(|chunk| chunk.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn null_count(&self) -> usize {
        self.chunks.iter().map(|chunk| chunk.logical_null_count()).sum()
    }

    /// Concatenate every chunk into one zero-offset array.
    pub fn concat(&self) -> Result<ArrayRef> {
        match self.chunks.as_slice() {
            [] => Ok(arrow::array::new_empty_array(&self.data_type)),
            [only] => Ok(zero_offset(only)),
            chunks => {
                let parts: Vec<&dyn Array> = chunks.iter().map(|a| a.as_ref()).collect();
                Ok(arrow::compute::concat(&parts)?)
            }
        }
    }
}

/// Normalize an array so its offset is zero without copying buffers.
#[inline]
fn zero_offset(arr: &ArrayRef) -> ArrayRef {
    if arr.offset() == 0 {
        return arr.clone();
    }
    let data = arr.to_data();
    make_array(data.slice(arr.offset(), arr.len()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use arrow::array::{Int64Array, StringArray};
    use std::sync::Arc;

    #[test]
    fn lengths_and_nulls_sum_over_chunks() {
        let chunked = ChunkedArray::try_new(vec![
            Arc::new(Int64Array::from(vec![Some(1), None])) as ArrayRef,
            Arc::new(Int64Array::from(vec![Some(3), Some(4), None])) as ArrayRef,
        ])
        .unwrap();
        assert_eq!(chunked.num_chunks(), 2);
        assert_eq!(chunked.len(), 5);
        assert_eq!(chunked.null_count(), 2);

        let flat = chunked.concat().unwrap();
        let flat = flat.as_any().downcast_ref::<Int64Array>().unwrap();
        assert_eq!(
            flat.iter().collect::<Vec<_>>(),
            vec![Some(1), None, Some(3), Some(4), None]
        );
    }

    #[test]
    fn mismatched_chunk_types_are_rejected() {
        let err = ChunkedArray::try_new(vec![
            Arc::new(Int64Array::from(vec![1])) as ArrayRef,
            Arc::new(StringArray::from(vec!["a"])) as ArrayRef,
        ])
        .unwrap_err();
        assert!(matches!(err, Error::InvalidArgumentError(msg) if msg.contains("chunk 1")));
    }

    #[test]
    fn empty_chunk_list_needs_explicit_type() {
        assert!(ChunkedArray::try_new(vec![]).is_err());
        let empty = ChunkedArray::try_new_with_type(DataType::Int64, vec![]).unwrap();
        assert!(empty.is_empty());
        assert_eq!(empty.concat().unwrap().len(), 0);
    }
}
