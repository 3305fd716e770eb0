use arrow::array::RecordBatch;
use arrow::datatypes::SchemaRef;
use kerncall_result::{Error, Result};

use crate::ChunkedArray;

/// A schema plus an ordered list of record batches sharing it.
#[derive(Debug, Clone)]
pub struct Table {
    schema: SchemaRef,
    batches: Vec<RecordBatch>,
}

impl Table {
    pub fn try_new(schema: SchemaRef, batches: Vec<RecordBatch>) -> Result<Self> {
        if let Some((idx, _)) = batches
            .iter()
            .enumerate()
            .find(|(_, batch)| batch.schema() != schema)
        {
            return Err(Error::InvalidArgumentError(format!(
                "batch {idx} does not match the table schema"
            )));
        }
        Ok(Self { schema, batches })
    }

    pub fn schema(&self) -> &SchemaRef {
        &self.schema
    }

    pub fn batches(&self) -> &[RecordBatch] {
        &self.batches
    }

    pub fn num_rows(&self) -> usize {
        self.batches.iter().map(RecordBatch::num_rows).sum()
    }

    pub fn num_columns(&self) -> usize {
        self.schema.fields().len()
    }

    /// Column `idx` as one chunk per batch.
    pub fn column(&self, idx: usize) -> Result<ChunkedArray> {
        let field = self.schema.fields().get(idx).ok_or_else(|| {
            Error::InvalidArgumentError(format!(
                "column {idx} out of range for a table of {} columns",
                self.num_columns()
            ))
        })?;
        let chunks = self
            .batches
            .iter()
            .map(|batch| batch.column(idx).clone())
            .collect();
        ChunkedArray::try_new_with_type(field.data_type().clone(), chunks)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arrow::array::{ArrayRef, Int64Array};
    use arrow::datatypes::{DataType, Field, Schema};
    use std::sync::Arc;

    fn batch(schema: &SchemaRef, values: Vec<i64>) -> RecordBatch {
        RecordBatch::try_new(
            Arc::clone(schema),
            vec![Arc::new(Int64Array::from(values)) as ArrayRef],
        )
        .unwrap()
    }

    #[test]
    fn column_spans_batches() {
        let schema = Arc::new(Schema::new(vec![Field::new("a", DataType::Int64, true)]));
        let table = Table::try_new(
            Arc::clone(&schema),
            vec![batch(&schema, vec![1, 2]), batch(&schema, vec![3])],
        )
        .unwrap();
        assert_eq!(table.num_rows(), 3);
        let column = table.column(0).unwrap();
        assert_eq!(column.num_chunks(), 2);
        assert_eq!(column.len(), 3);
        assert!(table.column(1).is_err());
    }

    #[test]
    fn foreign_batch_is_rejected() {
        let schema = Arc::new(Schema::new(vec![Field::new("a", DataType::Int64, true)]));
        let other = Arc::new(Schema::new(vec![Field::new("b", DataType::Int64, true)]));
        assert!(Table::try_new(schema, vec![batch(&other, vec![1])]).is_err());
    }
}
