use std::fmt;

use arrow::array::{Array, ArrayRef, RecordBatch};
use arrow::datatypes::DataType;

use crate::{ChunkedArray, Scalar, Table};

/// The columnar kinds the function gateway accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DatumKind {
    Array,
    ChunkedArray,
    RecordBatch,
    Table,
    Scalar,
}

impl DatumKind {
    /// Every accepted kind, in the order error messages list them.
    pub const ALL: [DatumKind; 5] = [
        DatumKind::Array,
        DatumKind::ChunkedArray,
        DatumKind::RecordBatch,
        DatumKind::Table,
        DatumKind::Scalar,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            DatumKind::Array => "Array",
            DatumKind::ChunkedArray => "ChunkedArray",
            DatumKind::RecordBatch => "RecordBatch",
            DatumKind::Table => "Table",
            DatumKind::Scalar => "Scalar",
        }
    }

    /// Names of every accepted kind, ready for an error disjunction.
    pub fn all_names() -> [&'static str; 5] {
        Self::ALL.map(DatumKind::name)
    }

    /// Array and ChunkedArray: the kinds that carry a flat element sequence.
    pub fn is_array_like(self) -> bool {
        matches!(self, DatumKind::Array | DatumKind::ChunkedArray)
    }
}

impl fmt::Display for DatumKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A columnar value handed to, or returned from, a compute function.
///
/// Cloning a `Datum` clones reference-counted Arrow buffers, never the data.
#[derive(Debug, Clone)]
pub enum Datum {
    Array(ArrayRef),
    ChunkedArray(ChunkedArray),
    RecordBatch(RecordBatch),
    Table(Table),
    Scalar(Scalar),
}

impl Datum {
    pub fn kind(&self) -> DatumKind {
        match self {
            Datum::Array(_) => DatumKind::Array,
            Datum::ChunkedArray(_) => DatumKind::ChunkedArray,
            Datum::RecordBatch(_) => DatumKind::RecordBatch,
            Datum::Table(_) => DatumKind::Table,
            Datum::Scalar(_) => DatumKind::Scalar,
        }
    }

    /// Element count for arrays, row count for batches and tables, 1 for a scalar.
    pub fn len(&self) -> usize {
        match self {
            Datum::Array(array) => array.len(),
            Datum::ChunkedArray(chunked) => chunked.len(),
            Datum::RecordBatch(batch) => batch.num_rows(),
            Datum::Table(table) => table.num_rows(),
            Datum::Scalar(_) => 1,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of missing elements.
    ///
    /// A scalar counts as one missing element when it is null. Batches and tables
    /// have no single missing count and report zero.
    pub fn null_count(&self) -> usize {
        match self {
            Datum::Array(array) => array.logical_null_count(),
            Datum::ChunkedArray(chunked) => chunked.null_count(),
            Datum::Scalar(scalar) => usize::from(scalar.is_null()),
            Datum::RecordBatch(_) | Datum::Table(_) => 0,
        }
    }

    /// Element type for array-like values and scalars; `None` for batches and tables.
    pub fn data_type(&self) -> Option<&DataType> {
        match self {
            Datum::Array(array) => Some(array.data_type()),
            Datum::ChunkedArray(chunked) => Some(chunked.data_type()),
            Datum::Scalar(scalar) => Some(scalar.data_type()),
            Datum::RecordBatch(_) | Datum::Table(_) => None,
        }
    }

    pub fn as_array(&self) -> Option<&ArrayRef> {
        match self {
            Datum::Array(array) => Some(array),
            _ => None,
        }
    }

    pub fn as_scalar(&self) -> Option<&Scalar> {
        match self {
            Datum::Scalar(scalar) => Some(scalar),
            _ => None,
        }
    }

    pub fn into_scalar(self) -> Option<Scalar> {
        match self {
            Datum::Scalar(scalar) => Some(scalar),
            _ => None,
        }
    }

    /// Array-like chunks of this value in order: one for an array or scalar, each
    /// chunk for a chunked array. Batches and tables yield `None`.
    pub fn array_chunks(&self) -> Option<Vec<ArrayRef>> {
        match self {
            Datum::Array(array) => Some(vec![array.clone()]),
            Datum::ChunkedArray(chunked) => Some(chunked.chunks().to_vec()),
            Datum::Scalar(scalar) => Some(vec![scalar.as_array().clone()]),
            Datum::RecordBatch(_) | Datum::Table(_) => None,
        }
    }
}

impl From<ArrayRef> for Datum {
    fn from(array: ArrayRef) -> Self {
        Datum::Array(array)
    }
}

impl From<ChunkedArray> for Datum {
    fn from(chunked: ChunkedArray) -> Self {
        Datum::ChunkedArray(chunked)
    }
}

impl From<RecordBatch> for Datum {
    fn from(batch: RecordBatch) -> Self {
        Datum::RecordBatch(batch)
    }
}

impl From<Table> for Datum {
    fn from(table: Table) -> Self {
        Datum::Table(table)
    }
}

impl From<Scalar> for Datum {
    fn from(scalar: Scalar) -> Self {
        Datum::Scalar(scalar)
    }
}
