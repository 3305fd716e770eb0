use std::hash::Hash;
use std::sync::Arc;

use arrow::array::{ArrayRef, BooleanArray, Float64Array, Int32Array, Int64Array, StringArray};
use rustc_hash::FxHashMap;

use kerncall_result::{Error, Result};

use crate::Datum;

/// A plain Rust vector that has not been turned into a columnar value.
#[derive(Debug, Clone, PartialEq)]
pub enum HostValue {
    Int64(Vec<Option<i64>>),
    Float64(Vec<Option<f64>>),
    Utf8(Vec<Option<String>>),
    Boolean(Vec<Option<bool>>),
}

impl HostValue {
    pub fn type_name(&self) -> &'static str {
        match self {
            HostValue::Int64(_) => "Vec<i64>",
            HostValue::Float64(_) => "Vec<f64>",
            HostValue::Utf8(_) => "Vec<String>",
            HostValue::Boolean(_) => "Vec<bool>",
        }
    }

    pub fn len(&self) -> usize {
        match self {
            HostValue::Int64(v) => v.len(),
            HostValue::Float64(v) => v.len(),
            HostValue::Utf8(v) => v.len(),
            HostValue::Boolean(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Build the equivalent Arrow array.
    pub fn to_array(&self) -> ArrayRef {
        match self {
            HostValue::Int64(v) => Arc::new(Int64Array::from(v.clone())),
            HostValue::Float64(v) => Arc::new(Float64Array::from(v.clone())),
            HostValue::Utf8(v) => Arc::new(StringArray::from(v.clone())),
            HostValue::Boolean(v) => Arc::new(BooleanArray::from(v.clone())),
        }
    }

    /// 0-based first position of each element of `self` within `table`.
    ///
    /// Returns `Ok(None)` when the two vectors hold different element types. A
    /// missing element matches a missing entry in `table`. Floats compare by bit
    /// pattern, so `NaN` matches `NaN`. Fails when `table` has positions beyond
    /// the Int32 range.
    pub fn positions_in(&self, table: &HostValue) -> Result<Option<Int32Array>> {
        let positions = match (self, table) {
            (HostValue::Int64(x), HostValue::Int64(t)) => first_positions(x, t)?,
            (HostValue::Utf8(x), HostValue::Utf8(t)) => first_positions(x, t)?,
            (HostValue::Boolean(x), HostValue::Boolean(t)) => first_positions(x, t)?,
            (HostValue::Float64(x), HostValue::Float64(t)) => {
                let bits = |v: &Vec<Option<f64>>| -> Vec<Option<u64>> {
                    v.iter().map(|f| f.map(f64::to_bits)).collect()
                };
                first_positions(&bits(x), &bits(t))?
            }
            _ => return Ok(None),
        };
        Ok(Some(Int32Array::from(positions)))
    }
}

fn first_positions<T: Hash + Eq>(values: &[T], table: &[T]) -> Result<Vec<Option<i32>>> {
    first_positions_up_to(values, table, i32::MAX as usize)
}

fn first_positions_up_to<T: Hash + Eq>(
    values: &[T],
    table: &[T],
    max_position: usize,
) -> Result<Vec<Option<i32>>> {
    if table.len().saturating_sub(1) > max_position {
        return Err(Error::InvalidArgumentError(format!(
            "value table of {} entries is longer than the Int32 index range",
            table.len()
        )));
    }
    let mut first: FxHashMap<&T, i32> = FxHashMap::default();
    for (pos, entry) in table.iter().enumerate() {
        let pos = i32::try_from(pos).map_err(|_| {
            Error::InvalidArgumentError(format!("table position {pos} exceeds the Int32 range"))
        })?;
        first.entry(entry).or_insert(pos);
    }
    Ok(values.iter().map(|v| first.get(v).copied()).collect())
}

impl From<Vec<i64>> for HostValue {
    fn from(v: Vec<i64>) -> Self {
        HostValue::Int64(v.into_iter().map(Some).collect())
    }
}

impl From<Vec<f64>> for HostValue {
    fn from(v: Vec<f64>) -> Self {
        HostValue::Float64(v.into_iter().map(Some).collect())
    }
}

impl From<Vec<&str>> for HostValue {
    fn from(v: Vec<&str>) -> Self {
        HostValue::Utf8(v.into_iter().map(|s| Some(s.to_string())).collect())
    }
}

impl From<Vec<bool>> for HostValue {
    fn from(v: Vec<bool>) -> Self {
        HostValue::Boolean(v.into_iter().map(Some).collect())
    }
}

/// Any argument a caller may hand to the function gateway, valid or not.
#[derive(Debug, Clone)]
pub enum Value {
    Datum(Datum),
    Host(HostValue),
}

impl Value {
    /// The runtime type name used in argument errors.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Datum(datum) => datum.kind().name(),
            Value::Host(host) => host.type_name(),
        }
    }

    pub fn as_datum(&self) -> Option<&Datum> {
        match self {
            Value::Datum(datum) => Some(datum),
            Value::Host(_) => None,
        }
    }
}

impl From<Datum> for Value {
    fn from(datum: Datum) -> Self {
        Value::Datum(datum)
    }
}

impl From<HostValue> for Value {
    fn from(host: HostValue) -> Self {
        Value::Host(host)
    }
}

impl From<ArrayRef> for Value {
    fn from(array: ArrayRef) -> Self {
        Value::Datum(Datum::Array(array))
    }
}
