use std::sync::Arc;

use arrow::array::{Array, ArrayRef, BooleanArray, Int32Array, Int64Array, StructArray, UInt32Array};
use arrow::compute::{cast, take};
use arrow::datatypes::{DataType, Field, Fields};
use arrow::row::{Row, RowConverter, Rows, SortField};
use kerncall_result::EngineError;
use kerncall_types::{Datum, OptionBag};
use rustc_hash::{FxHashMap, FxHashSet};

use super::{flat_arg, take_index};

fn to_rows(converter: &RowConverter, array: &ArrayRef) -> Result<Rows, EngineError> {
    Ok(converter.convert_columns(std::slice::from_ref(array))?)
}

/// Distinct values in first-occurrence order; a missing value is kept once.
pub(crate) fn unique(
    name: &str,
    args: &[Datum],
    _options: &OptionBag,
) -> Result<Datum, EngineError> {
    let input = flat_arg(name, args, 0)?;
    let converter = RowConverter::new(vec![SortField::new(input.data_type().clone())])?;
    let rows = to_rows(&converter, &input)?;

    let mut seen: FxHashSet<Row<'_>> = FxHashSet::default();
    let mut keep = Vec::new();
    for idx in 0..rows.num_rows() {
        if seen.insert(rows.row(idx)) {
            keep.push(take_index(name, idx)?);
        }
    }
    let out = take(input.as_ref(), &UInt32Array::from(keep), None)?;
    Ok(Datum::Array(out))
}

/// Struct array `{values, counts}` in first-occurrence order.
pub(crate) fn value_counts(
    name: &str,
    args: &[Datum],
    _options: &OptionBag,
) -> Result<Datum, EngineError> {
    let input = flat_arg(name, args, 0)?;
    let converter = RowConverter::new(vec![SortField::new(input.data_type().clone())])?;
    let rows = to_rows(&converter, &input)?;

    let mut slots: FxHashMap<Row<'_>, usize> = FxHashMap::default();
    let mut firsts = Vec::new();
    let mut counts: Vec<i64> = Vec::new();
    for idx in 0..rows.num_rows() {
        let slot = *slots.entry(rows.row(idx)).or_insert_with(|| {
            counts.push(0);
            firsts.push(idx);
            counts.len() - 1
        });
        counts[slot] += 1;
    }

    let firsts = firsts
        .into_iter()
        .map(|idx| take_index(name, idx))
        .collect::<Result<Vec<u32>, _>>()?;
    let values = take(input.as_ref(), &UInt32Array::from(firsts), None)?;
    let fields = Fields::from(vec![
        Field::new("values", input.data_type().clone(), true),
        Field::new("counts", DataType::Int64, false),
    ]);
    let strukt = StructArray::try_new(
        fields,
        vec![values, Arc::new(Int64Array::from(counts)) as ArrayRef],
        None,
    )?;
    Ok(Datum::Array(Arc::new(strukt)))
}

/// 0-based first position of each value within the value set; missing when absent.
pub(crate) fn index_in(
    name: &str,
    args: &[Datum],
    _options: &OptionBag,
) -> Result<Datum, EngineError> {
    let (values, value_set) = binary_inputs(name, args)?;
    let converter = RowConverter::new(vec![SortField::new(values.data_type().clone())])?;
    let value_rows = to_rows(&converter, &values)?;
    let set_rows = to_rows(&converter, &value_set)?;

    let mut first: FxHashMap<Row<'_>, i32> = FxHashMap::default();
    for idx in 0..set_rows.num_rows() {
        let pos = i32::try_from(idx).map_err(|_| {
            EngineError::execution(name, "value set is longer than the Int32 index range")
        })?;
        first.entry(set_rows.row(idx)).or_insert(pos);
    }

    let out: Int32Array = (0..value_rows.num_rows())
        .map(|idx| first.get(&value_rows.row(idx)).copied())
        .collect();
    Ok(Datum::Array(Arc::new(out)))
}

/// Whether each value occurs in the value set.
pub(crate) fn is_in(
    name: &str,
    args: &[Datum],
    _options: &OptionBag,
) -> Result<Datum, EngineError> {
    let (values, value_set) = binary_inputs(name, args)?;
    let converter = RowConverter::new(vec![SortField::new(values.data_type().clone())])?;
    let value_rows = to_rows(&converter, &values)?;
    let set_rows = to_rows(&converter, &value_set)?;

    let members: FxHashSet<Row<'_>> = (0..set_rows.num_rows()).map(|i| set_rows.row(i)).collect();
    let out: BooleanArray = (0..value_rows.num_rows())
        .map(|idx| Some(members.contains(&value_rows.row(idx))))
        .collect();
    Ok(Datum::Array(Arc::new(out)))
}

/// The values argument plus the value set cast to the values' type.
fn binary_inputs(name: &str, args: &[Datum]) -> Result<(ArrayRef, ArrayRef), EngineError> {
    let values = flat_arg(name, args, 0)?;
    let mut value_set = flat_arg(name, args, 1)?;
    if value_set.data_type() != values.data_type() {
        value_set = cast(&value_set, values.data_type())?;
    }
    Ok((values, value_set))
}
