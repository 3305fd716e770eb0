use std::sync::Arc;

use arrow::array::{
    Array, ArrayRef, AsArray, Float64Array, Int64Array, StructArray, UInt64Array, new_null_array,
};
use arrow::compute::SortOptions;
use arrow::compute::kernels::aggregate;
use arrow::compute::{cast, sort_to_indices, take};
use arrow::datatypes::{DataType, Field, Fields, Float64Type, Int64Type, UInt64Type};
use kerncall_result::EngineError;
use kerncall_types::{Datum, OptionBag};

use super::{flat_arg, scalar_datum};

/// Result type of `sum` over `input`: signed integers widen to Int64, unsigned to
/// UInt64, floats to Float64. `None` when `sum` has no kernel for the type.
pub fn sum_result_type(input: &DataType) -> Option<DataType> {
    match input {
        DataType::Null
        | DataType::Int8
        | DataType::Int16
        | DataType::Int32
        | DataType::Int64 => Some(DataType::Int64),
        DataType::UInt8 | DataType::UInt16 | DataType::UInt32 | DataType::UInt64 => {
            Some(DataType::UInt64)
        }
        DataType::Float16 | DataType::Float32 | DataType::Float64 => Some(DataType::Float64),
        _ => None,
    }
}

// `na_rm` is accepted but not consulted: missing values are always skipped.
pub(crate) fn sum(name: &str, args: &[Datum], _options: &OptionBag) -> Result<Datum, EngineError> {
    let input = flat_arg(name, args, 0)?;
    let target = sum_result_type(input.data_type())
        .ok_or_else(|| EngineError::unsupported_type(name, input.data_type()))?;
    let widened = cast(&input, &target)?;

    let out: ArrayRef = match target {
        DataType::Int64 => {
            let total = aggregate::sum_checked(widened.as_primitive::<Int64Type>())?;
            Arc::new(Int64Array::from(vec![total]))
        }
        DataType::UInt64 => {
            let total = aggregate::sum_checked(widened.as_primitive::<UInt64Type>())?;
            Arc::new(UInt64Array::from(vec![total]))
        }
        _ => {
            let total = aggregate::sum(widened.as_primitive::<Float64Type>());
            Arc::new(Float64Array::from(vec![total]))
        }
    };
    scalar_datum(name, out)
}

pub(crate) fn mean(name: &str, args: &[Datum], _options: &OptionBag) -> Result<Datum, EngineError> {
    let input = flat_arg(name, args, 0)?;
    if sum_result_type(input.data_type()).is_none() {
        return Err(EngineError::unsupported_type(name, input.data_type()));
    }
    let as_float = cast(&input, &DataType::Float64)?;
    let values = as_float.as_primitive::<Float64Type>();
    let count = values.len() - values.null_count();
    let mean = aggregate::sum(values)
        .filter(|_| count > 0)
        .map(|total| total / count as f64);
    scalar_datum(name, Arc::new(Float64Array::from(vec![mean])))
}

/// Struct scalar `{min, max}` typed like the input.
pub(crate) fn min_max(
    name: &str,
    args: &[Datum],
    _options: &OptionBag,
) -> Result<Datum, EngineError> {
    let input = flat_arg(name, args, 0)?;
    let data_type = input.data_type().clone();
    if !is_orderable(&data_type) {
        return Err(EngineError::unsupported_type(name, &data_type));
    }
    let min = extreme(&input, false)?;
    let max = extreme(&input, true)?;
    let fields = Fields::from(vec![
        Field::new("min", data_type.clone(), true),
        Field::new("max", data_type, true),
    ]);
    let strukt = StructArray::try_new(fields, vec![min, max], None)?;
    scalar_datum(name, Arc::new(strukt))
}

fn is_orderable(data_type: &DataType) -> bool {
    data_type.is_primitive()
        || matches!(
            data_type,
            DataType::Boolean
                | DataType::Utf8
                | DataType::LargeUtf8
                | DataType::Utf8View
                | DataType::Binary
                | DataType::LargeBinary
        )
}

/// Smallest (or largest) valid element as a length-one array; missing when every
/// element is missing.
fn extreme(input: &ArrayRef, descending: bool) -> Result<ArrayRef, EngineError> {
    if input.null_count() == input.len() {
        return Ok(new_null_array(input.data_type(), 1));
    }
    let options = SortOptions {
        descending,
        nulls_first: false,
    };
    let indices = sort_to_indices(input.as_ref(), Some(options), Some(1))?;
    Ok(take(input.as_ref(), &indices, None)?)
}
