use std::str::FromStr;

use arrow::array::{Array, ArrayRef, AsArray};
use arrow::compute::kernels::cmp;
use arrow::compute::{CastOptions as ArrowCastOptions, can_cast_types, cast_with_options};
use arrow::datatypes::{DataType, Float64Type, Int64Type, TimeUnit};
use arrow::util::display::FormatOptions;
use kerncall_result::EngineError;
use kerncall_types::{ChunkedArray, Datum, OptionBag, OptionValue};

use super::scalar_datum;

/// Lossy-conversion flags as read from the option bag.
#[derive(Debug, Clone, Copy)]
struct CastFlags {
    allow_int_overflow: bool,
    allow_time_truncate: bool,
    allow_float_truncate: bool,
}

impl CastFlags {
    fn from_options(options: &OptionBag) -> Self {
        let safe = options.get_bool("safe").unwrap_or(true);
        let flag = |key: &str| options.get_bool(key).unwrap_or(!safe);
        Self {
            allow_int_overflow: flag("allow_int_overflow"),
            allow_time_truncate: flag("allow_time_truncate"),
            allow_float_truncate: flag("allow_float_truncate"),
        }
    }
}

/// Cast an array, chunked array or scalar to the `to_type` option, keeping its shape.
pub(crate) fn cast(name: &str, args: &[Datum], options: &OptionBag) -> Result<Datum, EngineError> {
    let to_type = target_type(name, options)?;
    let flags = CastFlags::from_options(options);
    let input = args.first().ok_or_else(|| EngineError::InvalidArity {
        name: name.to_string(),
        expected: 1,
        actual: 0,
    })?;

    match input {
        Datum::Array(array) => Ok(Datum::Array(cast_array(name, array, &to_type, flags)?)),
        Datum::Scalar(scalar) => {
            scalar_datum(name, cast_array(name, scalar.as_array(), &to_type, flags)?)
        }
        Datum::ChunkedArray(chunked) => {
            let chunks = chunked
                .chunks()
                .iter()
                .map(|chunk| cast_array(name, chunk, &to_type, flags))
                .collect::<Result<Vec<_>, _>>()?;
            let out = ChunkedArray::try_new_with_type(to_type, chunks)
                .map_err(|err| EngineError::execution(name, err.to_string()))?;
            Ok(Datum::ChunkedArray(out))
        }
        other => Err(EngineError::UnsupportedArgument {
            name: name.to_string(),
            index: 0,
            kind: other.kind().to_string(),
        }),
    }
}

/// The `to_type` option, given as a `DataType` or as its textual form.
fn target_type(name: &str, options: &OptionBag) -> Result<DataType, EngineError> {
    let invalid = |reason: String| EngineError::InvalidOption {
        name: name.to_string(),
        option: "to_type".into(),
        reason,
    };
    match options.get("to_type") {
        Some(OptionValue::DataType(data_type)) => Ok(data_type.clone()),
        Some(OptionValue::Str(raw)) => {
            DataType::from_str(raw).map_err(|err| invalid(err.to_string()))
        }
        Some(other) => Err(invalid(format!("expected a data type, got {other}"))),
        None => Err(invalid("a target type is required".into())),
    }
}

fn cast_array(
    name: &str,
    array: &ArrayRef,
    to_type: &DataType,
    flags: CastFlags,
) -> Result<ArrayRef, EngineError> {
    let from_type = array.data_type();

    if !flags.allow_float_truncate && from_type.is_floating() && to_type.is_integer() {
        reject_fractional(name, array, to_type)?;
    }

    // Arrow's `safe` turns failed conversions into nulls instead of errors.
    let arrow_options = ArrowCastOptions {
        safe: flags.allow_int_overflow && to_type.is_integer(),
        format_options: FormatOptions::default(),
    };
    let out = cast_with_options(array, to_type, &arrow_options)?;

    if !flags.allow_time_truncate && from_type.is_temporal() && to_type.is_temporal() {
        reject_time_truncation(name, array, &out, to_type)?;
    }
    Ok(out)
}

fn reject_fractional(name: &str, array: &ArrayRef, to_type: &DataType) -> Result<(), EngineError> {
    let as_float = arrow::compute::cast(array, &DataType::Float64)?;
    let truncated = as_float
        .as_primitive::<Float64Type>()
        .iter()
        .flatten()
        .find(|v| v.is_finite() && v.fract() != 0.0);
    match truncated {
        Some(v) => Err(EngineError::execution(
            name,
            format!("float value {v} would be truncated converting to {to_type}"),
        )),
        None => Ok(()),
    }
}

/// Temporal casts must not drop any part of a value finer than the target unit.
fn reject_time_truncation(
    name: &str,
    original: &ArrayRef,
    casted: &ArrayRef,
    to_type: &DataType,
) -> Result<(), EngineError> {
    let from_type = original.data_type();
    let lossy = match round_trip_mismatch(original, casted) {
        Some(found) => found,
        None => unit_remainder(original, to_type)?,
    };
    match lossy {
        Some(idx) => Err(EngineError::execution(
            name,
            format!("value at position {idx} would lose precision converting {from_type} to {to_type}"),
        )),
        None => Ok(()),
    }
}

/// First position that changes when cast back to the original type.
///
/// `None` when Arrow cannot cast back.
fn round_trip_mismatch(original: &ArrayRef, casted: &ArrayRef) -> Option<Option<usize>> {
    if !can_cast_types(casted.data_type(), original.data_type()) {
        return None;
    }
    let round_trip = arrow::compute::cast(casted, original.data_type()).ok()?;
    let same = cmp::eq(original, &round_trip).ok()?;
    Some((0..same.len()).find(|&idx| same.is_valid(idx) && !same.value(idx)))
}

/// First position holding a fraction of the target's unit.
fn unit_remainder(original: &ArrayRef, to_type: &DataType) -> Result<Option<usize>, EngineError> {
    let (Some(from_unit), Some(to_unit)) = (unit_nanos(original.data_type()), unit_nanos(to_type))
    else {
        return Ok(None);
    };
    if to_unit <= from_unit {
        return Ok(None);
    }
    let factor = to_unit / from_unit;
    let raw = arrow::compute::cast(original, &DataType::Int64)?;
    let raw = raw.as_primitive::<Int64Type>();
    Ok((0..raw.len()).find(|&idx| raw.is_valid(idx) && raw.value(idx) % factor != 0))
}

/// Nanoseconds per stored tick.
fn unit_nanos(data_type: &DataType) -> Option<i64> {
    let of = |unit: &TimeUnit| match unit {
        TimeUnit::Second => 1_000_000_000,
        TimeUnit::Millisecond => 1_000_000,
        TimeUnit::Microsecond => 1_000,
        TimeUnit::Nanosecond => 1,
    };
    match data_type {
        DataType::Timestamp(unit, _)
        | DataType::Time32(unit)
        | DataType::Time64(unit)
        | DataType::Duration(unit) => Some(of(unit)),
        DataType::Date32 => Some(86_400_000_000_000),
        DataType::Date64 => Some(1_000_000),
        _ => None,
    }
}
