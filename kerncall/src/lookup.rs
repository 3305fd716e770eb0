//! Membership lookup: where (and whether) each value of `x` occurs in `table`.

use std::sync::Arc;

use arrow::array::{Array, ArrayRef, BooleanArray, Int32Array};
use kerncall_compute::FunctionGateway;
use kerncall_result::{Error, Result};
use kerncall_types::{Datum, OptionBag, Value};

pub const INDEX_IN: &str = "index_in_meta_binary";
pub const IS_IN: &str = "is_in_meta_binary";

/// 0-based position of each value of `x` within `table`, missing when absent.
///
/// A host `x` looked up in a host `table` of the same element type is matched
/// directly. Everything else goes through the gateway's `index_in_meta_binary`,
/// with host values and scalars turned into arrays first.
pub fn match_values(gateway: &FunctionGateway, x: &Value, table: &Value) -> Result<Int32Array> {
    if let Some(positions) = host_positions(x, table)? {
        return Ok(positions);
    }
    let out = lookup(gateway, INDEX_IN, x, table)?;
    downcast::<Int32Array>(INDEX_IN, out)
}

/// Whether each value of `x` occurs in `table`.
pub fn is_in(gateway: &FunctionGateway, x: &Value, table: &Value) -> Result<BooleanArray> {
    if let Some(positions) = host_positions(x, table)? {
        return Ok(positions.iter().map(|p| Some(p.is_some())).collect());
    }
    let out = lookup(gateway, IS_IN, x, table)?;
    downcast::<BooleanArray>(IS_IN, out)
}

fn host_positions(x: &Value, table: &Value) -> Result<Option<Int32Array>> {
    let (Value::Host(x), Value::Host(table)) = (x, table) else {
        return Ok(None);
    };
    let positions = x.positions_in(table)?;
    if positions.is_some() {
        tracing::trace!(len = x.len(), "host membership match");
    }
    Ok(positions)
}

fn lookup(gateway: &FunctionGateway, name: &str, x: &Value, table: &Value) -> Result<Datum> {
    let args = [columnar(x), columnar(table)];
    gateway.call_datums(name, &args, &OptionBag::new())
}

/// Host vectors and scalars become arrays so the result lines up element-wise.
/// RecordBatch and Table pass through for the engine to reject.
fn columnar(value: &Value) -> Datum {
    match value {
        Value::Host(host) => Datum::Array(host.to_array()),
        Value::Datum(Datum::Scalar(scalar)) => Datum::Array(Arc::clone(scalar.as_array())),
        Value::Datum(datum) => datum.clone(),
    }
}

fn downcast<A: Array + Clone + 'static>(name: &str, out: Datum) -> Result<A> {
    let kind = out.kind();
    let array: Option<ArrayRef> = match out {
        Datum::Array(array) => Some(array),
        Datum::ChunkedArray(chunked) => Some(chunked.concat()?),
        _ => None,
    };
    array
        .as_ref()
        .and_then(|array| array.as_any().downcast_ref::<A>())
        .cloned()
        .ok_or_else(|| Error::Internal(format!("`{name}` returned an unexpected {kind}")))
}
