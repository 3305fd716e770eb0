use arrow::datatypes::DataType;
use kerncall_compute::FunctionGateway;
use kerncall_result::Result;
use kerncall_types::{CastOptions, Datum};

/// Convert `x` to `to_type` under the lossy-conversion policy in `options`.
///
/// The result keeps the shape of `x`: arrays stay arrays, chunked arrays keep
/// their chunking and scalars stay scalars.
pub fn cast(
    gateway: &FunctionGateway,
    x: &Datum,
    to_type: &DataType,
    options: &CastOptions,
) -> Result<Datum> {
    let bag = options.to_option_bag().with("to_type", to_type.clone());
    gateway.call_datums("cast", std::slice::from_ref(x), &bag)
}
