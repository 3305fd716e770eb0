use kerncall_compute::FunctionGateway;
use kerncall_result::Result;
use kerncall_types::{Datum, OptionBag};

/// Distinct values of `x`, in first-occurrence order.
pub fn unique_values(gateway: &FunctionGateway, x: &Datum) -> Result<Datum> {
    gateway.call_datums("unique", std::slice::from_ref(x), &OptionBag::new())
}

/// Struct array of `{values, counts}`, one row per distinct value of `x`.
pub fn value_counts(gateway: &FunctionGateway, x: &Datum) -> Result<Datum> {
    gateway.call_datums("value_counts", std::slice::from_ref(x), &OptionBag::new())
}
