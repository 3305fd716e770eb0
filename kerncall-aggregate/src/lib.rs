//! Scalar aggregation over one or more array-like values.
//!
//! Inputs are consolidated with [`collect_arrays`] and sent to the engine's
//! `sum`, `mean` or `min_max` kernel through the [`FunctionGateway`]. The engine's
//! `sum` and `mean` skip missing values whether or not `na_rm` is set, so strict
//! calls (`na_rm = false`) over data that contains a missing value are answered
//! here with a missing scalar and never reach the engine. `min_max` is passed
//! through unchanged.

use std::fmt;
use std::str::FromStr;

use arrow::datatypes::DataType;
use kerncall_compute::{FunctionGateway, collect_arrays, sum_result_type};
use kerncall_result::{Error, Result};
use kerncall_types::{Datum, OptionBag, Scalar};

pub type AggregateResult<T> = Result<T>;

/// Aggregate kernels this adapter routes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AggregateFunction {
    Sum,
    Mean,
    MinMax,
}

impl AggregateFunction {
    /// Engine function name.
    pub const fn name(self) -> &'static str {
        match self {
            AggregateFunction::Sum => "sum",
            AggregateFunction::Mean => "mean",
            AggregateFunction::MinMax => "min_max",
        }
    }

    /// Whether a strict call over missing data short-circuits to a missing result.
    pub const fn propagates_missing(self) -> bool {
        matches!(self, AggregateFunction::Sum | AggregateFunction::Mean)
    }

    /// Type of the missing scalar returned by a short-circuited call.
    fn missing_result_type(self, input: Option<&DataType>) -> DataType {
        match self {
            AggregateFunction::Mean => DataType::Float64,
            _ => input.and_then(sum_result_type).unwrap_or(DataType::Int64),
        }
    }
}

impl fmt::Display for AggregateFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for AggregateFunction {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "sum" => Ok(AggregateFunction::Sum),
            "mean" => Ok(AggregateFunction::Mean),
            "min_max" => Ok(AggregateFunction::MinMax),
            other => Err(Error::InvalidArgumentError(format!(
                "`{other}` is not a scalar aggregate; expected sum, mean, or min_max"
            ))),
        }
    }
}

/// Consolidate `values` and aggregate them with `func`.
///
/// Returns a scalar; for [`AggregateFunction::MinMax`] a struct scalar with
/// fields `min` and `max`.
pub fn scalar_aggregate(
    gateway: &FunctionGateway,
    func: AggregateFunction,
    values: &[Datum],
    na_rm: bool,
) -> AggregateResult<Datum> {
    let consolidated = collect_arrays(values)?;

    if !na_rm && func.propagates_missing() && consolidated.null_count() > 0 {
        let data_type = func.missing_result_type(consolidated.data_type());
        tracing::debug!(
            function = func.name(),
            null_count = consolidated.null_count(),
            "strict aggregate over missing data; returning a missing result"
        );
        return Ok(Datum::Scalar(Scalar::new_null(&data_type)));
    }

    let options = OptionBag::new().with("na_rm", na_rm);
    gateway.call_datums(func.name(), &[consolidated], &options)
}

fn expect_scalar(func: AggregateFunction, out: Datum) -> AggregateResult<Scalar> {
    let kind = out.kind();
    out.into_scalar().ok_or_else(|| {
        Error::Internal(format!("`{func}` returned a {kind}, expected a Scalar"))
    })
}

pub fn sum(gateway: &FunctionGateway, values: &[Datum], na_rm: bool) -> AggregateResult<Scalar> {
    let out = scalar_aggregate(gateway, AggregateFunction::Sum, values, na_rm)?;
    expect_scalar(AggregateFunction::Sum, out)
}

pub fn mean(gateway: &FunctionGateway, values: &[Datum], na_rm: bool) -> AggregateResult<Scalar> {
    let out = scalar_aggregate(gateway, AggregateFunction::Mean, values, na_rm)?;
    expect_scalar(AggregateFunction::Mean, out)
}

fn min_max(gateway: &FunctionGateway, values: &[Datum], na_rm: bool) -> AggregateResult<Scalar> {
    let out = scalar_aggregate(gateway, AggregateFunction::MinMax, values, na_rm)?;
    expect_scalar(AggregateFunction::MinMax, out)
}

pub fn min(gateway: &FunctionGateway, values: &[Datum], na_rm: bool) -> AggregateResult<Scalar> {
    min_max(gateway, values, na_rm)?.field("min")
}

pub fn max(gateway: &FunctionGateway, values: &[Datum], na_rm: bool) -> AggregateResult<Scalar> {
    min_max(gateway, values, na_rm)?.field("max")
}

/// `(min, max)` from a single engine call.
pub fn range(
    gateway: &FunctionGateway,
    values: &[Datum],
    na_rm: bool,
) -> AggregateResult<(Scalar, Scalar)> {
    let both = min_max(gateway, values, na_rm)?;
    Ok((both.field("min")?, both.field("max")?))
}
