//! kerncall: a thin function-dispatch layer over Arrow compute kernels.
//!
//! This crate is the user-facing entrypoint. It re-exports the gateway and
//! aggregation crates and adds the lookup, set and cast adapters.
//!
//! # Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//! use arrow::array::{ArrayRef, Int64Array};
//! use kerncall::{Datum, FunctionGateway, aggregate};
//!
//! let gateway = FunctionGateway::default();
//! let values: ArrayRef = Arc::new(Int64Array::from(vec![Some(1), Some(2), None]));
//! let values = [Datum::Array(values)];
//!
//! // Strict by default: a missing input makes the sum missing.
//! assert!(aggregate::sum(&gateway, &values, false).unwrap().is_null());
//! assert!(!aggregate::sum(&gateway, &values, true).unwrap().is_null());
//! ```
//!
//! # Architecture
//!
//! - **Types** (`kerncall-types`): `Datum`, chunked arrays, scalars, option bags.
//! - **Dispatch** (`kerncall-compute`): the `ComputeEngine` seam, builtin kernels,
//!   the Function Gateway and chunk consolidation.
//! - **Aggregation** (`kerncall-aggregate`): `sum`, `mean`, `min`, `max` with
//!   strict missing-value semantics.
//! - **Adapters** (this crate): membership lookup, unique values, casts.

pub mod cast;
pub mod lookup;
pub mod set;

pub use cast::cast;
pub use lookup::{is_in, match_values};
pub use set::{unique_values, value_counts};

pub use kerncall_aggregate as aggregate;
pub use kerncall_aggregate::{AggregateFunction, scalar_aggregate};

pub use kerncall_compute::{
    ComputeEngine, FunctionGateway, GatewayConfig, KernelRegistry, call_function, collect_arrays,
};

pub use kerncall_result::{EngineError, Error, Result};

pub use kerncall_types::{
    CastOptions, CastOptionsBuilder, ChunkedArray, Datum, DatumKind, HostValue, OptionBag,
    OptionValue, Scalar, Table, Value, cast_options,
};
