//! Function dispatch for kerncall.
//!
//! - [`ComputeEngine`]: the seam to whatever executes named kernels.
//! - [`KernelRegistry`]: the builtin engine, a name-indexed table of Arrow kernels.
//! - [`call_function`] / [`FunctionGateway`]: argument validation and forwarding.
//! - [`collect_arrays`]: chunk consolidation ahead of multi-argument aggregation.

pub mod config;
pub mod consolidate;
pub mod engine;
pub mod gateway;
pub mod kernels;
pub mod registry;

pub use config::{DEBUG_CALLS_ENV, GatewayConfig};
pub use consolidate::collect_arrays;
pub use engine::ComputeEngine;
pub use gateway::{FunctionGateway, call_function, classify_arguments};
pub use kernels::sum_result_type;
pub use registry::{KernelEntry, KernelFn, KernelRegistry, builtin_registry};
