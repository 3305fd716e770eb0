//! Error types and result definitions for the kerncall dispatch layer.
//!
//! All kerncall crates share one error enum ([`Error`]) and one result alias
//! ([`Result<T>`]). Engines speak a narrower vocabulary ([`EngineError`]) which
//! the gateway lifts into [`Error::Engine`] without changing it.
//!
//! # Error Categories
//!
//! - **Argument kind failures** ([`Error::TypeError`]): a positional argument is not
//!   a columnar value. Raised before any engine call.
//! - **Precondition failures** ([`Error::InvalidArgumentError`]): empty function
//!   names, unnamed options, inconsistent chunk sets.
//! - **Engine failures** ([`Error::Engine`]): unknown functions, arity or option
//!   mismatches, computation faults. Propagated verbatim.
//! - **Data format errors** ([`Error::Arrow`]): Arrow failures while this layer
//!   reshapes values itself.
//! - **Internal errors** ([`Error::Internal`]): an engine result of an unexpected shape.

pub mod engine_error;
pub mod error;
pub mod result;

pub use engine_error::EngineError;
pub use error::{Error, join_disjunction};
pub use result::Result;
