use std::sync::Arc;

use kerncall_result::EngineError;
use kerncall_types::{Datum, OptionBag};

/// A compute engine: named kernels invoked with positional columnar arguments and
/// an option bag.
///
/// The gateway treats implementations as black boxes. Whatever they return,
/// success or failure, reaches the caller unchanged.
pub trait ComputeEngine: Send + Sync {
    fn call(&self, name: &str, args: &[Datum], options: &OptionBag) -> Result<Datum, EngineError>;
}

impl<E: ComputeEngine + ?Sized> ComputeEngine for Arc<E> {
    fn call(&self, name: &str, args: &[Datum], options: &OptionBag) -> Result<Datum, EngineError> {
        (**self).call(name, args, options)
    }
}

impl<E: ComputeEngine + ?Sized> ComputeEngine for &E {
    fn call(&self, name: &str, args: &[Datum], options: &OptionBag) -> Result<Datum, EngineError> {
        (**self).call(name, args, options)
    }
}
