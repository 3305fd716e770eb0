use std::sync::OnceLock;

use kerncall_result::EngineError;
use kerncall_types::{Datum, OptionBag};
use rustc_hash::FxHashMap;

use crate::engine::ComputeEngine;
use crate::kernels;

/// Signature shared by every registered kernel. The function name is passed
/// through so kernels can attribute their errors.
pub type KernelFn = fn(&str, &[Datum], &OptionBag) -> Result<Datum, EngineError>;

/// A registered kernel and the number of positional arguments it takes.
#[derive(Clone, Copy)]
pub struct KernelEntry {
    pub arity: usize,
    pub kernel: KernelFn,
}

impl std::fmt::Debug for KernelEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KernelEntry")
            .field("arity", &self.arity)
            .field("kernel", &"<fn>")
            .finish()
    }
}

/// Name-indexed table of Arrow kernels. Acts as the default [`ComputeEngine`].
#[derive(Debug, Clone, Default)]
pub struct KernelRegistry {
    kernels: FxHashMap<String, KernelEntry>,
}

static BUILTIN: OnceLock<KernelRegistry> = OnceLock::new();

/// Process-wide registry holding the builtin kernels.
pub fn builtin_registry() -> &'static KernelRegistry {
    BUILTIN.get_or_init(KernelRegistry::builtin)
}

impl KernelRegistry {
    /// A registry with no kernels.
    pub fn empty() -> Self {
        Self::default()
    }

    /// A registry populated with every builtin kernel.
    pub fn builtin() -> Self {
        let mut registry = Self::empty();
        registry.register("sum", 1, kernels::aggregate::sum);
        registry.register("mean", 1, kernels::aggregate::mean);
        registry.register("min_max", 1, kernels::aggregate::min_max);
        registry.register("unique", 1, kernels::set::unique);
        registry.register("value_counts", 1, kernels::set::value_counts);
        registry.register("index_in_meta_binary", 2, kernels::set::index_in);
        registry.register("is_in_meta_binary", 2, kernels::set::is_in);
        registry.register("cast", 1, kernels::cast::cast);
        registry
    }

    /// Register `kernel` under `name`, returning any entry it replaces.
    pub fn register(
        &mut self,
        name: impl Into<String>,
        arity: usize,
        kernel: KernelFn,
    ) -> Option<KernelEntry> {
        let name = name.into();
        tracing::trace!(function = %name, arity, "registering kernel");
        self.kernels.insert(name, KernelEntry { arity, kernel })
    }

    pub fn get(&self, name: &str) -> Option<&KernelEntry> {
        self.kernels.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.kernels.contains_key(name)
    }

    /// Registered function names, sorted.
    pub fn function_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.kernels.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl ComputeEngine for KernelRegistry {
    fn call(&self, name: &str, args: &[Datum], options: &OptionBag) -> Result<Datum, EngineError> {
        let entry = self
            .kernels
            .get(name)
            .ok_or_else(|| EngineError::UnknownFunction {
                name: name.to_string(),
            })?;
        if args.len() != entry.arity {
            return Err(EngineError::InvalidArity {
                name: name.to_string(),
                expected: entry.arity,
                actual: args.len(),
            });
        }
        (entry.kernel)(name, args, options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_names() {
        assert_eq!(
            builtin_registry().function_names(),
            vec![
                "cast",
                "index_in_meta_binary",
                "is_in_meta_binary",
                "mean",
                "min_max",
                "sum",
                "unique",
                "value_counts",
            ]
        );
    }

    #[test]
    fn unknown_function_and_arity() {
        let registry = KernelRegistry::builtin();
        let err = registry
            .call("median", &[], &OptionBag::new())
            .unwrap_err();
        assert!(matches!(err, EngineError::UnknownFunction { name } if name == "median"));

        let err = registry.call("sum", &[], &OptionBag::new()).unwrap_err();
        assert!(matches!(
            err,
            EngineError::InvalidArity {
                expected: 1,
                actual: 0,
                ..
            }
        ));
    }

    #[test]
    fn register_replaces() {
        fn always_empty(_: &str, _: &[Datum], _: &OptionBag) -> Result<Datum, EngineError> {
            Err(EngineError::execution("noop", "nothing to do"))
        }
        let mut registry = KernelRegistry::empty();
        assert!(registry.register("noop", 0, always_empty).is_none());
        assert!(registry.register("noop", 0, always_empty).is_some());
        assert!(registry.contains("noop"));
    }
}
