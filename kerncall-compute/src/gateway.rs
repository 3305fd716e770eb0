use std::sync::Arc;

use kerncall_result::{Error, Result};
use kerncall_types::{Datum, DatumKind, OptionBag, Value};

use crate::config::GatewayConfig;
use crate::engine::ComputeEngine;
use crate::registry::builtin_registry;

/// Validate `args` and forward the call to `engine`.
///
/// Every argument must be a columnar value. The first one that is not fails the
/// call with [`Error::TypeError`] before the engine is contacted. Engine failures
/// come back as [`Error::Engine`] exactly as the engine reported them.
pub fn call_function(
    engine: &dyn ComputeEngine,
    name: &str,
    args: &[Value],
    options: &OptionBag,
) -> Result<Datum> {
    let datums = classify_arguments(args)?;
    dispatch(engine, name, &datums, options, false)
}

/// Resolve every argument to a [`Datum`], failing on the lowest-index host value.
pub fn classify_arguments(args: &[Value]) -> Result<Vec<Datum>> {
    args.iter()
        .enumerate()
        .map(|(index, arg)| match arg {
            Value::Datum(datum) => Ok(datum.clone()),
            Value::Host(host) => {
                tracing::debug!(index, actual = host.type_name(), "rejecting non-columnar argument");
                Err(Error::type_error(
                    index,
                    host.type_name(),
                    &DatumKind::all_names(),
                ))
            }
        })
        .collect()
}

fn check_call(name: &str, options: &OptionBag) -> Result<()> {
    if name.trim().is_empty() {
        return Err(Error::InvalidArgumentError(
            "function name must be a non-empty string".into(),
        ));
    }
    if options.has_unnamed_entry() {
        return Err(Error::InvalidArgumentError(format!(
            "options for `{name}` contain an entry without a name"
        )));
    }
    Ok(())
}

fn dispatch(
    engine: &dyn ComputeEngine,
    name: &str,
    args: &[Datum],
    options: &OptionBag,
    log_arguments: bool,
) -> Result<Datum> {
    check_call(name, options)?;
    tracing::trace!(function = name, arity = args.len(), %options, "dispatching compute call");
    if log_arguments {
        for (index, arg) in args.iter().enumerate() {
            tracing::debug!(
                function = name,
                index,
                kind = %arg.kind(),
                len = arg.len(),
                null_count = arg.null_count(),
                "compute call argument"
            );
        }
    }
    Ok(engine.call(name, args, options)?)
}

/// The single point of contact with a compute engine.
///
/// Holds no mutable state; cloning shares the engine.
#[derive(Clone)]
pub struct FunctionGateway {
    engine: Arc<dyn ComputeEngine>,
    config: GatewayConfig,
}

impl std::fmt::Debug for FunctionGateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FunctionGateway")
            .field("engine", &"<compute engine>")
            .field("config", &self.config)
            .finish()
    }
}

impl Default for FunctionGateway {
    /// A gateway over the builtin kernels, configured from the environment.
    fn default() -> Self {
        Self::with_config(Arc::new(builtin_registry()), GatewayConfig::from_env())
    }
}

impl FunctionGateway {
    pub fn new(engine: Arc<dyn ComputeEngine>) -> Self {
        Self::with_config(engine, GatewayConfig::default())
    }

    pub fn with_config(engine: Arc<dyn ComputeEngine>, config: GatewayConfig) -> Self {
        Self { engine, config }
    }

    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    pub fn engine(&self) -> &dyn ComputeEngine {
        self.engine.as_ref()
    }

    /// Validate and forward a call whose arguments may include non-columnar values.
    pub fn call(&self, name: &str, args: &[Value], options: &OptionBag) -> Result<Datum> {
        let datums = classify_arguments(args)?;
        self.call_datums(name, &datums, options)
    }

    /// Forward a call whose arguments are already columnar.
    pub fn call_datums(&self, name: &str, args: &[Datum], options: &OptionBag) -> Result<Datum> {
        dispatch(
            self.engine.as_ref(),
            name,
            args,
            options,
            self.config.log_arguments,
        )
    }
}
