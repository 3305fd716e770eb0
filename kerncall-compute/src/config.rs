/// Environment variable that turns on per-call argument logging.
pub const DEBUG_CALLS_ENV: &str = "KERNCALL_DEBUG_CALLS";

/// Run-time configuration for a [`crate::FunctionGateway`].
#[derive(Debug, Clone, Default)]
pub struct GatewayConfig {
    /// Log the kind, length and null count of every argument at debug level.
    pub log_arguments: bool,
}

impl GatewayConfig {
    /// Defaults, with argument logging enabled when `KERNCALL_DEBUG_CALLS` is set.
    pub fn from_env() -> Self {
        Self {
            log_arguments: std::env::var(DEBUG_CALLS_ENV).is_ok(),
        }
    }

    pub fn with_log_arguments(mut self, enabled: bool) -> Self {
        self.log_arguments = enabled;
        self
    }
}
