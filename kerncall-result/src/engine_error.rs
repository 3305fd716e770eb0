use thiserror::Error;

/// Failures reported by a compute engine.
///
/// The dispatch layer never inspects these beyond wrapping them in
/// [`crate::Error::Engine`].
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("no kernel registered for function `{name}`")]
    UnknownFunction { name: String },

    #[error("function `{name}` takes {expected} argument(s), got {actual}")]
    InvalidArity {
        name: String,
        expected: usize,
        actual: usize,
    },

    #[error("function `{name}` cannot take a {kind} as argument {index}")]
    UnsupportedArgument {
        name: String,
        index: usize,
        kind: String,
    },

    #[error("function `{name}` has no kernel for input type {data_type}")]
    UnsupportedType { name: String, data_type: String },

    #[error("invalid option `{option}` for function `{name}`: {reason}")]
    InvalidOption {
        name: String,
        option: String,
        reason: String,
    },

    #[error("function `{name}` failed: {message}")]
    Execution { name: String, message: String },

    #[error("Arrow error: {0}")]
    Arrow(#[from] arrow::error::ArrowError),
}

impl EngineError {
    pub fn unsupported_type(name: &str, data_type: &arrow::datatypes::DataType) -> Self {
        EngineError::UnsupportedType {
            name: name.to_string(),
            data_type: data_type.to_string(),
        }
    }

    pub fn execution(name: &str, message: impl Into<String>) -> Self {
        EngineError::Execution {
            name: name.to_string(),
            message: message.into(),
        }
    }
}
