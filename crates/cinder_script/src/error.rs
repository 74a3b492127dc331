//! Script registry errors

use thiserror::Error;

/// Errors raised when scripts reach into the registry
#[derive(Debug, Error)]
pub enum ScriptError {
    #[error("Unknown function: {0}")]
    UnknownFunction(String),

    #[error("Unknown type: {0}")]
    UnknownType(String),

    #[error("Type '{type_name}' has no member '{member}'")]
    UnknownMember { type_name: String, member: String },

    #[error("Property '{property}' of '{type_name}' is read-only")]
    ReadOnlyProperty { type_name: String, property: String },

    #[error("Expected user data, got {0}")]
    NotUserData(&'static str),

    #[error("Type '{0}' has no constructor")]
    NoConstructor(String),

    #[error("{name}: {message}")]
    CallFailed { name: String, message: String },
}

impl ScriptError {
    /// Wrap a native function's error message
    pub fn call_failed(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::CallFailed {
            name: name.into(),
            message: message.into(),
        }
    }
}

/// Script registry result
pub type ScriptResult<T> = Result<T, ScriptError>;
