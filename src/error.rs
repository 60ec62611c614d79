use thiserror::Error;

pub type Result<T> = std::result::Result<T, DebugError>;

/// Every failure a single line can produce. All of these are recoverable:
/// the engine reports the message on the sink and accepts the next line.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DebugError {
    #[error("command not recognized: {0}")]
    UnknownCommand(String),

    #[error("invalid name: {0}")]
    InvalidName(String),

    #[error("invalid value: {0}")]
    InvalidValue(String),

    #[error("missing {0} argument")]
    MissingArgument(&'static str),

    #[error("variable not in memory: {0}")]
    VariableNotInMemory(String),

    #[error("function not defined: {0}")]
    FunctionNotDefined(String),

    #[error("function already defined: {0}")]
    FunctionAlreadyDefined(String),

    #[error("no code loaded")]
    NoCodeLoaded,

    #[error("end set code without set code")]
    CodeBlockNotOpen,
}
