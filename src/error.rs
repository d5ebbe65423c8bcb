use thiserror::Error;

/// Errors raised by the editor core.
///
/// Programming errors (`GroupNotFound`, `DuplicateFunction`) are returned as soon
/// as they are detected; callers are expected to treat them as fatal.
#[derive(Debug, Error)]
pub enum EditorError {
    #[error("event group not found: {0}")]
    GroupNotFound(String),

    #[error("function {0} already exists")]
    DuplicateFunction(String),

    #[error("function '{name}' failed: {reason}")]
    FunctionFailed { name: String, reason: String },

    #[error("no splat is selected")]
    NoSelection,

    #[error("nothing to {0}")]
    HistoryEmpty(&'static str),

    #[error("tool not found: {0}")]
    ToolNotFound(String),

    #[error("listener failed: {0}")]
    Listener(String),

    #[error("invalid config: {0}")]
    Config(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, EditorError>;
