use thiserror::Error;

pub type Result<T> = std::result::Result<T, CareflowError>;

#[derive(Debug, Error)]
pub enum CareflowError {
    #[error("Column not found: {0}")]
    ColumnNotFound(String),

    #[error("Task not found: {0}")]
    TaskNotFound(String),

    #[error("Title must not be blank")]
    BlankTitle,

    #[error("No column is titled '{0}'")]
    UnknownStatus(String),

    #[error("Invalid task ID: {0:?}")]
    InvalidTaskId(String),

    #[error("Invalid column ID: {0:?}")]
    InvalidColumnId(String),

    #[error("Invalid priority '{0}'. Valid priorities: low, medium, high")]
    InvalidPriority(String),

    #[error("Invalid board snapshot: {0}")]
    InvalidSnapshot(String),

    #[error("Board invariant violated: {0}")]
    InvariantViolation(String),

    #[error("Invalid board ID: {0}")]
    InvalidBoardId(String),

    #[error("Board not found: {0}")]
    BoardNotFound(String),

    #[error("Project not initialized. Call Storage::initialize first.")]
    ProjectNotInitialized,

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Config parse error: {0}")]
    TomlDeError(#[from] toml::de::Error),

    #[error("Config write error: {0}")]
    TomlSerError(#[from] toml::ser::Error),
}
