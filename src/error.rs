pub type Result<T> = std::result::Result<T, TreeError>;

#[derive(Debug, thiserror::Error)]
pub enum TreeError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid command: {0}")]
    Command(String),

    #[error("Script error: {0}")]
    Script(String),
}
