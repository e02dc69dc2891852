use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("GitHub API error: {0}")]
    GitHubApi(String),

    #[error("Invalid event payload: {0}")]
    Event(String),
}

pub type Result<T> = std::result::Result<T, AppError>;
