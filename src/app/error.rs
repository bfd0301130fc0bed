use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Cli(String),
    #[error("{0}")]
    Load(String),
}
