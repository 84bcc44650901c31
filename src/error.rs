use thiserror::Error;

pub type Result<T> = std::result::Result<T, GitstatsError>;

#[derive(Error, Debug)]
pub enum GitstatsError {
    #[error("Git error: {0}")]
    Git(String),
    #[error("Worker pool error: {0}")]
    Pool(#[from] rayon::ThreadPoolBuildError),
    #[error("Invalid configuration: {0}")]
    Config(String),
}
