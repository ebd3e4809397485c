use dp_core::CoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum OptimizeError {
    #[error(transparent)]
    Config(#[from] CoreError),
}

pub type OptimizeResult<T> = Result<T, OptimizeError>;
