use crate::client::ClientError;
use crate::model::CoreError;
use crate::workflow::BatchError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("model error: {0}")]
    Core(#[from] CoreError),

    #[error("server client error: {0}")]
    Client(#[from] ClientError),

    #[error("batch error: {0}")]
    Batch(#[from] BatchError),
}
