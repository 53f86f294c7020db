use thiserror::Error;

pub type Result<T> = std::result::Result<T, BatchError>;

#[derive(Debug, Error)]
pub enum BatchError {
    #[error("batch specification failure: {0}")]
    Parse(String),

    #[error("batch I/O failure: {0}")]
    Io(#[from] std::io::Error),

    #[error("batch serialization failure: {0}")]
    SerdeJson(#[from] serde_json::Error),

    #[error("batch YAML serialization failure: {0}")]
    SerdeYaml(#[from] serde_yaml::Error),
}
