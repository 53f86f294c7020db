use crate::model::{CoreError, DatasetId, ImageId, ProjectId, TileRequest};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ClientError>;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("no image with id {0}")]
    NoSuchImage(ImageId),

    #[error("no dataset with id {0}")]
    NoSuchDataset(DatasetId),

    #[error("no project with id {0}")]
    NoSuchProject(ProjectId),

    #[error("project {0} is not writable")]
    ProjectNotWritable(ProjectId),

    #[error("image {image} has no channel at index {index}")]
    NoSuchChannel { image: ImageId, index: usize },

    #[error("tile read out of bounds on image {image}: {request:?}")]
    TileOutOfBounds { image: ImageId, request: TileRequest },

    #[error("plane count mismatch: expected {expected} planes, got {actual}")]
    PlaneCountMismatch { expected: usize, actual: usize },

    #[error("plane {index} has shape {actual:?}, expected {expected:?}")]
    PlaneShapeMismatch {
        index: usize,
        expected: (usize, usize),
        actual: (usize, usize),
    },

    #[error("unsupported fixture format: {0}")]
    UnsupportedFormat(String),

    #[error("fixture I/O failure: {0}")]
    Io(#[from] std::io::Error),

    #[error("fixture JSON parse failure: {0}")]
    SerdeJson(#[from] serde_json::Error),

    #[error("fixture YAML parse failure: {0}")]
    SerdeYaml(#[from] serde_yaml::Error),

    #[error("invalid image record: {0}")]
    Core(#[from] CoreError),
}
