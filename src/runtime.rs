mod batch_service;
mod context;
mod crop_service;
mod error;

pub use batch_service::BatchService;
pub use context::AppContext;
pub use crop_service::CropService;
pub use error::{AppError, Result};
