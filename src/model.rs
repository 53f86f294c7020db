mod error;
mod geometry;
mod image;
mod roi;


pub use error::{CoreError, Result};
pub use geometry::{CropRect, Rect, TileRequest};
pub use image::{
    Channel, DatasetId, DerivedImage, ImageId, PhysicalSize, ProjectId, ProjectRef, SourceImage,
};
pub use roi::{RoiId, RoiShape};
