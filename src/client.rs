mod catalog;
mod connection;
mod error;
mod fixture;
mod memory;
mod pixel_store;
mod roi_service;

#[cfg(test)]
mod tests;

pub use catalog::Catalog;
pub use connection::Connection;
pub use error::{ClientError, Result};
pub use fixture::{
    ChannelFixture, DatasetFixture, ImageFixture, ProjectFixture, RoiFixture, ServerFixture,
    ShapeFixture, load_server,
};
pub use memory::{DatasetRecord, MemoryServer, synthetic_plane};
pub use pixel_store::{NewImage, PixelStore, PlaneBuffer};
pub use roi_service::RoiService;
