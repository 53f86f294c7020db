use ndarray::Array2;

use crate::model::{Channel, ImageId, PhysicalSize, TileRequest};

use super::Result;

/// A single 2D pixel plane at a fixed (Z, C, T) coordinate, shaped
/// `(height, width)`.
pub type PlaneBuffer = Array2<f32>;

/// Dimensions and descriptive fields of an image about to be created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewImage {
    pub name: String,
    pub size_x: usize,
    pub size_y: usize,
    pub size_z: usize,
    pub size_c: usize,
    pub size_t: usize,
    pub description: String,
}

impl NewImage {
    pub fn plane_count(&self) -> usize {
        self.size_z * self.size_c * self.size_t
    }
}

/// Tiled access to remote pixel data.
///
/// `create_image` pulls planes one at a time and assigns plane `k` to the
/// coordinate (z, c, t) with `k = (z * size_c + c) * size_t + t`, i.e. Z
/// outer, C middle, T inner. Feeding planes in any other order silently
/// scrambles channel and plane assignment, so producers must enumerate in
/// exactly this order.
///
/// One tile read or image creation may be in flight per session at a time;
/// all calls block.
pub trait PixelStore {
    /// Reads the sub-plane covered by `request` from an existing image.
    fn read_tile(&self, image: ImageId, request: &TileRequest) -> Result<PlaneBuffer>;

    /// Creates a new image from a plane sequence, consuming it lazily. The
    /// sequence must yield exactly `spec.plane_count()` planes of shape
    /// `(size_y, size_x)`; an `Err` item aborts creation.
    fn create_image(
        &self,
        spec: &NewImage,
        planes: &mut dyn Iterator<Item = Result<PlaneBuffer>>,
    ) -> Result<ImageId>;

    /// Prepares the rendering and metadata surface of a freshly created
    /// image. Channel metadata may only be written once this returns true.
    fn prepare_rendering(&self, image: ImageId) -> Result<bool>;

    /// Overwrites the descriptive metadata of one channel.
    fn update_channel(&self, image: ImageId, index: usize, channel: &Channel) -> Result<()>;

    /// Overwrites the physical voxel spacing of an image.
    fn set_physical_size(&self, image: ImageId, size: &PhysicalSize) -> Result<()>;
}
