use crate::model::{ImageId, RoiShape};

use super::Result;

/// Access to persisted ROI shapes.
pub trait RoiService {
    /// The rectangle shapes of every ROI on `image`, in persisted order.
    /// Non-rectangular shapes are not returned.
    fn rectangles(&self, image: ImageId) -> Result<Vec<RoiShape>>;
}
