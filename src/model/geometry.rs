use serde::{Deserialize, Serialize};

/// Rectangle as drawn: shape coordinates may fall outside the image, so the
/// fields are signed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rect {
    pub x: i64,
    pub y: i64,
    pub width: i64,
    pub height: i64,
}

impl Rect {
    pub fn new(x: i64, y: i64, width: i64, height: i64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Clamps the rectangle to an image of `size_x` by `size_y` pixels:
    /// negative origins move to 0, then width and height are truncated at
    /// the image boundary. Returns `None` when nothing of the rectangle
    /// remains.
    pub fn clamp_to(&self, size_x: usize, size_y: usize) -> Option<CropRect> {
        let mut x = self.x;
        let mut y = self.y;
        let mut width = self.width;
        let mut height = self.height;
        if x < 0 {
            x = 0;
        }
        if y < 0 {
            y = 0;
        }
        if x + width > size_x as i64 {
            width = size_x as i64 - x;
        }
        if y + height > size_y as i64 {
            height = size_y as i64 - y;
        }
        if width <= 0 || height <= 0 {
            return None;
        }
        Some(CropRect {
            x: x as usize,
            y: y as usize,
            width: width as usize,
            height: height as usize,
        })
    }
}

/// Rectangle known to lie inside its image, with non-zero extent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CropRect {
    pub x: usize,
    pub y: usize,
    pub width: usize,
    pub height: usize,
}

/// One pixel-store read: a sub-rectangle of the plane at (z, c, t).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileRequest {
    pub z: usize,
    pub c: usize,
    pub t: usize,
    pub rect: CropRect,
}
