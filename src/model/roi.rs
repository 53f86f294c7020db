use std::fmt;

use serde::{Deserialize, Serialize};

use super::Rect;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(transparent)]
pub struct RoiId(pub u64);

impl fmt::Display for RoiId {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

/// A persisted rectangle shape, tagged with the plane it was drawn on.
/// Shapes sharing a `roi` describe the same spatial region across planes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoiShape {
    pub roi: RoiId,
    pub rect: Rect,
    pub z: usize,
    pub t: usize,
}
