use serde::{Deserialize, Serialize};

use crate::model::{CropRect, Rect, RoiId, RoiShape, SourceImage};

/// Whether resolved regions are widened to the image's full Z / T extent.
/// `z_stack` and `t_stack` are only consulted when `entire_stack` is set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StackPolicy {
    pub entire_stack: bool,
    pub z_stack: bool,
    pub t_stack: bool,
}

/// Inclusive plane range along one axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaneSpan {
    pub start: usize,
    pub end: usize,
}

impl PlaneSpan {
    pub fn count(&self) -> usize {
        self.end - self.start + 1
    }
}

/// One ROI resolved to a crop: a clamped rectangle plus the inclusive Z and
/// T ranges its shapes span.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedRegion {
    pub rect: CropRect,
    pub z: PlaneSpan,
    pub t: PlaneSpan,
}

impl ResolvedRegion {
    /// Number of planes a crop of this region reads and writes.
    pub fn plane_count(&self, size_c: usize) -> usize {
        self.z.count() * size_c * self.t.count()
    }
}

struct ShapeGroup {
    roi: RoiId,
    // Rectangle of the group's first shape. Later shapes are assumed to
    // repeat it on other planes and are not checked for agreement.
    rect: Rect,
    z_start: usize,
    z_end: usize,
    t_start: usize,
    t_end: usize,
}

/// Groups `shapes` by ROI, in first-seen order, and resolves each group to
/// a crop region. Z and T ranges are the min/max over the group's shapes,
/// optionally widened to the full stack per `policy`; the rectangle is
/// clamped to the image bounds. Groups whose rectangle clamps away
/// entirely are skipped.
pub fn resolve_regions(
    image: &SourceImage,
    shapes: &[RoiShape],
    policy: &StackPolicy,
) -> Vec<ResolvedRegion> {
    let mut groups: Vec<ShapeGroup> = Vec::new();
    for shape in shapes {
        match groups.iter_mut().find(|group| group.roi == shape.roi) {
            Some(group) => {
                group.z_start = group.z_start.min(shape.z);
                group.z_end = group.z_end.max(shape.z);
                group.t_start = group.t_start.min(shape.t);
                group.t_end = group.t_end.max(shape.t);
            }
            None => groups.push(ShapeGroup {
                roi: shape.roi,
                rect: shape.rect,
                z_start: shape.z,
                z_end: shape.z,
                t_start: shape.t,
                t_end: shape.t,
            }),
        }
    }

    let mut regions = Vec::with_capacity(groups.len());
    for group in groups {
        let mut z = PlaneSpan {
            start: group.z_start,
            end: group.z_end,
        };
        let mut t = PlaneSpan {
            start: group.t_start,
            end: group.t_end,
        };
        if policy.entire_stack {
            if policy.z_stack {
                z = PlaneSpan {
                    start: 0,
                    end: image.size_z - 1,
                };
            }
            if policy.t_stack {
                t = PlaneSpan {
                    start: 0,
                    end: image.size_t - 1,
                };
            }
        }
        let Some(rect) = group.rect.clamp_to(image.size_x, image.size_y) else {
            continue;
        };
        regions.push(ResolvedRegion { rect, z, t });
    }
    regions
}
