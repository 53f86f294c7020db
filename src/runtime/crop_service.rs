use crate::client::{ClientError, Connection};
use crate::crop::{ResolvedRegion, StackPolicy, resolve_regions};
use crate::model::{ImageId, SourceImage};

use super::Result;

/// Region resolution against a live server, without creating anything.
#[derive(Debug, Clone, Copy, Default)]
pub struct CropService;

impl CropService {
    /// Fetches an image and its rectangle shapes and resolves the crop
    /// regions a batch run would process.
    pub fn resolve(
        &self,
        conn: &Connection,
        image: ImageId,
        policy: &StackPolicy,
    ) -> Result<(SourceImage, Vec<ResolvedRegion>)> {
        let source = conn
            .catalog()
            .image(image)?
            .ok_or(ClientError::NoSuchImage(image))?;
        let shapes = conn.rois().rectangles(image)?;
        let regions = resolve_regions(&source, &shapes, policy);
        Ok((source, regions))
    }
}
