use crate::model::{DatasetId, ImageId, ProjectId, SourceImage};

use super::Result;

/// The hierarchical metadata catalog: projects contain datasets, datasets
/// contain images.
pub trait Catalog {
    /// Looks up an image record. `Ok(None)` means the id resolves to
    /// nothing, which is not a transport failure.
    fn image(&self, id: ImageId) -> Result<Option<SourceImage>>;

    /// The images of a dataset, in catalog order.
    fn dataset_images(&self, id: DatasetId) -> Result<Vec<ImageId>>;

    fn create_dataset(&self, name: &str, description: &str) -> Result<DatasetId>;

    /// Links an image into a dataset. Linking the same pair again is a
    /// no-op, so retries do not produce duplicate links.
    fn link_image(&self, dataset: DatasetId, image: ImageId) -> Result<()>;

    /// Links a dataset under a project.
    fn link_dataset(&self, project: ProjectId, dataset: DatasetId) -> Result<()>;
}
