use log::info;

use crate::client::{Catalog, Result};
use crate::model::{DatasetId, SourceImage};

/// Where a batch files its derived images.
///
/// Existing-parent mode reuses each source image's own parent dataset.
/// New-dataset mode creates one dataset shared by the whole batch, lazily,
/// the first time a region needs it; the dataset is linked under the
/// triggering source image's parent project when that project is writable.
#[derive(Debug)]
pub struct DestinationResolver {
    new_dataset: Option<String>,
    created: Option<DatasetId>,
}

impl DestinationResolver {
    pub fn existing_parent() -> Self {
        Self {
            new_dataset: None,
            created: None,
        }
    }

    pub fn new_dataset(name: impl Into<String>) -> Self {
        Self {
            new_dataset: Some(name.into()),
            created: None,
        }
    }

    /// The shared dataset created so far, if any.
    pub fn created(&self) -> Option<DatasetId> {
        self.created
    }

    /// The dataset the next derived image of `source` should be filed
    /// into, creating the shared dataset on first use. `Ok(None)` means
    /// the image stays unfiled (no parent dataset to reuse).
    pub fn resolve(
        &mut self,
        catalog: &dyn Catalog,
        source: &SourceImage,
    ) -> Result<Option<DatasetId>> {
        let Some(name) = &self.new_dataset else {
            return Ok(source.parent_dataset);
        };
        if let Some(dataset) = self.created {
            return Ok(Some(dataset));
        }
        let description = format!(
            "Images in this Dataset are from ROIs of parent Image:\nName: {}\nImage ID: {}",
            source.name, source.id
        );
        let dataset = catalog.create_dataset(name, &description)?;
        info!(
            "created dataset `{name}` ({dataset}) for images from ROIs of image {}",
            source.id
        );
        if let Some(project) = source.parent_project.filter(|project| project.writable) {
            catalog.link_dataset(project.id, dataset)?;
        }
        self.created = Some(dataset);
        Ok(Some(dataset))
    }
}
