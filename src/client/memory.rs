use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

use ndarray::{Array2, s};

use crate::model::{
    Channel, DatasetId, ImageId, PhysicalSize, ProjectId, ProjectRef, RoiShape, SourceImage,
    TileRequest,
};

use super::{Catalog, ClientError, NewImage, PixelStore, PlaneBuffer, Result, RoiService};

/// Deterministic pixel data for seeded images: every plane gets a distinct
/// offset and every pixel encodes its position, so a crop can be checked
/// against the coordinates it claims to have come from.
pub fn synthetic_plane(plane: usize, size_x: usize, size_y: usize) -> PlaneBuffer {
    Array2::from_shape_fn((size_y, size_x), |(row, col)| {
        plane as f32 * 1_000_000.0 + (row * size_x + col) as f32
    })
}

fn plane_index(size_c: usize, size_t: usize, z: usize, c: usize, t: usize) -> usize {
    (z * size_c + c) * size_t + t
}

#[derive(Debug, Clone)]
struct ImageRecord {
    info: SourceImage,
    planes: Vec<PlaneBuffer>,
}

/// Catalog record of a dataset, exposed for inspection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetRecord {
    pub name: String,
    pub description: String,
    pub images: Vec<ImageId>,
}

#[derive(Debug, Clone)]
struct ProjectRecord {
    writable: bool,
    datasets: Vec<DatasetId>,
}

#[derive(Debug)]
struct State {
    images: BTreeMap<ImageId, ImageRecord>,
    datasets: BTreeMap<DatasetId, DatasetRecord>,
    projects: BTreeMap<ProjectId, ProjectRecord>,
    rois: BTreeMap<ImageId, Vec<RoiShape>>,
    next_image: u64,
    next_dataset: u64,
}

impl Default for State {
    fn default() -> Self {
        Self {
            images: BTreeMap::new(),
            datasets: BTreeMap::new(),
            projects: BTreeMap::new(),
            rois: BTreeMap::new(),
            next_image: 1,
            next_dataset: 1,
        }
    }
}

/// In-memory server implementing all three collaborator services against
/// one shared state. Backs the CLI (seeded from a fixture file) and the
/// test suite.
#[derive(Debug, Default)]
pub struct MemoryServer {
    state: Mutex<State>,
}

impl MemoryServer {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap()
    }

    /// Seeds an image; plane data is synthesized with `synthetic_plane`.
    pub fn add_image(&self, info: SourceImage) -> Result<()> {
        info.validate()?;
        let planes = (0..info.plane_count())
            .map(|plane| synthetic_plane(plane, info.size_x, info.size_y))
            .collect();
        let mut state = self.state();
        state.next_image = state.next_image.max(info.id.0 + 1);
        state.images.insert(info.id, ImageRecord { info, planes });
        Ok(())
    }

    /// Seeds a dataset and points its images at it.
    pub fn add_dataset(&self, id: DatasetId, name: &str, images: &[ImageId]) -> Result<()> {
        let mut state = self.state();
        for image in images {
            let record = state
                .images
                .get_mut(image)
                .ok_or(ClientError::NoSuchImage(*image))?;
            record.info.parent_dataset = Some(id);
        }
        state.next_dataset = state.next_dataset.max(id.0 + 1);
        state.datasets.insert(
            id,
            DatasetRecord {
                name: name.to_string(),
                description: String::new(),
                images: images.to_vec(),
            },
        );
        Ok(())
    }

    /// Seeds a project and points the images of its datasets at it.
    pub fn add_project(
        &self,
        id: ProjectId,
        writable: bool,
        datasets: &[DatasetId],
    ) -> Result<()> {
        let mut state = self.state();
        for dataset in datasets {
            let images = state
                .datasets
                .get(dataset)
                .ok_or(ClientError::NoSuchDataset(*dataset))?
                .images
                .clone();
            for image in images {
                if let Some(record) = state.images.get_mut(&image) {
                    record.info.parent_project = Some(ProjectRef { id, writable });
                }
            }
        }
        state.projects.insert(
            id,
            ProjectRecord {
                writable,
                datasets: datasets.to_vec(),
            },
        );
        Ok(())
    }

    /// Seeds the rectangle shapes of one image.
    pub fn add_shapes(&self, image: ImageId, shapes: Vec<RoiShape>) -> Result<()> {
        let mut state = self.state();
        if !state.images.contains_key(&image) {
            return Err(ClientError::NoSuchImage(image));
        }
        state.rois.entry(image).or_default().extend(shapes);
        Ok(())
    }

    /// Every image record, in id order.
    pub fn images(&self) -> Vec<SourceImage> {
        self.state()
            .images
            .values()
            .map(|record| record.info.clone())
            .collect()
    }

    pub fn dataset(&self, id: DatasetId) -> Option<DatasetRecord> {
        self.state().datasets.get(&id).cloned()
    }

    /// Every dataset id, in id order.
    pub fn dataset_ids(&self) -> Vec<DatasetId> {
        self.state().datasets.keys().copied().collect()
    }

    /// The datasets linked under a project, in link order.
    pub fn project_datasets(&self, id: ProjectId) -> Vec<DatasetId> {
        self.state()
            .projects
            .get(&id)
            .map(|record| record.datasets.clone())
            .unwrap_or_default()
    }
}

impl PixelStore for MemoryServer {
    fn read_tile(&self, image: ImageId, request: &TileRequest) -> Result<PlaneBuffer> {
        let state = self.state();
        let record = state
            .images
            .get(&image)
            .ok_or(ClientError::NoSuchImage(image))?;
        let info = &record.info;
        let rect = request.rect;
        let out_of_bounds = request.z >= info.size_z
            || request.c >= info.size_c
            || request.t >= info.size_t
            || rect.x + rect.width > info.size_x
            || rect.y + rect.height > info.size_y;
        if out_of_bounds {
            return Err(ClientError::TileOutOfBounds {
                image,
                request: *request,
            });
        }
        let plane =
            &record.planes[plane_index(info.size_c, info.size_t, request.z, request.c, request.t)];
        Ok(plane
            .slice(s![rect.y..rect.y + rect.height, rect.x..rect.x + rect.width])
            .to_owned())
    }

    fn create_image(
        &self,
        spec: &NewImage,
        planes: &mut dyn Iterator<Item = Result<PlaneBuffer>>,
    ) -> Result<ImageId> {
        // The plane sequence may itself read from this server, so it must
        // be drained before the state lock is taken.
        let expected = spec.plane_count();
        let mut collected = Vec::with_capacity(expected);
        for index in 0..expected {
            let plane = match planes.next() {
                Some(plane) => plane?,
                None => {
                    return Err(ClientError::PlaneCountMismatch {
                        expected,
                        actual: index,
                    });
                }
            };
            let shape = (plane.nrows(), plane.ncols());
            if shape != (spec.size_y, spec.size_x) {
                return Err(ClientError::PlaneShapeMismatch {
                    index,
                    expected: (spec.size_y, spec.size_x),
                    actual: shape,
                });
            }
            collected.push(plane);
        }
        if planes.next().is_some() {
            return Err(ClientError::PlaneCountMismatch {
                expected,
                actual: expected + 1,
            });
        }

        let mut state = self.state();
        let id = ImageId(state.next_image);
        state.next_image += 1;
        let info = SourceImage {
            id,
            name: spec.name.clone(),
            description: spec.description.clone(),
            size_x: spec.size_x,
            size_y: spec.size_y,
            size_z: spec.size_z,
            size_c: spec.size_c,
            size_t: spec.size_t,
            channels: vec![Channel::unnamed(); spec.size_c],
            physical_size: PhysicalSize::default(),
            parent_dataset: None,
            parent_project: None,
        };
        state.images.insert(
            id,
            ImageRecord {
                info,
                planes: collected,
            },
        );
        Ok(id)
    }

    fn prepare_rendering(&self, image: ImageId) -> Result<bool> {
        let state = self.state();
        if !state.images.contains_key(&image) {
            return Err(ClientError::NoSuchImage(image));
        }
        Ok(true)
    }

    fn update_channel(&self, image: ImageId, index: usize, channel: &Channel) -> Result<()> {
        let mut state = self.state();
        let record = state
            .images
            .get_mut(&image)
            .ok_or(ClientError::NoSuchImage(image))?;
        let slot = record
            .info
            .channels
            .get_mut(index)
            .ok_or(ClientError::NoSuchChannel { image, index })?;
        *slot = channel.clone();
        Ok(())
    }

    fn set_physical_size(&self, image: ImageId, size: &PhysicalSize) -> Result<()> {
        let mut state = self.state();
        let record = state
            .images
            .get_mut(&image)
            .ok_or(ClientError::NoSuchImage(image))?;
        record.info.physical_size = *size;
        Ok(())
    }
}

impl Catalog for MemoryServer {
    fn image(&self, id: ImageId) -> Result<Option<SourceImage>> {
        Ok(self
            .state()
            .images
            .get(&id)
            .map(|record| record.info.clone()))
    }

    fn dataset_images(&self, id: DatasetId) -> Result<Vec<ImageId>> {
        self.state()
            .datasets
            .get(&id)
            .map(|record| record.images.clone())
            .ok_or(ClientError::NoSuchDataset(id))
    }

    fn create_dataset(&self, name: &str, description: &str) -> Result<DatasetId> {
        let mut state = self.state();
        let id = DatasetId(state.next_dataset);
        state.next_dataset += 1;
        state.datasets.insert(
            id,
            DatasetRecord {
                name: name.to_string(),
                description: description.to_string(),
                images: Vec::new(),
            },
        );
        Ok(id)
    }

    fn link_image(&self, dataset: DatasetId, image: ImageId) -> Result<()> {
        let mut state = self.state();
        let state = &mut *state;
        if !state.images.contains_key(&image) {
            return Err(ClientError::NoSuchImage(image));
        }
        let record = state
            .datasets
            .get_mut(&dataset)
            .ok_or(ClientError::NoSuchDataset(dataset))?;
        if !record.images.contains(&image) {
            record.images.push(image);
        }
        if let Some(record) = state.images.get_mut(&image) {
            if record.info.parent_dataset.is_none() {
                record.info.parent_dataset = Some(dataset);
            }
        }
        Ok(())
    }

    fn link_dataset(&self, project: ProjectId, dataset: DatasetId) -> Result<()> {
        let mut state = self.state();
        let state = &mut *state;
        if !state.datasets.contains_key(&dataset) {
            return Err(ClientError::NoSuchDataset(dataset));
        }
        let record = state
            .projects
            .get_mut(&project)
            .ok_or(ClientError::NoSuchProject(project))?;
        if !record.writable {
            return Err(ClientError::ProjectNotWritable(project));
        }
        if !record.datasets.contains(&dataset) {
            record.datasets.push(dataset);
        }
        Ok(())
    }
}

impl RoiService for MemoryServer {
    fn rectangles(&self, image: ImageId) -> Result<Vec<RoiShape>> {
        Ok(self.state().rois.get(&image).cloned().unwrap_or_default())
    }
}
