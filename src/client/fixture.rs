use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::model::{
    Channel, DatasetId, ImageId, PhysicalSize, ProjectId, Rect, RoiId, RoiShape, SourceImage,
};

use super::{ClientError, MemoryServer, Result};

/// Declarative description of a server's catalog, loadable from JSON or
/// YAML. Plane data is not part of the fixture; it is synthesized when the
/// server is built.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ServerFixture {
    #[serde(default)]
    pub projects: Vec<ProjectFixture>,
    #[serde(default)]
    pub datasets: Vec<DatasetFixture>,
    #[serde(default)]
    pub images: Vec<ImageFixture>,
    #[serde(default)]
    pub rois: Vec<RoiFixture>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectFixture {
    pub id: u64,
    pub name: String,
    #[serde(default = "default_true")]
    pub writable: bool,
    #[serde(default)]
    pub datasets: Vec<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetFixture {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub images: Vec<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageFixture {
    pub id: u64,
    pub name: String,
    pub size_x: usize,
    pub size_y: usize,
    #[serde(default = "default_one")]
    pub size_z: usize,
    #[serde(default = "default_one")]
    pub size_c: usize,
    #[serde(default = "default_one")]
    pub size_t: usize,
    /// When empty, unnamed channels are generated to match `size_c`;
    /// when given, the list length must equal `size_c`.
    #[serde(default)]
    pub channels: Vec<ChannelFixture>,
    #[serde(default)]
    pub physical_size: Option<PhysicalSize>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChannelFixture {
    pub name: String,
    #[serde(default)]
    pub excitation: Option<f64>,
    #[serde(default)]
    pub emission: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoiFixture {
    pub id: u64,
    pub image: u64,
    #[serde(default)]
    pub shapes: Vec<ShapeFixture>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShapeFixture {
    pub x: i64,
    pub y: i64,
    pub width: i64,
    pub height: i64,
    #[serde(default)]
    pub z: usize,
    #[serde(default)]
    pub t: usize,
}

fn default_true() -> bool {
    true
}

fn default_one() -> usize {
    1
}

impl ServerFixture {
    /// Builds an in-memory server from the declaration. Images are seeded
    /// first so that dataset, project, and ROI references can be checked.
    pub fn build(&self) -> Result<MemoryServer> {
        let server = MemoryServer::new();
        for image in &self.images {
            let channels = if image.channels.is_empty() {
                (0..image.size_c)
                    .map(|index| Channel {
                        name: format!("channel-{index}"),
                        excitation: None,
                        emission: None,
                    })
                    .collect()
            } else {
                image
                    .channels
                    .iter()
                    .map(|channel| Channel {
                        name: channel.name.clone(),
                        excitation: channel.excitation,
                        emission: channel.emission,
                    })
                    .collect()
            };
            server.add_image(SourceImage {
                id: ImageId(image.id),
                name: image.name.clone(),
                description: String::new(),
                size_x: image.size_x,
                size_y: image.size_y,
                size_z: image.size_z,
                size_c: image.size_c,
                size_t: image.size_t,
                channels,
                physical_size: image.physical_size.unwrap_or_default(),
                parent_dataset: None,
                parent_project: None,
            })?;
        }
        for dataset in &self.datasets {
            let images = dataset
                .images
                .iter()
                .map(|id| ImageId(*id))
                .collect::<Vec<_>>();
            server.add_dataset(DatasetId(dataset.id), &dataset.name, &images)?;
        }
        for project in &self.projects {
            let datasets = project
                .datasets
                .iter()
                .map(|id| DatasetId(*id))
                .collect::<Vec<_>>();
            server.add_project(ProjectId(project.id), project.writable, &datasets)?;
        }
        for roi in &self.rois {
            let shapes = roi
                .shapes
                .iter()
                .map(|shape| RoiShape {
                    roi: RoiId(roi.id),
                    rect: Rect::new(shape.x, shape.y, shape.width, shape.height),
                    z: shape.z,
                    t: shape.t,
                })
                .collect();
            server.add_shapes(ImageId(roi.image), shapes)?;
        }
        Ok(server)
    }
}

/// Reads a fixture file (`.json`, `.yaml`, or `.yml`) and builds the server
/// it describes.
pub fn load_server(path: impl AsRef<Path>) -> Result<MemoryServer> {
    let path = path.as_ref();
    let raw = fs::read_to_string(path)?;
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or_default()
        .to_ascii_lowercase();
    let fixture = match extension.as_str() {
        "json" => serde_json::from_str::<ServerFixture>(&raw)?,
        "yaml" | "yml" => serde_yaml::from_str::<ServerFixture>(&raw)?,
        other => return Err(ClientError::UnsupportedFormat(other.to_string())),
    };
    fixture.build()
}
