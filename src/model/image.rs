use std::fmt;

use serde::{Deserialize, Serialize};

use super::{CoreError, Result};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(transparent)]
pub struct ImageId(pub u64);

impl fmt::Display for ImageId {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(transparent)]
pub struct DatasetId(pub u64);

impl fmt::Display for DatasetId {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(transparent)]
pub struct ProjectId(pub u64);

impl fmt::Display for ProjectId {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

/// Descriptive metadata of one channel. Wavelengths are in nanometres and
/// stay absent when the acquisition did not record them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Channel {
    pub name: String,
    pub excitation: Option<f64>,
    pub emission: Option<f64>,
}

impl Channel {
    pub fn unnamed() -> Self {
        Self {
            name: String::new(),
            excitation: None,
            emission: None,
        }
    }
}

/// Physical voxel spacing. Absent values are copied as absent, never
/// defaulted to a unit size.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PhysicalSize {
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub z: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectRef {
    pub id: ProjectId,
    pub writable: bool,
}

/// Read-only view of a catalogued image: dimensions, ordered channel
/// descriptors, voxel spacing, and parent containers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceImage {
    pub id: ImageId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub size_x: usize,
    pub size_y: usize,
    pub size_z: usize,
    pub size_c: usize,
    pub size_t: usize,
    pub channels: Vec<Channel>,
    #[serde(default)]
    pub physical_size: PhysicalSize,
    pub parent_dataset: Option<DatasetId>,
    pub parent_project: Option<ProjectRef>,
}

impl SourceImage {
    pub fn shape(&self) -> [usize; 5] {
        [
            self.size_x,
            self.size_y,
            self.size_z,
            self.size_c,
            self.size_t,
        ]
    }

    pub fn plane_count(&self) -> usize {
        self.size_z * self.size_c * self.size_t
    }

    pub fn validate(&self) -> Result<()> {
        let axes = [
            ("X", self.size_x),
            ("Y", self.size_y),
            ("Z", self.size_z),
            ("C", self.size_c),
            ("T", self.size_t),
        ];
        for (axis, size) in axes {
            if size == 0 {
                return Err(CoreError::ZeroSizedDimension { axis });
            }
        }
        if self.channels.len() != self.size_c {
            return Err(CoreError::ChannelCountMismatch {
                size_c: self.size_c,
                channels: self.channels.len(),
            });
        }
        Ok(())
    }
}

/// Handle to a freshly created image. The catalog owns the record; this is
/// just enough to link and report it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DerivedImage {
    pub id: ImageId,
    pub name: String,
}
