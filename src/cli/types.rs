use std::path::PathBuf;

use clap::{Parser, Subcommand};
use serde::Serialize;

use crate::crop::ResolvedRegion;
use crate::model::{DatasetId, ImageId, SourceImage};

#[derive(Debug, Parser)]
#[command(
    name = "roicrop",
    version,
    about = "Batch-crop rectangle ROIs out of 5D images on a remote image server"
)]
pub(super) struct Cli {
    #[command(subcommand)]
    pub(super) command: Commands,
}

#[derive(Debug, Subcommand)]
pub(super) enum Commands {
    /// Lists the images the server's catalog knows about.
    Images {
        #[arg(long)]
        server: PathBuf,
    },
    /// Resolves the crop regions of one image without creating anything.
    Regions {
        #[arg(long)]
        server: PathBuf,
        #[arg(long)]
        image: u64,
        /// Widen every region through the entire stack.
        #[arg(long)]
        entire_stack: bool,
        /// With --entire-stack, leave Z ranges as drawn.
        #[arg(long)]
        no_z_stack: bool,
        /// With --entire-stack, leave T ranges as drawn.
        #[arg(long)]
        no_t_stack: bool,
    },
    /// Runs a batch spec against the server.
    Run {
        #[arg(long)]
        server: PathBuf,
        #[arg(long)]
        spec: PathBuf,
        #[arg(long)]
        report: Option<PathBuf>,
    },
}

#[derive(Debug, Serialize)]
pub(super) struct ImageInfo {
    pub(super) id: ImageId,
    pub(super) name: String,
    pub(super) shape: [usize; 5],
    pub(super) channels: Vec<String>,
    pub(super) parent_dataset: Option<DatasetId>,
}

impl From<&SourceImage> for ImageInfo {
    fn from(image: &SourceImage) -> Self {
        Self {
            id: image.id,
            name: image.name.clone(),
            shape: image.shape(),
            channels: image
                .channels
                .iter()
                .map(|channel| channel.name.clone())
                .collect(),
            parent_dataset: image.parent_dataset,
        }
    }
}

#[derive(Debug, Serialize)]
pub(super) struct RegionsInfo {
    pub(super) image: ImageId,
    pub(super) name: String,
    pub(super) regions: Vec<ResolvedRegion>,
}
