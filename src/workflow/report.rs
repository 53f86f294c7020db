use serde::{Deserialize, Serialize};

use crate::model::{DatasetId, ImageId};

/// Outcome of one source image: what was created and what was lost along
/// the way.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageResult {
    pub image: ImageId,
    pub created: Vec<ImageId>,
    pub failures: Vec<String>,
}

impl ImageResult {
    pub fn new(image: ImageId) -> Self {
        Self {
            image,
            created: Vec::new(),
            failures: Vec::new(),
        }
    }
}

/// Aggregate outcome of a batch run. Work already on the server is never
/// rolled back, so a lower `created` count than expected shows up in the
/// per-image records rather than as a hard failure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchReport {
    pub message: String,
    pub created: usize,
    /// The created image, when the run produced exactly one.
    pub image: Option<ImageId>,
    /// The shared destination dataset, when the batch created one.
    pub dataset: Option<DatasetId>,
    pub images: Vec<ImageResult>,
    /// Target-level input failures (unknown dataset, dataset without
    /// images); the batch continued with the next id.
    pub failures: Vec<String>,
    /// Set when a failure stopped the batch before all ids were processed.
    pub halted: Option<String>,
    pub duration_ms: u128,
}

/// Always produced, even for an empty run: zero created images is a
/// successful outcome, not an error.
pub fn summary_message(created: usize) -> String {
    if created == 1 {
        "Created 1 new image".to_string()
    } else {
        format!("Created {created} new images")
    }
}
