use serde::{Deserialize, Serialize};

use crate::crop::StackPolicy;

use super::{BatchError, Result};

/// Whether `ids` names images directly or datasets whose child images are
/// expanded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TargetKind {
    Image,
    Dataset,
}

/// Parameters of one batch run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchSpec {
    pub data_type: TargetKind,
    pub ids: Vec<u64>,
    #[serde(default)]
    pub entire_stack: bool,
    /// Only consulted when `entire_stack` is set.
    #[serde(default = "default_true")]
    pub z_stack: bool,
    /// Only consulted when `entire_stack` is set.
    #[serde(default = "default_true")]
    pub t_stack: bool,
    #[serde(default)]
    pub new_dataset: bool,
    #[serde(default = "default_dataset_name")]
    pub new_dataset_name: String,
}

fn default_true() -> bool {
    true
}

fn default_dataset_name() -> String {
    "From_ROIs".to_string()
}

impl BatchSpec {
    pub fn validate(&self) -> Result<()> {
        if self.ids.is_empty() {
            return Err(BatchError::Parse(
                "batch must name at least one id".to_string(),
            ));
        }
        if self.ids.contains(&0) {
            return Err(BatchError::Parse(
                "ids must be positive identifiers".to_string(),
            ));
        }
        if self.new_dataset && self.new_dataset_name.trim().is_empty() {
            return Err(BatchError::Parse(
                "new_dataset requires a non-empty new_dataset_name".to_string(),
            ));
        }
        Ok(())
    }

    pub fn stack_policy(&self) -> StackPolicy {
        StackPolicy {
            entire_stack: self.entire_stack,
            z_stack: self.z_stack,
            t_stack: self.t_stack,
        }
    }
}
