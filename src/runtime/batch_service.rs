use std::path::Path;

use crate::client::Connection;
use crate::workflow::{BatchReport, BatchSpec, load_spec, run_batch, save_report};

use super::Result;

/// Batch crop runs driven by spec files.
#[derive(Debug, Clone, Copy, Default)]
pub struct BatchService;

impl BatchService {
    pub fn load_spec(&self, path: impl AsRef<Path>) -> Result<BatchSpec> {
        Ok(load_spec(path)?)
    }

    pub fn run(&self, conn: &Connection, spec: &BatchSpec) -> Result<BatchReport> {
        Ok(run_batch(conn, spec)?)
    }

    pub fn save_report(&self, path: impl AsRef<Path>, report: &BatchReport) -> Result<()> {
        save_report(path, report)?;
        Ok(())
    }
}
