use super::{BatchService, CropService};

#[derive(Debug, Clone, Copy, Default)]
pub struct AppContext {
    batch_service: BatchService,
    crop_service: CropService,
}

impl AppContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn batch_service(&self) -> &BatchService {
        &self.batch_service
    }

    pub fn crop_service(&self) -> &CropService {
        &self.crop_service
    }
}
