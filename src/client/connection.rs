use std::sync::Arc;

use super::{Catalog, PixelStore, RoiService};

/// One server session, shared by a whole batch run. Calls are blocking and
/// the session assumes a single caller thread; only one pixel-store
/// operation is in flight at a time.
#[derive(Clone)]
pub struct Connection {
    pixels: Arc<dyn PixelStore>,
    catalog: Arc<dyn Catalog>,
    rois: Arc<dyn RoiService>,
}

impl std::fmt::Debug for Connection {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter.debug_struct("Connection").finish_non_exhaustive()
    }
}

impl Connection {
    pub fn new(
        pixels: Arc<dyn PixelStore>,
        catalog: Arc<dyn Catalog>,
        rois: Arc<dyn RoiService>,
    ) -> Self {
        Self {
            pixels,
            catalog,
            rois,
        }
    }

    /// Wires every service to a single backend.
    pub fn from_backend<B>(backend: Arc<B>) -> Self
    where
        B: PixelStore + Catalog + RoiService + 'static,
    {
        Self {
            pixels: backend.clone(),
            catalog: backend.clone(),
            rois: backend,
        }
    }

    pub fn pixels(&self) -> &dyn PixelStore {
        self.pixels.as_ref()
    }

    pub fn catalog(&self) -> &dyn Catalog {
        self.catalog.as_ref()
    }

    pub fn rois(&self) -> &dyn RoiService {
        self.rois.as_ref()
    }
}
