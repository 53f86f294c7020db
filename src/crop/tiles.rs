use crate::client::{PixelStore, PlaneBuffer, Result};
use crate::model::{ImageId, TileRequest};

use super::ResolvedRegion;

/// Enumerates the tile reads for one region in Z-outer, C-middle, T-inner
/// order, the exact order `PixelStore::create_image` consumes planes in.
/// The iterator is a pure generator over the region: calling this again
/// yields the identical sequence.
pub fn tile_requests(region: ResolvedRegion, size_c: usize) -> impl Iterator<Item = TileRequest> {
    let rect = region.rect;
    (region.z.start..=region.z.end).flat_map(move |z| {
        (0..size_c).flat_map(move |c| {
            (region.t.start..=region.t.end).map(move |t| TileRequest { z, c, t, rect })
        })
    })
}

/// Streams each requested tile through the pixel store, one plane in
/// flight at a time. Order and 1:1 correspondence with `tiles` are
/// preserved; read failures surface as `Err` items.
pub fn read_planes<'a>(
    store: &'a dyn PixelStore,
    image: ImageId,
    tiles: impl Iterator<Item = TileRequest> + 'a,
) -> impl Iterator<Item = Result<PlaneBuffer>> + 'a {
    tiles.map(move |request| store.read_tile(image, &request))
}
