use log::debug;

use crate::client::{Connection, NewImage, Result};
use crate::model::{DerivedImage, SourceImage};

use super::{ResolvedRegion, read_planes, tile_requests};

/// Splits a file name into base and extension, keeping `.ome.tif`-style
/// double extensions together.
fn split_extension(name: &str) -> (&str, &str) {
    match name.rfind('.') {
        Some(dot) => {
            let base = &name[..dot];
            match base.strip_suffix(".ome") {
                Some(stripped) => (stripped, &name[stripped.len()..]),
                None => (base, &name[dot..]),
            }
        }
        None => (name, ""),
    }
}

/// Name for the derived image: the source's base file name with an
/// `_roi<index>` suffix inserted before the extension.
pub fn derived_image_name(source_name: &str, index: usize) -> String {
    let file_name = source_name
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(source_name);
    let (base, extension) = split_extension(file_name);
    format!("{base}_roi{index}{extension}")
}

fn crop_description(source: &SourceImage, region: &ResolvedRegion) -> String {
    format!(
        "Created from Image ID: {}\n  Name: {}\n  x: {} y: {} w: {} h: {}",
        source.id,
        source.name,
        region.rect.x,
        region.rect.y,
        region.rect.width,
        region.rect.height
    )
}

/// Creates a new image holding the pixels of `region`, streaming planes
/// out of the source one tile at a time, then carries descriptive metadata
/// over.
///
/// Channel metadata is copied by list position: derived channel `i`
/// receives the name and wavelengths of source channel `i`. Downstream
/// consumers rely on this positional mapping. Physical voxel sizes are
/// copied verbatim; absent values stay absent. The description records
/// where the pixels came from.
pub fn materialize(
    conn: &Connection,
    source: &SourceImage,
    region: &ResolvedRegion,
    index: usize,
) -> Result<DerivedImage> {
    let name = derived_image_name(&source.name, index);
    let spec = NewImage {
        name: name.clone(),
        size_x: region.rect.width,
        size_y: region.rect.height,
        size_z: region.z.count(),
        size_c: source.size_c,
        size_t: region.t.count(),
        description: crop_description(source, region),
    };
    debug!(
        "materializing {} planes of image {} into `{}`",
        region.plane_count(source.size_c),
        source.id,
        name
    );

    let tiles = tile_requests(*region, source.size_c);
    let mut planes = read_planes(conn.pixels(), source.id, tiles);
    let id = conn.pixels().create_image(&spec, &mut planes)?;

    // Channel metadata can only be attached once the store has set up the
    // new image's rendering surface.
    if conn.pixels().prepare_rendering(id)? {
        for (channel_index, channel) in source.channels.iter().enumerate() {
            conn.pixels().update_channel(id, channel_index, channel)?;
        }
    }
    conn.pixels().set_physical_size(id, &source.physical_size)?;

    Ok(DerivedImage { id, name })
}
