use std::fs;

use crate::model::{
    Channel, CropRect, DatasetId, ImageId, PhysicalSize, ProjectId, Rect, RoiId, RoiShape,
    SourceImage, TileRequest,
};

use super::{
    Catalog, ClientError, MemoryServer, NewImage, PixelStore, PlaneBuffer, Result, RoiService,
    ServerFixture, load_server, synthetic_plane,
};

fn source_image(id: u64, size_x: usize, size_y: usize) -> SourceImage {
    SourceImage {
        id: ImageId(id),
        name: format!("image-{id}.tif"),
        description: String::new(),
        size_x,
        size_y,
        size_z: 1,
        size_c: 1,
        size_t: 1,
        channels: vec![Channel::unnamed()],
        physical_size: PhysicalSize::default(),
        parent_dataset: None,
        parent_project: None,
    }
}

fn stack_image(id: u64, size_z: usize, size_c: usize, size_t: usize) -> SourceImage {
    let mut image = source_image(id, 8, 6);
    image.size_z = size_z;
    image.size_c = size_c;
    image.size_t = size_t;
    image.channels = vec![Channel::unnamed(); size_c];
    image
}

fn request(z: usize, c: usize, t: usize, x: usize, y: usize, w: usize, h: usize) -> TileRequest {
    TileRequest {
        z,
        c,
        t,
        rect: CropRect {
            x,
            y,
            width: w,
            height: h,
        },
    }
}

fn planes(count: usize, size_x: usize, size_y: usize) -> impl Iterator<Item = Result<PlaneBuffer>> {
    (0..count).map(move |plane| Ok(synthetic_plane(plane, size_x, size_y)))
}

fn new_image(size_x: usize, size_y: usize, size_z: usize, size_c: usize, size_t: usize) -> NewImage {
    NewImage {
        name: "crop.tif".to_string(),
        size_x,
        size_y,
        size_z,
        size_c,
        size_t,
        description: "test crop".to_string(),
    }
}

#[test]
fn read_tile_returns_the_requested_window() {
    let server = MemoryServer::new();
    server.add_image(source_image(1, 8, 6)).expect("add image");

    let tile = server
        .read_tile(ImageId(1), &request(0, 0, 0, 2, 1, 3, 2))
        .expect("read tile");
    assert_eq!(tile.dim(), (2, 3));
    // Pixel (row 1, col 2) of the source plane.
    assert_eq!(tile[[0, 0]], (8 + 2) as f32);
    assert_eq!(tile[[1, 2]], (2 * 8 + 4) as f32);
}

#[test]
fn read_tile_selects_the_right_plane() {
    let server = MemoryServer::new();
    server
        .add_image(stack_image(1, 2, 3, 2))
        .expect("add image");

    let tile = server
        .read_tile(ImageId(1), &request(1, 2, 0, 0, 0, 1, 1))
        .expect("read tile");
    // Plane index (z * size_c + c) * size_t + t.
    assert_eq!(tile[[0, 0]], synthetic_plane(10, 8, 6)[[0, 0]]);
}

#[test]
fn read_tile_rejects_out_of_bounds_requests() {
    let server = MemoryServer::new();
    server.add_image(source_image(1, 8, 6)).expect("add image");

    let beyond_rect = server.read_tile(ImageId(1), &request(0, 0, 0, 6, 0, 3, 2));
    assert!(matches!(
        beyond_rect,
        Err(ClientError::TileOutOfBounds { .. })
    ));
    let beyond_z = server.read_tile(ImageId(1), &request(1, 0, 0, 0, 0, 1, 1));
    assert!(matches!(beyond_z, Err(ClientError::TileOutOfBounds { .. })));
    let missing = server.read_tile(ImageId(9), &request(0, 0, 0, 0, 0, 1, 1));
    assert!(matches!(missing, Err(ClientError::NoSuchImage(_))));
}

#[test]
fn create_image_requires_the_exact_plane_count() {
    let server = MemoryServer::new();
    let spec = new_image(4, 3, 1, 2, 1);

    let mut short = planes(1, 4, 3);
    assert!(matches!(
        server.create_image(&spec, &mut short),
        Err(ClientError::PlaneCountMismatch {
            expected: 2,
            actual: 1
        })
    ));

    let mut long = planes(3, 4, 3);
    assert!(matches!(
        server.create_image(&spec, &mut long),
        Err(ClientError::PlaneCountMismatch { expected: 2, .. })
    ));

    let mut misshapen = planes(2, 5, 3);
    assert!(matches!(
        server.create_image(&spec, &mut misshapen),
        Err(ClientError::PlaneShapeMismatch { index: 0, .. })
    ));
}

#[test]
fn create_image_records_pixels_and_unnamed_channels() {
    let server = MemoryServer::new();
    let spec = new_image(4, 3, 1, 2, 1);
    let mut sequence = planes(2, 4, 3);

    let id = server.create_image(&spec, &mut sequence).expect("create");
    let info = server.image(id).expect("lookup").expect("created image");
    assert_eq!(info.shape(), [4, 3, 1, 2, 1]);
    assert_eq!(info.channels.len(), 2);
    assert!(info.channels.iter().all(|channel| channel.name.is_empty()));
    assert_eq!(info.description, "test crop");

    let tile = server
        .read_tile(id, &request(0, 1, 0, 0, 0, 4, 3))
        .expect("read back");
    assert_eq!(tile, synthetic_plane(1, 4, 3));
}

#[test]
fn channel_and_physical_size_updates_stick() {
    let server = MemoryServer::new();
    let spec = new_image(4, 3, 1, 1, 1);
    let mut sequence = planes(1, 4, 3);
    let id = server.create_image(&spec, &mut sequence).expect("create");

    assert!(server.prepare_rendering(id).expect("prepare"));
    let channel = Channel {
        name: "GFP".to_string(),
        excitation: Some(488.0),
        emission: Some(507.0),
    };
    server.update_channel(id, 0, &channel).expect("update");
    let size = PhysicalSize {
        x: Some(0.1),
        y: Some(0.1),
        z: None,
    };
    server.set_physical_size(id, &size).expect("set size");

    let info = server.image(id).expect("lookup").expect("created image");
    assert_eq!(info.channels[0], channel);
    assert_eq!(info.physical_size, size);

    assert!(matches!(
        server.update_channel(id, 5, &channel),
        Err(ClientError::NoSuchChannel { index: 5, .. })
    ));
}

#[test]
fn duplicate_image_links_are_no_ops() {
    let server = MemoryServer::new();
    server.add_image(source_image(1, 8, 6)).expect("add image");
    server
        .add_dataset(DatasetId(10), "plates", &[])
        .expect("add dataset");

    server.link_image(DatasetId(10), ImageId(1)).expect("link");
    server
        .link_image(DatasetId(10), ImageId(1))
        .expect("relink");
    let record = server.dataset(DatasetId(10)).expect("dataset");
    assert_eq!(record.images, vec![ImageId(1)]);
}

#[test]
fn readonly_projects_refuse_dataset_links() {
    let server = MemoryServer::new();
    server
        .add_dataset(DatasetId(10), "plates", &[])
        .expect("add dataset");
    server
        .add_project(ProjectId(5), false, &[])
        .expect("add project");

    assert!(matches!(
        server.link_dataset(ProjectId(5), DatasetId(10)),
        Err(ClientError::ProjectNotWritable(ProjectId(5)))
    ));
}

fn demo_fixture() -> ServerFixture {
    serde_json::from_value(serde_json::json!({
        "projects": [{"id": 5, "name": "screening", "datasets": [10]}],
        "datasets": [{"id": 10, "name": "plates", "images": [1]}],
        "images": [{
            "id": 1,
            "name": "cells.ome.tif",
            "size_x": 64,
            "size_y": 48,
            "size_c": 2,
            "channels": [
                {"name": "DAPI", "excitation": 358.0, "emission": 461.0},
                {"name": "GFP", "excitation": 488.0, "emission": 507.0}
            ],
            "physical_size": {"x": 0.65, "y": 0.65}
        }],
        "rois": [{
            "id": 7,
            "image": 1,
            "shapes": [{"x": 4, "y": 4, "width": 16, "height": 8}]
        }]
    }))
    .expect("fixture json")
}

#[test]
fn fixture_builds_a_linked_catalog() {
    let server = demo_fixture().build().expect("build");

    let image = server
        .image(ImageId(1))
        .expect("lookup")
        .expect("seeded image");
    assert_eq!(image.parent_dataset, Some(DatasetId(10)));
    let project = image.parent_project.expect("parent project");
    assert_eq!(project.id, ProjectId(5));
    assert!(project.writable);
    assert_eq!(image.channels[1].name, "GFP");
    assert_eq!(image.physical_size.x, Some(0.65));
    assert_eq!(image.physical_size.z, None);

    let shapes = server.rectangles(ImageId(1)).expect("shapes");
    assert_eq!(
        shapes,
        vec![RoiShape {
            roi: RoiId(7),
            rect: Rect::new(4, 4, 16, 8),
            z: 0,
            t: 0,
        }]
    );
}

#[test]
fn fixture_generates_channels_when_omitted() {
    let mut fixture = demo_fixture();
    fixture.images[0].channels.clear();
    let server = fixture.build().expect("build");
    let image = server
        .image(ImageId(1))
        .expect("lookup")
        .expect("seeded image");
    assert_eq!(image.channels[0].name, "channel-0");
    assert_eq!(image.channels[1].name, "channel-1");
}

#[test]
fn fixture_rejects_mismatched_channel_lists() {
    let mut fixture = demo_fixture();
    fixture.images[0].channels.pop();
    assert!(matches!(fixture.build(), Err(ClientError::Core(_))));
}

#[test]
fn load_server_reads_yaml_fixtures() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("server.yaml");
    fs::write(
        &path,
        "images:\n  - id: 1\n    name: cells.tif\n    size_x: 16\n    size_y: 16\n",
    )
    .expect("write fixture");

    let server = load_server(&path).expect("load");
    let image = server
        .image(ImageId(1))
        .expect("lookup")
        .expect("seeded image");
    assert_eq!(image.shape(), [16, 16, 1, 1, 1]);
}

#[test]
fn load_server_rejects_unknown_extensions() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("server.toml");
    fs::write(&path, "images = []\n").expect("write fixture");

    assert!(matches!(
        load_server(&path),
        Err(ClientError::UnsupportedFormat(_))
    ));
}
