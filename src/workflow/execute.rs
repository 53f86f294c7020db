use std::time::Instant;

use log::{debug, info, warn};

use crate::client::Connection;
use crate::crop::{DestinationResolver, materialize, resolve_regions};
use crate::model::{DatasetId, ImageId};

use super::{BatchReport, BatchSpec, ImageResult, Result, TargetKind, summary_message};

/// Runs one batch: expands targets to source images, crops every resolved
/// region of every image, and files the results.
///
/// Failures follow partial-success rules: work already on the server stays
/// there. A region that fails to materialize is recorded and skipped; an
/// image that fails to link stays created; only an unavailable shared
/// destination dataset halts the batch, since nothing further could be
/// filed.
pub fn run_batch(conn: &Connection, spec: &BatchSpec) -> Result<BatchReport> {
    spec.validate()?;
    let started = Instant::now();

    let mut destination = if spec.new_dataset {
        DestinationResolver::new_dataset(spec.new_dataset_name.trim())
    } else {
        DestinationResolver::existing_parent()
    };

    let mut images = Vec::new();
    let mut failures = Vec::new();
    let mut halted = None;

    'targets: for &id in &spec.ids {
        let targets = match expand_target(conn, spec.data_type, id) {
            Ok(targets) => targets,
            Err(failure) => {
                warn!("skipping id {id}: {failure}");
                failures.push(failure);
                continue;
            }
        };
        for image_id in targets {
            let (result, fatal) = process_image(conn, image_id, spec, &mut destination);
            images.push(result);
            if let Some(reason) = fatal {
                halted = Some(reason);
                break 'targets;
            }
        }
    }

    let created: usize = images.iter().map(|result| result.created.len()).sum();
    let image = match images
        .iter()
        .flat_map(|result| result.created.iter())
        .collect::<Vec<_>>()
        .as_slice()
    {
        [only] => Some(**only),
        _ => None,
    };
    let message = summary_message(created);
    info!("{message}");

    Ok(BatchReport {
        message,
        created,
        image,
        dataset: destination.created(),
        images,
        failures,
        halted,
        duration_ms: started.elapsed().as_millis(),
    })
}

/// Resolves one requested id to the source images it names. Image targets
/// are passed through unchecked; a dangling image id is recorded when the
/// image itself is processed.
fn expand_target(
    conn: &Connection,
    kind: TargetKind,
    id: u64,
) -> std::result::Result<Vec<ImageId>, String> {
    match kind {
        TargetKind::Image => Ok(vec![ImageId(id)]),
        TargetKind::Dataset => {
            let dataset = DatasetId(id);
            match conn.catalog().dataset_images(dataset) {
                Ok(children) if children.is_empty() => Err(format!("dataset {id} has no images")),
                Ok(children) => Ok(children),
                Err(error) => Err(error.to_string()),
            }
        }
    }
}

/// Crops every region of one source image. Returns the per-image record
/// plus, when the shared destination dataset could not be created, the
/// reason the batch must stop.
fn process_image(
    conn: &Connection,
    image_id: ImageId,
    spec: &BatchSpec,
    destination: &mut DestinationResolver,
) -> (ImageResult, Option<String>) {
    let mut result = ImageResult::new(image_id);

    let source = match conn.catalog().image(image_id) {
        Ok(Some(source)) => source,
        Ok(None) => {
            warn!("no image with id {image_id}");
            result.failures.push(format!("no image with id {image_id}"));
            return (result, None);
        }
        Err(error) => {
            result.failures.push(error.to_string());
            return (result, None);
        }
    };
    let shapes = match conn.rois().rectangles(image_id) {
        Ok(shapes) => shapes,
        Err(error) => {
            result.failures.push(error.to_string());
            return (result, None);
        }
    };

    let regions = resolve_regions(&source, &shapes, &spec.stack_policy());
    debug!(
        "image {image_id}: {} rectangle shapes resolved to {} regions",
        shapes.len(),
        regions.len()
    );

    for (index, region) in regions.iter().enumerate() {
        debug!(
            "image {image_id} region {index}: x {} y {} w {} h {} z {}..{} t {}..{}",
            region.rect.x,
            region.rect.y,
            region.rect.width,
            region.rect.height,
            region.z.start,
            region.z.end,
            region.t.start,
            region.t.end
        );
        let dataset = match destination.resolve(conn.catalog(), &source) {
            Ok(dataset) => dataset,
            Err(error) => {
                // Nothing further in the batch has a destination to be
                // filed into.
                let reason = format!("destination dataset unavailable: {error}");
                result.failures.push(reason.clone());
                return (result, Some(reason));
            }
        };
        let derived = match materialize(conn, &source, region, index) {
            Ok(derived) => derived,
            Err(error) => {
                warn!("image {image_id} region {index}: {error}");
                result.failures.push(format!("region {index}: {error}"));
                continue;
            }
        };
        if let Some(dataset) = dataset {
            if let Err(error) = conn.catalog().link_image(dataset, derived.id) {
                // The image exists but could not be filed; keep going.
                warn!(
                    "image {image_id}: created {} but failed to link it into dataset {dataset}: {error}",
                    derived.id
                );
                result
                    .failures
                    .push(format!("link {}: {error}", derived.id));
            }
        }
        result.created.push(derived.id);
    }

    (result, None)
}
