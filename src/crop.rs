mod link;
mod materialize;
mod regions;
mod tiles;


pub use link::DestinationResolver;
pub use materialize::{derived_image_name, materialize};
pub use regions::{PlaneSpan, ResolvedRegion, StackPolicy, resolve_regions};
pub use tiles::{read_planes, tile_requests};
