//! Core geodesy and tile-addressing types.

mod geo_bbox;
mod geo_point;
mod tile_bbox;
mod tile_coord;
mod tile_format;
mod zoom;

pub use geo_bbox::GeoBBox;
pub use geo_point::GeoPoint;
pub use tile_bbox::TileBBox;
pub use tile_coord::{TileCoord, MAX_LEVEL, MAX_MERCATOR_LAT};
pub use tile_format::{TileFormat, ALLOWED_EXTENSIONS};
pub use zoom::parse_zoom_levels;
