//! Fetch and serve XYZ raster map tiles.
//!
//! `tilestash` downloads all tiles covering a circular area around a center
//! coordinate into a `{z}/{x}/{y}.{ext}` directory tree, and serves such a
//! tree over HTTP with immutable caching headers.
//!
//! The main building blocks:
//! - [`types`]: tile coordinates, bounding boxes and the Web Mercator math,
//! - [`store`]: the on-disk tile directory,
//! - [`fetch`]: the rate-limited batch download pipeline,
//! - [`server`]: the HTTP tile server,
//! - [`config`]: layered runtime configuration.

pub mod config;
pub mod fetch;
pub mod server;
pub mod store;
pub mod types;

pub use fetch::{FetchOptions, FetchPipeline, FetchSummary};
pub use server::TileServer;
pub use store::TileStore;
pub use types::{GeoBBox, GeoPoint, TileBBox, TileCoord, TileFormat};
