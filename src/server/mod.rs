//! HTTP delivery of stored tiles.

mod error;
mod tile_server;

pub use error::ServeError;
pub use tile_server::TileServer;
