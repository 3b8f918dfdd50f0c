//! Layered runtime configuration: defaults, `TILESTASH_*` environment
//! variables, command line flags.

mod fetch;
mod server;

pub use fetch::{FetchConfig, FetchSettings, DEFAULT_TILE_DIR, DEFAULT_URL_TEMPLATE};
pub use server::{ServeConfig, ServeSettings, DEFAULT_HOST, DEFAULT_PORT};
