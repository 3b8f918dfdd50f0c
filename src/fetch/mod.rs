//! Batch retrieval of tiles from a remote XYZ source.

mod pipeline;
mod url_template;

pub use pipeline::{FetchOptions, FetchPipeline, FetchSummary, FAILURE_COOLDOWN, MIN_REQUEST_GAP};
pub use url_template::UrlTemplate;
