use std::path::PathBuf;

use anyhow::{ensure, Result};

use tilestash::{
	config::FetchConfig,
	fetch::{FetchPipeline, UrlTemplate},
	store::TileStore,
};

#[derive(clap::Args, Debug)]
#[command(arg_required_else_help = true, disable_version_flag = true, verbatim_doc_comment)]
pub struct Subcommand {
	/// Latitude of the area center in degrees. Default: $TILESTASH_LAT
	#[arg(long, allow_negative_numbers = true, display_order = 0)]
	pub lat: Option<f64>,

	/// Longitude of the area center in degrees. Default: $TILESTASH_LON
	#[arg(long, allow_negative_numbers = true, display_order = 0)]
	pub lon: Option<f64>,

	/// Radius around the center in meters. Default: 5000
	#[arg(short, long, display_order = 1)]
	pub radius: Option<f64>,

	/// Zoom levels to fetch, as single levels or ranges.
	/// Can be repeated or comma-separated: "-z 12 -z 14-16" or "-z 12,14-16".
	/// Default: 12
	#[arg(short, long, verbatim_doc_comment, display_order = 1)]
	pub zoom: Vec<String>,

	/// Tile source URL template with {z}, {x}, {y} and optionally {ext} and {s} placeholders.
	/// Default: https://tile.openstreetmap.org/{z}/{x}/{y}.png
	#[arg(short, long, verbatim_doc_comment, display_order = 2)]
	pub url_template: Option<String>,

	/// Comma-separated subdomains for the {s} placeholder, e.g. "a,b,c".
	#[arg(long, display_order = 2)]
	pub subdomains: Option<String>,

	/// Directory to store fetched tiles in. Default: ./tiles
	#[arg(short, long, display_order = 3)]
	pub tile_dir: Option<PathBuf>,

	/// File extension of stored tiles (png, jpg, jpeg or webp). Default: png
	#[arg(short, long, display_order = 3)]
	pub extension: Option<String>,

	/// Skip tiles that already exist in the tile directory.
	#[arg(long, display_order = 3)]
	pub skip_existing: bool,

	/// Number of tiles fetched in parallel. Default: 4
	#[arg(short, long, display_order = 4)]
	pub concurrency: Option<usize>,

	/// Per-request timeout in milliseconds. Default: 15000
	#[arg(long, display_order = 4)]
	pub timeout_ms: Option<u64>,
}

#[tokio::main]
pub async fn run(arguments: &Subcommand) -> Result<()> {
	let mut config = FetchConfig::from_env()?;
	config.override_optional_lat(&arguments.lat);
	config.override_optional_lon(&arguments.lon);
	config.override_optional_radius(&arguments.radius);
	config.override_optional_zoom(&arguments.zoom);
	config.override_optional_url_template(&arguments.url_template);
	config.override_optional_subdomains(&arguments.subdomains);
	config.override_optional_tile_dir(&arguments.tile_dir);
	config.override_optional_extension(&arguments.extension);
	config.override_optional_concurrency(&arguments.concurrency);
	config.override_optional_timeout_ms(&arguments.timeout_ms);
	config.override_skip_existing(arguments.skip_existing);

	let settings = config.resolve()?;

	let bbox = settings.center.bbox_with_radius(settings.radius);
	log::info!("fetching area {bbox:?} at zoom levels {:?}", settings.levels);

	let store = TileStore::create(&settings.tile_dir)?;
	let template = UrlTemplate::new(&settings.url_template, &settings.extension, settings.subdomains.clone())?;
	let pipeline = FetchPipeline::new(template, store, &settings.extension, settings.options.clone())?;

	let summary = pipeline.run(&bbox, &settings.levels).await?;
	eprintln!(
		"{} tiles: {} fetched, {} skipped, {} failed",
		summary.total, summary.fetched, summary.skipped, summary.failed
	);

	ensure!(summary.failed == 0, "{} of {} tiles failed to fetch", summary.failed, summary.total);
	Ok(())
}

#[cfg(test)]
mod tests {
	use crate::tests::run_command;

	#[test]
	fn no_arguments_prints_help() {
		let output = run_command(vec!["tilestash", "fetch"]).unwrap_err().to_string();
		assert!(output.contains("Usage: tilestash fetch"));
	}

	#[test]
	fn missing_center_fails() {
		std::env::remove_var("TILESTASH_LAT");
		std::env::remove_var("TILESTASH_LON");
		let output = run_command(vec!["tilestash", "fetch", "--radius", "100"])
			.unwrap_err()
			.to_string();
		assert!(output.contains("latitude"));
	}

	#[test]
	fn invalid_extension_fails_before_any_request() {
		let output = run_command(vec![
			"tilestash",
			"fetch",
			"--lat",
			"52.5",
			"--lon",
			"13.4",
			"--extension",
			"bmp",
		])
		.unwrap_err()
		.to_string();
		assert!(output.contains("bmp"));
	}
}
