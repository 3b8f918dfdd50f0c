//! Configuration of the `fetch` subcommand.
//!
//! Values are layered: built-in defaults, then `TILESTASH_*` environment
//! variables, then command line flags. Only the center coordinate has no
//! default and must come from one of the outer layers.

use std::{path::PathBuf, time::Duration};

use anyhow::{ensure, Context, Result};

use crate::{
	fetch::FetchOptions,
	types::{parse_zoom_levels, GeoPoint, TileFormat},
};

pub const DEFAULT_RADIUS_M: f64 = 5000.0;
pub const DEFAULT_ZOOM: &str = "12";
pub const DEFAULT_URL_TEMPLATE: &str = "https://tile.openstreetmap.org/{z}/{x}/{y}.png";
pub const DEFAULT_TILE_DIR: &str = "./tiles";
pub const DEFAULT_EXTENSION: &str = "png";

/// Partial fetch configuration, before defaults are applied.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct FetchConfig {
	pub lat: Option<f64>,
	pub lon: Option<f64>,
	pub radius: Option<f64>,
	pub zoom: Option<Vec<String>>,
	pub url_template: Option<String>,
	pub tile_dir: Option<PathBuf>,
	pub extension: Option<String>,
	pub subdomains: Option<Vec<String>>,
	pub concurrency: Option<usize>,
	pub timeout_ms: Option<u64>,
	pub skip_existing: bool,
}

/// Fully resolved fetch configuration.
#[derive(Debug, Clone)]
pub struct FetchSettings {
	pub center: GeoPoint,
	pub radius: f64,
	pub levels: Vec<u8>,
	pub url_template: String,
	pub tile_dir: PathBuf,
	pub extension: String,
	pub subdomains: Vec<String>,
	pub options: FetchOptions,
}

impl FetchConfig {
	/// Reads the `TILESTASH_*` environment layer.
	pub fn from_env() -> Result<FetchConfig> {
		Ok(FetchConfig {
			lat: parse_env("TILESTASH_LAT")?,
			lon: parse_env("TILESTASH_LON")?,
			radius: parse_env("TILESTASH_RADIUS")?,
			zoom: env_string("TILESTASH_ZOOM").map(|value| vec![value]),
			url_template: env_string("TILESTASH_URL_TEMPLATE"),
			tile_dir: env_string("TILESTASH_TILE_DIR").map(PathBuf::from),
			extension: env_string("TILESTASH_EXTENSION"),
			subdomains: env_string("TILESTASH_SUBDOMAINS").map(|value| split_list(&value)),
			concurrency: parse_env("TILESTASH_CONCURRENCY")?,
			timeout_ms: parse_env("TILESTASH_TIMEOUT_MS")?,
			skip_existing: false,
		})
	}

	pub fn override_optional_lat(&mut self, lat: &Option<f64>) {
		if lat.is_some() {
			self.lat = *lat;
		}
	}
	pub fn override_optional_lon(&mut self, lon: &Option<f64>) {
		if lon.is_some() {
			self.lon = *lon;
		}
	}
	pub fn override_optional_radius(&mut self, radius: &Option<f64>) {
		if radius.is_some() {
			self.radius = *radius;
		}
	}
	pub fn override_optional_zoom(&mut self, zoom: &[String]) {
		if !zoom.is_empty() {
			self.zoom = Some(zoom.to_vec());
		}
	}
	pub fn override_optional_url_template(&mut self, url_template: &Option<String>) {
		if url_template.is_some() {
			self.url_template = url_template.clone();
		}
	}
	pub fn override_optional_tile_dir(&mut self, tile_dir: &Option<PathBuf>) {
		if tile_dir.is_some() {
			self.tile_dir = tile_dir.clone();
		}
	}
	pub fn override_optional_extension(&mut self, extension: &Option<String>) {
		if extension.is_some() {
			self.extension = extension.clone();
		}
	}
	pub fn override_optional_subdomains(&mut self, subdomains: &Option<String>) {
		if let Some(subdomains) = subdomains {
			self.subdomains = Some(split_list(subdomains));
		}
	}
	pub fn override_optional_concurrency(&mut self, concurrency: &Option<usize>) {
		if concurrency.is_some() {
			self.concurrency = *concurrency;
		}
	}
	pub fn override_optional_timeout_ms(&mut self, timeout_ms: &Option<u64>) {
		if timeout_ms.is_some() {
			self.timeout_ms = *timeout_ms;
		}
	}
	pub fn override_skip_existing(&mut self, skip_existing: bool) {
		self.skip_existing |= skip_existing;
	}

	/// Applies defaults and validates the result.
	pub fn resolve(self) -> Result<FetchSettings> {
		let lat = self.lat.context("no center latitude configured (--lat or TILESTASH_LAT)")?;
		let lon = self.lon.context("no center longitude configured (--lon or TILESTASH_LON)")?;
		let center = GeoPoint::new(lat, lon)?;

		let radius = self.radius.unwrap_or(DEFAULT_RADIUS_M);
		ensure!(radius.is_finite() && radius >= 0.0, "radius must be non-negative, got {radius}");

		let zoom = self.zoom.unwrap_or_else(|| vec![DEFAULT_ZOOM.to_string()]);
		let levels = parse_zoom_levels(&zoom);
		ensure!(!levels.is_empty(), "no valid zoom levels in {zoom:?}");

		let extension = self
			.extension
			.unwrap_or_else(|| DEFAULT_EXTENSION.to_string())
			.to_lowercase();
		TileFormat::try_from_str(&extension)?;

		let mut options = FetchOptions::default();
		if let Some(concurrency) = self.concurrency {
			options.concurrency = concurrency;
		}
		if let Some(timeout_ms) = self.timeout_ms {
			options.timeout = Duration::from_millis(timeout_ms);
		}
		options.skip_existing = self.skip_existing;

		Ok(FetchSettings {
			center,
			radius,
			levels,
			url_template: self.url_template.unwrap_or_else(|| DEFAULT_URL_TEMPLATE.to_string()),
			tile_dir: self.tile_dir.unwrap_or_else(|| PathBuf::from(DEFAULT_TILE_DIR)),
			extension,
			subdomains: self.subdomains.unwrap_or_default(),
			options,
		})
	}
}

pub(super) fn env_string(name: &str) -> Option<String> {
	std::env::var(name).ok().filter(|value| !value.is_empty())
}

pub(super) fn parse_env<T: std::str::FromStr>(name: &str) -> Result<Option<T>>
where
	T::Err: std::error::Error + Send + Sync + 'static,
{
	env_string(name)
		.map(|value| value.parse::<T>().with_context(|| format!("cannot parse {name}='{value}'")))
		.transpose()
}

fn split_list(value: &str) -> Vec<String> {
	value
		.split(',')
		.map(str::trim)
		.filter(|part| !part.is_empty())
		.map(str::to_string)
		.collect()
}
