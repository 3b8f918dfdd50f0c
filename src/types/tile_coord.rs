//! Tile coordinates in a Web Mercator tile pyramid.
//!
//! A [`TileCoord`] identifies one raster tile by zoom level and x/y grid
//! indices (x grows eastwards, y grows southwards). Conversion from
//! geographic coordinates clamps latitude to the Mercator limit and clamps
//! the resulting indices into the valid range of the zoom level, so any
//! finite input maps to a valid tile.
//!
//! # Examples
//!
//! ```
//! use tilestash::TileCoord;
//!
//! let coord = TileCoord::from_geo(13.404954, 52.520008, 10).unwrap();
//! assert_eq!((coord.level, coord.x, coord.y), (10, 550, 335));
//! ```

use anyhow::{ensure, Result};
use std::{
	f64::consts::PI,
	fmt::{self, Debug},
};

/// Highest zoom level supported by the tile math (x/y are `u32`).
pub const MAX_LEVEL: u8 = 31;

/// Latitudes beyond this value diverge under the spherical Mercator projection.
pub const MAX_MERCATOR_LAT: f64 = 85.05112877980659;

/// A tile coordinate: zoom level plus x/y grid indices.
#[derive(Eq, PartialEq, Clone, Hash, Copy)]
pub struct TileCoord {
	/// The zoom level of the tile.
	pub level: u8,
	/// The x index of the tile (west to east).
	pub x: u32,
	/// The y index of the tile (north to south).
	pub y: u32,
}

impl TileCoord {
	/// Create a new `TileCoord` at the given zoom `level` and tile indices `x`, `y`.
	///
	/// # Errors
	/// Returns an error if `level` > 31 or if an index is out of bounds for the level.
	pub fn new(level: u8, x: u32, y: u32) -> Result<TileCoord> {
		ensure!(level <= MAX_LEVEL, "level ({level}) must be <= {MAX_LEVEL}");
		let max = 2u64.pow(u32::from(level));
		ensure!(u64::from(x) < max, "x ({x}) out of bounds for level {level}");
		ensure!(u64::from(y) < max, "y ({y}) out of bounds for level {level}");
		Ok(TileCoord { level, x, y })
	}

	/// Project geographic coordinates onto the tile grid of the given zoom level.
	///
	/// Latitude is clamped to ±85.05112877980659° before projecting, and the
	/// resulting indices are clamped into `[0, 2^level - 1]`, so every finite
	/// input yields a valid coordinate.
	///
	/// # Errors
	/// Returns an error only if `level` > 31.
	pub fn from_geo(lon: f64, lat: f64, level: u8) -> Result<TileCoord> {
		ensure!(level <= MAX_LEVEL, "level ({level}) must be <= {MAX_LEVEL}");

		let lat = lat.clamp(-MAX_MERCATOR_LAT, MAX_MERCATOR_LAT);
		let lat_rad = lat.to_radians();

		let n: f64 = 2.0f64.powi(i32::from(level));
		let x = (lon + 180.0) / 360.0 * n;
		let y = (1.0 - (lat_rad.tan() + 1.0 / lat_rad.cos()).ln() / PI) / 2.0 * n;

		let max = n - 1.0;
		Ok(TileCoord {
			level,
			x: x.floor().clamp(0.0, max) as u32,
			y: y.floor().clamp(0.0, max) as u32,
		})
	}

	/// Geographic coordinates of the northwest corner of this tile, as `[lon, lat]` in degrees.
	#[must_use]
	pub fn as_geo(&self) -> [f64; 2] {
		let n: f64 = 2.0f64.powi(i32::from(self.level));
		[
			(f64::from(self.x) / n - 0.5) * 360.0,
			((PI * (1.0 - 2.0 * f64::from(self.y) / n)).exp().atan() / PI - 0.25) * 360.0,
		]
	}
}

impl Debug for TileCoord {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_fmt(format_args!("TileCoord({}, [{}, {}])", &self.level, &self.x, &self.y))
	}
}

impl PartialOrd for TileCoord {
	fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
		Some(self.cmp(other))
	}
}

impl Ord for TileCoord {
	fn cmp(&self, other: &Self) -> std::cmp::Ordering {
		self
			.level
			.cmp(&other.level)
			.then(self.x.cmp(&other.x))
			.then(self.y.cmp(&other.y))
	}
}
