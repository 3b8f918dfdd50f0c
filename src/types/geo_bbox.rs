//! A geographical bounding box in degree space.
//!
//! A [`GeoBBox`] is a rectangle defined by minimum and maximum longitude and
//! latitude. It is a pure computation result (derived from a center point and
//! radius, or given directly) and carries no lifecycle of its own.

use anyhow::{ensure, Result};
use std::fmt::Debug;

use super::tile_coord::MAX_MERCATOR_LAT;

/// A rectangular area in degrees: `[lon_min, lat_min, lon_max, lat_max]`.
#[derive(Clone, Copy, PartialEq)]
pub struct GeoBBox {
	/// Minimum longitude (west).
	pub lon_min: f64,
	/// Minimum latitude (south).
	pub lat_min: f64,
	/// Maximum longitude (east).
	pub lon_max: f64,
	/// Maximum latitude (north).
	pub lat_max: f64,
}

impl GeoBBox {
	/// Creates a new `GeoBBox`, validating ranges and ordering.
	///
	/// # Errors
	/// Returns an error if a coordinate is outside its valid range or if a
	/// minimum exceeds its maximum.
	pub fn new(lon_min: f64, lat_min: f64, lon_max: f64, lat_max: f64) -> Result<GeoBBox> {
		let bbox = GeoBBox {
			lon_min,
			lat_min,
			lon_max,
			lat_max,
		};
		bbox.checked()
	}

	/// Creates a new `GeoBBox` from two arbitrary corners, ordering and
	/// clamping them into valid degree ranges.
	#[must_use]
	pub fn new_clamped(lon0: f64, lat0: f64, lon1: f64, lat1: f64) -> GeoBBox {
		GeoBBox {
			lon_min: lon0.min(lon1).clamp(-180.0, 180.0),
			lat_min: lat0.min(lat1).clamp(-90.0, 90.0),
			lon_max: lon0.max(lon1).clamp(-180.0, 180.0),
			lat_max: lat0.max(lat1).clamp(-90.0, 90.0),
		}
	}

	/// Clamps the latitude span in place to the Web Mercator limit of
	/// ±85.05112877980659°.
	pub fn limit_to_mercator(&mut self) {
		self.lat_min = self.lat_min.clamp(-MAX_MERCATOR_LAT, MAX_MERCATOR_LAT);
		self.lat_max = self.lat_max.clamp(-MAX_MERCATOR_LAT, MAX_MERCATOR_LAT);
	}

	/// Returns the bounding box as an array `[lon_min, lat_min, lon_max, lat_max]`.
	#[must_use]
	pub fn as_array(&self) -> [f64; 4] {
		[self.lon_min, self.lat_min, self.lon_max, self.lat_max]
	}

	fn checked(self) -> Result<Self> {
		ensure!(self.lon_min >= -180., "lon_min ({}) must be >= -180", self.lon_min);
		ensure!(self.lat_min >= -90., "lat_min ({}) must be >= -90", self.lat_min);
		ensure!(self.lon_max <= 180., "lon_max ({}) must be <= 180", self.lon_max);
		ensure!(self.lat_max <= 90., "lat_max ({}) must be <= 90", self.lat_max);
		ensure!(
			self.lon_min <= self.lon_max,
			"lon_min ({}) must be <= lon_max ({})",
			self.lon_min,
			self.lon_max
		);
		ensure!(
			self.lat_min <= self.lat_max,
			"lat_min ({}) must be <= lat_max ({})",
			self.lat_min,
			self.lat_max
		);
		Ok(self)
	}
}

impl Debug for GeoBBox {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(
			f,
			"GeoBBox({}, {}, {}, {})",
			self.lon_min, self.lat_min, self.lon_max, self.lat_max
		)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn creation() {
		let bbox = GeoBBox::new(-10.0, -5.0, 10.0, 5.0).unwrap();
		assert_eq!(bbox.as_array(), [-10.0, -5.0, 10.0, 5.0]);
	}

	#[test]
	fn invalid_ranges() {
		assert!(GeoBBox::new(-190.0, -5.0, 10.0, 5.0).is_err());
		assert!(GeoBBox::new(-10.0, -95.0, 10.0, 5.0).is_err());
		assert!(GeoBBox::new(-10.0, -5.0, 190.0, 5.0).is_err());
		assert!(GeoBBox::new(-10.0, -5.0, 10.0, 95.0).is_err());
		assert!(GeoBBox::new(10.0, -5.0, -10.0, 5.0).is_err());
		assert!(GeoBBox::new(-10.0, 5.0, 10.0, -5.0).is_err());
	}

	#[test]
	fn new_clamped_orders_and_clamps() {
		let bbox = GeoBBox::new_clamped(190.0, 95.0, -190.0, -95.0);
		assert_eq!(bbox.as_array(), [-180.0, -90.0, 180.0, 90.0]);
	}

	#[test]
	fn limit_to_mercator() {
		let mut bbox = GeoBBox::new(-180.0, -90.0, 180.0, 90.0).unwrap();
		bbox.limit_to_mercator();
		assert_eq!(bbox.as_array(), [-180.0, -85.05112877980659, 180.0, 85.05112877980659]);
	}

	#[test]
	fn debug_format() {
		let bbox = GeoBBox::new(-10.0, -5.0, 10.0, 5.0).unwrap();
		assert_eq!(format!("{bbox:?}"), "GeoBBox(-10, -5, 10, 5)");
	}
}
