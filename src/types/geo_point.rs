//! A geographic center point and its radius-derived bounding box.

use anyhow::{ensure, Result};
use std::fmt::Debug;

use super::GeoBBox;

/// Mean Earth radius in meters (IUGG).
const EARTH_RADIUS_M: f64 = 6_371_008.8;

/// Guard against division blow-up when inflating the longitude delta near the poles.
const MIN_COS_LAT: f64 = 1e-6;

/// A geographic point in degrees.
///
/// Latitude must be in `[-90, 90]`. Longitude is not range-checked; the tile
/// projection clamps out-of-range values into the grid.
#[derive(Clone, Copy, PartialEq)]
pub struct GeoPoint {
	pub lat: f64,
	pub lon: f64,
}

impl GeoPoint {
	/// Creates a new `GeoPoint`.
	///
	/// # Errors
	/// Returns an error if `lat` is outside `[-90, 90]` or a coordinate is not finite.
	pub fn new(lat: f64, lon: f64) -> Result<GeoPoint> {
		ensure!(lat.is_finite() && lon.is_finite(), "coordinates must be finite");
		ensure!((-90.0..=90.0).contains(&lat), "lat ({lat}) must be in [-90, 90]");
		Ok(GeoPoint { lat, lon })
	}

	/// Computes the bounding box of a circle of `radius_m` meters around this point.
	///
	/// The radius is converted to an angular radius on a sphere of the mean
	/// Earth radius. The latitude delta is symmetric; the longitude delta is
	/// inflated by `1 / cos(lat)` so the box spans the same ground distance
	/// east-west. The result is a rectangle in degree space, not a true
	/// geodesic circle; near the poles or at wide radii it over- or
	/// under-covers.
	#[must_use]
	pub fn bbox_with_radius(&self, radius_m: f64) -> GeoBBox {
		let angular_radius = radius_m / EARTH_RADIUS_M;
		let lat_delta = angular_radius.to_degrees();
		let lon_delta = lat_delta / self.lat.to_radians().cos().abs().max(MIN_COS_LAT);

		GeoBBox::new_clamped(
			self.lon - lon_delta,
			self.lat - lat_delta,
			self.lon + lon_delta,
			self.lat + lat_delta,
		)
	}
}

impl Debug for GeoPoint {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "GeoPoint({}, {})", self.lat, self.lon)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn rejects_invalid_latitude() {
		assert!(GeoPoint::new(91.0, 0.0).is_err());
		assert!(GeoPoint::new(-91.0, 0.0).is_err());
		assert!(GeoPoint::new(f64::NAN, 0.0).is_err());
		assert!(GeoPoint::new(45.0, 200.0).is_ok());
	}

	#[test]
	fn bbox_at_equator_is_square() {
		let bbox = GeoPoint::new(0.0, 0.0).unwrap().bbox_with_radius(5000.0);
		let delta = (5000.0 / EARTH_RADIUS_M).to_degrees();
		assert!((bbox.lat_max - delta).abs() < 1e-12);
		assert!((bbox.lon_max - delta).abs() < 1e-12);
		assert!((bbox.lat_min + delta).abs() < 1e-12);
		assert!((bbox.lon_min + delta).abs() < 1e-12);
	}

	#[test]
	fn bbox_widens_with_latitude() {
		let equator = GeoPoint::new(0.0, 0.0).unwrap().bbox_with_radius(5000.0);
		let north = GeoPoint::new(60.0, 0.0).unwrap().bbox_with_radius(5000.0);
		let width = |b: &GeoBBox| b.lon_max - b.lon_min;
		// cos(60°) = 0.5, so the box is twice as wide in degrees
		assert!((width(&north) / width(&equator) - 2.0).abs() < 1e-9);
	}

	#[test]
	fn bbox_near_pole_does_not_blow_up() {
		let bbox = GeoPoint::new(90.0, 0.0).unwrap().bbox_with_radius(100_000.0);
		assert_eq!(bbox.lon_min, -180.0);
		assert_eq!(bbox.lon_max, 180.0);
		assert_eq!(bbox.lat_max, 90.0);
	}

	#[test]
	fn zero_radius_degenerates_to_point() {
		let bbox = GeoPoint::new(37.7749, -122.4194).unwrap().bbox_with_radius(0.0);
		assert_eq!(bbox.lat_min, bbox.lat_max);
		assert_eq!(bbox.lon_min, bbox.lon_max);
	}
}
