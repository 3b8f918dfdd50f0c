//! Tile-aligned bounding boxes for a single zoom level.
//!
//! A [`TileBBox`] describes a rectangular region of Web Mercator tiles at a
//! specific zoom level. Coordinates are zero-based and inclusive on both
//! sides, so a bbox always contains at least one tile; a degenerate
//! geographic box (zero area) still maps to the single tile containing it.
//!
//! Enumeration order is part of the contract: [`TileBBox::iter_coords`]
//! yields tiles in ascending x, then ascending y within each column, so
//! batch progress and logs are reproducible.

use anyhow::{ensure, Result};
use itertools::Itertools;
use std::fmt::Debug;

use super::{GeoBBox, TileCoord, MAX_LEVEL};

/// A rectangular region of tiles at a specific zoom level, inclusive on all sides.
#[derive(Clone, Copy, Hash, PartialEq, Eq)]
pub struct TileBBox {
	/// Zoom level of the bounding box.
	pub level: u8,
	x_min: u32,
	y_min: u32,
	x_max: u32,
	y_max: u32,
}

impl TileBBox {
	/// Create from inclusive minimum and maximum tile coordinates.
	///
	/// # Errors
	/// Returns an error if the level or a coordinate is out of range, or if a
	/// minimum exceeds its maximum.
	pub fn from_min_and_max(level: u8, x_min: u32, y_min: u32, x_max: u32, y_max: u32) -> Result<TileBBox> {
		ensure!(level <= MAX_LEVEL, "level ({level}) must be <= {MAX_LEVEL}");

		let max = ((1u64 << level) - 1) as u32;

		ensure!(x_min <= x_max, "x_min ({x_min}) must be <= x_max ({x_max})");
		ensure!(y_min <= y_max, "y_min ({y_min}) must be <= y_max ({y_max})");
		ensure!(x_max <= max, "x_max ({x_max}) must be <= max ({max})");
		ensure!(y_max <= max, "y_max ({y_max}) must be <= max ({max})");

		Ok(TileBBox {
			level,
			x_min,
			y_min,
			x_max,
			y_max,
		})
	}

	/// Constructs the tile bbox covering a geographic bounding box at `level`.
	///
	/// The two opposite corners are projected independently and min/max are
	/// taken per axis, because y grows southwards while the input corners are
	/// ordered south-to-north.
	pub fn from_geo(level: u8, bbox: &GeoBBox) -> Result<TileBBox> {
		let a = TileCoord::from_geo(bbox.lon_min, bbox.lat_max, level)?;
		let b = TileCoord::from_geo(bbox.lon_max, bbox.lat_min, level)?;

		Self::from_min_and_max(level, a.x.min(b.x), a.y.min(b.y), a.x.max(b.x), a.y.max(b.y))
	}

	/// Minimum x-tile (column) coordinate.
	#[must_use]
	pub fn x_min(&self) -> u32 {
		self.x_min
	}

	/// Minimum y-tile (row) coordinate.
	#[must_use]
	pub fn y_min(&self) -> u32 {
		self.y_min
	}

	/// Maximum x-tile (column) coordinate, inclusive.
	#[must_use]
	pub fn x_max(&self) -> u32 {
		self.x_max
	}

	/// Maximum y-tile (row) coordinate, inclusive.
	#[must_use]
	pub fn y_max(&self) -> u32 {
		self.y_max
	}

	/// Number of tiles in the bounding box.
	#[must_use]
	pub fn count_tiles(&self) -> u64 {
		u64::from(self.x_max - self.x_min + 1) * u64::from(self.y_max - self.y_min + 1)
	}

	/// Returns whether the given coordinate lies within this bounding box.
	#[must_use]
	pub fn contains(&self, coord: &TileCoord) -> bool {
		coord.level == self.level
			&& (self.x_min..=self.x_max).contains(&coord.x)
			&& (self.y_min..=self.y_max).contains(&coord.y)
	}

	/// Returns an iterator over all tile coordinates within the bounding box,
	/// in ascending x, then ascending y order.
	pub fn iter_coords(&self) -> impl Iterator<Item = TileCoord> + '_ {
		let x_range = self.x_min..=self.x_max;
		let y_range = self.y_min..=self.y_max;
		x_range.cartesian_product(y_range).map(|(x, y)| TileCoord {
			level: self.level,
			x,
			y,
		})
	}
}

impl Debug for TileBBox {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(
			f,
			"TileBBox({}: [{},{},{},{}])",
			self.level, self.x_min, self.y_min, self.x_max, self.y_max
		)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::types::GeoPoint;
	use rstest::rstest;

	fn tc(level: u8, x: u32, y: u32) -> TileCoord {
		TileCoord::new(level, x, y).unwrap()
	}

	#[rstest]
	#[case((0, 0, 0, 0, 0))]
	#[case((4, 5, 6, 7, 9))]
	#[case((31, 0, 0, 0, 0))]
	fn from_min_and_max_valid(#[case] args: (u8, u32, u32, u32, u32)) {
		let (level, x0, y0, x1, y1) = args;
		let bb = TileBBox::from_min_and_max(level, x0, y0, x1, y1).unwrap();
		assert_eq!((bb.x_min(), bb.y_min(), bb.x_max(), bb.y_max()), (x0, y0, x1, y1));
	}

	#[rstest]
	#[case((32, 0, 0, 0, 0))] // invalid level
	#[case((3, 5, 6, 4, 6))] // x_min > x_max
	#[case((3, 5, 6, 5, 5))] // y_min > y_max
	#[case((2, 0, 0, 5, 0))] // x_max > max
	#[case((2, 0, 0, 0, 5))] // y_max > max
	fn from_min_and_max_invalid(#[case] args: (u8, u32, u32, u32, u32)) {
		let (level, x0, y0, x1, y1) = args;
		assert!(TileBBox::from_min_and_max(level, x0, y0, x1, y1).is_err());
	}

	#[test]
	fn from_geo() {
		let geo = GeoBBox::new(8.0653, 51.3563, 12.3528, 52.2564).unwrap();
		let bbox = TileBBox::from_geo(9, &geo).unwrap();
		assert_eq!(bbox, TileBBox::from_min_and_max(9, 267, 168, 273, 170).unwrap());
	}

	#[test]
	fn from_geo_degenerate_box_yields_one_tile() {
		// center (37.7749, -122.4194), radius 0, zoom 10
		let geo = GeoPoint::new(37.7749, -122.4194).unwrap().bbox_with_radius(0.0);
		let bbox = TileBBox::from_geo(10, &geo).unwrap();
		assert_eq!(bbox.count_tiles(), 1);
		let coords: Vec<TileCoord> = bbox.iter_coords().collect();
		assert_eq!(coords, vec![tc(10, 163, 395)]);
	}

	#[test]
	fn iter_coords_ascending_x_then_y() {
		let bb = TileBBox::from_min_and_max(4, 2, 5, 3, 6).unwrap();
		let coords: Vec<TileCoord> = bb.iter_coords().collect();
		assert_eq!(coords, vec![tc(4, 2, 5), tc(4, 2, 6), tc(4, 3, 5), tc(4, 3, 6)]);
	}

	#[rstest]
	#[case((4, 5, 12, 5, 12), 1)]
	#[case((4, 5, 12, 7, 15), 12)]
	#[case((4, 5, 12, 5, 15), 4)]
	#[case((4, 5, 15, 7, 15), 3)]
	fn count_tiles_cases(#[case] args: (u8, u32, u32, u32, u32), #[case] expected: u64) {
		let (level, x0, y0, x1, y1) = args;
		assert_eq!(
			TileBBox::from_min_and_max(level, x0, y0, x1, y1).unwrap().count_tiles(),
			expected
		);
	}

	#[rstest]
	#[case(5)]
	#[case(9)]
	#[case(12)]
	fn enumerated_coords_stay_within_corner_rectangle(#[case] level: u8) {
		let geo = GeoBBox::new(8.0653, 51.3563, 12.3528, 52.2564).unwrap();
		let bbox = TileBBox::from_geo(level, &geo).unwrap();

		// Independently computed corner tiles
		let nw = TileCoord::from_geo(geo.lon_min, geo.lat_max, level).unwrap();
		let se = TileCoord::from_geo(geo.lon_max, geo.lat_min, level).unwrap();

		let mut count = 0u64;
		for coord in bbox.iter_coords() {
			assert!(coord.x >= nw.x.min(se.x) && coord.x <= nw.x.max(se.x));
			assert!(coord.y >= nw.y.min(se.y) && coord.y <= nw.y.max(se.y));
			assert!(bbox.contains(&coord));
			count += 1;
		}
		assert_eq!(count, bbox.count_tiles());
	}

	#[test]
	fn contains_checks_level() {
		let bb = TileBBox::from_min_and_max(4, 2, 5, 3, 6).unwrap();
		assert!(bb.contains(&tc(4, 2, 5)));
		assert!(!bb.contains(&tc(5, 2, 5)));
		assert!(!bb.contains(&tc(4, 4, 5)));
	}
}
