//! Raster tile formats accepted by the store and server.
//!
//! The allow-list is fixed: `png`, `jpg` (also `jpeg`) and `webp`. Each
//! variant knows its MIME type, so no extension guessing is involved.

use anyhow::{bail, Result};
use std::fmt::{Display, Formatter};

/// Enum representing supported raster tile formats.
#[allow(clippy::upper_case_acronyms)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum TileFormat {
	JPG,
	PNG,
	WEBP,
}

/// Extensions accepted in tile requests, in the order they are reported by `/health`.
pub const ALLOWED_EXTENSIONS: [&str; 4] = ["png", "jpg", "jpeg", "webp"];

impl TileFormat {
	/// Returns a lowercase string identifier for this tile format.
	pub fn as_str(&self) -> &str {
		match self {
			TileFormat::JPG => "jpg",
			TileFormat::PNG => "png",
			TileFormat::WEBP => "webp",
		}
	}

	/// Parses a file extension (case-insensitive, `jpeg` maps to `JPG`).
	///
	/// # Errors
	/// Returns an error for anything outside the allow-list.
	pub fn try_from_str(value: &str) -> Result<Self> {
		Ok(match value.to_lowercase().trim() {
			"jpeg" | "jpg" => TileFormat::JPG,
			"png" => TileFormat::PNG,
			"webp" => TileFormat::WEBP,
			_ => bail!("unsupported tile extension: '{value}'"),
		})
	}

	/// Returns the MIME type of this tile format.
	pub fn mime(&self) -> &str {
		match self {
			TileFormat::JPG => "image/jpeg",
			TileFormat::PNG => "image/png",
			TileFormat::WEBP => "image/webp",
		}
	}
}

impl Display for TileFormat {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		f.write_str(self.as_str())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	#[case("png", TileFormat::PNG)]
	#[case("PNG", TileFormat::PNG)]
	#[case("jpg", TileFormat::JPG)]
	#[case("jpeg", TileFormat::JPG)]
	#[case("JPeg", TileFormat::JPG)]
	#[case("webp", TileFormat::WEBP)]
	fn parses_allowed_extensions(#[case] input: &str, #[case] expected: TileFormat) {
		assert_eq!(TileFormat::try_from_str(input).unwrap(), expected);
	}

	#[rstest]
	#[case("bmp")]
	#[case("svg")]
	#[case("pbf")]
	#[case("")]
	fn rejects_unknown_extensions(#[case] input: &str) {
		assert!(TileFormat::try_from_str(input).is_err());
	}

	#[test]
	fn mime_types() {
		assert_eq!(TileFormat::PNG.mime(), "image/png");
		assert_eq!(TileFormat::JPG.mime(), "image/jpeg");
		assert_eq!(TileFormat::WEBP.mime(), "image/webp");
	}

	#[test]
	fn every_allowed_extension_parses() {
		for ext in ALLOWED_EXTENSIONS {
			assert!(TileFormat::try_from_str(ext).is_ok());
		}
	}
}
