//! Tile URL templates.
//!
//! A template contains `{z}`, `{x}` and `{y}` placeholders and optionally
//! `{ext}` and `{s}`. The subdomain for `{s}` is chosen as `(x + y) mod n`,
//! spreading requests across the provider's edge hosts.

use anyhow::{ensure, Result};

use crate::types::TileCoord;

/// A templated tile source URL.
#[derive(Clone, Debug)]
pub struct UrlTemplate {
	template: String,
	extension: String,
	subdomains: Vec<String>,
}

impl UrlTemplate {
	/// Creates a template, validating that the required placeholders are
	/// present and that `{s}` has subdomains to draw from.
	pub fn new(template: &str, extension: &str, subdomains: Vec<String>) -> Result<UrlTemplate> {
		for placeholder in ["{z}", "{x}", "{y}"] {
			ensure!(
				template.contains(placeholder),
				"url template '{template}' is missing the {placeholder} placeholder"
			);
		}
		if template.contains("{s}") {
			ensure!(
				!subdomains.is_empty(),
				"url template '{template}' uses {{s}} but no subdomains are configured"
			);
		}
		Ok(UrlTemplate {
			template: template.to_owned(),
			extension: extension.to_owned(),
			subdomains,
		})
	}

	/// Resolves the template for one tile coordinate.
	#[must_use]
	pub fn resolve(&self, coord: &TileCoord) -> String {
		let mut url = self
			.template
			.replace("{z}", &coord.level.to_string())
			.replace("{x}", &coord.x.to_string())
			.replace("{y}", &coord.y.to_string())
			.replace("{ext}", &self.extension);

		if url.contains("{s}") {
			let index = ((u64::from(coord.x) + u64::from(coord.y)) % self.subdomains.len() as u64) as usize;
			url = url.replace("{s}", &self.subdomains[index]);
		}
		url
	}
}
