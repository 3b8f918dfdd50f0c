//! Configuration of the `serve` subcommand.

use std::path::PathBuf;

use anyhow::Result;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8080;

/// Partial server configuration, before defaults are applied.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ServeConfig {
	pub host: Option<String>,
	pub port: Option<u16>,
	pub tile_dir: Option<PathBuf>,
}

/// Fully resolved server configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct ServeSettings {
	pub host: String,
	pub port: u16,
	pub tile_dir: PathBuf,
}

impl ServeConfig {
	/// Reads the `TILESTASH_*` environment layer.
	pub fn from_env() -> Result<ServeConfig> {
		Ok(ServeConfig {
			host: super::fetch::env_string("TILESTASH_HOST"),
			port: super::fetch::parse_env("TILESTASH_PORT")?,
			tile_dir: super::fetch::env_string("TILESTASH_TILE_DIR").map(PathBuf::from),
		})
	}

	pub fn override_optional_host(&mut self, host: &Option<String>) {
		if host.is_some() {
			self.host = host.clone();
		}
	}
	pub fn override_optional_port(&mut self, port: &Option<u16>) {
		if port.is_some() {
			self.port = *port;
		}
	}
	pub fn override_optional_tile_dir(&mut self, tile_dir: &Option<PathBuf>) {
		if tile_dir.is_some() {
			self.tile_dir = tile_dir.clone();
		}
	}

	/// Applies defaults.
	pub fn resolve(self) -> ServeSettings {
		ServeSettings {
			host: self.host.unwrap_or_else(|| DEFAULT_HOST.to_string()),
			port: self.port.unwrap_or(DEFAULT_PORT),
			tile_dir: self.tile_dir.unwrap_or_else(|| PathBuf::from(super::fetch::DEFAULT_TILE_DIR)),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn defaults() {
		let settings = ServeConfig::default().resolve();
		assert_eq!(settings.host, "0.0.0.0");
		assert_eq!(settings.port, 8080);
		assert_eq!(settings.tile_dir, PathBuf::from("./tiles"));
	}

	#[test]
	fn overrides_replace_defaults() {
		let mut config = ServeConfig::default();
		config.override_optional_host(&Some("127.0.0.1".to_string()));
		config.override_optional_port(&Some(9000));
		config.override_optional_port(&None);

		let settings = config.resolve();
		assert_eq!(settings.host, "127.0.0.1");
		assert_eq!(settings.port, 9000);
	}
}
