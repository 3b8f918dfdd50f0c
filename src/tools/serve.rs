use std::path::PathBuf;

use anyhow::Result;
use tokio::time::{sleep, Duration};

use tilestash::{config::ServeConfig, server::TileServer, store::TileStore};

#[derive(clap::Args, Debug)]
#[command(disable_version_flag = true, verbatim_doc_comment)]
pub struct Subcommand {
	/// Directory containing the tiles to serve. Default: ./tiles
	#[arg(short, long, display_order = 0)]
	pub tile_dir: Option<PathBuf>,

	/// Serve via socket ip. Default: 0.0.0.0
	#[arg(short = 'i', long, display_order = 1)]
	pub host: Option<String>,

	/// Serve via port. Default: 8080
	#[arg(short, long, display_order = 1)]
	pub port: Option<u16>,

	/// Shutdown server automatically after x milliseconds.
	#[arg(long, display_order = 2)]
	pub auto_shutdown: Option<u64>,
}

#[tokio::main]
pub async fn run(arguments: &Subcommand) -> Result<()> {
	let mut config = ServeConfig::from_env()?;
	config.override_optional_tile_dir(&arguments.tile_dir);
	config.override_optional_host(&arguments.host);
	config.override_optional_port(&arguments.port);

	let settings = config.resolve();

	let store = TileStore::open(&settings.tile_dir)?;
	let mut server = TileServer::new(&settings.host, settings.port, store);
	server.start().await?;

	eprintln!("serving tiles at http://{}:{}/tiles/", settings.host, settings.port);

	if let Some(milliseconds) = arguments.auto_shutdown {
		sleep(Duration::from_millis(milliseconds)).await;
		server.stop().await;
	} else {
		loop {
			sleep(Duration::from_secs(60)).await
		}
	}

	Ok(())
}

#[cfg(test)]
mod tests {
	use crate::tests::run_command;
	use anyhow::Result;
	use assert_fs::TempDir;

	#[test]
	fn serves_a_folder_and_shuts_down() -> Result<()> {
		let dir = TempDir::new()?;
		run_command(vec![
			"tilestash",
			"serve",
			"-i",
			"127.0.0.1",
			"-p",
			"51311",
			"--auto-shutdown",
			"500",
			"--tile-dir",
			dir.path().to_str().unwrap(),
		])?;
		Ok(())
	}

	#[test]
	fn missing_tile_dir_fails() {
		let output = run_command(vec![
			"tilestash",
			"serve",
			"--tile-dir",
			"/definitely/not/here",
			"--auto-shutdown",
			"100",
		])
		.unwrap_err()
		.to_string();
		assert!(output.contains("/definitely/not/here"));
	}
}
