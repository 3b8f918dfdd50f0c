use assert_cmd::{cargo, Command};
use predicates::str;
use rstest::rstest;

const BINARY_NAME: &str = "tilestash";

#[test]
fn command() -> Result<(), Box<dyn std::error::Error>> {
	let mut cmd = Command::new(cargo::cargo_bin!());
	cmd.assert()
		.failure()
		.code(2)
		.stdout(str::is_empty())
		.stderr(str::contains(format!("Usage: {BINARY_NAME} [OPTIONS] <COMMAND>")));
	Ok(())
}

#[rstest]
#[case("fetch", "[OPTIONS]")]
fn subcommand(#[case] sub_command: &str, #[case] usage: &str) -> Result<(), Box<dyn std::error::Error>> {
	Command::new(cargo::cargo_bin!())
		.args(sub_command.split(" "))
		.assert()
		.failure()
		.code(2)
		.stdout(str::is_empty())
		.stderr(str::contains(format!("Usage: {BINARY_NAME} {sub_command} {usage}")));
	Ok(())
}

#[test]
fn fetch_without_center_fails() -> Result<(), Box<dyn std::error::Error>> {
	Command::new(cargo::cargo_bin!())
		.args(["fetch", "--radius", "100"])
		.env_remove("TILESTASH_LAT")
		.env_remove("TILESTASH_LON")
		.assert()
		.failure()
		.stderr(str::contains("latitude"));
	Ok(())
}

#[test]
fn serve_rejects_missing_tile_dir() -> Result<(), Box<dyn std::error::Error>> {
	Command::new(cargo::cargo_bin!())
		.args(["serve", "--tile-dir", "/definitely/not/here", "--auto-shutdown", "100"])
		.assert()
		.failure()
		.stderr(str::contains("/definitely/not/here"));
	Ok(())
}
