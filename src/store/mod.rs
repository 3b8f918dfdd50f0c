//! The on-disk tile store.
//!
//! Tiles live in a directory structure shared by the fetch pipeline (writer)
//! and the tile server (reader):
//! ```text
//! <root>/<z>/<x>/<y>.<ext>
//! ```
//! Directories are created lazily on write. Writes targeting distinct paths
//! are idempotent overwrites, so re-running a batch is safe without locking.
//!
//! Resolution of request segments into paths is lexical: `.` and `..`
//! components are normalized away and the result must stay under the store
//! root, otherwise the lookup is rejected.

use anyhow::{ensure, Context, Result};
use std::{
	env::current_dir,
	fmt::Debug,
	fs,
	path::{Component, Path, PathBuf},
};

use crate::types::TileCoord;

/// A tile store rooted at a directory, keyed by `{z}/{x}/{y}.{ext}`.
#[derive(Clone)]
pub struct TileStore {
	root: PathBuf,
}

impl TileStore {
	/// Opens an existing store. The root must exist and be a directory.
	pub fn open(path: &Path) -> Result<TileStore> {
		let root = absolute(path)?;
		ensure!(root.exists(), "tile directory {root:?} does not exist");
		ensure!(root.is_dir(), "tile directory {root:?} is not a directory");
		Ok(TileStore {
			root: root.canonicalize()?,
		})
	}

	/// Opens a store for writing, creating the root directory if needed.
	pub fn create(path: &Path) -> Result<TileStore> {
		let root = absolute(path)?;
		fs::create_dir_all(&root).with_context(|| format!("creating tile directory {root:?}"))?;
		Ok(TileStore {
			root: root.canonicalize()?,
		})
	}

	/// The absolute root directory of the store.
	#[must_use]
	pub fn root(&self) -> &Path {
		&self.root
	}

	/// The path a tile is stored at.
	#[must_use]
	pub fn path_for(&self, coord: &TileCoord, extension: &str) -> PathBuf {
		self
			.root
			.join(coord.level.to_string())
			.join(coord.x.to_string())
			.join(format!("{}.{}", coord.y, extension))
	}

	/// Resolves raw request segments into a path, or `None` if the normalized
	/// path would escape the store root.
	#[must_use]
	pub fn resolve_segments(&self, z: &str, x: &str, y: &str, extension: &str) -> Option<PathBuf> {
		let path = self.root.join(z).join(x).join(format!("{y}.{extension}"));
		let path = normalize(&path);
		if path.starts_with(&self.root) {
			Some(path)
		} else {
			None
		}
	}

	/// Returns whether a tile is already present.
	#[must_use]
	pub fn contains(&self, coord: &TileCoord, extension: &str) -> bool {
		self.path_for(coord, extension).is_file()
	}

	/// Writes tile bytes, creating parent directories as needed.
	/// Overwrites any existing file at the same coordinate.
	pub fn write(&self, coord: &TileCoord, extension: &str, bytes: &[u8]) -> Result<()> {
		let path = self.path_for(coord, extension);
		if let Some(parent) = path.parent() {
			fs::create_dir_all(parent).with_context(|| format!("creating {parent:?}"))?;
		}
		fs::write(&path, bytes).with_context(|| format!("writing {path:?}"))
	}
}

impl Debug for TileStore {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("TileStore").field("root", &self.root).finish()
	}
}

fn absolute(path: &Path) -> Result<PathBuf> {
	if path.is_absolute() {
		Ok(path.to_path_buf())
	} else {
		Ok(current_dir()?.join(path))
	}
}

/// Lexical path normalization: removes `.` components and lets `..` pop the
/// previous component without touching the filesystem.
fn normalize(path: &Path) -> PathBuf {
	let mut out = PathBuf::new();
	for component in path.components() {
		match component {
			Component::CurDir => {}
			Component::ParentDir => {
				out.pop();
			}
			other => out.push(other),
		}
	}
	out
}
