//! The HTTP tile server.
//!
//! Serves tiles from a [`TileStore`] at `/tiles/{z}/{x}/{y}.{ext}` plus a
//! `/health` endpoint. Requests are handled independently and statelessly;
//! the only shared state is the read-only store root.
//!
//! Validation order per request (each class has its own status code):
//! 1. z, x and y must be digit sequences → else 400,
//! 2. the extension must be allow-listed → else 415,
//! 3. the resolved path must stay under the root → else 403,
//! 4. the tile file must exist → else 404; other I/O errors → 500.

use anyhow::Result;
use axum::{
	body::Body,
	extract::{Path, State},
	http::header::{ACCESS_CONTROL_ALLOW_ORIGIN, CACHE_CONTROL, CONTENT_TYPE},
	response::Response,
	routing::get,
	Json, Router,
};
use serde::Serialize;
use tokio::sync::oneshot::Sender;

use super::error::ServeError;
use crate::{
	store::TileStore,
	types::{TileFormat, ALLOWED_EXTENSIONS},
};

/// Tiles never change under a given coordinate, so clients may cache them forever.
const TILE_CACHE_CONTROL: &str = "public, max-age=31536000, immutable";

/// An HTTP server delivering tiles from a local store.
pub struct TileServer {
	host: String,
	port: u16,
	store: TileStore,
	exit_signal: Option<Sender<()>>,
}

impl TileServer {
	#[must_use]
	pub fn new(host: &str, port: u16, store: TileStore) -> TileServer {
		TileServer {
			host: host.to_owned(),
			port,
			store,
			exit_signal: None,
		}
	}

	/// Binds the listener and starts serving in a background task.
	pub async fn start(&mut self) -> Result<()> {
		if self.exit_signal.is_some() {
			self.stop().await;
		}

		let router = build_router(self.store.clone());

		let addr = format!("{}:{}", self.host, self.port);
		log::info!("server listening on {addr}, serving tiles from {:?}", self.store.root());

		let listener = tokio::net::TcpListener::bind(addr).await?;
		let (tx, rx) = tokio::sync::oneshot::channel::<()>();

		tokio::spawn(async {
			axum::serve(listener, router.into_make_service())
				.with_graceful_shutdown(async {
					rx.await.ok();
				})
				.await
				.unwrap()
		});

		self.exit_signal = Some(tx);

		Ok(())
	}

	/// Signals the background task to shut down gracefully.
	pub async fn stop(&mut self) {
		if let Some(tx) = self.exit_signal.take() {
			log::info!("stopping server");
			tx.send(()).ok();
		}
	}
}

fn build_router(store: TileStore) -> Router {
	Router::new()
		.route("/tiles/{z}/{x}/{file}", get(serve_tile))
		.route("/health", get(health))
		.with_state(store)
}

async fn serve_tile(
	Path((z, x, file)): Path<(String, String, String)>, State(store): State<TileStore>,
) -> Result<Response, ServeError> {
	let (y, extension) = file.rsplit_once('.').unwrap_or((file.as_str(), ""));

	for segment in [z.as_str(), x.as_str(), y] {
		if !is_digits(segment) {
			return Err(ServeError::InvalidCoordinate(segment.to_owned()));
		}
	}

	let extension = extension.to_lowercase();
	let format =
		TileFormat::try_from_str(&extension).map_err(|_| ServeError::UnsupportedExtension(extension.clone()))?;

	let path = store
		.resolve_segments(&z, &x, y, &extension)
		.ok_or(ServeError::PathEscape)?;

	let bytes = tokio::fs::read(&path).await.map_err(|err| {
		if err.kind() == std::io::ErrorKind::NotFound {
			ServeError::NotFound
		} else {
			log::error!("reading {path:?} failed: {err}");
			ServeError::Internal
		}
	})?;

	log::debug!("{z}/{x}/{file}: {} bytes", bytes.len());

	Ok(
		Response::builder()
			.status(200)
			.header(CONTENT_TYPE, format.mime())
			.header(CACHE_CONTROL, TILE_CACHE_CONTROL)
			.header(ACCESS_CONTROL_ALLOW_ORIGIN, "*")
			.body(Body::from(bytes))
			.unwrap(),
	)
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Health {
	status: &'static str,
	tile_root: String,
	allowed_extensions: [&'static str; 4],
}

async fn health(State(store): State<TileStore>) -> ([(axum::http::HeaderName, &'static str); 1], Json<Health>) {
	(
		[(ACCESS_CONTROL_ALLOW_ORIGIN, "*")],
		Json(Health {
			status: "ok",
			tile_root: store.root().to_string_lossy().into_owned(),
			allowed_extensions: ALLOWED_EXTENSIONS,
		}),
	)
}

fn is_digits(segment: &str) -> bool {
	!segment.is_empty() && segment.bytes().all(|byte| byte.is_ascii_digit())
}
