//! The batch fetch pipeline.
//!
//! Enumerated tile coordinates are fetched by a bounded worker pool. All
//! workers share a [`RateGate`] that enforces the two rate-limiting
//! invariants towards the remote provider:
//!
//! - a minimum spacing between request starts, and
//! - an extra cooldown after any failed request.
//!
//! Failures are isolated per tile: a failed fetch is recorded and logged but
//! never aborts the batch. Writes into the store are idempotent, so a batch
//! can be re-run to fill in failures.

use anyhow::{ensure, Context, Result};
use futures::{stream, StreamExt};
use reqwest::Client;
use std::{sync::Arc, time::Duration};
use tokio::{
	sync::Mutex,
	time::{sleep_until, Instant},
};

use super::UrlTemplate;
use crate::{
	store::TileStore,
	types::{GeoBBox, TileBBox, TileCoord},
};

/// Minimum spacing between request starts towards the tile provider.
pub const MIN_REQUEST_GAP: Duration = Duration::from_millis(25);

/// Additional cooldown imposed after a failed request.
pub const FAILURE_COOLDOWN: Duration = Duration::from_millis(100);

/// Tuning knobs of the fetch pipeline. `Default` gives the production values.
#[derive(Clone, Debug)]
pub struct FetchOptions {
	/// Number of tiles fetched in parallel.
	pub concurrency: usize,
	/// Per-request timeout; a timeout counts as a failed fetch.
	pub timeout: Duration,
	/// Skip tiles already present in the store instead of overwriting them.
	pub skip_existing: bool,
	/// Minimum spacing between request starts.
	pub min_request_gap: Duration,
	/// Cooldown after a failed request.
	pub failure_cooldown: Duration,
}

impl Default for FetchOptions {
	fn default() -> Self {
		FetchOptions {
			concurrency: 4,
			timeout: Duration::from_millis(15_000),
			skip_existing: false,
			min_request_gap: MIN_REQUEST_GAP,
			failure_cooldown: FAILURE_COOLDOWN,
		}
	}
}

/// Outcome totals of one batch run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FetchSummary {
	pub total: u64,
	pub fetched: u64,
	pub skipped: u64,
	pub failed: u64,
}

enum Outcome {
	Fetched,
	Skipped,
	Failed,
}

/// Shared pacing gate for all workers.
///
/// `acquire` reserves the next request slot and sleeps until it is due;
/// `penalize` pushes the next slot out by the failure cooldown.
struct RateGate {
	min_gap: Duration,
	cooldown: Duration,
	next_slot: Mutex<Instant>,
}

impl RateGate {
	fn new(min_gap: Duration, cooldown: Duration) -> RateGate {
		RateGate {
			min_gap,
			cooldown,
			next_slot: Mutex::new(Instant::now()),
		}
	}

	async fn acquire(&self) {
		let deadline = {
			let mut next_slot = self.next_slot.lock().await;
			let deadline = (*next_slot).max(Instant::now());
			*next_slot = deadline + self.min_gap;
			deadline
		};
		sleep_until(deadline).await;
	}

	async fn penalize(&self) {
		let mut next_slot = self.next_slot.lock().await;
		let earliest = Instant::now() + self.cooldown;
		if *next_slot < earliest {
			*next_slot = earliest;
		}
	}
}

/// Fetches batches of tiles from a templated remote source into a [`TileStore`].
pub struct FetchPipeline {
	client: Client,
	template: UrlTemplate,
	store: TileStore,
	extension: String,
	gate: Arc<RateGate>,
	concurrency: usize,
	skip_existing: bool,
}

impl FetchPipeline {
	/// Builds a pipeline with its HTTP client.
	pub fn new(template: UrlTemplate, store: TileStore, extension: &str, options: FetchOptions) -> Result<FetchPipeline> {
		ensure!(options.concurrency > 0, "concurrency must be > 0");

		let client = Client::builder()
			.tcp_keepalive(Duration::from_secs(600))
			.timeout(options.timeout)
			.use_rustls_tls()
			.build()?;

		Ok(FetchPipeline {
			client,
			template,
			store,
			extension: extension.to_owned(),
			gate: Arc::new(RateGate::new(options.min_request_gap, options.failure_cooldown)),
			concurrency: options.concurrency,
			skip_existing: options.skip_existing,
		})
	}

	/// Runs the batch: enumerates all tiles of `bbox` at each level and
	/// fetches them with bounded concurrency.
	///
	/// Per-tile failures are aggregated into the summary, not propagated.
	pub async fn run(&self, bbox: &GeoBBox, levels: &[u8]) -> Result<FetchSummary> {
		ensure!(!levels.is_empty(), "no zoom levels to fetch");

		let mut coords: Vec<TileCoord> = Vec::new();
		for &level in levels {
			let tile_bbox = TileBBox::from_geo(level, bbox)?;
			log::info!("level {level}: {} tiles in {tile_bbox:?}", tile_bbox.count_tiles());
			coords.extend(tile_bbox.iter_coords());
		}

		let mut summary = FetchSummary {
			total: coords.len() as u64,
			..Default::default()
		};

		let outcomes: Vec<Outcome> = stream::iter(coords)
			.map(|coord| self.fetch_one(coord))
			.buffer_unordered(self.concurrency)
			.collect()
			.await;

		for outcome in outcomes {
			match outcome {
				Outcome::Fetched => summary.fetched += 1,
				Outcome::Skipped => summary.skipped += 1,
				Outcome::Failed => summary.failed += 1,
			}
		}

		log::info!(
			"batch done: {} fetched, {} skipped, {} failed (of {})",
			summary.fetched,
			summary.skipped,
			summary.failed,
			summary.total
		);
		Ok(summary)
	}

	async fn fetch_one(&self, coord: TileCoord) -> Outcome {
		if self.skip_existing && self.store.contains(&coord, &self.extension) {
			log::debug!("{coord:?} already present, skipping");
			return Outcome::Skipped;
		}

		self.gate.acquire().await;

		match self.try_fetch(&coord).await {
			Ok(bytes) => match self.store.write(&coord, &self.extension, &bytes) {
				Ok(()) => Outcome::Fetched,
				Err(err) => {
					log::error!("storing {coord:?} failed: {err:#}");
					Outcome::Failed
				}
			},
			Err(err) => {
				log::warn!("fetching {coord:?} failed: {err:#}");
				self.gate.penalize().await;
				Outcome::Failed
			}
		}
	}

	async fn try_fetch(&self, coord: &TileCoord) -> Result<Vec<u8>> {
		let url = self.template.resolve(coord);

		let response = self
			.client
			.get(&url)
			.send()
			.await
			.with_context(|| format!("requesting '{url}'"))?;

		ensure!(
			response.status().is_success(),
			"'{url}' answered with status {}",
			response.status()
		);

		let bytes = response
			.bytes()
			.await
			.with_context(|| format!("reading body of '{url}'"))?;

		Ok(bytes.to_vec())
	}
}
