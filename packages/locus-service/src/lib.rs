pub mod cursor;
pub mod events;
pub mod scenes;
pub mod search;
pub mod timeline;

mod error;

pub use cursor::{ScoreCursor, TimeCursor};
pub use error::{Error, Result};
pub use locus_storage::UpsertOutcome;
pub use search::{
	EventSearchRequest, RankingWeights, SceneSearchRequest, SearchPage, Signals, TextTiers,
};
pub use timeline::TimelineRequest;

use std::sync::Arc;

use time::OffsetDateTime;

use locus_config::Config;
use locus_domain::{Clock, Event, Location, Record, Scene, SystemClock, geohash};
use locus_storage::Store;

/// Scene and event discovery over an in-process store.
///
/// Every write enforces location consent on a private copy of the caller's entity before it
/// is stored; every read hands back owned copies.
pub struct LocusService {
	pub cfg: Config,
	scenes: Store<Scene>,
	events: Store<Event>,
	clock: Arc<dyn Clock>,
}
impl LocusService {
	pub fn new(cfg: Config) -> Self {
		Self::with_clock(cfg, Arc::new(SystemClock))
	}

	pub fn with_clock(cfg: Config, clock: Arc<dyn Clock>) -> Self {
		Self { cfg, scenes: Store::new(), events: Store::new(), clock }
	}

	pub(crate) fn now(&self) -> OffsetDateTime {
		self.clock.now()
	}

	/// Zero asks for the configured default; anything above the maximum is clamped.
	pub(crate) fn page_limit(&self, requested: u32) -> usize {
		let search = &self.cfg.search;
		let limit =
			if requested == 0 { search.default_limit } else { requested.min(search.max_limit) };

		limit as usize
	}

	/// Validates a write's location and fills in or coarsens its geohash.
	pub(crate) fn prepare_location(&self, location: &mut Location) -> Result<()> {
		let precision = self.cfg.geo.coarse_precision;

		if let Some(point) = location.precise_point
			&& !point.is_valid()
		{
			return Err(Error::InvalidRequest {
				message: "precise_point must be a valid latitude/longitude pair.".to_string(),
			});
		}

		let coarse = location.coarse_geohash.trim();

		if coarse.is_empty() {
			let Some(point) = location.precise_point else {
				return Err(Error::InvalidRequest {
					message: "coarse_geohash is required when no precise_point is given."
						.to_string(),
				});
			};

			location.coarse_geohash = geohash::encode(&point, precision);
		} else {
			location.coarse_geohash = geohash::truncate(coarse, precision).to_string();
		}

		Ok(())
	}
}

/// Notes when a write arrives carrying coordinates it has no consent to keep.
pub(crate) fn trace_consent<T>(entity: &T)
where
	T: Record,
{
	let location = entity.location();

	if !location.allow_precise && location.precise_point.is_some() {
		tracing::debug!(
			kind = T::KIND,
			id = entity.id(),
			"Precise point will be dropped; record has not consented to precise location."
		);
	}
}
