//! Fixtures shared by the locus test suites.

use std::sync::{Mutex, Once};

use time::{Duration, OffsetDateTime, macros::datetime};
use tracing_subscriber::EnvFilter;

use locus_config::Config;
use locus_domain::{BoundingBox, Clock, Event, EventStatus, Location, Point, Scene};

/// The instant every [`FixedClock::default`] starts at.
pub const BASE_TIME: OffsetDateTime = datetime!(2026-06-01 12:00 UTC);

pub const NEW_YORK: Point = Point { lat: 40.7128, lng: -74.006 };
pub const LOS_ANGELES: Point = Point { lat: 34.0522, lng: -118.2437 };
pub const LONDON: Point = Point { lat: 51.5074, lng: -0.1278 };

static TRACING: Once = Once::new();

/// A clock that only moves when told to.
pub struct FixedClock {
	now: Mutex<OffsetDateTime>,
}
impl FixedClock {
	pub fn new(now: OffsetDateTime) -> Self {
		Self { now: Mutex::new(now) }
	}

	pub fn advance(&self, by: Duration) {
		let mut now = self.now.lock().unwrap_or_else(|err| err.into_inner());

		*now += by;
	}
}
impl Default for FixedClock {
	fn default() -> Self {
		Self::new(BASE_TIME)
	}
}
impl Clock for FixedClock {
	fn now(&self) -> OffsetDateTime {
		*self.now.lock().unwrap_or_else(|err| err.into_inner())
	}
}

/// Builds the filter a host would install from `service.log_level`. An unparsable level
/// falls back to `warn`.
pub fn log_filter(cfg: &Config) -> EnvFilter {
	EnvFilter::try_new(&cfg.service.log_level).unwrap_or_else(|_| EnvFilter::new("warn"))
}

/// Installs a test-writer subscriber once per test binary. `RUST_LOG` overrides the configured
/// level.
pub fn init_tracing(cfg: &Config) {
	TRACING.call_once(|| {
		let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| log_filter(cfg));
		let _ = tracing_subscriber::fmt().with_env_filter(filter).with_test_writer().try_init();
	});
}

/// Defaults, with logging turned down to `warn` so test output stays quiet.
pub fn test_config() -> Config {
	let mut cfg = Config::default();

	cfg.service.log_level = "warn".to_string();

	cfg
}

pub fn nyc_bbox() -> BoundingBox {
	BoundingBox::new(-74.3, 40.5, -73.7, 40.9)
}

pub fn la_bbox() -> BoundingBox {
	BoundingBox::new(-118.7, 33.7, -118.0, 34.3)
}

pub fn world_bbox() -> BoundingBox {
	BoundingBox::new(-180.0, -90.0, 180.0, 90.0)
}

/// A public scene that consents to its precise point. The coarse geohash is left for the
/// service to derive.
pub fn scene(id: &str, name: &str, point: Point) -> Scene {
	Scene {
		id: id.to_string(),
		name: name.to_string(),
		description: String::new(),
		owner_identity: "owner-1".to_string(),
		location: Location {
			allow_precise: true,
			precise_point: Some(point),
			coarse_geohash: String::new(),
		},
		..Scene::default()
	}
}

/// A scheduled event that consents to its precise point.
pub fn event(
	id: &str,
	scene_id: &str,
	title: &str,
	point: Point,
	starts_at: OffsetDateTime,
) -> Event {
	Event {
		id: id.to_string(),
		scene_id: scene_id.to_string(),
		title: title.to_string(),
		description: String::new(),
		location: Location {
			allow_precise: true,
			precise_point: Some(point),
			coarse_geohash: String::new(),
		},
		tags: Vec::new(),
		status: EventStatus::Scheduled,
		starts_at,
		ends_at: None,
		cancelled_at: None,
		cancellation_reason: None,
		record_owner: None,
		record_key: None,
		created_at: None,
		updated_at: None,
		deleted_at: None,
	}
}
