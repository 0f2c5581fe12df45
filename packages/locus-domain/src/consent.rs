use serde::{Deserialize, Serialize};

use crate::geo::Point;

/// Location fields shared by scenes and events.
///
/// `coarse_geohash` is always kept. `precise_point` may only be persisted while
/// `allow_precise` holds, and [`enforce_location_consent`] is the one place that clears it.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct Location {
	pub allow_precise: bool,
	#[serde(default)]
	pub precise_point: Option<Point>,
	pub coarse_geohash: String,
}

pub trait Located {
	fn location(&self) -> &Location;

	fn location_mut(&mut self) -> &mut Location;
}

/// Drops the precise point unless the record consents to keeping it.
///
/// Takes the entity by value so write paths always enforce on their own copy and never on
/// the caller's object. Applying it twice is a no-op.
pub fn enforce_location_consent<T>(mut entity: T) -> T
where
	T: Located,
{
	let location = entity.location_mut();

	if !location.allow_precise {
		location.precise_point = None;
	}

	entity
}
