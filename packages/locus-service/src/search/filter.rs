use time::OffsetDateTime;

use locus_domain::{BoundingBox, Event, EventStatus, Location, Record, Scene};

/// Live, publicly searchable scenes with a precise point inside `bbox`.
pub(crate) fn scene_matches(scene: &Scene, bbox: &BoundingBox) -> bool {
	if scene.is_deleted() || !scene.visibility.is_searchable() {
		return false;
	}

	located_within(&scene.location, bbox)
}

/// Live, uncancelled events starting within `[from, to]` with a precise point inside `bbox`.
pub(crate) fn event_matches(
	event: &Event,
	bbox: &BoundingBox,
	from: OffsetDateTime,
	to: OffsetDateTime,
) -> bool {
	if event.is_deleted() || event.status == EventStatus::Cancelled {
		return false;
	}
	if event.starts_at < from || event.starts_at > to {
		return false;
	}

	located_within(&event.location, bbox)
}

// Records without a precise point never match a bounding box, even when their coarse geohash
// falls inside it.
fn located_within(location: &Location, bbox: &BoundingBox) -> bool {
	location.precise_point.as_ref().is_some_and(|point| bbox.contains(point))
}
