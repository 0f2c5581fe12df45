use std::collections::HashMap;

use time::{Duration, OffsetDateTime};

use locus_domain::Point;

/// Proximity assigned to candidates without a precise point.
pub const NEUTRAL_PROXIMITY: f64 = 0.5;

/// Full score for anything already started, decaying linearly across the search window.
pub fn recency_score(starts_at: OffsetDateTime, now: OffsetDateTime, window: Duration) -> f64 {
	if window <= Duration::ZERO || starts_at <= now {
		return 1.0;
	}

	let ahead = (starts_at - now).as_seconds_f64();
	let span = window.as_seconds_f64();

	(1.0 - ahead / span).clamp(0.0, 1.0)
}

pub fn proximity_score(point: Option<&Point>, reference: &Point) -> f64 {
	let Some(point) = point else { return NEUTRAL_PROXIMITY };

	1.0 / (1.0 + point.planar_distance(reference))
}

/// Looks up a caller-supplied trust score, treating missing or non-finite entries as zero.
pub fn trust_score(scores: &HashMap<String, f64>, owner: &str) -> f64 {
	match scores.get(owner) {
		Some(score) if score.is_finite() => score.clamp(0.0, 1.0),
		_ => 0.0,
	}
}
