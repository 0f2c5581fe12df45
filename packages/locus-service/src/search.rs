pub mod ranking;

pub(crate) mod filter;

pub use ranking::{RankingWeights, Signals, TextTiers};

use std::{cmp::Ordering, collections::HashMap};

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::{Error, LocusService, Result, cursor::ScoreCursor};
use locus_domain::{BoundingBox, Event, Record, Scene};
use ranking::{
	EVENT_TEXT_TIERS, SCENE_TEXT_TIERS, normalize_query, proximity_score, recency_score,
	text_match, trust_score,
};

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct SceneSearchRequest {
	pub bbox: BoundingBox,
	#[serde(default)]
	pub query: String,
	/// Zero selects the configured default page size.
	#[serde(default)]
	pub limit: u32,
	#[serde(default)]
	pub cursor: String,
	/// Trust per scene id. Trust contributes to the score only when this is present.
	#[serde(default)]
	pub trust_scores: Option<HashMap<String, f64>>,
	#[serde(default)]
	pub weights: Option<RankingWeights>,
}
impl SceneSearchRequest {
	pub fn new(bbox: BoundingBox) -> Self {
		Self {
			bbox,
			query: String::new(),
			limit: 0,
			cursor: String::new(),
			trust_scores: None,
			weights: None,
		}
	}
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct EventSearchRequest {
	pub bbox: BoundingBox,
	#[serde(with = "time::serde::rfc3339")]
	pub from: OffsetDateTime,
	#[serde(with = "time::serde::rfc3339")]
	pub to: OffsetDateTime,
	#[serde(default)]
	pub query: String,
	#[serde(default)]
	pub limit: u32,
	#[serde(default)]
	pub cursor: String,
	/// Trust per owning scene id.
	#[serde(default)]
	pub trust_scores: Option<HashMap<String, f64>>,
	#[serde(default)]
	pub weights: Option<RankingWeights>,
}
impl EventSearchRequest {
	pub fn new(bbox: BoundingBox, from: OffsetDateTime, to: OffsetDateTime) -> Self {
		Self {
			bbox,
			from,
			to,
			query: String::new(),
			limit: 0,
			cursor: String::new(),
			trust_scores: None,
			weights: None,
		}
	}
}

/// One page of results. An empty `next_cursor` marks the last page.
#[derive(Clone, Debug, Serialize)]
pub struct SearchPage<T> {
	pub items: Vec<T>,
	pub next_cursor: String,
}

impl LocusService {
	pub fn search_scenes(&self, req: &SceneSearchRequest) -> Result<SearchPage<Scene>> {
		validate_bbox(&req.bbox)?;

		let cursor = decode_cursor(&req.cursor)?;
		let limit = self.page_limit(req.limit);
		let weights = match req.weights {
			Some(weights) => validate_weights(weights)?,
			None => RankingWeights::for_scenes(&self.cfg.ranking.scene),
		};
		let needle = normalize_query(&req.query);
		let reference = req.bbox.centroid();
		let trust = req.trust_scores.as_ref();
		let (page, candidates) = self.scenes.read(|snapshot| {
			let ranked = snapshot
				.iter()
				.filter(|scene| filter::scene_matches(scene, &req.bbox))
				.map(|scene| {
					let signals = Signals {
						recency: 0.0,
						text: text_match(
							&needle,
							&scene.name,
							&scene.description,
							&scene.tags,
							SCENE_TEXT_TIERS,
						),
						proximity: proximity_score(
							scene.location.precise_point.as_ref(),
							&reference,
						),
						trust: trust.map_or(0.0, |scores| trust_score(scores, &scene.id)),
					};

					(signals.composite(&weights, trust.is_some()), scene)
				})
				.collect::<Vec<_>>();
			let candidates = ranked.len();

			(paginate(ranked, cursor.as_ref(), limit), candidates)
		});
		let page = page?;

		tracing::debug!(
			candidates,
			returned = page.items.len(),
			has_more = !page.next_cursor.is_empty(),
			"Scene search completed."
		);

		Ok(page)
	}

	pub fn search_events(&self, req: &EventSearchRequest) -> Result<SearchPage<Event>> {
		validate_bbox(&req.bbox)?;
		validate_window(req.from, req.to)?;

		let cursor = decode_cursor(&req.cursor)?;
		let limit = self.page_limit(req.limit);
		let weights = match req.weights {
			Some(weights) => validate_weights(weights)?,
			None => RankingWeights::for_events(&self.cfg.ranking.event),
		};
		let needle = normalize_query(&req.query);
		let reference = req.bbox.centroid();
		let trust = req.trust_scores.as_ref();
		let now = self.now();
		let window = req.to - req.from;
		let (page, candidates) = self.events.read(|snapshot| {
			let ranked = snapshot
				.iter()
				.filter(|event| filter::event_matches(event, &req.bbox, req.from, req.to))
				.map(|event| {
					let signals = Signals {
						recency: recency_score(event.starts_at, now, window),
						text: text_match(
							&needle,
							&event.title,
							&event.description,
							&event.tags,
							EVENT_TEXT_TIERS,
						),
						proximity: proximity_score(
							event.location.precise_point.as_ref(),
							&reference,
						),
						trust: trust.map_or(0.0, |scores| trust_score(scores, &event.scene_id)),
					};

					(signals.composite(&weights, trust.is_some()), event)
				})
				.collect::<Vec<_>>();
			let candidates = ranked.len();

			(paginate(ranked, cursor.as_ref(), limit), candidates)
		});
		let page = page?;

		tracing::debug!(
			candidates,
			returned = page.items.len(),
			has_more = !page.next_cursor.is_empty(),
			"Event search completed."
		);

		Ok(page)
	}
}

/// Descending score, then ascending id.
pub(crate) fn rank_order(a_score: f64, a_id: &str, b_score: f64, b_id: &str) -> Ordering {
	b_score.total_cmp(&a_score).then_with(|| a_id.cmp(b_id))
}

pub(crate) fn validate_bbox(bbox: &BoundingBox) -> Result<()> {
	if !bbox.is_valid() {
		return Err(Error::InvalidRequest {
			message: "bbox must be finite with min <= max on both axes.".to_string(),
		});
	}

	Ok(())
}

pub(crate) fn validate_window(from: OffsetDateTime, to: OffsetDateTime) -> Result<()> {
	if from > to {
		return Err(Error::InvalidRequest { message: "from must not be after to.".to_string() });
	}

	Ok(())
}

/// Request overrides follow the same rule as configured weights: finite and within `0..=1`.
fn validate_weights(weights: RankingWeights) -> Result<RankingWeights> {
	let named = [
		("recency", weights.recency),
		("text", weights.text),
		("proximity", weights.proximity),
		("trust", weights.trust),
	];

	for (name, value) in named {
		if !value.is_finite() || !(0.0..=1.0).contains(&value) {
			return Err(Error::InvalidRequest {
				message: format!("weights.{name} must be a finite number between 0 and 1."),
			});
		}
	}

	Ok(weights)
}

fn decode_cursor(raw: &str) -> Result<Option<ScoreCursor>> {
	ScoreCursor::decode(raw).inspect_err(|err| {
		tracing::warn!(error = %err, "Rejected search cursor.");
	})
}

/// Sorts, skips past the cursor, and clones out one page.
///
/// Runs while the caller still holds the store's shared lock.
fn paginate<T>(
	mut ranked: Vec<(f64, &T)>,
	cursor: Option<&ScoreCursor>,
	limit: usize,
) -> Result<SearchPage<T>>
where
	T: Record,
{
	ranked.sort_by(|(a_score, a), (b_score, b)| rank_order(*a_score, a.id(), *b_score, b.id()));

	let start = cursor.map_or(0, |cursor| {
		ranked.partition_point(|(score, item)| {
			rank_order(*score, item.id(), cursor.score, &cursor.id) != Ordering::Greater
		})
	});
	let remaining = &ranked[start..];
	let page = &remaining[..remaining.len().min(limit)];
	let next_cursor = match page.last() {
		Some((score, last)) if remaining.len() > limit =>
			ScoreCursor::new(*score, last.id()).encode()?,
		_ => String::new(),
	};

	Ok(SearchPage { items: page.iter().map(|(_, item)| (*item).clone()).collect(), next_cursor })
}
