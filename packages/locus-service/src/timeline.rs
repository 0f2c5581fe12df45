use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::{
	LocusService, Result,
	cursor::{TimeCursor, truncate_to_second},
	search::{self, SearchPage},
};
use locus_domain::{BoundingBox, Event};

/// Time-ordered event listing for a map viewport, without text ranking.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct TimelineRequest {
	pub bbox: BoundingBox,
	#[serde(with = "time::serde::rfc3339")]
	pub from: OffsetDateTime,
	#[serde(with = "time::serde::rfc3339")]
	pub to: OffsetDateTime,
	#[serde(default)]
	pub limit: u32,
	#[serde(default)]
	pub cursor: String,
}
impl TimelineRequest {
	pub fn new(bbox: BoundingBox, from: OffsetDateTime, to: OffsetDateTime) -> Self {
		Self { bbox, from, to, limit: 0, cursor: String::new() }
	}
}

impl LocusService {
	/// Events ordered by `(starts_at, id)`, both compared at whole-second precision.
	pub fn timeline_events(&self, req: &TimelineRequest) -> Result<SearchPage<Event>> {
		search::validate_bbox(&req.bbox)?;
		search::validate_window(req.from, req.to)?;

		let cursor = TimeCursor::decode(&req.cursor).inspect_err(|err| {
			tracing::warn!(error = %err, "Rejected timeline cursor.");
		})?;
		let limit = self.page_limit(req.limit);
		let page = self.events.read(|snapshot| -> Result<SearchPage<Event>> {
			let mut matched = snapshot
				.iter()
				.filter(|event| search::filter::event_matches(event, &req.bbox, req.from, req.to))
				.collect::<Vec<_>>();

			matched.sort_by(|a, b| timeline_order(a, b.starts_at, &b.id));

			let start = cursor.as_ref().map_or(0, |cursor| {
				matched.partition_point(|event| {
					timeline_order(event, cursor.starts_at, &cursor.id) != Ordering::Greater
				})
			});
			let remaining = &matched[start..];
			let page = &remaining[..remaining.len().min(limit)];
			let next_cursor = match page.last() {
				Some(last) if remaining.len() > limit =>
					TimeCursor::new(last.starts_at, last.id.as_str()).encode()?,
				_ => String::new(),
			};

			Ok(SearchPage {
				items: page.iter().map(|event| (*event).clone()).collect(),
				next_cursor,
			})
		})?;

		tracing::debug!(
			returned = page.items.len(),
			has_more = !page.next_cursor.is_empty(),
			"Timeline page built."
		);

		Ok(page)
	}
}

fn timeline_order(event: &Event, starts_at: OffsetDateTime, id: &str) -> Ordering {
	truncate_to_second(event.starts_at)
		.cmp(&truncate_to_second(starts_at))
		.then_with(|| event.id.as_str().cmp(id))
}
