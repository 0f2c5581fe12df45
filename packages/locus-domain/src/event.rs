use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::{
	consent::{Located, Location},
	record::{Record, RecordKey},
};

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EventStatus {
	#[default]
	Scheduled,
	Live,
	Ended,
	Cancelled,
}
impl EventStatus {
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Scheduled => "scheduled",
			Self::Live => "live",
			Self::Ended => "ended",
			Self::Cancelled => "cancelled",
		}
	}
}

/// A scheduled happening scoped to a scene.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct Event {
	pub id: String,
	pub scene_id: String,
	pub title: String,
	pub description: String,
	#[serde(flatten)]
	pub location: Location,
	#[serde(default)]
	pub tags: Vec<String>,
	#[serde(default)]
	pub status: EventStatus,
	#[serde(with = "time::serde::rfc3339")]
	pub starts_at: OffsetDateTime,
	#[serde(default, with = "time::serde::rfc3339::option")]
	pub ends_at: Option<OffsetDateTime>,
	#[serde(default, with = "time::serde::rfc3339::option")]
	pub cancelled_at: Option<OffsetDateTime>,
	#[serde(default)]
	pub cancellation_reason: Option<String>,
	#[serde(default)]
	pub record_owner: Option<String>,
	#[serde(default)]
	pub record_key: Option<String>,
	#[serde(default, with = "time::serde::rfc3339::option")]
	pub created_at: Option<OffsetDateTime>,
	#[serde(default, with = "time::serde::rfc3339::option")]
	pub updated_at: Option<OffsetDateTime>,
	#[serde(default, with = "time::serde::rfc3339::option")]
	pub deleted_at: Option<OffsetDateTime>,
}

impl Located for Event {
	fn location(&self) -> &Location {
		&self.location
	}

	fn location_mut(&mut self) -> &mut Location {
		&mut self.location
	}
}

impl Record for Event {
	const KIND: &'static str = "event";

	fn id(&self) -> &str {
		&self.id
	}

	fn set_id(&mut self, id: String) {
		self.id = id;
	}

	fn owner(&self) -> &str {
		&self.scene_id
	}

	fn record_key(&self) -> Option<RecordKey> {
		RecordKey::from_parts(self.record_owner.as_deref(), self.record_key.as_deref())
	}

	fn created_at(&self) -> Option<OffsetDateTime> {
		self.created_at
	}

	fn set_created_at(&mut self, ts: Option<OffsetDateTime>) {
		self.created_at = ts;
	}

	fn set_updated_at(&mut self, ts: OffsetDateTime) {
		self.updated_at = Some(ts);
	}

	fn deleted_at(&self) -> Option<OffsetDateTime> {
		self.deleted_at
	}

	fn set_deleted_at(&mut self, ts: Option<OffsetDateTime>) {
		self.deleted_at = ts;
	}
}
