use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::{
	consent::{Located, Location},
	record::{Record, RecordKey},
};

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Visibility {
	#[default]
	Public,
	MembersOnly,
	Hidden,
}
impl Visibility {
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Public => "public",
			Self::MembersOnly => "members_only",
			Self::Hidden => "hidden",
		}
	}

	/// Only public scenes appear in discovery search.
	pub fn is_searchable(self) -> bool {
		matches!(self, Self::Public)
	}
}

/// A persistent community.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct Scene {
	pub id: String,
	pub name: String,
	pub description: String,
	pub owner_identity: String,
	#[serde(flatten)]
	pub location: Location,
	#[serde(default)]
	pub tags: Vec<String>,
	#[serde(default)]
	pub visibility: Visibility,
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

impl Located for Scene {
	fn location(&self) -> &Location {
		&self.location
	}

	fn location_mut(&mut self) -> &mut Location {
		&mut self.location
	}
}

impl Record for Scene {
	const KIND: &'static str = "scene";

	fn id(&self) -> &str {
		&self.id
	}

	fn set_id(&mut self, id: String) {
		self.id = id;
	}

	fn owner(&self) -> &str {
		&self.owner_identity
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
