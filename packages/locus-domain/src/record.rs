use time::OffsetDateTime;

use crate::consent::Located;

/// Idempotency key for records ingested from an upstream event log.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct RecordKey {
	pub owner: String,
	pub key: String,
}
impl RecordKey {
	/// Both halves must be present and non-empty to form a key.
	pub fn from_parts(owner: Option<&str>, key: Option<&str>) -> Option<Self> {
		match (owner, key) {
			(Some(owner), Some(key)) if !owner.is_empty() && !key.is_empty() =>
				Some(Self { owner: owner.to_string(), key: key.to_string() }),
			_ => None,
		}
	}
}

/// What a store needs to know about an entity kind.
pub trait Record
where
	Self: Clone + Located + Send + Sync,
{
	/// Lowercase label used in messages and logs.
	const KIND: &'static str;

	fn id(&self) -> &str;

	fn set_id(&mut self, id: String);

	/// Owner used by list-by-owner: the owner identity for scenes, the scene for events.
	fn owner(&self) -> &str;

	fn record_key(&self) -> Option<RecordKey>;

	fn created_at(&self) -> Option<OffsetDateTime>;

	fn set_created_at(&mut self, ts: Option<OffsetDateTime>);

	fn set_updated_at(&mut self, ts: OffsetDateTime);

	fn deleted_at(&self) -> Option<OffsetDateTime>;

	fn set_deleted_at(&mut self, ts: Option<OffsetDateTime>);

	fn is_deleted(&self) -> bool {
		self.deleted_at().is_some()
	}
}
