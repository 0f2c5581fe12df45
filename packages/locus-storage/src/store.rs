//! In-memory entity store shared by every entity kind.
//!
//! One readers-writer lock guards both the id map and the record-key index. Writes hold the
//! exclusive lock for their whole critical section, consent enforcement included, so a reader
//! never sees a half-applied write. Every value handed out is an owned clone.

use std::collections::{HashMap, hash_map::Values};

use parking_lot::RwLock;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::{Error, Result};
use locus_domain::{Record, RecordKey, enforce_location_consent};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UpsertOutcome {
	pub inserted: bool,
	pub id: String,
}

/// Read-only view of every stored record, valid while the shared lock is held.
pub struct Snapshot<'a, T> {
	records: &'a HashMap<String, T>,
}
impl<'a, T> Snapshot<'a, T> {
	/// Includes soft-deleted records; callers filter.
	pub fn iter(&self) -> Values<'a, String, T> {
		self.records.values()
	}

	pub fn len(&self) -> usize {
		self.records.len()
	}

	pub fn is_empty(&self) -> bool {
		self.records.is_empty()
	}
}

pub struct Store<T> {
	tables: RwLock<Tables<T>>,
}
impl<T> Store<T>
where
	T: Record,
{
	pub fn new() -> Self {
		let tables = Tables { records: HashMap::new(), by_record_key: HashMap::new() };

		Self { tables: RwLock::new(tables) }
	}

	/// Stores a new record. An empty id is replaced with a fresh UUID.
	pub fn insert(&self, entity: T) -> Result<T> {
		let mut tables = self.tables.write();
		let mut entity = enforce_location_consent(entity);

		if entity.id().is_empty() {
			entity.set_id(Uuid::new_v4().to_string());
		}
		if tables.records.contains_key(entity.id()) {
			return Err(Error::Conflict(format!("{} {} already exists.", T::KIND, entity.id())));
		}

		tables.ensure_key_free(&entity)?;
		tables.put(entity.clone());

		Ok(entity)
	}

	/// Overwrites a live record by id, keeping its original creation time.
	pub fn update(&self, entity: T) -> Result<T> {
		let mut tables = self.tables.write();
		let mut entity = enforce_location_consent(entity);
		let existing = tables.live(entity.id())?;

		entity.set_created_at(existing.created_at());

		tables.ensure_key_free(&entity)?;
		tables.put(entity.clone());

		Ok(entity)
	}

	/// Inserts or updates by record key.
	///
	/// A record without a complete key always lands as a fresh insert under a new id. A key that
	/// is already bound updates that record in place, keeping its id and creation time.
	pub fn upsert(&self, entity: T) -> Result<UpsertOutcome> {
		let mut tables = self.tables.write();
		let mut entity = enforce_location_consent(entity);
		let Some(key) = entity.record_key() else {
			entity.set_id(tables.fresh_id());

			let id = entity.id().to_string();

			tables.put(entity);

			return Ok(UpsertOutcome { inserted: true, id });
		};

		if let Some(existing_id) = tables.by_record_key.get(&key).cloned() {
			let created_at =
				tables.records.get(&existing_id).and_then(|existing| existing.created_at());

			entity.set_id(existing_id.clone());
			entity.set_created_at(created_at);
			tables.put(entity);

			return Ok(UpsertOutcome { inserted: false, id: existing_id });
		}
		if entity.id().is_empty() {
			entity.set_id(tables.fresh_id());
		} else if tables.records.contains_key(entity.id()) {
			return Err(Error::Conflict(format!("{} {} already exists.", T::KIND, entity.id())));
		}

		let id = entity.id().to_string();

		tables.put(entity);

		Ok(UpsertOutcome { inserted: true, id })
	}

	/// Applies `f` to a clone of a live record and writes the result back.
	pub fn modify<F>(&self, id: &str, f: F) -> Result<T>
	where
		F: FnOnce(&mut T),
	{
		let mut tables = self.tables.write();
		let mut entity = tables.live(id)?.clone();

		f(&mut entity);

		let mut entity = enforce_location_consent(entity);

		entity.set_id(id.to_string());

		tables.ensure_key_free(&entity)?;
		tables.put(entity.clone());

		Ok(entity)
	}

	pub fn get(&self, id: &str) -> Result<T> {
		self.tables.read().live(id).cloned()
	}

	pub fn get_by_record_key(&self, key: &RecordKey) -> Result<T> {
		let tables = self.tables.read();
		let Some(id) = tables.by_record_key.get(key) else {
			return Err(Error::NotFound(format!(
				"{} with record key {}/{}.",
				T::KIND,
				key.owner,
				key.key
			)));
		};

		tables.live(id).cloned()
	}

	/// Marks a live record deleted. The record and its key binding stay in place.
	pub fn soft_delete(&self, id: &str, ts: OffsetDateTime) -> Result<()> {
		let mut tables = self.tables.write();

		tables.live(id)?;

		if let Some(entity) = tables.records.get_mut(id) {
			entity.set_deleted_at(Some(ts));
			entity.set_updated_at(ts);
		}

		Ok(())
	}

	pub fn list_by_owner(&self, owner: &str) -> Vec<T> {
		self.tables
			.read()
			.records
			.values()
			.filter(|entity| !entity.is_deleted() && entity.owner() == owner)
			.cloned()
			.collect()
	}

	/// Runs `f` against a consistent view of the store under the shared lock.
	pub fn read<F, R>(&self, f: F) -> R
	where
		F: FnOnce(Snapshot<'_, T>) -> R,
	{
		let tables = self.tables.read();

		f(Snapshot { records: &tables.records })
	}

	pub fn len(&self) -> usize {
		self.tables.read().records.len()
	}

	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}
}

impl<T> Default for Store<T>
where
	T: Record,
{
	fn default() -> Self {
		Self::new()
	}
}

struct Tables<T> {
	records: HashMap<String, T>,
	by_record_key: HashMap<RecordKey, String>,
}
impl<T> Tables<T>
where
	T: Record,
{
	fn live(&self, id: &str) -> Result<&T> {
		match self.records.get(id) {
			None => Err(Error::NotFound(format!("{} {id}.", T::KIND))),
			Some(entity) if entity.is_deleted() =>
				Err(Error::Deleted(format!("{} {id}.", T::KIND))),
			Some(entity) => Ok(entity),
		}
	}

	fn fresh_id(&self) -> String {
		loop {
			let id = Uuid::new_v4().to_string();

			if !self.records.contains_key(&id) {
				return id;
			}
		}
	}

	fn ensure_key_free(&self, entity: &T) -> Result<()> {
		let Some(key) = entity.record_key() else { return Ok(()) };

		match self.by_record_key.get(&key) {
			Some(bound) if bound != entity.id() => Err(Error::Conflict(format!(
				"Record key {}/{} is bound to {} {bound}.",
				key.owner,
				key.key,
				T::KIND
			))),
			_ => Ok(()),
		}
	}

	fn put(&mut self, entity: T) {
		let id = entity.id().to_string();
		let key = entity.record_key();

		if let Some(previous_key) = self.records.get(&id).and_then(Record::record_key)
			&& Some(&previous_key) != key.as_ref()
		{
			self.by_record_key.remove(&previous_key);
		}
		if let Some(key) = key {
			self.by_record_key.insert(key, id.clone());
		}

		self.records.insert(id, entity);
	}
}
