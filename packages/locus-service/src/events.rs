use locus_domain::{Event, EventStatus, RecordKey};
use locus_storage::UpsertOutcome;

use crate::{Error, LocusService, Result};

impl LocusService {
	pub fn insert_event(&self, event: &Event) -> Result<Event> {
		let now = self.now();
		let mut event = self.prepare_event(event)?;

		event.created_at = event.created_at.or(Some(now));
		event.updated_at = Some(now);

		crate::trace_consent(&event);

		let stored = self.events.insert(event)?;

		tracing::info!(
			event_id = %stored.id,
			scene_id = %stored.scene_id,
			status = stored.status.as_str(),
			"Event inserted."
		);

		Ok(stored)
	}

	pub fn update_event(&self, event: &Event) -> Result<Event> {
		let mut event = self.prepare_event(event)?;

		event.updated_at = Some(self.now());

		crate::trace_consent(&event);

		let stored = self.events.update(event)?;

		tracing::info!(event_id = %stored.id, status = stored.status.as_str(), "Event updated.");

		Ok(stored)
	}

	/// Idempotent write keyed by `(record_owner, record_key)`.
	pub fn upsert_event(&self, event: &Event) -> Result<UpsertOutcome> {
		let now = self.now();
		let mut event = self.prepare_event(event)?;

		event.created_at = event.created_at.or(Some(now));
		event.updated_at = Some(now);

		crate::trace_consent(&event);

		let outcome = self.events.upsert(event)?;

		tracing::info!(event_id = %outcome.id, inserted = outcome.inserted, "Event upserted.");

		Ok(outcome)
	}

	pub fn get_event(&self, id: &str) -> Result<Event> {
		Ok(self.events.get(id)?)
	}

	pub fn get_event_by_record_key(&self, owner: &str, key: &str) -> Result<Event> {
		let Some(record_key) = RecordKey::from_parts(Some(owner), Some(key)) else {
			return Err(Error::InvalidRequest {
				message: "record owner and record key are required.".to_string(),
			});
		};

		Ok(self.events.get_by_record_key(&record_key)?)
	}

	pub fn delete_event(&self, id: &str) -> Result<()> {
		self.events.soft_delete(id, self.now())?;

		tracing::info!(event_id = %id, "Event deleted.");

		Ok(())
	}

	/// Live events belonging to a scene.
	pub fn list_events_by_scene(&self, scene_id: &str) -> Vec<Event> {
		self.events.list_by_owner(scene_id)
	}

	/// Marks an event cancelled. Cancelling twice keeps the first cancellation.
	pub fn cancel_event(&self, id: &str, reason: Option<&str>) -> Result<Event> {
		let now = self.now();
		let cancelled = self.events.modify(id, |event| {
			if event.status == EventStatus::Cancelled {
				return;
			}

			event.status = EventStatus::Cancelled;
			event.cancelled_at = Some(now);
			event.cancellation_reason = reason.map(str::to_string);
			event.updated_at = Some(now);
		})?;

		tracing::info!(event_id = %id, status = cancelled.status.as_str(), "Event cancelled.");

		Ok(cancelled)
	}

	fn prepare_event(&self, event: &Event) -> Result<Event> {
		let mut event = event.clone();

		if event.title.trim().is_empty() {
			return Err(Error::InvalidRequest { message: "Event title is required.".to_string() });
		}
		if event.scene_id.trim().is_empty() {
			return Err(Error::InvalidRequest {
				message: "Event scene_id is required.".to_string(),
			});
		}
		if let Some(ends_at) = event.ends_at
			&& ends_at < event.starts_at
		{
			return Err(Error::InvalidRequest {
				message: "Event ends_at must not precede starts_at.".to_string(),
			});
		}

		self.prepare_location(&mut event.location)?;

		Ok(event)
	}
}
