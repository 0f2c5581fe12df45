use locus_domain::{RecordKey, Scene};
use locus_storage::UpsertOutcome;

use crate::{Error, LocusService, Result};

impl LocusService {
	pub fn insert_scene(&self, scene: &Scene) -> Result<Scene> {
		let now = self.now();
		let mut scene = self.prepare_scene(scene)?;

		scene.created_at = scene.created_at.or(Some(now));
		scene.updated_at = Some(now);

		crate::trace_consent(&scene);

		let stored = self.scenes.insert(scene)?;

		tracing::info!(
			scene_id = %stored.id,
			visibility = stored.visibility.as_str(),
			"Scene inserted."
		);

		Ok(stored)
	}

	pub fn update_scene(&self, scene: &Scene) -> Result<Scene> {
		let mut scene = self.prepare_scene(scene)?;

		scene.updated_at = Some(self.now());

		crate::trace_consent(&scene);

		let stored = self.scenes.update(scene)?;

		tracing::info!(
			scene_id = %stored.id,
			visibility = stored.visibility.as_str(),
			"Scene updated."
		);

		Ok(stored)
	}

	/// Idempotent write keyed by `(record_owner, record_key)`.
	pub fn upsert_scene(&self, scene: &Scene) -> Result<UpsertOutcome> {
		let now = self.now();
		let mut scene = self.prepare_scene(scene)?;

		scene.created_at = scene.created_at.or(Some(now));
		scene.updated_at = Some(now);

		crate::trace_consent(&scene);

		let outcome = self.scenes.upsert(scene)?;

		tracing::info!(scene_id = %outcome.id, inserted = outcome.inserted, "Scene upserted.");

		Ok(outcome)
	}

	pub fn get_scene(&self, id: &str) -> Result<Scene> {
		Ok(self.scenes.get(id)?)
	}

	pub fn get_scene_by_record_key(&self, owner: &str, key: &str) -> Result<Scene> {
		let Some(record_key) = RecordKey::from_parts(Some(owner), Some(key)) else {
			return Err(Error::InvalidRequest {
				message: "record owner and record key are required.".to_string(),
			});
		};

		Ok(self.scenes.get_by_record_key(&record_key)?)
	}

	/// Soft delete. The scene stays stored but disappears from lookups and search.
	pub fn delete_scene(&self, id: &str) -> Result<()> {
		self.scenes.soft_delete(id, self.now())?;

		tracing::info!(scene_id = %id, "Scene deleted.");

		Ok(())
	}

	pub fn list_scenes_by_owner(&self, owner_identity: &str) -> Vec<Scene> {
		self.scenes.list_by_owner(owner_identity)
	}

	/// Fails when the owner already has a live scene with this name, ignoring case.
	///
	/// Inserts do not call this; callers that want unique names check first.
	pub fn ensure_scene_name_available(&self, owner_identity: &str, name: &str) -> Result<()> {
		let wanted = name.trim().to_lowercase();
		let taken = self
			.scenes
			.list_by_owner(owner_identity)
			.iter()
			.any(|scene| scene.name.trim().to_lowercase() == wanted);

		if taken {
			return Err(Error::DuplicateName {
				message: format!("Scene name {name:?} is already used by this owner."),
			});
		}

		Ok(())
	}

	fn prepare_scene(&self, scene: &Scene) -> Result<Scene> {
		let mut scene = scene.clone();

		if scene.name.trim().is_empty() {
			return Err(Error::InvalidRequest { message: "Scene name is required.".to_string() });
		}
		if scene.owner_identity.trim().is_empty() {
			return Err(Error::InvalidRequest {
				message: "Scene owner_identity is required.".to_string(),
			});
		}

		self.prepare_location(&mut scene.location)?;

		Ok(scene)
	}
}
