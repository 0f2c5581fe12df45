use time::Duration;

use locus_domain::Point;
use locus_service::{Error, SceneSearchRequest};
use locus_testkit::{BASE_TIME, LONDON, NEW_YORK};

#[test]
fn insert_without_consent_never_stores_point() {
	let (service, _) = super::service();
	let mut scene = locus_testkit::scene("scene-1", "Quiet Readers", NEW_YORK);

	scene.location.allow_precise = false;

	let stored = service.insert_scene(&scene).expect("Insert failed.");
	let fetched = service.get_scene("scene-1").expect("Lookup failed.");

	assert_eq!(stored.location.precise_point, None);
	assert_eq!(fetched.location.precise_point, None);
	assert_eq!(fetched.location.coarse_geohash, "dr5reg");
	// The caller's copy is untouched.
	assert_eq!(scene.location.precise_point, Some(NEW_YORK));
}

#[test]
fn consented_point_is_kept() {
	let (service, _) = super::service();
	let scene = locus_testkit::scene("scene-1", "Open Mic", LONDON);

	service.insert_scene(&scene).expect("Insert failed.");

	let fetched = service.get_scene("scene-1").expect("Lookup failed.");

	assert_eq!(fetched.location.precise_point, Some(LONDON));
	assert_eq!(fetched.location.coarse_geohash, "gcpvj0");
}

#[test]
fn update_revoking_consent_drops_point() {
	let (service, _) = super::service();
	let mut scene = locus_testkit::scene("scene-1", "Open Mic", LONDON);

	service.insert_scene(&scene).expect("Insert failed.");

	scene.location.allow_precise = false;

	service.update_scene(&scene).expect("Update failed.");

	assert_eq!(service.get_scene("scene-1").expect("Lookup failed.").location.precise_point, None);
}

#[test]
fn upsert_without_consent_never_stores_point() {
	let (service, _) = super::service();
	let mut event = locus_testkit::event("", "scene-1", "Night run", NEW_YORK, BASE_TIME);

	event.location.allow_precise = false;
	event.record_owner = Some("feed".to_string());
	event.record_key = Some("run-42".to_string());

	let first = service.upsert_event(&event).expect("First upsert failed.");

	event.title = "Night run (moved)".to_string();

	let second = service.upsert_event(&event).expect("Second upsert failed.");
	let stored = service.get_event_by_record_key("feed", "run-42").expect("Lookup failed.");

	assert!(first.inserted);
	assert!(!second.inserted);
	assert_eq!(first.id, second.id);
	assert_eq!(stored.title, "Night run (moved)");
	assert_eq!(stored.location.precise_point, None);
	assert_eq!(event.location.precise_point, Some(NEW_YORK));
}

#[test]
fn upsert_revoking_consent_erases_stored_point() {
	let (service, _) = super::service();
	let mut scene = locus_testkit::scene("", "Open Mic", LONDON);

	scene.record_owner = Some("feed".to_string());
	scene.record_key = Some("mic-7".to_string());

	let first = service.upsert_scene(&scene).expect("First upsert failed.");
	let consented = service.get_scene_by_record_key("feed", "mic-7").expect("Lookup failed.");

	assert!(first.inserted);
	assert_eq!(consented.location.precise_point, Some(LONDON));

	// Stale coordinates ride along with the revocation.
	scene.location.allow_precise = false;
	scene.location.precise_point = Some(Point::new(LONDON.lat + 0.01, LONDON.lng));

	let second = service.upsert_scene(&scene).expect("Second upsert failed.");
	let revoked = service.get_scene_by_record_key("feed", "mic-7").expect("Lookup failed.");

	assert!(!second.inserted);
	assert_eq!(second.id, first.id);
	assert_eq!(revoked.location.precise_point, None);
	assert!(!revoked.location.allow_precise);
	assert!(!revoked.location.coarse_geohash.is_empty());
}

#[test]
fn cancellation_keeps_point_stripped() {
	let (service, clock) = super::service();
	let mut event = locus_testkit::event("event-1", "scene-1", "Night run", NEW_YORK, BASE_TIME);

	event.location.allow_precise = false;

	service.insert_event(&event).expect("Insert failed.");
	clock.advance(Duration::minutes(5));

	let cancelled = service.cancel_event("event-1", Some("Rain")).expect("Cancel failed.");

	assert_eq!(cancelled.location.precise_point, None);
}

#[test]
fn returned_copies_do_not_alias_store() {
	let (service, _) = super::service();

	service
		.insert_scene(&locus_testkit::scene("scene-1", "Open Mic", LONDON))
		.expect("Insert failed.");

	let mut fetched = service.get_scene("scene-1").expect("Lookup failed.");

	fetched.location.precise_point = Some(Point::new(0.0, 0.0));
	fetched.tags.push("mutated".to_string());

	let again = service.get_scene("scene-1").expect("Lookup failed.");

	assert_eq!(again.location.precise_point, Some(LONDON));
	assert!(again.tags.is_empty());
}

#[test]
fn coarse_geohash_is_truncated_to_configured_precision() {
	let (service, _) = super::service();
	let mut scene = locus_testkit::scene("scene-1", "Open Mic", LONDON);

	scene.location.coarse_geohash = "gcpvj0duq5".to_string();

	let stored = service.insert_scene(&scene).expect("Insert failed.");

	assert_eq!(stored.location.coarse_geohash, "gcpvj0");
}

#[test]
fn location_requires_point_or_geohash() {
	let (service, _) = super::service();
	let mut scene = locus_testkit::scene("scene-1", "Open Mic", LONDON);

	scene.location.precise_point = None;

	assert!(matches!(service.insert_scene(&scene), Err(Error::InvalidRequest { .. })));

	scene.location.precise_point = Some(Point::new(95.0, 10.0));

	assert!(matches!(service.insert_scene(&scene), Err(Error::InvalidRequest { .. })));
}

#[test]
fn pointless_scenes_are_left_out_of_bbox_search() {
	let (service, _) = super::service();
	let mut hidden_point = locus_testkit::scene("scene-1", "Quiet Readers", NEW_YORK);

	hidden_point.location.allow_precise = false;

	service.insert_scene(&hidden_point).expect("Insert failed.");
	service
		.insert_scene(&locus_testkit::scene("scene-2", "Loud Readers", NEW_YORK))
		.expect("Insert failed.");

	let page = service
		.search_scenes(&SceneSearchRequest::new(locus_testkit::nyc_bbox()))
		.expect("Search failed.");

	assert_eq!(super::ids(&page, |scene| scene.id.as_str()), vec!["scene-2".to_string()]);
	assert!(page.items.iter().all(|scene| scene.location.allow_precise));
}
