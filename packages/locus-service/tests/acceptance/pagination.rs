use std::collections::HashSet;

use proptest::prelude::*;

use locus_domain::Point;
use locus_service::{Error, LocusService, SceneSearchRequest, ScoreCursor};
use locus_testkit::NEW_YORK;

const GRID: usize = 24;

fn seed(service: &LocusService, offsets: &[(u8, u8)], order: &[usize]) {
	for &index in order {
		let (dy, dx) = offsets[index];
		let point =
			Point::new(NEW_YORK.lat + f64::from(dy) * 0.01, NEW_YORK.lng + f64::from(dx) * 0.01);
		let scene = locus_testkit::scene(&format!("scene-{index:03}"), "Harbor Runners", point);

		service.insert_scene(&scene).expect("Insert failed.");
	}
}

fn request(limit: u32) -> SceneSearchRequest {
	let mut req = SceneSearchRequest::new(locus_testkit::nyc_bbox());

	req.limit = limit;

	req
}

proptest! {
	#![proptest_config(ProptestConfig::with_cases(48))]

	#[test]
	fn pages_return_every_scene_exactly_once(
		offsets in prop::collection::vec((0_u8..3, 0_u8..3), 0..40),
		limit in 1_u32..8,
	) {
		let (service, _) = super::service();
		let order = (0..offsets.len()).collect::<Vec<_>>();

		seed(&service, &offsets, &order);

		let pages = super::drain_scenes(&service, request(limit));
		let all = pages.iter().flatten().cloned().collect::<Vec<_>>();
		let distinct = all.iter().collect::<HashSet<_>>();

		prop_assert_eq!(all.len(), offsets.len());
		prop_assert_eq!(distinct.len(), offsets.len());

		for page in &pages[..pages.len() - 1] {
			prop_assert_eq!(page.len(), limit as usize);
		}
	}

	#[test]
	fn insertion_order_does_not_change_pages(
		offsets in prop::collection::vec((0_u8..3, 0_u8..3), GRID),
		order in Just((0..GRID).collect::<Vec<_>>()).prop_shuffle(),
		limit in 1_u32..6,
	) {
		let (sorted, _) = super::service();
		let (shuffled, _) = super::service();

		seed(&sorted, &offsets, &(0..GRID).collect::<Vec<_>>());
		seed(&shuffled, &offsets, &order);

		prop_assert_eq!(
			super::drain_scenes(&sorted, request(limit)),
			super::drain_scenes(&shuffled, request(limit))
		);
	}

	#[test]
	fn score_cursor_round_trips_exactly(score in 0.0_f64..=1.0, id in "\\PC{0,24}") {
		let encoded = ScoreCursor::new(score, id.clone()).encode().expect("Cursor should encode.");
		let decoded = ScoreCursor::decode(&encoded)
			.expect("Cursor should decode.")
			.expect("Cursor should be present.");

		prop_assert_eq!(decoded.score.to_bits(), score.to_bits());
		prop_assert_eq!(decoded.id, id);
	}
}

#[test]
fn empty_corpus_is_a_valid_final_page() {
	let (service, _) = super::service();
	let page = service.search_scenes(&request(5)).expect("Search failed.");

	assert!(page.items.is_empty());
	assert!(page.next_cursor.is_empty());
}

#[test]
fn exact_multiple_of_limit_ends_without_extra_page() {
	let (service, _) = super::service();

	seed(&service, &[(0, 0), (0, 1), (1, 0), (1, 1)], &[0, 1, 2, 3]);

	let pages = super::drain_scenes(&service, request(2));

	assert_eq!(pages.len(), 2);
	assert!(pages.iter().all(|page| page.len() == 2));
}

#[test]
fn zero_limit_uses_configured_default() {
	let mut cfg = locus_testkit::test_config();

	cfg.search.default_limit = 3;
	cfg.search.max_limit = 5;

	let (service, _) = super::service_with(cfg);
	let offsets = vec![(0_u8, 0_u8); 8];

	seed(&service, &offsets, &(0..8).collect::<Vec<_>>());

	let default_page = service.search_scenes(&request(0)).expect("Search failed.");
	let clamped_page = service.search_scenes(&request(50)).expect("Search failed.");

	assert_eq!(default_page.items.len(), 3);
	assert_eq!(clamped_page.items.len(), 5);
	assert!(!clamped_page.next_cursor.is_empty());
}

#[test]
fn malformed_cursor_aborts_search() {
	let (service, _) = super::service();

	seed(&service, &[(0, 0)], &[0]);

	let mut req = request(5);

	req.cursor = "%%%not-a-cursor".to_string();

	assert!(matches!(service.search_scenes(&req), Err(Error::InvalidCursor { .. })));
}

#[test]
fn cursor_survives_concurrent_insert_of_higher_ranked_scene() {
	let (service, _) = super::service();

	seed(&service, &[(2, 2), (2, 2), (2, 2), (2, 2)], &[0, 1, 2, 3]);

	let first = service.search_scenes(&request(2)).expect("Search failed.");

	// Lands exactly on the centroid, so it outranks everything already paged.
	service
		.insert_scene(&locus_testkit::scene(
			"scene-new",
			"Harbor Runners",
			locus_testkit::nyc_bbox().centroid(),
		))
		.expect("Insert failed.");

	let mut req = request(2);

	req.cursor = first.next_cursor.clone();

	let second = service.search_scenes(&req).expect("Search failed.");

	assert_eq!(super::ids(&first, |scene| scene.id.as_str()), vec!["scene-000", "scene-001"]);
	assert_eq!(super::ids(&second, |scene| scene.id.as_str()), vec!["scene-002", "scene-003"]);
	assert!(second.next_cursor.is_empty());
}
