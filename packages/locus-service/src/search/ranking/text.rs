/// Scores for the three text-match tiers. The name or title tier always scores 1.0.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TextTiers {
	pub description: f64,
	pub tag: f64,
}

pub const EVENT_TEXT_TIERS: TextTiers = TextTiers { description: 0.8, tag: 0.6 };
pub const SCENE_TEXT_TIERS: TextTiers = TextTiers { description: 0.7, tag: 0.5 };

/// Case-insensitive substring match; the first matching tier wins.
///
/// `needle` must already be lowercased. An empty needle matches everything at 1.0.
pub fn text_match(
	needle: &str,
	title: &str,
	description: &str,
	tags: &[String],
	tiers: TextTiers,
) -> f64 {
	if needle.is_empty() {
		return 1.0;
	}
	if contains_folded(title, needle) {
		return 1.0;
	}
	if contains_folded(description, needle) {
		return tiers.description;
	}
	if tags.iter().any(|tag| contains_folded(tag, needle)) {
		return tiers.tag;
	}

	0.0
}

/// Lowercases and trims a raw query once per search.
pub fn normalize_query(query: &str) -> String {
	query.trim().to_lowercase()
}

fn contains_folded(haystack: &str, needle: &str) -> bool {
	haystack.to_lowercase().contains(needle)
}
