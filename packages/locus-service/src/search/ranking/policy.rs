use serde::{Deserialize, Serialize};

use locus_config::{EventWeights, SceneWeights};

/// Weight vector applied to the per-signal scores.
///
/// The composite is not renormalized, so weights need not sum to 1.0.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Serialize)]
pub struct RankingWeights {
	#[serde(default)]
	pub recency: f64,
	pub text: f64,
	pub proximity: f64,
	#[serde(default)]
	pub trust: f64,
}
impl RankingWeights {
	pub fn for_events(cfg: &EventWeights) -> Self {
		Self { recency: cfg.recency, text: cfg.text, proximity: cfg.proximity, trust: cfg.trust }
	}

	/// Scenes have no recency signal.
	pub fn for_scenes(cfg: &SceneWeights) -> Self {
		Self { recency: 0.0, text: cfg.text, proximity: cfg.proximity, trust: cfg.trust }
	}
}

/// Per-signal scores for one candidate, each in `[0, 1]`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Signals {
	pub recency: f64,
	pub text: f64,
	pub proximity: f64,
	pub trust: f64,
}
impl Signals {
	pub fn composite(&self, weights: &RankingWeights, include_trust: bool) -> f64 {
		let mut score = self.recency * weights.recency
			+ self.text * weights.text
			+ self.proximity * weights.proximity;

		if include_trust {
			score += self.trust * weights.trust;
		}

		score
	}
}
