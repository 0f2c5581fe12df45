mod policy;
mod signals;
mod text;

pub use policy::{RankingWeights, Signals};
pub use signals::{NEUTRAL_PROXIMITY, proximity_score, recency_score, trust_score};
pub use text::{EVENT_TEXT_TIERS, SCENE_TEXT_TIERS, TextTiers, normalize_query, text_match};
