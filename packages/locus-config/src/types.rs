use serde::Deserialize;

#[derive(Clone, Debug, Default, Deserialize)]
pub struct Config {
	#[serde(default)]
	pub service: Service,
	#[serde(default)]
	pub search: Search,
	#[serde(default)]
	pub geo: Geo,
	#[serde(default)]
	pub ranking: Ranking,
}

#[derive(Clone, Debug, Deserialize)]
pub struct Service {
	#[serde(default = "default_log_level")]
	pub log_level: String,
}
impl Default for Service {
	fn default() -> Self {
		Self { log_level: default_log_level() }
	}
}

#[derive(Clone, Debug, Deserialize)]
pub struct Search {
	/// Page size used when a request asks for zero results.
	#[serde(default = "default_limit")]
	pub default_limit: u32,
	/// Upper bound on a single page; larger requests are clamped.
	#[serde(default = "default_max_limit")]
	pub max_limit: u32,
}
impl Default for Search {
	fn default() -> Self {
		Self { default_limit: default_limit(), max_limit: default_max_limit() }
	}
}

#[derive(Clone, Debug, Deserialize)]
pub struct Geo {
	/// Geohash length kept as `coarse_geohash`. Six characters is roughly +/-0.6 km.
	#[serde(default = "default_coarse_precision")]
	pub coarse_precision: usize,
}
impl Default for Geo {
	fn default() -> Self {
		Self { coarse_precision: default_coarse_precision() }
	}
}

#[derive(Clone, Debug, Deserialize)]
pub struct Ranking {
	#[serde(default = "default_event_weights")]
	pub event: EventWeights,
	#[serde(default = "default_scene_weights")]
	pub scene: SceneWeights,
}
impl Default for Ranking {
	fn default() -> Self {
		Self { event: default_event_weights(), scene: default_scene_weights() }
	}
}

#[derive(Clone, Debug, Deserialize)]
pub struct EventWeights {
	pub recency: f64,
	pub text: f64,
	pub proximity: f64,
	pub trust: f64,
}
impl Default for EventWeights {
	fn default() -> Self {
		default_event_weights()
	}
}

/// Scenes are persistent, so they carry no recency signal.
#[derive(Clone, Debug, Deserialize)]
pub struct SceneWeights {
	pub text: f64,
	pub proximity: f64,
	pub trust: f64,
}
impl Default for SceneWeights {
	fn default() -> Self {
		default_scene_weights()
	}
}

fn default_log_level() -> String {
	"info".to_string()
}

fn default_limit() -> u32 {
	20
}

fn default_max_limit() -> u32 {
	100
}

fn default_coarse_precision() -> usize {
	6
}

fn default_event_weights() -> EventWeights {
	EventWeights { recency: 0.3, text: 0.4, proximity: 0.2, trust: 0.1 }
}

fn default_scene_weights() -> SceneWeights {
	SceneWeights { text: 0.6, proximity: 0.25, trust: 0.15 }
}
