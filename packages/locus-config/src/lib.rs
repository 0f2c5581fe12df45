mod error;
mod types;

pub use error::{Error, Result};
pub use types::{Config, EventWeights, Geo, Ranking, SceneWeights, Search, Service};

use std::{fs, path::Path};

/// Longest geohash the encoder produces.
pub const MAX_GEOHASH_PRECISION: usize = 12;

pub fn load(path: &Path) -> Result<Config> {
	let raw = fs::read_to_string(path)
		.map_err(|err| Error::ReadConfig { path: path.to_path_buf(), source: err })?;
	let mut cfg: Config = toml::from_str(&raw)
		.map_err(|err| Error::ParseConfig { path: path.to_path_buf(), source: err })?;

	normalize(&mut cfg);

	validate(&cfg)?;

	Ok(cfg)
}

pub fn validate(cfg: &Config) -> Result<()> {
	if cfg.service.log_level.is_empty() {
		return Err(Error::Validation {
			message: "service.log_level must be non-empty.".to_string(),
		});
	}
	if cfg.search.default_limit == 0 {
		return Err(Error::Validation {
			message: "search.default_limit must be greater than zero.".to_string(),
		});
	}
	if cfg.search.max_limit < cfg.search.default_limit {
		return Err(Error::Validation {
			message: "search.max_limit must be greater than or equal to search.default_limit."
				.to_string(),
		});
	}
	if !(1..=MAX_GEOHASH_PRECISION).contains(&cfg.geo.coarse_precision) {
		return Err(Error::Validation {
			message: format!("geo.coarse_precision must be in the range 1-{MAX_GEOHASH_PRECISION}."),
		});
	}

	let event = &cfg.ranking.event;
	let scene = &cfg.ranking.scene;

	for (label, weight) in [
		("ranking.event.recency", event.recency),
		("ranking.event.text", event.text),
		("ranking.event.proximity", event.proximity),
		("ranking.event.trust", event.trust),
		("ranking.scene.text", scene.text),
		("ranking.scene.proximity", scene.proximity),
		("ranking.scene.trust", scene.trust),
	] {
		if !weight.is_finite() {
			return Err(Error::Validation {
				message: format!("{label} must be a finite number."),
			});
		}
		if !(0.0..=1.0).contains(&weight) {
			return Err(Error::Validation {
				message: format!("{label} must be in the range 0.0-1.0."),
			});
		}
	}

	Ok(())
}

fn normalize(cfg: &mut Config) {
	let trimmed = cfg.service.log_level.trim();

	if trimmed.len() != cfg.service.log_level.len() {
		cfg.service.log_level = trimmed.to_string();
	}
}
