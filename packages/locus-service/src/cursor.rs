//! Opaque pagination tokens.

use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use serde::{Deserialize, Serialize};
use time::{OffsetDateTime, format_description::well_known::Rfc3339};

use crate::{Error, Result};

/// Position after the last returned `(score, id)` of a ranked search.
#[derive(Clone, Debug, PartialEq)]
pub struct ScoreCursor {
	pub score: f64,
	pub id: String,
}
impl ScoreCursor {
	pub fn new(score: f64, id: impl Into<String>) -> Self {
		Self { score, id: id.into() }
	}

	/// URL-safe base64 over a JSON payload. The score travels as its IEEE-754 bit pattern so a
	/// round trip reproduces it exactly.
	pub fn encode(&self) -> Result<String> {
		let payload = ScorePayload { s: self.score.to_bits(), i: &self.id };
		let json = serde_json::to_vec(&payload).map_err(|err| unencodable(format!("{err}")))?;

		Ok(URL_SAFE_NO_PAD.encode(json))
	}

	/// An empty token means "start from the top".
	pub fn decode(raw: &str) -> Result<Option<Self>> {
		if raw.is_empty() {
			return Ok(None);
		}

		let bytes = URL_SAFE_NO_PAD.decode(raw).map_err(|err| invalid(format!("{err}")))?;
		let payload: OwnedScorePayload =
			serde_json::from_slice(&bytes).map_err(|err| invalid(format!("{err}")))?;
		let score = f64::from_bits(payload.s);

		if !score.is_finite() {
			return Err(invalid("score is not finite".to_string()));
		}

		Ok(Some(Self { score, id: payload.i }))
	}
}

/// Position after the last returned `(starts_at, id)` of a timeline page.
///
/// Timestamps are held at whole-second precision.
#[derive(Clone, Debug, PartialEq)]
pub struct TimeCursor {
	pub starts_at: OffsetDateTime,
	pub id: String,
}
impl TimeCursor {
	pub fn new(starts_at: OffsetDateTime, id: impl Into<String>) -> Self {
		Self { starts_at: truncate_to_second(starts_at), id: id.into() }
	}

	/// `"<RFC3339 UTC>|<id>"`. Years outside `0000..=9999` have no RFC 3339 form and fail.
	pub fn encode(&self) -> Result<String> {
		let ts = truncate_to_second(self.starts_at).to_offset(time::UtcOffset::UTC);
		let formatted = ts.format(&Rfc3339).map_err(|err| unencodable(format!("{err}")))?;

		Ok(format!("{formatted}|{}", self.id))
	}

	pub fn decode(raw: &str) -> Result<Option<Self>> {
		if raw.is_empty() {
			return Ok(None);
		}

		let Some((ts, id)) = raw.split_once('|') else {
			return Err(invalid("expected <timestamp>|<id>".to_string()));
		};
		let starts_at =
			OffsetDateTime::parse(ts, &Rfc3339).map_err(|err| invalid(format!("{err}")))?;

		Ok(Some(Self::new(starts_at, id)))
	}
}

#[derive(Serialize)]
struct ScorePayload<'a> {
	s: u64,
	i: &'a str,
}

#[derive(Deserialize)]
struct OwnedScorePayload {
	s: u64,
	i: String,
}

pub(crate) fn truncate_to_second(ts: OffsetDateTime) -> OffsetDateTime {
	ts.replace_nanosecond(0).unwrap_or(ts)
}

fn invalid(detail: String) -> Error {
	Error::InvalidCursor { message: format!("Malformed cursor: {detail}.") }
}

fn unencodable(detail: String) -> Error {
	Error::InvalidCursor { message: format!("Cursor cannot be encoded: {detail}.") }
}
