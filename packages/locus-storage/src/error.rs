#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("Not found: {0}")]
	NotFound(String),
	#[error("Deleted: {0}")]
	Deleted(String),
	#[error("Conflict: {0}")]
	Conflict(String),
}
