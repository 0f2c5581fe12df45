pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("Invalid request: {message}")]
	InvalidRequest { message: String },
	#[error("Not found: {message}")]
	NotFound { message: String },
	#[error("Deleted: {message}")]
	Deleted { message: String },
	#[error("Duplicate name: {message}")]
	DuplicateName { message: String },
	#[error("Invalid cursor: {message}")]
	InvalidCursor { message: String },
	#[error("Conflict: {message}")]
	Conflict { message: String },
}
impl From<locus_storage::Error> for Error {
	fn from(err: locus_storage::Error) -> Self {
		match err {
			locus_storage::Error::NotFound(message) => Self::NotFound { message },
			locus_storage::Error::Deleted(message) => Self::Deleted { message },
			locus_storage::Error::Conflict(message) => Self::Conflict { message },
		}
	}
}
