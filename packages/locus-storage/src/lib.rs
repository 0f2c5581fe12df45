pub mod store;

mod error;

pub use error::Error;
pub use store::{Snapshot, Store, UpsertOutcome};

pub type Result<T, E = Error> = std::result::Result<T, E>;
