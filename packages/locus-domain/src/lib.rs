pub mod clock;
pub mod consent;
pub mod event;
pub mod geo;
pub mod geohash;
pub mod record;
pub mod scene;

pub use clock::{Clock, SystemClock};
pub use consent::{Located, Location, enforce_location_consent};
pub use event::{Event, EventStatus};
pub use geo::{BoundingBox, Point};
pub use record::{Record, RecordKey};
pub use scene::{Scene, Visibility};
