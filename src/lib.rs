pub mod data;
pub mod error;
pub mod line;
pub mod record;
pub mod segments;

pub use data::{Distance, Duration, Segment, StationId};
pub use error::{ErrorKind, LineError};
pub use line::{Line, LineUpdate};
pub use record::SegmentRecord;
pub use segments::{OrderedSegmentList, StationsInOrder};
