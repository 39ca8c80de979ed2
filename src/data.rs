use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct StationId(String);

impl StationId {
    pub fn new(id: &str) -> Self {
        Self(id.to_owned())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// A blank id stands for a station that was never set.
    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Display for StationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for StationId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for StationId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

pub type Distance = u32;
pub type Duration = u32;

/// Directed edge `predecessor -> station` of a line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    pub station: StationId,
    pub predecessor: Option<StationId>,
    pub distance: Distance,
    pub duration: Duration,
}

impl Segment {
    pub fn new(
        predecessor: Option<StationId>,
        station: StationId,
        distance: Distance,
        duration: Duration,
    ) -> Self {
        Self {
            station,
            predecessor,
            distance,
            duration,
        }
    }

    pub fn head(station: StationId) -> Self {
        Self::new(None, station, 0, 0)
    }

    pub fn is_head(&self) -> bool {
        self.predecessor.is_none()
    }

    pub fn is_same(&self, other: &Segment) -> bool {
        self.predecessor == other.predecessor && self.station == other.station
    }
}
