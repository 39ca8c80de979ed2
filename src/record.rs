use serde::Deserialize;

use crate::{
    data::{Distance, Duration, Segment, StationId},
    error::LineError,
};

/// One row of a segments file, as handed over by a collaborator.
///
/// Blank or missing `distance`/`duration` cells read as zero; a cell that is
/// present but not a number is still a parse error.
#[derive(Deserialize, Debug, Default)]
pub struct SegmentRecord {
    pub predecessor: Option<String>,
    pub station: Option<String>,
    #[serde(default)]
    pub distance: Option<Distance>,
    #[serde(default)]
    pub duration: Option<Duration>,
}

fn non_blank(value: Option<String>) -> Option<StationId> {
    value
        .map(StationId::from)
        .filter(|station| !station.is_blank())
}

impl TryFrom<SegmentRecord> for Segment {
    type Error = LineError;

    fn try_from(value: SegmentRecord) -> Result<Self, Self::Error> {
        let station = non_blank(value.station).ok_or(LineError::MissingStation)?;
        Ok(Segment::new(
            non_blank(value.predecessor),
            station,
            value.distance.unwrap_or_default(),
            value.duration.unwrap_or_default(),
        ))
    }
}
