use thiserror::Error;

use crate::data::StationId;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LineError {
    #[error("Segment has no station")]
    MissingStation,

    #[error("Segment {} -> {station} is already on the line", describe_predecessor(.predecessor))]
    DuplicateSegment {
        station: StationId,
        predecessor: Option<StationId>,
    },

    #[error(
        "Station {station} is already on the line after {}",
        describe_predecessor(.existing_predecessor)
    )]
    DuplicateStation {
        station: StationId,
        existing_predecessor: Option<StationId>,
    },

    #[error("Predecessor {predecessor} of Station {station} is not on the line")]
    UnknownPredecessor {
        station: StationId,
        predecessor: StationId,
    },

    #[error("No such Station {station} on the line")]
    StationNotFound { station: StationId },

    #[error("Line stations are corrupted: {reason}")]
    Corrupted { reason: String },
}

/// Renders a predecessor for messages; the head has none.
pub(crate) fn describe_predecessor(predecessor: &Option<StationId>) -> String {
    match predecessor {
        Some(station) => station.to_string(),
        None => "(head)".to_owned(),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    NotFound,
    Corruption,
}

impl LineError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            LineError::MissingStation
            | LineError::DuplicateSegment { .. }
            | LineError::DuplicateStation { .. }
            | LineError::UnknownPredecessor { .. } => ErrorKind::Validation,
            LineError::StationNotFound { .. } => ErrorKind::NotFound,
            LineError::Corrupted { .. } => ErrorKind::Corruption,
        }
    }

    pub(crate) fn corrupted(reason: impl Into<String>) -> Self {
        LineError::Corrupted {
            reason: reason.into(),
        }
    }
}
