use chrono::NaiveTime;

use crate::{
    data::{Segment, StationId},
    error::LineError,
    segments::{OrderedSegmentList, StationsInOrder},
};

#[derive(Debug, Clone)]
pub struct Line {
    pub name: String,
    pub color: String,
    pub first_departure: NaiveTime,
    pub last_departure: NaiveTime,
    pub interval_minutes: u32,
    stations: OrderedSegmentList,
}

/// Attributes of a [`Line`] that can be edited without touching its stations.
#[derive(Debug, Clone, Default)]
pub struct LineUpdate {
    pub name: Option<String>,
    pub color: Option<String>,
    pub first_departure: Option<NaiveTime>,
    pub last_departure: Option<NaiveTime>,
    pub interval_minutes: Option<u32>,
}

impl Line {
    pub fn new(
        name: &str,
        color: &str,
        first_departure: NaiveTime,
        last_departure: NaiveTime,
        interval_minutes: u32,
    ) -> Self {
        Self {
            name: name.to_owned(),
            color: color.to_owned(),
            first_departure,
            last_departure,
            interval_minutes,
            stations: OrderedSegmentList::new(),
        }
    }

    /// Attaches a collection loaded by a store, checking it forms one chain.
    pub fn with_segments<I>(mut self, segments: I) -> Result<Self, LineError>
    where
        I: IntoIterator<Item = Segment>,
    {
        self.stations = OrderedSegmentList::from_segments(segments)?;
        Ok(self)
    }

    pub fn stations(&self) -> &OrderedSegmentList {
        &self.stations
    }

    pub fn stations_in_order(&self) -> StationsInOrder<'_> {
        self.stations.stations_in_order()
    }

    pub fn add_segment(&mut self, segment: Segment) -> Result<(), LineError> {
        log::debug!("line {}: adding {}", self.name, segment.station);
        self.stations.add(segment)
    }

    pub fn remove_station(&mut self, station: &StationId) -> Result<Segment, LineError> {
        log::debug!("line {}: removing {}", self.name, station);
        self.stations.remove_by_station(station)
    }

    pub fn update(&mut self, update: LineUpdate) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(color) = update.color {
            self.color = color;
        }
        if let Some(first_departure) = update.first_departure {
            self.first_departure = first_departure;
        }
        if let Some(last_departure) = update.last_departure {
            self.last_departure = last_departure;
        }
        if let Some(interval_minutes) = update.interval_minutes {
            self.interval_minutes = interval_minutes;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn time(hour: u32, minute: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(hour, minute, 0).expect("valid time")
    }

    fn sinbundang() -> Line {
        Line::new("Sinbundang", "bg-red-600", time(5, 30), time(23, 30), 5)
    }

    #[test]
    fn test_add_and_remove_stations() {
        let mut line = sinbundang();
        line.add_segment(Segment::head("Gangnam".into()))
            .expect("add head");
        line.add_segment(Segment::new(Some("Gangnam".into()), "Pangyo".into(), 17000, 13))
            .expect("add Pangyo");
        line.add_segment(Segment::new(Some("Gangnam".into()), "Yangjae".into(), 3000, 3))
            .expect("add Yangjae");

        let order: Vec<&str> = line
            .stations_in_order()
            .map(|segment| segment.station.as_str())
            .collect();
        assert_eq!(order, vec!["Gangnam", "Yangjae", "Pangyo"]);

        line.remove_station(&"Yangjae".into()).expect("remove Yangjae");
        assert_eq!(line.stations().to_string(), "Gangnam -> Pangyo");
    }

    #[test]
    fn test_update_keeps_stations() {
        let mut line = sinbundang();
        line.add_segment(Segment::head("Gangnam".into()))
            .expect("add head");

        line.update(LineUpdate {
            name: Some("Bundang".to_owned()),
            interval_minutes: Some(10),
            ..Default::default()
        });

        assert_eq!(line.name, "Bundang");
        assert_eq!(line.color, "bg-red-600");
        assert_eq!(line.interval_minutes, 10);
        assert_eq!(line.first_departure, time(5, 30));
        assert_eq!(line.stations().len(), 1);
    }

    #[test]
    fn test_with_segments_rejects_corruption() {
        let result = sinbundang().with_segments(vec![
            Segment::head("A".into()),
            Segment::head("B".into()),
        ]);
        assert!(matches!(result, Err(LineError::Corrupted { .. })));
    }
}
