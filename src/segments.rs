use std::{
    collections::{HashMap, HashSet},
    fmt,
};

use itertools::Itertools;

use crate::{
    data::{Segment, StationId},
    error::{describe_predecessor, LineError},
};

/// The stations of one line, kept as a chain of `predecessor -> station` segments.
///
/// Segments live in an arena in no particular order. Indexes point into it by
/// station and by predecessor (the head is tracked on its own), so following
/// the chain is a constant-time lookup per step. Within a consistent list every
/// predecessor, including the absent one of the head, is held by at most one
/// segment.
#[derive(Debug, Default, Clone)]
pub struct OrderedSegmentList {
    segments: Vec<Segment>,
    by_station: HashMap<StationId, usize>,
    head: Option<usize>,
    successors: HashMap<StationId, usize>,
}

impl OrderedSegmentList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds a list from a stored collection, rejecting one that does not
    /// form a single chain.
    pub fn from_segments<I>(segments: I) -> Result<Self, LineError>
    where
        I: IntoIterator<Item = Segment>,
    {
        let segments: Vec<Segment> = segments.into_iter().collect();
        validate(&segments)?;

        let mut list = Self {
            by_station: HashMap::with_capacity(segments.len()),
            successors: HashMap::with_capacity(segments.len()),
            ..Self::default()
        };
        for (slot, segment) in segments.iter().enumerate() {
            list.by_station.insert(segment.station.clone(), slot);
            list.link(segment.predecessor.clone(), slot);
        }
        list.segments = segments;

        Ok(list)
    }

    /// Storage order, not line order.
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn contains(&self, station: &StationId) -> bool {
        self.by_station.contains_key(station)
    }

    pub fn get(&self, station: &StationId) -> Option<&Segment> {
        self.by_station.get(station).map(|&slot| &self.segments[slot])
    }

    pub fn head(&self) -> Option<&Segment> {
        self.head.map(|slot| &self.segments[slot])
    }

    fn slot_after(&self, predecessor: Option<&StationId>) -> Option<usize> {
        match predecessor {
            None => self.head,
            Some(station) => self.successors.get(station).copied(),
        }
    }

    fn link(&mut self, predecessor: Option<StationId>, slot: usize) {
        match predecessor {
            None => self.head = Some(slot),
            Some(station) => {
                self.successors.insert(station, slot);
            }
        }
    }

    fn unlink(&mut self, predecessor: Option<&StationId>) -> Option<usize> {
        match predecessor {
            None => self.head.take(),
            Some(station) => self.successors.remove(station),
        }
    }

    /// Walks the chain from the head. Stops early, without failing, if the
    /// chain is broken; see [`OrderedSegmentList::check_consistency`].
    pub fn stations_in_order(&self) -> StationsInOrder<'_> {
        StationsInOrder {
            list: self,
            next: self.head,
            remaining: self.segments.len(),
        }
    }

    pub fn station_ids(&self) -> Vec<StationId> {
        self.stations_in_order()
            .map(|segment| segment.station.clone())
            .collect()
    }

    /// Summed in `u64`, so no line of `u32` segments can overflow it.
    pub fn total_distance(&self) -> u64 {
        self.stations_in_order()
            .map(|segment| u64::from(segment.distance))
            .sum()
    }

    pub fn total_duration(&self) -> u64 {
        self.stations_in_order()
            .map(|segment| u64::from(segment.duration))
            .sum()
    }

    pub fn check_consistency(&self) -> Result<(), LineError> {
        validate(&self.segments)
    }

    /// Adds a segment. A segment already following `segment.predecessor` is
    /// re-linked to follow the new station instead.
    pub fn add(&mut self, segment: Segment) -> Result<(), LineError> {
        self.check_addable(&segment)?;

        if let Some(slot) = self.unlink(segment.predecessor.as_ref()) {
            let displaced = &mut self.segments[slot];
            log::debug!(
                "re-linking {} from {} to {}",
                displaced.station,
                describe_predecessor(&displaced.predecessor),
                segment.station
            );
            displaced.predecessor = Some(segment.station.clone());
            self.link(Some(segment.station.clone()), slot);
        }

        let slot = self.segments.len();
        self.by_station.insert(segment.station.clone(), slot);
        self.link(segment.predecessor.clone(), slot);
        log::debug!(
            "added {} -> {}",
            describe_predecessor(&segment.predecessor),
            segment.station
        );
        self.segments.push(segment);

        Ok(())
    }

    fn check_addable(&self, segment: &Segment) -> Result<(), LineError> {
        if segment.station.is_blank() {
            return Err(LineError::MissingStation);
        }

        if let Some(existing) = self.get(&segment.station) {
            return Err(if existing.is_same(segment) {
                LineError::DuplicateSegment {
                    station: segment.station.clone(),
                    predecessor: segment.predecessor.clone(),
                }
            } else {
                LineError::DuplicateStation {
                    station: segment.station.clone(),
                    existing_predecessor: existing.predecessor.clone(),
                }
            });
        }

        match &segment.predecessor {
            Some(predecessor) if !self.contains(predecessor) => {
                Err(LineError::UnknownPredecessor {
                    station: segment.station.clone(),
                    predecessor: predecessor.clone(),
                })
            }
            _ => Ok(()),
        }
    }

    /// Removes the segment ending at `station`; its successor takes over its
    /// predecessor, so the chain stays continuous.
    pub fn remove_by_station(&mut self, station: &StationId) -> Result<Segment, LineError> {
        let slot = *self
            .by_station
            .get(station)
            .ok_or_else(|| LineError::StationNotFound {
                station: station.clone(),
            })?;
        let predecessor = self.segments[slot].predecessor.clone();

        self.unlink(predecessor.as_ref());
        if let Some(successor) = self.unlink(Some(station)) {
            log::debug!(
                "re-linking {} from {} to {}",
                self.segments[successor].station,
                station,
                describe_predecessor(&predecessor)
            );
            self.segments[successor].predecessor = predecessor.clone();
            self.link(predecessor, successor);
        }
        self.by_station.remove(station);

        let removed = self.segments.swap_remove(slot);
        if let Some(moved) = self.segments.get(slot) {
            let (station, predecessor) = (moved.station.clone(), moved.predecessor.clone());
            self.by_station.insert(station, slot);
            self.link(predecessor, slot);
        }
        log::debug!(
            "removed {} -> {}",
            describe_predecessor(&removed.predecessor),
            removed.station
        );

        Ok(removed)
    }
}

fn validate(segments: &[Segment]) -> Result<(), LineError> {
    let result = check_chain(segments);
    if let Err(e) = &result {
        log::warn!("{e}");
    }
    result
}

fn check_chain(segments: &[Segment]) -> Result<(), LineError> {
    if segments.iter().any(|segment| segment.station.is_blank()) {
        return Err(LineError::corrupted("segment without station"));
    }

    if let Some(station) = segments
        .iter()
        .map(|segment| &segment.station)
        .duplicates()
        .next()
    {
        return Err(LineError::corrupted(format!(
            "station {station} appears more than once"
        )));
    }

    if let Some(predecessor) = segments
        .iter()
        .map(|segment| &segment.predecessor)
        .duplicates()
        .next()
    {
        return Err(LineError::corrupted(match predecessor {
            None => "more than one head".to_owned(),
            Some(station) => format!("more than one station follows {station}"),
        }));
    }

    let stations: HashSet<&StationId> = segments.iter().map(|segment| &segment.station).collect();
    if let Some((station, predecessor)) = segments.iter().find_map(|segment| {
        segment
            .predecessor
            .as_ref()
            .filter(|predecessor| !stations.contains(predecessor))
            .map(|predecessor| (&segment.station, predecessor))
    }) {
        return Err(LineError::corrupted(format!(
            "station {station} follows unknown station {predecessor}"
        )));
    }

    let successors: HashMap<Option<&StationId>, &Segment> = segments
        .iter()
        .map(|segment| (segment.predecessor.as_ref(), segment))
        .collect();
    let mut current = successors.get(&None);
    let mut reached = 0;
    while let Some(segment) = current {
        reached += 1;
        current = successors.get(&Some(&segment.station));
    }

    if reached != segments.len() {
        return Err(LineError::corrupted(format!(
            "{} of {} segments are not reachable from the head",
            segments.len().saturating_sub(reached),
            segments.len()
        )));
    }

    Ok(())
}

/// Lazy walk over the chain; see [`OrderedSegmentList::stations_in_order`].
#[derive(Debug, Clone)]
pub struct StationsInOrder<'a> {
    list: &'a OrderedSegmentList,
    next: Option<usize>,
    remaining: usize,
}

impl<'a> Iterator for StationsInOrder<'a> {
    type Item = &'a Segment;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let segment = &self.list.segments[self.next?];
        self.remaining -= 1;
        self.next = self.list.slot_after(Some(&segment.station));
        Some(segment)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.remaining))
    }
}

impl<'a> IntoIterator for &'a OrderedSegmentList {
    type Item = &'a Segment;
    type IntoIter = StationsInOrder<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.stations_in_order()
    }
}

impl fmt::Display for OrderedSegmentList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            self.stations_in_order()
                .map(|segment| &segment.station)
                .join(" -> ")
        )
    }
}
