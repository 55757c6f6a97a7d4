use serde::Serialize;
use std::collections::BTreeMap;

use super::LaneRecordSink;
use crate::assignment::{LaneAssignment, TurnFlags};
use crate::error::ConnectorError;
use crate::junction::LaneId;

/// Persistent state of one lane as the host stores it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LaneRecord {
    pub first_target: u8,
    /// Exclusive.
    pub last_target: u8,
    pub flags: u16,
}

impl LaneRecord {
    pub const DIRECTION_SHIFT: u16 = 4;
    pub const DIRECTION_MASK: u16 = (TurnFlags::LEFT_FORWARD_RIGHT.bits() as u16) << Self::DIRECTION_SHIFT;

    pub fn direction(&self) -> TurnFlags {
        TurnFlags::from_bits_truncate(((self.flags & Self::DIRECTION_MASK) >> Self::DIRECTION_SHIFT) as u8)
    }

    /// Inclusive target range, or None if the lane connects nowhere.
    pub fn targets(&self) -> Option<(usize, usize)> {
        if self.last_target > self.first_target {
            Some((self.first_target as usize, self.last_target as usize - 1))
        } else {
            None
        }
    }
}

/// In-memory lane record store.
#[derive(Debug, Clone, Default)]
pub struct LaneStore {
    records: BTreeMap<LaneId, LaneRecord>,
}

impl LaneStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, lane: LaneId, flags: u16) {
        self.records.insert(
            lane,
            LaneRecord {
                flags,
                ..LaneRecord::default()
            },
        );
    }

    pub fn get(&self, lane: LaneId) -> Option<&LaneRecord> {
        self.records.get(&lane)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&LaneId, &LaneRecord)> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

fn to_record_index(lane: LaneId, index: usize) -> Result<u8, ConnectorError> {
    u8::try_from(index).map_err(|_| ConnectorError::TargetOutOfRange {
        lane: lane.0,
        index,
        max: u8::MAX as usize,
    })
}

impl LaneRecordSink for LaneStore {
    fn apply(&mut self, lane: LaneId, assignment: &LaneAssignment) -> Result<(), ConnectorError> {
        let first_target = to_record_index(lane, assignment.first_target)?;
        let last_target = to_record_index(lane, assignment.last_target + 1)?;

        let record = self.records.get_mut(&lane).ok_or(ConnectorError::UnknownLane(lane.0))?;

        record.first_target = first_target;
        record.last_target = last_target;
        record.flags &= !LaneRecord::DIRECTION_MASK;
        record.flags |= (assignment.direction.bits() as u16) << LaneRecord::DIRECTION_SHIFT;

        Ok(())
    }

    fn get_name(&self) -> &'static str {
        "in-memory lane store"
    }
}
