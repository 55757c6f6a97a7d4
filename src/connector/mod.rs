use crate::assignment::{
    assign_lanes, extend_for_sharp_turns, fold_outgoing_bus_lanes, fold_sharp_turns, mirror_assignments,
    BusLaneSplit, Handedness, LaneAssignment, OutgoingBusLane,
};
use crate::config::Settings;
use crate::error::ConnectorError;
use crate::junction::{JunctionTally, LaneId, OrderedLanes};

pub mod store;

pub use store::*;

/// Receives the finished assignment of each incoming lane.
pub trait LaneRecordSink {
    fn apply(&mut self, lane: LaneId, assignment: &LaneAssignment) -> Result<(), ConnectorError>;
    fn get_name(&self) -> &'static str;
}

#[derive(Debug, Clone, PartialEq)]
pub struct JunctionAssignment {
    // One entry per incoming lane, left to right
    pub lanes: Vec<(LaneId, LaneAssignment)>,
    pub outgoing_lane_count: usize,
}

impl JunctionAssignment {
    pub fn assignments(&self) -> Vec<LaneAssignment> {
        self.lanes.iter().map(|(_, assignment)| *assignment).collect()
    }
}

/// Runs the full assignment pipeline for one set of incoming lanes at one junction.
#[derive(Debug, Clone, Copy, Default)]
pub struct LaneConnector {
    settings: Settings,
}

impl LaneConnector {
    pub fn new(settings: Settings) -> Self {
        Self { settings }
    }

    /// Returns None when there is nothing to connect, e.g. at a dead end
    /// formed by one-way roads.
    pub fn connect(&self, incoming: &OrderedLanes, tally: &JunctionTally) -> Option<JunctionAssignment> {
        let mut counts = tally.counts();
        let outgoing_lane_count = counts.total();

        if incoming.is_empty() {
            return None;
        }
        if outgoing_lane_count == 0 {
            log::debug!("No outgoing lanes for {} incoming lanes, skipping junction", incoming.len());
            return None;
        }

        // Bus lanes stay out of the turn assignment and get reattached at the end
        let split = BusLaneSplit::split(incoming);

        let mut outgoing_bus_lanes = Vec::new();
        if !self.settings.legacy_mode {
            let bus_count = tally.transit_lane_count();
            if bus_count > 0 && bus_count < outgoing_lane_count {
                let indices = tally.transit_lane_indices();
                let directions = counts.remove_lanes(&indices);
                outgoing_bus_lanes = indices
                    .into_iter()
                    .zip(directions)
                    .map(|(index, direction)| OutgoingBusLane { index, direction })
                    .collect();
            } else if bus_count > 0 {
                log::debug!("All {} outgoing lanes are bus lanes, treating them as ordinary lanes", bus_count);
            }
        }

        // Left-hand traffic runs the right-hand rules on mirrored counts
        let left_hand = self.settings.traffic.is_left_hand();
        if left_hand {
            counts.mirror();
        }

        let ordinary_incoming = split.ordinary.len();
        fold_sharp_turns(&mut counts, ordinary_incoming);

        let mut lanes = assign_lanes(ordinary_incoming, &counts, Handedness::RightHand);
        if lanes.is_empty() {
            return None;
        }

        extend_for_sharp_turns(&mut lanes, counts.sharp_left, counts.sharp_right);

        if left_hand {
            // Outgoing bus lanes are folded in the canonical frame too
            let last_index = outgoing_lane_count - 1;
            let mirrored: Vec<OutgoingBusLane> = outgoing_bus_lanes
                .iter()
                .map(|bus| OutgoingBusLane {
                    index: last_index - bus.index,
                    direction: bus.direction.mirrored(),
                })
                .collect();
            fold_outgoing_bus_lanes(&mut lanes, &mirrored);
            mirror_assignments(&mut lanes, outgoing_lane_count);
        } else {
            fold_outgoing_bus_lanes(&mut lanes, &outgoing_bus_lanes);
        }

        let lanes = split.reinsert(lanes);

        let ids = incoming.ids();
        if ids.len() != lanes.len() {
            log::error!("Computed {} assignments for {} incoming lanes, skipping junction", lanes.len(), ids.len());
            return None;
        }

        Some(JunctionAssignment {
            lanes: ids.into_iter().zip(lanes).collect(),
            outgoing_lane_count,
        })
    }

    /// Computes and writes the connections. Returns the number of lanes written.
    pub fn connect_and_apply<S: LaneRecordSink>(
        &self,
        incoming: &OrderedLanes,
        tally: &JunctionTally,
        sink: &mut S,
    ) -> Result<usize, ConnectorError> {
        let Some(result) = self.connect(incoming, tally) else {
            return Ok(0);
        };

        for (lane, assignment) in &result.lanes {
            sink.apply(*lane, assignment)?;
        }

        log::debug!("{} wrote {} lane connections", sink.get_name(), result.lanes.len());
        Ok(result.lanes.len())
    }
}
