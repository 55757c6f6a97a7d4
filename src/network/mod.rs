use std::collections::BTreeMap;

use crate::config::{LaneConfig, NetworkConfig, TravelDirection};
use crate::connector::{LaneConnector, LaneStore};
use crate::error::ConnectorError;
use crate::junction::{signed_angle_deg, JunctionTally, LaneId, OrderedLanes, Vec2};

#[derive(Debug, Clone)]
pub struct Node {
    pub id: u16,
    pub is_junction: bool,
    pub segments: Vec<u16>,
}

#[derive(Debug, Clone)]
pub struct Segment {
    pub id: u16,
    pub start_node: u16,
    pub end_node: u16,
    pub start_direction: Vec2,
    pub end_direction: Vec2,
    pub inverted: bool,
    pub lanes: Vec<LaneConfig>,
}

impl Segment {
    pub fn forward_end(&self) -> u16 {
        if self.inverted {
            self.start_node
        } else {
            self.end_node
        }
    }

    pub fn backward_end(&self) -> u16 {
        if self.inverted {
            self.end_node
        } else {
            self.start_node
        }
    }

    /// Direction vector pointing from `node` into this segment.
    pub fn direction_from(&self, node: u16) -> Vec2 {
        if node == self.start_node {
            self.start_direction
        } else {
            self.end_direction
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct SegmentLanes {
    pub forward: OrderedLanes,
    pub backward: OrderedLanes,
}

/// A road network together with its lane records.
#[derive(Debug, Clone, Default)]
pub struct RoadNetwork {
    nodes: BTreeMap<u16, Node>,
    segments: BTreeMap<u16, Segment>,
    store: LaneStore,
}

impl RoadNetwork {
    pub fn from_config(config: &NetworkConfig) -> Self {
        let mut network = RoadNetwork::default();

        for node in &config.nodes {
            network.nodes.insert(
                node.id,
                Node {
                    id: node.id,
                    is_junction: node.junction,
                    segments: Vec::new(),
                },
            );
        }

        for segment in &config.segments {
            for node_id in [segment.start_node, segment.end_node] {
                if let Some(node) = network.nodes.get_mut(&node_id) {
                    node.segments.push(segment.id);
                }
            }

            for lane in &segment.lanes {
                network.store.register(LaneId(lane.id), lane.flags);
            }

            network.segments.insert(
                segment.id,
                Segment {
                    id: segment.id,
                    start_node: segment.start_node,
                    end_node: segment.end_node,
                    start_direction: Vec2::new(segment.start_direction[0], segment.start_direction[1]),
                    end_direction: Vec2::new(segment.end_direction[0], segment.end_direction[1]),
                    inverted: segment.inverted,
                    lanes: segment.lanes.clone(),
                },
            );
        }

        network
    }

    pub fn node(&self, id: u16) -> Result<&Node, ConnectorError> {
        self.nodes.get(&id).ok_or(ConnectorError::UnknownNode(id))
    }

    pub fn segment(&self, id: u16) -> Result<&Segment, ConnectorError> {
        self.segments.get(&id).ok_or(ConnectorError::UnknownSegment(id))
    }

    pub fn segment_ids(&self) -> Vec<u16> {
        self.segments.keys().copied().collect()
    }

    pub fn lane_store(&self) -> &LaneStore {
        &self.store
    }

    /// Lists the car and bus lanes of a segment, split by travel direction.
    pub fn segment_lanes(&self, segment_id: u16) -> Result<SegmentLanes, ConnectorError> {
        let segment = self.segment(segment_id)?;
        let mut lanes = SegmentLanes::default();

        for lane in segment.lanes.iter().filter(|lane| lane.kind.is_vehicle_lane()) {
            // Backward lanes run right to left by position
            let (set, key) = match lane.direction {
                TravelDirection::Forward => (&mut lanes.forward, lane.position),
                TravelDirection::Backward => (&mut lanes.backward, -lane.position),
            };

            if !set.insert(LaneId(lane.id), key, lane.kind.is_transit()) {
                log::warn!(
                    "Segment {} lane {} has the same position as another lane and will be skipped",
                    segment_id,
                    lane.id
                );
            }
        }

        Ok(lanes)
    }

    pub fn analyse_node(&self, node_id: u16, ignore_segment: u16, reference: &Vec2) -> Result<JunctionTally, ConnectorError> {
        let node = self.node(node_id)?;
        let mut tally = JunctionTally::new();

        for &segment_id in node.segments.iter().filter(|&&id| id != ignore_segment) {
            let segment = self.segment(segment_id)?;
            let lanes = self.segment_lanes(segment_id)?;

            // Lanes driving away from the node
            let leaving = if segment.forward_end() == node_id {
                lanes.backward
            } else {
                lanes.forward
            };
            if leaving.is_empty() {
                continue;
            }

            let angle = signed_angle_deg(&segment.direction_from(node_id), reference);
            tally.add_road(&leaving, angle);
        }

        log::debug!("Node {} outgoing lanes: {:?}", node_id, tally.counts());
        Ok(tally)
    }

    /// Returns the number of lane records written.
    pub fn update_segment(&mut self, segment_id: u16, connector: &LaneConnector) -> Result<usize, ConnectorError> {
        let segment = self.segment(segment_id)?.clone();
        let lanes = self.segment_lanes(segment_id)?;

        let ends = [
            (lanes.forward, segment.forward_end()),
            (lanes.backward, segment.backward_end()),
        ];

        let mut written = 0;
        for (incoming, node_id) in ends {
            if incoming.is_empty() || !self.node(node_id)?.is_junction {
                continue;
            }

            // Direction of travel when arriving at the node
            let reference = -segment.direction_from(node_id);
            let tally = self.analyse_node(node_id, segment_id, &reference)?;
            written += connector.connect_and_apply(&incoming, &tally, &mut self.store)?;
        }

        Ok(written)
    }

    pub fn update_all(&mut self, connector: &LaneConnector) -> Result<usize, ConnectorError> {
        let mut written = 0;
        for segment_id in self.segment_ids() {
            written += self.update_segment(segment_id, connector)?;
        }
        log::info!("Updated {} lane records across {} segments", written, self.segments.len());
        Ok(written)
    }
}
