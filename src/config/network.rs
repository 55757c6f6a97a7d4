use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use super::Validate;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct NetworkConfig {
    pub network: NetworkInfo,
    #[serde(default)]
    pub nodes: Vec<NodeConfig>,
    #[serde(default)]
    pub segments: Vec<SegmentConfig>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct NetworkInfo {
    pub name: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct NodeConfig {
    pub id: u16,
    #[serde(default = "default_junction")]
    pub junction: bool,
}

fn default_junction() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SegmentConfig {
    pub id: u16,
    pub start_node: u16,
    pub end_node: u16,
    /// Points from the start node into the segment.
    pub start_direction: [f32; 2],
    /// Points from the end node into the segment.
    pub end_direction: [f32; 2],
    /// Lanes' travel directions are reversed relative to the node order.
    #[serde(default)]
    pub inverted: bool,
    #[serde(default)]
    pub lanes: Vec<LaneConfig>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LaneConfig {
    pub id: u32,
    pub position: f32,
    pub direction: TravelDirection,
    #[serde(default)]
    pub kind: LaneKind,
    /// Host flag bits kept as-is when arrows are written.
    #[serde(default)]
    pub flags: u16,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TravelDirection {
    Forward,
    Backward,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LaneKind {
    #[default]
    Car,
    Bus,
    Bicycle,
    Pedestrian,
    Parking,
}

impl LaneKind {
    /// Lanes that take part in junction lane connections.
    pub fn is_vehicle_lane(self) -> bool {
        matches!(self, LaneKind::Car | LaneKind::Bus)
    }

    pub fn is_transit(self) -> bool {
        self == LaneKind::Bus
    }
}

fn is_valid_direction(vector: &[f32; 2]) -> bool {
    vector.iter().all(|v| v.is_finite()) && vector.iter().any(|v| *v != 0.0)
}

impl Validate for NetworkConfig {
    fn validate(&self) -> Result<()> {
        let mut node_ids = HashSet::new();
        for node in &self.nodes {
            if !node_ids.insert(node.id) {
                return Err(anyhow!("Duplicate node id {}", node.id));
            }
        }

        let mut segment_ids = HashSet::new();
        let mut lane_ids = HashSet::new();
        for segment in &self.segments {
            if !segment_ids.insert(segment.id) {
                return Err(anyhow!("Duplicate segment id {}", segment.id));
            }

            for node in [segment.start_node, segment.end_node] {
                if !node_ids.contains(&node) {
                    return Err(anyhow!("Segment {} references unknown node {}", segment.id, node));
                }
            }

            if segment.start_node == segment.end_node {
                return Err(anyhow!("Segment {} starts and ends at node {}", segment.id, segment.start_node));
            }

            if !is_valid_direction(&segment.start_direction) || !is_valid_direction(&segment.end_direction) {
                return Err(anyhow!("Segment {} direction vectors must be finite and non-zero", segment.id));
            }

            for lane in &segment.lanes {
                if !lane_ids.insert(lane.id) {
                    return Err(anyhow!("Duplicate lane id {} in segment {}", lane.id, segment.id));
                }

                if !lane.position.is_finite() {
                    return Err(anyhow!("Lane {} position must be finite", lane.id));
                }
            }
        }

        Ok(())
    }
}
