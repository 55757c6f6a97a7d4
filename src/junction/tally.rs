use super::{classify_angle, Direction, LaneDirectionCounts, OrderedLane, OrderedLanes};

#[derive(Debug, Clone)]
pub struct OutgoingRoad {
    pub angle_deg: f32,
    pub lanes: OrderedLanes,
}

/// Outgoing lanes of every road leaving a junction, except the road being updated.
#[derive(Debug, Clone, Default)]
pub struct JunctionTally {
    // Sorted by angle, so the flattened lanes run left to right like the host's indices
    roads: Vec<OutgoingRoad>,
    counts: LaneDirectionCounts,
}

impl JunctionTally {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_counts(counts: LaneDirectionCounts) -> Self {
        Self {
            roads: Vec::new(),
            counts,
        }
    }

    pub fn add_road(&mut self, lanes: &OrderedLanes, angle_deg: f32) {
        self.counts.add(classify_angle(angle_deg), lanes.len());

        match self.roads.binary_search_by(|road| road.angle_deg.total_cmp(&angle_deg)) {
            Ok(index) => {
                // Overlapping roads, e.g. two networks stacked on the same node
                log::debug!("Merging {} lanes into road at {:.1} degrees", lanes.len(), angle_deg);
                self.roads[index].lanes.merge_with(lanes);
            }
            Err(index) => {
                self.roads.insert(
                    index,
                    OutgoingRoad {
                        angle_deg,
                        lanes: lanes.clone(),
                    },
                );
            }
        }
    }

    pub fn counts(&self) -> LaneDirectionCounts {
        self.counts
    }

    pub fn roads(&self) -> &[OutgoingRoad] {
        &self.roads
    }

    pub fn lane_count(&self) -> usize {
        self.counts.total()
    }

    pub fn lanes(&self) -> Vec<OrderedLane> {
        self.roads.iter().flat_map(|road| road.lanes.iter().copied()).collect()
    }

    pub fn direction_at(&self, index: usize) -> Direction {
        self.counts.direction_at(index)
    }

    pub fn transit_lane_indices(&self) -> Vec<usize> {
        let mut indices = Vec::new();
        let mut offset = 0;
        for road in &self.roads {
            indices.extend(road.lanes.transit_indices().into_iter().map(|i| i + offset));
            offset += road.lanes.len();
        }
        indices
    }

    pub fn transit_lane_count(&self) -> usize {
        self.roads.iter().map(|road| road.lanes.transit_count()).sum()
    }
}

impl LaneDirectionCounts {
    pub fn remove_lanes(&mut self, indices: &[usize]) -> Vec<Direction> {
        // Resolve every direction before any count changes
        let removed: Vec<Direction> = indices.iter().map(|&index| self.direction_at(index)).collect();
        for direction in &removed {
            let count = self.get_mut(*direction);
            *count = count.saturating_sub(1);
        }
        removed
    }
}
