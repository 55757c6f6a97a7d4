use super::LaneId;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrderedLane {
    pub id: LaneId,
    // Increases to the right in the direction of travel
    pub position: f32,
    pub is_transit: bool,
}

/// Lanes travelling in one direction on one segment, sorted left to right by position.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OrderedLanes {
    lanes: Vec<OrderedLane>,
}

impl OrderedLanes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns false if another lane already occupies the same position.
    pub fn insert(&mut self, id: LaneId, position: f32, is_transit: bool) -> bool {
        // -0.0 and 0.0 are the same position; total_cmp would keep both
        let position = if position == 0.0 { 0.0 } else { position };
        match self.lanes.binary_search_by(|lane| lane.position.total_cmp(&position)) {
            Ok(_) => false,
            Err(index) => {
                self.lanes.insert(index, OrderedLane { id, position, is_transit });
                true
            }
        }
    }

    pub fn from_lanes<I>(lanes: I) -> Self
    where
        I: IntoIterator<Item = (LaneId, f32, bool)>,
    {
        let mut set = Self::new();
        for (id, position, is_transit) in lanes {
            if !set.insert(id, position, is_transit) {
                log::warn!("Lane {} has the same position ({:.2}) as another lane and will be skipped", id.0, position);
            }
        }
        set
    }

    pub fn len(&self) -> usize {
        self.lanes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lanes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &OrderedLane> {
        self.lanes.iter()
    }

    pub fn ids(&self) -> Vec<LaneId> {
        self.lanes.iter().map(|lane| lane.id).collect()
    }

    pub fn transit_count(&self) -> usize {
        self.lanes.iter().filter(|lane| lane.is_transit).count()
    }

    pub fn transit_indices(&self) -> Vec<usize> {
        self.lanes
            .iter()
            .enumerate()
            .filter(|(_, lane)| lane.is_transit)
            .map(|(i, _)| i)
            .collect()
    }

    pub fn merge_with(&mut self, other: &OrderedLanes) {
        // Road-major order, not re-sorted
        self.lanes.extend(other.lanes.iter().copied());
    }
}
