use super::{LaneAssignment, TurnFlags};
use crate::junction::{Direction, OrderedLane, OrderedLanes};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExtractedBusLane {
    pub lane: OrderedLane,
    pub index: usize,
}

#[derive(Debug, Clone, Default)]
pub struct BusLaneSplit {
    pub ordinary: Vec<OrderedLane>,
    pub extracted: Vec<ExtractedBusLane>,
}

impl BusLaneSplit {
    pub fn split(lanes: &OrderedLanes) -> Self {
        // A junction approached only by bus lanes is connected like any other
        let transit_count = lanes.transit_count();
        if transit_count == lanes.len() {
            if transit_count > 0 {
                log::debug!("All {} incoming lanes are bus lanes, treating them as ordinary lanes", transit_count);
            }
            return Self {
                ordinary: lanes.iter().copied().collect(),
                extracted: Vec::new(),
            };
        }

        let mut split = Self::default();
        for (index, lane) in lanes.iter().enumerate() {
            if lane.is_transit {
                split.extracted.push(ExtractedBusLane { lane: *lane, index });
            } else {
                split.ordinary.push(*lane);
            }
        }
        split
    }

    pub fn total_len(&self) -> usize {
        self.ordinary.len() + self.extracted.len()
    }

    /// Puts the bus lanes back at their original indices. `assignments` must
    /// hold one entry per ordinary lane, in order.
    pub fn reinsert(&self, assignments: Vec<LaneAssignment>) -> Vec<LaneAssignment> {
        if self.extracted.is_empty() {
            return assignments;
        }

        let mut slots: Vec<Option<LaneAssignment>> = vec![None; self.total_len()];
        let mut is_bus = vec![false; self.total_len()];
        for bus in &self.extracted {
            is_bus[bus.index] = true;
        }

        let mut ordinary = assignments.into_iter();
        for (slot, &bus) in slots.iter_mut().zip(is_bus.iter()) {
            if !bus {
                *slot = ordinary.next();
            }
        }

        // Ascending order, so a bus lane's left neighbour is always filled in
        for bus in &self.extracted {
            let index = bus.index;
            let left = if index > 0 { slots[index - 1] } else { None };
            let right = (index + 1..slots.len())
                .find(|&i| !is_bus[i])
                .and_then(|i| slots[i]);

            // No arrows, union of the neighbours' ranges
            let inherited = match (left, right) {
                (Some(left), Some(right)) => Some(LaneAssignment::new(
                    TurnFlags::NONE,
                    left.first_target.min(right.first_target),
                    left.last_target.max(right.last_target),
                )),
                (Some(only), None) | (None, Some(only)) => {
                    Some(LaneAssignment::new(TurnFlags::NONE, only.first_target, only.last_target))
                }
                (None, None) => None,
            };

            slots[index] = inherited;
        }

        slots.into_iter().flatten().collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutgoingBusLane {
    // Index in the full outgoing lane list, bus lanes included
    pub index: usize,
    pub direction: Direction,
}

/// Reinserts outgoing bus lanes into an assignment computed without them.
pub fn fold_outgoing_bus_lanes(lanes: &mut [LaneAssignment], bus_lanes: &[OutgoingBusLane]) {
    if lanes.is_empty() {
        return;
    }

    let mut ordered = bus_lanes.to_vec();
    ordered.sort_by_key(|bus| bus.index);

    for bus in ordered {
        let target = bus.index;
        let flag = TurnFlags::from(bus.direction);

        // Make room for the bus lane
        for lane in lanes.iter_mut() {
            if lane.first_target >= target {
                lane.first_target += 1;
            }
            if lane.last_target >= target {
                lane.last_target += 1;
            }
        }

        // A lane already spanning the new index keeps it
        let owner = match lanes.iter().position(|lane| lane.contains(target)) {
            Some(spanning) => spanning,
            None => match nearest_owner(lanes, target, flag) {
                Some(owner) => owner,
                None => continue,
            },
        };

        let lane = &mut lanes[owner];
        lane.first_target = lane.first_target.min(target);
        lane.last_target = lane.last_target.max(target);
        lane.direction |= flag;
    }
}

fn nearest_owner(lanes: &[LaneAssignment], target: usize, flag: TurnFlags) -> Option<usize> {
    let on_left = if target > 0 {
        lanes.iter().rposition(|lane| lane.contains(target - 1))
    } else {
        None
    };
    let on_right = lanes.iter().position(|lane| lane.contains(target + 1));

    // Left turning bus lanes look left first, everything else looks right first
    if flag.contains(TurnFlags::LEFT) {
        let owner = on_left.or(on_right)?;
        // The neighbour has no left arrow, hand it to the lane left of it
        if owner > 0 && !lanes[owner].direction.contains(TurnFlags::LEFT) {
            Some(owner - 1)
        } else {
            Some(owner)
        }
    } else {
        on_right.or(on_left)
    }
}
