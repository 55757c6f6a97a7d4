use std::cmp::Ordering;

use super::{binomial, Combinations, Handedness, LaneAssignment, LaneSetupFeatures, TurnFlags};
use crate::junction::LaneDirectionCounts;

pub fn outgoing_slots(counts: &LaneDirectionCounts) -> Vec<TurnFlags> {
    let mut slots = Vec::with_capacity(counts.connectable());
    slots.extend(std::iter::repeat(TurnFlags::LEFT).take(counts.left));
    slots.extend(std::iter::repeat(TurnFlags::FORWARD).take(counts.forward));
    slots.extend(std::iter::repeat(TurnFlags::RIGHT).take(counts.right));
    slots
}

/// Assigns `incoming_count` lanes to the left, forward and right lanes in
/// `counts`. Returns one assignment per incoming lane, or nothing if there is
/// nothing to connect.
pub fn assign_lanes(incoming_count: usize, counts: &LaneDirectionCounts, handedness: Handedness) -> Vec<LaneAssignment> {
    // Sharp lanes are handled by the caller
    let slots = outgoing_slots(counts);
    if incoming_count == 0 || slots.is_empty() {
        return Vec::new();
    }

    match slots.len().cmp(&incoming_count) {
        Ordering::Equal => assign_one_to_one(&slots),
        Ordering::Less => assign_more_in_than_out(incoming_count, &slots, handedness),
        Ordering::Greater => assign_more_out_than_in(incoming_count, &slots, handedness),
    }
}

fn assign_one_to_one(slots: &[TurnFlags]) -> Vec<LaneAssignment> {
    slots
        .iter()
        .enumerate()
        .map(|(index, &direction)| LaneAssignment::new(direction, index, index))
        .collect()
}

/// Incoming lanes per outgoing lane when incoming lanes have to merge.
pub fn incoming_lanes_per_slot(incoming_count: usize, slot_count: usize, handedness: Handedness) -> Vec<usize> {
    if slot_count == 0 {
        return Vec::new();
    }

    let base = incoming_count / slot_count;
    let extra = incoming_count % slot_count;

    // Surplus goes to the outermost lanes, an odd one to the inner side
    let (from_left, from_right) = match handedness {
        Handedness::RightHand => (extra - extra / 2, extra / 2),
        Handedness::LeftHand => (extra / 2, extra - extra / 2),
    };

    let mut per_slot = vec![base; slot_count];
    for count in per_slot.iter_mut().take(from_left) {
        *count += 1;
    }
    for count in per_slot.iter_mut().rev().take(from_right) {
        *count += 1;
    }
    per_slot
}

fn assign_more_in_than_out(incoming_count: usize, slots: &[TurnFlags], handedness: Handedness) -> Vec<LaneAssignment> {
    let per_slot = incoming_lanes_per_slot(incoming_count, slots.len(), handedness);

    let mut lanes = Vec::with_capacity(incoming_count);
    for (index, (&direction, &count)) in slots.iter().zip(per_slot.iter()).enumerate() {
        lanes.extend(std::iter::repeat(LaneAssignment::new(direction, index, index)).take(count));
    }
    lanes
}

/// Splits the outgoing lanes into contiguous groups, one per incoming lane.
pub fn partition_slots(slots: &[TurnFlags], incoming_count: usize, min_per_lane: usize, bonus: &[usize]) -> Vec<LaneAssignment> {
    let mut lanes = Vec::with_capacity(incoming_count);
    let mut next = 0;

    for lane in 0..incoming_count {
        // Lanes listed in `bonus` take one extra outgoing lane
        let size = min_per_lane + usize::from(bonus.contains(&lane));
        let first = next;
        let last = first + size - 1;
        let direction = slots[first..=last].iter().fold(TurnFlags::NONE, |acc, &slot| acc | slot);
        lanes.push(LaneAssignment::new(direction, first, last));
        next = last + 1;
    }

    lanes
}

fn assign_more_out_than_in(incoming_count: usize, slots: &[TurnFlags], handedness: Handedness) -> Vec<LaneAssignment> {
    let min_per_lane = slots.len() / incoming_count;
    let extra = slots.len() % incoming_count;

    log::debug!(
        "Searching {} setups for {} lanes in, {} lanes out",
        binomial(incoming_count, extra),
        incoming_count,
        slots.len()
    );

    let mut best: Option<(Vec<LaneAssignment>, LaneSetupFeatures)> = None;

    // Every way of handing out the extra lanes; ties keep the first candidate
    for bonus in Combinations::new(incoming_count, extra) {
        let lanes = partition_slots(slots, incoming_count, min_per_lane, &bonus);
        let features = LaneSetupFeatures::evaluate(&lanes, slots, handedness);

        let is_better = match &best {
            Some((_, best_features)) => features.is_better_than(best_features, handedness),
            None => true,
        };

        if is_better {
            best = Some((lanes, features));
        }
    }

    let Some((lanes, features)) = best else {
        return Vec::new();
    };

    if !features.valid {
        let summary: Vec<String> = lanes.iter().map(|lane| lane.to_string()).collect();
        log::error!(
            "Selected setup does not meet minimum requirements: [{}], lanes in: {}, lanes out: {}",
            summary.join(", "),
            incoming_count,
            slots.len()
        );
    } else {
        log::debug!("Selected setup for {} lanes in, {} lanes out: {}", incoming_count, slots.len(), features);
    }

    lanes
}
