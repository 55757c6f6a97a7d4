use super::{LaneAssignment, TurnFlags};
use crate::junction::LaneDirectionCounts;

/// Reclassifies sharp lanes as ordinary turns until every incoming lane fits.
/// Returns the number of lanes folded.
pub fn fold_sharp_turns(counts: &mut LaneDirectionCounts, incoming_count: usize) -> usize {
    let mut folded = 0;

    while incoming_count > counts.connectable() && counts.sharp() > 0 {
        // The side with more sharp lanes folds first, ties fold left
        if counts.sharp_left >= counts.sharp_right {
            counts.sharp_left -= 1;
            counts.left += 1;
        } else {
            counts.sharp_right -= 1;
            counts.right += 1;
        }
        folded += 1;
    }

    if folded > 0 {
        log::debug!("Folded {} sharp lanes into ordinary turns for {} incoming lanes", folded, incoming_count);
    }

    folded
}

pub fn extend_for_sharp_turns(lanes: &mut [LaneAssignment], sharp_left: usize, sharp_right: usize) {
    if lanes.is_empty() {
        return;
    }

    // The outer lanes widen over the sharp lanes on their side
    if sharp_left > 0 {
        for lane in lanes.iter_mut() {
            lane.first_target += sharp_left;
            lane.last_target += sharp_left;
        }
        let leftmost = &mut lanes[0];
        leftmost.first_target = 0;
        leftmost.direction |= TurnFlags::LEFT;
    }

    if sharp_right > 0 {
        let last = lanes.len() - 1;
        let rightmost = &mut lanes[last];
        rightmost.last_target += sharp_right;
        rightmost.direction |= TurnFlags::RIGHT;
    }
}
