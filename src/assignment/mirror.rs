use super::{LaneAssignment, TurnFlags};

impl TurnFlags {
    pub fn mirrored(self) -> Self {
        // Forward stays, left and right swap
        let mut mirrored = self.bits() & TurnFlags::FORWARD.bits();
        if self.contains(TurnFlags::LEFT) {
            mirrored |= TurnFlags::RIGHT.bits();
        }
        if self.contains(TurnFlags::RIGHT) {
            mirrored |= TurnFlags::LEFT.bits();
        }
        TurnFlags::from_bits_truncate(mirrored)
    }
}

/// Converts an assignment list between right- and left-hand traffic frames.
/// Applying it twice with the same count restores the input.
pub fn mirror_assignments(lanes: &mut [LaneAssignment], outgoing_count: usize) {
    let last_index = outgoing_count.saturating_sub(1);

    lanes.reverse();
    for lane in lanes.iter_mut() {
        // Ranges are reflected, lanes sharing a target keep sharing it
        let first = last_index.saturating_sub(lane.last_target);
        let last = last_index.saturating_sub(lane.first_target);
        lane.direction = lane.direction.mirrored();
        lane.first_target = first;
        lane.last_target = last;
    }
}
