use std::cmp::Ordering;
use std::fmt;

use super::{Handedness, LaneAssignment, TurnFlags};

/// Properties of one candidate lane setup used to rank it against others.
#[derive(Debug, Clone, PartialEq)]
pub struct LaneSetupFeatures {
    /// False if two neighbouring lanes with identical arrows connect to a
    /// different number of lanes the wrong way round.
    pub valid: bool,
    pub has_left_forward_right_lane: bool,
    pub has_left_right_lane: bool,
    pub has_left_forward_lane: bool,
    pub has_forward_right_lane: bool,
    /// Incoming lanes with any forward connection, mixed lanes included.
    pub num_forward_lanes: usize,
    pub forward_imbalance: usize,
    pub left_imbalance: usize,
    pub right_imbalance: usize,
    /// (left out / left in) over (right out / right in), inverted to be >= 1.
    pub left_right_out_in_ratio_imbalance: f32,
}

impl Default for LaneSetupFeatures {
    fn default() -> Self {
        Self {
            valid: true,
            has_left_forward_right_lane: false,
            has_left_right_lane: false,
            has_left_forward_lane: false,
            has_forward_right_lane: false,
            num_forward_lanes: 0,
            forward_imbalance: 0,
            left_imbalance: 0,
            right_imbalance: 0,
            left_right_out_in_ratio_imbalance: 1.0,
        }
    }
}

#[derive(Debug, Default)]
struct ConnectionSpread {
    lanes: usize,
    min: usize,
    max: usize,
}

impl ConnectionSpread {
    fn record(&mut self, connections: usize) {
        if connections == 0 {
            return;
        }
        if self.lanes == 0 {
            self.min = connections;
            self.max = connections;
        } else {
            self.min = self.min.min(connections);
            self.max = self.max.max(connections);
        }
        self.lanes += 1;
    }

    fn imbalance(&self) -> usize {
        self.max - self.min
    }
}

impl LaneSetupFeatures {
    /// Evaluates a candidate. `slots` holds the direction of every outgoing
    /// lane, left to right, in the frame described by `handedness`.
    pub fn evaluate(lanes: &[LaneAssignment], slots: &[TurnFlags], handedness: Handedness) -> Self {
        let mut features = LaneSetupFeatures::default();

        // The lane with more connections must sit on the outer side of its twin
        for pair in lanes.windows(2) {
            let (inner, outer) = match handedness {
                Handedness::RightHand => (&pair[0], &pair[1]),
                Handedness::LeftHand => (&pair[1], &pair[0]),
            };
            if inner.direction == outer.direction && inner.lane_count() < outer.lane_count() {
                features.valid = false;
            }
        }

        let mut left = ConnectionSpread::default();
        let mut forward = ConnectionSpread::default();
        let mut right = ConnectionSpread::default();

        for lane in lanes {
            features.has_left_forward_right_lane |= lane.direction == TurnFlags::LEFT_FORWARD_RIGHT;
            features.has_left_right_lane |= lane.direction == TurnFlags::LEFT_RIGHT;
            features.has_left_forward_lane |= lane.direction == TurnFlags::LEFT_FORWARD;
            features.has_forward_right_lane |= lane.direction == TurnFlags::FORWARD_RIGHT;

            let targets = &slots[lane.first_target..=lane.last_target];
            let count = |flag: TurnFlags| targets.iter().filter(|&&slot| slot == flag).count();

            left.record(count(TurnFlags::LEFT));
            forward.record(count(TurnFlags::FORWARD));
            right.record(count(TurnFlags::RIGHT));
        }

        features.num_forward_lanes = forward.lanes;
        features.forward_imbalance = forward.imbalance();
        features.left_imbalance = left.imbalance();
        features.right_imbalance = right.imbalance();

        if left.lanes > 0 && right.lanes > 0 {
            let left_out = slots.iter().filter(|&&slot| slot == TurnFlags::LEFT).count();
            let right_out = slots.iter().filter(|&&slot| slot == TurnFlags::RIGHT).count();

            let left_ratio = left_out as f32 / left.lanes as f32;
            let right_ratio = right_out as f32 / right.lanes as f32;

            features.left_right_out_in_ratio_imbalance = left_ratio.max(right_ratio) / left_ratio.min(right_ratio);
        }

        features
    }

    /// Ranks two setups. `Greater` means `self` is preferred.
    pub fn compare(&self, other: &Self, handedness: Handedness) -> Ordering {
        // `true` ranks above `false` for every flag compared here
        let prefer = |ours: bool, theirs: bool| ours.cmp(&theirs);

        let across_traffic_mix = |f: &Self| match handedness {
            Handedness::RightHand => !f.has_left_forward_lane,
            Handedness::LeftHand => !f.has_forward_right_lane,
        };
        let with_traffic_mix = |f: &Self| match handedness {
            Handedness::RightHand => !f.has_forward_right_lane,
            Handedness::LeftHand => !f.has_left_forward_lane,
        };
        let across_traffic_even = |f: &Self| match handedness {
            Handedness::RightHand => f.left_imbalance < 2,
            Handedness::LeftHand => f.right_imbalance < 2,
        };
        let with_traffic_even = |f: &Self| match handedness {
            Handedness::RightHand => f.right_imbalance < 2,
            Handedness::LeftHand => f.left_imbalance < 2,
        };

        prefer(self.valid, other.valid)
            .then_with(|| prefer(!self.has_left_forward_right_lane, !other.has_left_forward_right_lane))
            .then_with(|| prefer(!self.has_left_right_lane, !other.has_left_right_lane))
            .then_with(|| prefer(across_traffic_mix(self), across_traffic_mix(other)))
            .then_with(|| prefer(with_traffic_mix(self), with_traffic_mix(other)))
            .then_with(|| self.num_forward_lanes.cmp(&other.num_forward_lanes))
            .then_with(|| other.forward_imbalance.cmp(&self.forward_imbalance))
            .then_with(|| prefer(across_traffic_even(self), across_traffic_even(other)))
            .then_with(|| prefer(with_traffic_even(self), with_traffic_even(other)))
            .then_with(|| {
                other
                    .left_right_out_in_ratio_imbalance
                    .partial_cmp(&self.left_right_out_in_ratio_imbalance)
                    .unwrap_or(Ordering::Equal)
            })
    }

    pub fn is_better_than(&self, other: &Self, handedness: Handedness) -> bool {
        self.compare(other, handedness) == Ordering::Greater
    }
}

impl fmt::Display for LaneSetupFeatures {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "valid={} LFR={} LR={} LF={} FR={} fwd_lanes={} imbalance(F/L/R)={}/{}/{} lr_ratio={:.2}",
            self.valid,
            self.has_left_forward_right_lane,
            self.has_left_right_lane,
            self.has_left_forward_lane,
            self.has_forward_right_lane,
            self.num_forward_lanes,
            self.forward_imbalance,
            self.left_imbalance,
            self.right_imbalance,
            self.left_right_out_in_ratio_imbalance
        )
    }
}
