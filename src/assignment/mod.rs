use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{BitOr, BitOrAssign};

use crate::junction::Direction;

pub mod bus_lanes;
pub mod combinations;
pub mod engine;
pub mod features;
pub mod mirror;
pub mod sharp_turns;

pub use bus_lanes::*;
pub use combinations::*;
pub use engine::*;
pub use features::*;
pub use mirror::*;
pub use sharp_turns::*;

/// Traffic convention of the frame a lane list is expressed in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Handedness {
    #[default]
    RightHand,
    LeftHand,
}

impl Handedness {
    pub fn is_left_hand(self) -> bool {
        matches!(self, Handedness::LeftHand)
    }
}

impl fmt::Display for Handedness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Handedness::RightHand => write!(f, "right-hand traffic"),
            Handedness::LeftHand => write!(f, "left-hand traffic"),
        }
    }
}

/// Turn arrows displayed on an incoming lane.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TurnFlags(u8);

impl TurnFlags {
    pub const NONE: TurnFlags = TurnFlags(0);
    pub const LEFT: TurnFlags = TurnFlags(0b001);
    pub const FORWARD: TurnFlags = TurnFlags(0b010);
    pub const RIGHT: TurnFlags = TurnFlags(0b100);
    pub const LEFT_FORWARD: TurnFlags = TurnFlags(0b011);
    pub const LEFT_RIGHT: TurnFlags = TurnFlags(0b101);
    pub const FORWARD_RIGHT: TurnFlags = TurnFlags(0b110);
    pub const LEFT_FORWARD_RIGHT: TurnFlags = TurnFlags(0b111);

    pub const fn bits(self) -> u8 {
        self.0
    }

    pub const fn from_bits_truncate(bits: u8) -> Self {
        TurnFlags(bits & Self::LEFT_FORWARD_RIGHT.0)
    }

    pub fn contains(self, other: TurnFlags) -> bool {
        self.0 & other.0 == other.0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl From<Direction> for TurnFlags {
    fn from(direction: Direction) -> Self {
        match direction {
            Direction::SharpLeft | Direction::Left => TurnFlags::LEFT,
            Direction::Forward => TurnFlags::FORWARD,
            Direction::Right | Direction::SharpRight => TurnFlags::RIGHT,
        }
    }
}

impl BitOr for TurnFlags {
    type Output = TurnFlags;

    fn bitor(self, rhs: TurnFlags) -> TurnFlags {
        TurnFlags(self.0 | rhs.0)
    }
}

impl BitOrAssign for TurnFlags {
    fn bitor_assign(&mut self, rhs: TurnFlags) {
        self.0 |= rhs.0;
    }
}

impl fmt::Debug for TurnFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl fmt::Display for TurnFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "None");
        }
        let names = [(TurnFlags::LEFT, "Left"), (TurnFlags::FORWARD, "Forward"), (TurnFlags::RIGHT, "Right")];
        let parts: Vec<&str> = names
            .iter()
            .filter(|(flag, _)| self.contains(*flag))
            .map(|(_, name)| *name)
            .collect();
        write!(f, "{}", parts.join("|"))
    }
}

/// Connection of one incoming lane: its arrows and the inclusive range of
/// outgoing lane indices (0 = leftmost) it may turn into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LaneAssignment {
    pub direction: TurnFlags,
    pub first_target: usize,
    pub last_target: usize,
}

impl LaneAssignment {
    pub fn new(direction: TurnFlags, first_target: usize, last_target: usize) -> Self {
        Self {
            direction,
            first_target,
            last_target,
        }
    }

    pub fn lane_count(&self) -> usize {
        self.last_target - self.first_target + 1
    }

    pub fn contains(&self, target: usize) -> bool {
        self.first_target <= target && target <= self.last_target
    }
}

impl fmt::Display for LaneAssignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (lanes: {} to {})", self.direction, self.first_target, self.last_target)
    }
}
