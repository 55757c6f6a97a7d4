use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

pub mod classify;
pub mod lanes;
pub mod tally;

pub use classify::*;
pub use lanes::*;
pub use tally::*;

pub type Vec2 = Vector2<f32>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LaneId(pub u32);

/// Turn category of an outgoing lane relative to the incoming direction of travel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    SharpLeft,
    Left,
    Forward,
    Right,
    SharpRight,
}

impl Direction {
    pub const ALL: [Direction; 5] = [
        Direction::SharpLeft,
        Direction::Left,
        Direction::Forward,
        Direction::Right,
        Direction::SharpRight,
    ];

    pub fn mirrored(self) -> Self {
        match self {
            Direction::SharpLeft => Direction::SharpRight,
            Direction::Left => Direction::Right,
            Direction::Forward => Direction::Forward,
            Direction::Right => Direction::Left,
            Direction::SharpRight => Direction::SharpLeft,
        }
    }
}

/// Number of outgoing lanes in each turn category at one junction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LaneDirectionCounts {
    pub sharp_left: usize,
    pub left: usize,
    pub forward: usize,
    pub right: usize,
    pub sharp_right: usize,
}

impl LaneDirectionCounts {
    pub fn new(sharp_left: usize, left: usize, forward: usize, right: usize, sharp_right: usize) -> Self {
        Self { sharp_left, left, forward, right, sharp_right }
    }

    pub fn get(&self, direction: Direction) -> usize {
        match direction {
            Direction::SharpLeft => self.sharp_left,
            Direction::Left => self.left,
            Direction::Forward => self.forward,
            Direction::Right => self.right,
            Direction::SharpRight => self.sharp_right,
        }
    }

    pub fn get_mut(&mut self, direction: Direction) -> &mut usize {
        match direction {
            Direction::SharpLeft => &mut self.sharp_left,
            Direction::Left => &mut self.left,
            Direction::Forward => &mut self.forward,
            Direction::Right => &mut self.right,
            Direction::SharpRight => &mut self.sharp_right,
        }
    }

    pub fn add(&mut self, direction: Direction, count: usize) {
        *self.get_mut(direction) += count;
    }

    /// Lanes reachable through ordinary left, forward or right turns.
    pub fn connectable(&self) -> usize {
        self.left + self.forward + self.right
    }

    pub fn sharp(&self) -> usize {
        self.sharp_left + self.sharp_right
    }

    pub fn total(&self) -> usize {
        self.connectable() + self.sharp()
    }

    /// Direction of the outgoing lane at `index`, counting left to right
    /// through sharp left, left, forward, right and sharp right lanes.
    pub fn direction_at(&self, index: usize) -> Direction {
        let mut index = index;
        for direction in Direction::ALL {
            let count = self.get(direction);
            if index < count {
                return direction;
            }
            index -= count;
        }
        Direction::SharpRight
    }

    /// Swaps left and right semantics for left-hand traffic.
    pub fn mirror(&mut self) {
        std::mem::swap(&mut self.left, &mut self.right);
        std::mem::swap(&mut self.sharp_left, &mut self.sharp_right);
    }
}
