use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConnectorError {
    #[error("Unknown lane: {0}")]
    UnknownLane(u32),

    #[error("Unknown segment: {0}")]
    UnknownSegment(u16),

    #[error("Unknown node: {0}")]
    UnknownNode(u16),

    #[error("Target index {index} for lane {lane} does not fit a lane record (max {max})")]
    TargetOutOfRange { lane: u32, index: usize, max: usize },
}
