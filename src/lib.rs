pub mod assignment;
pub mod config;
pub mod connector;
pub mod error;
pub mod junction;
pub mod network;

pub use assignment::*;
pub use config::*;
pub use connector::*;
pub use error::*;
pub use junction::*;
