#![forbid(unsafe_code)]

pub mod access;
pub mod error;
pub mod model;
pub mod progression;
pub mod time;

pub use access::{AccessDecision, AccessState, SessionSnapshot, ViewAccess, authorize};
pub use error::Error;
pub use time::Clock;
