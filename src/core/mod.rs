pub mod draw;
pub mod engine;
pub mod report;
pub mod roster;
pub mod schedule;
pub mod store;

pub use crate::domain::model::{Assignment, AssignmentSet, Participant};
pub use crate::domain::ports::{ConfigProvider, Storage};
pub use crate::utils::error::Result;
