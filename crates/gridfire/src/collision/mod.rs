//! Collision pass and reaction dispatch

pub mod manager;
pub mod policy;
pub mod report;

pub use manager::CollisionManager;
pub use policy::{dispatch, CategoryPair, CategoryPairs};
pub use report::{PassReport, PhaseCounts};
