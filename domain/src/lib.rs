pub mod bounded_cache;
pub mod claim;
pub mod error;
pub mod geometry;
pub mod location;
pub mod point;
pub mod report;
