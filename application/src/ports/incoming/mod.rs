pub mod location;
pub mod report;
