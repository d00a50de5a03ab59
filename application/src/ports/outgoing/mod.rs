pub mod boundary_query;
pub mod clock;
pub mod report_cache;
pub mod report_upstream;
pub mod resolution_cache;
