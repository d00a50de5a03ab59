pub mod report_cache_memory;
pub mod resolution_cache_memory;
