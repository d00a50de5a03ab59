#[cfg(any(feature = "adapters", feature = "axum", feature = "reqwest"))]
compile_error!("application must not depend on adapters/framework crates");

pub mod enrichment;
pub mod error;
pub mod infrastructure_config;
pub mod location;
pub mod ports;
pub mod report;
