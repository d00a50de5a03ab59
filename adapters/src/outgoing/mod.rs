pub mod arcgis_reqwest;
pub mod clock;
pub mod memory;
pub mod report_http;
