pub mod report_upstream_reqwest;
