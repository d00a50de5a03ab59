pub mod geocode;
pub mod health;
pub mod map_points;
pub mod report;
