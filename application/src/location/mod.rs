pub mod fallbacks;
pub mod filters;
pub mod resolver;
