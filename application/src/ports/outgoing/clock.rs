use std::sync::Arc;
use std::time::Instant;

pub trait ClockPort: Send + Sync {
    fn now(&self) -> Instant;
}

pub type DynClockPort = Arc<dyn ClockPort>;
