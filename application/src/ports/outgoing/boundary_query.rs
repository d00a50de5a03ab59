use domain::geometry::BoundaryGeometry;
use std::{fmt, sync::Arc};

/// Which administrative boundary service to ask.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BoundaryLayer {
    Village,
    District,
    State,
}

impl fmt::Display for BoundaryLayer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Village => f.write_str("village"),
            Self::District => f.write_str("district"),
            Self::State => f.write_str("state"),
        }
    }
}

/// Attribute-filtered lookup of a single boundary feature.
///
/// Implementations never fail outward: transport errors, bad statuses and
/// unparsable bodies all come back as `None` so the resolver can move on to
/// the next filter variant or tier.
#[async_trait::async_trait]
pub trait BoundaryQueryPort: Send + Sync {
    async fn query(&self, layer: BoundaryLayer, where_clause: &str) -> Option<BoundaryGeometry>;
}

pub type DynBoundaryQueryPort = Arc<dyn BoundaryQueryPort>;
