use common::CapacityBounds;

use crate::schemas::CapacityQuery;

/// Capacity from the query, or the advisory default when none was given.
pub fn determine_capacity(query: &CapacityQuery, bounds: &CapacityBounds) -> f64 {
    query.capacity.unwrap_or(bounds.default as f64)
}

/// Cache key for a capacity-dependent response.
pub fn cache_key(kind: &str, capacity: f64) -> String {
    format!("{}_{}", kind, capacity.to_bits())
}
