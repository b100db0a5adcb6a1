//! Precomputed revenue time series

use serde::{Deserialize, Serialize};

/// One precomputed revenue row: a period label and its amount
///
/// Read-only passthrough; no transformation happens beyond fetching.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Revenue {
    pub month: String,
    pub revenue: i64,
}
