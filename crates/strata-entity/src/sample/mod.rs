//! Sample record served by the database demo endpoint.

use serde::{Deserialize, Serialize};

/// A sample row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SampleRecord {
    pub id: i64,
    pub sample_name: String,
}
