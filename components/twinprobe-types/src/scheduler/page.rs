use serde::{Deserialize, Serialize};

/// Pagination parameters for task list queries.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, Hash, PartialEq, Eq)]
pub struct Page {
    /// Number of records to skip.
    pub offset: usize,
    /// Maximum number of records to return.
    pub size: usize,
}

impl Default for Page {
    fn default() -> Self {
        Self {
            offset: 0,
            size: 100,
        }
    }
}
