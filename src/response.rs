//! Response bodies shared across handlers.

use serde::{Deserialize, Serialize};

/// `{"count": n}` returned by count and bulk update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountBody {
    pub count: u64,
}
