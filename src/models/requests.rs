use serde::{Deserialize, Serialize};
use validator::Validate;

/// Options for a batch lookup
///
/// `batch_size` is accepted and validated, but lookups always run one
/// identifier at a time.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct LookupOptions {
    #[serde(rename = "batchSize", default)]
    #[validate(range(min = 1))]
    pub batch_size: Option<usize>,
}

impl LookupOptions {
    pub fn with_batch_size(batch_size: usize) -> Self {
        Self {
            batch_size: Some(batch_size),
        }
    }
}
