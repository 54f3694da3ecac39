use crate::core::error::ProductError;
use crate::validation::payload::ValidatedProductStatus;
use rand::Rng;
use std::sync::atomic::{AtomicU64, Ordering};

/// Reported processing time range in milliseconds, upper bound exclusive
const PROCESSING_MS: std::ops::Range<u64> = 50..150;

/// Stand-in for the product database used by the demo.
///
/// Writes are not kept anywhere; a configurable share of them fails to
/// exercise client retry paths.
pub struct ProductStore {
    failure_rate: f64,
    writes: AtomicU64,
}

impl ProductStore {
    pub fn new(failure_rate: f64) -> Self {
        Self {
            failure_rate: failure_rate.clamp(0.0, 1.0),
            writes: AtomicU64::new(0),
        }
    }

    /// Simulate a status write. Returns the reported processing time in ms.
    pub fn write_status(&self, update: &ValidatedProductStatus) -> Result<u64, ProductError> {
        let mut rng = rand::rng();

        if rng.random::<f64>() < self.failure_rate {
            tracing::warn!(
                product_id = %update.product_id,
                username = %update.username,
                "Simulated product store failure"
            );
            return Err(ProductError::StoreUnavailable);
        }

        self.writes.fetch_add(1, Ordering::Relaxed);
        Ok(rng.random_range(PROCESSING_MS))
    }

    /// Number of successful writes since start
    pub fn writes(&self) -> u64 {
        self.writes.load(Ordering::Relaxed)
    }
}
