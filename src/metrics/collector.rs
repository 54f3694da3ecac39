use crate::stores::product_store::ProductStore;
use crate::stores::request_log::RequestLog;
use crate::stores::user_registry::UserRegistry;
use crate::utils::time::current_timestamp;
use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};

pub struct Metrics {
    pub user_actions: AtomicU64,
    pub successful_actions: AtomicU64,
    pub failed_actions: AtomicU64,
    pub product_updates: AtomicU64,
    pub failed_product_updates: AtomicU64,
    pub captured_requests: AtomicU64,
    pub start_time: i64,
}

#[derive(Debug, Clone, Serialize, serde::Deserialize)]
pub struct MetricsSnapshot {
    pub user_actions: u64,
    pub successful_actions: u64,
    pub failed_actions: u64,
    pub success_rate: f64,
    #[serde(rename = "registered_users")]
    pub registry_size: usize,
    pub next_user_id: u32,
    pub product_updates: u64,
    pub failed_product_updates: u64,
    pub product_writes: u64,
    pub captured_requests: u64,
    pub stored_requests: usize,
    pub uptime_seconds: i64,
}

impl Metrics {
    pub fn new() -> Self {
        Self {
            user_actions: AtomicU64::new(0),
            successful_actions: AtomicU64::new(0),
            failed_actions: AtomicU64::new(0),
            product_updates: AtomicU64::new(0),
            failed_product_updates: AtomicU64::new(0),
            captured_requests: AtomicU64::new(0),
            start_time: current_timestamp(),
        }
    }


    pub fn record_action(&self, succeeded: bool) {
        self.user_actions.fetch_add(1, Ordering::Relaxed);
        if succeeded {
            self.successful_actions.fetch_add(1, Ordering::Relaxed);
        } else {
            self.failed_actions.fetch_add(1, Ordering::Relaxed);
        }
    }


    pub fn record_product_update(&self, succeeded: bool) {
        self.product_updates.fetch_add(1, Ordering::Relaxed);
        if !succeeded {
            self.failed_product_updates.fetch_add(1, Ordering::Relaxed);
        }
    }


    pub fn increment_captured(&self) {
        self.captured_requests.fetch_add(1, Ordering::Relaxed);
    }


    /// Collects counters and store sizes and derives success_rate and uptime_seconds.
    pub fn get_snapshot(
        &self,
        registry: &UserRegistry,
        request_log: &RequestLog,
        product_store: &ProductStore,
    ) -> MetricsSnapshot {
        let user_actions = self.user_actions.load(Ordering::Relaxed);
        let successful_actions = self.successful_actions.load(Ordering::Relaxed);

        let success_rate = if user_actions > 0 {
            (successful_actions as f64 / user_actions as f64) * 100.0
        } else {
            0.0
        };

        MetricsSnapshot {
            user_actions,
            successful_actions,
            failed_actions: self.failed_actions.load(Ordering::Relaxed),
            success_rate,
            registry_size: registry.len(),
            next_user_id: registry.next_id(),
            product_updates: self.product_updates.load(Ordering::Relaxed),
            failed_product_updates: self.failed_product_updates.load(Ordering::Relaxed),
            product_writes: product_store.writes(),
            captured_requests: self.captured_requests.load(Ordering::Relaxed),
            stored_requests: request_log.len(),
            uptime_seconds: current_timestamp() - self.start_time,
        }
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}
