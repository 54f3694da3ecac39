use crate::models::captured::CapturedRequest;
use dashmap::DashMap;
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};

/// Bounded in-memory log of captured POST requests
///
/// Ids are sequential; once more than `capacity` requests are held the
/// oldest one is evicted. The log is lost on restart.
pub struct RequestLog {
    requests: DashMap<u64, CapturedRequest>,
    next_id: AtomicU64,
    capacity: usize,
}

impl RequestLog {
    pub fn new(capacity: usize) -> Self {
        Self {
            requests: DashMap::new(),
            next_id: AtomicU64::new(1),
            capacity: capacity.max(1),
        }
    }

    /// Store a request and return its id
    pub fn capture(
        &self,
        method: String,
        headers: BTreeMap<String, String>,
        body: Value,
        query: BTreeMap<String, String>,
    ) -> u64 {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);

        self.requests.insert(
            id,
            CapturedRequest {
                id,
                timestamp: crate::utils::time::iso_timestamp(),
                method,
                headers,
                body,
                query,
            },
        );

        if let Some(evict) = id.checked_sub(self.capacity as u64) {
            self.requests.remove(&evict);
        }

        id
    }

    /// Captured requests, newest first
    pub fn newest_first(&self) -> Vec<CapturedRequest> {
        let mut requests: Vec<CapturedRequest> = self
            .requests
            .iter()
            .map(|entry| entry.value().clone())
            .collect();

        requests.sort_unstable_by(|a, b| b.id.cmp(&a.id));
        requests
    }

    /// Drop every captured request. Ids keep counting up.
    pub fn clear(&self) -> usize {
        let removed = self.requests.len();
        self.requests.clear();
        removed
    }

    pub fn len(&self) -> usize {
        self.requests.len()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn is_empty(&self) -> bool {
        self.requests.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn capture(log: &RequestLog, body: Value) -> u64 {
        log.capture("POST".to_string(), BTreeMap::new(), body, BTreeMap::new())
    }

    #[test]
    fn test_capture_assigns_sequential_ids() {
        let log = RequestLog::new(10);

        assert_eq!(capture(&log, json!({"n": 1})), 1);
        assert_eq!(capture(&log, json!({"n": 2})), 2);
        assert_eq!(log.len(), 2);
    }

    #[test]
    fn test_newest_first() {
        let log = RequestLog::new(10);
        for n in 0..3 {
            capture(&log, json!({ "n": n }));
        }

        let ids: Vec<u64> = log.newest_first().iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![3, 2, 1]);

        // listing does not reorder the log
        let again: Vec<u64> = log.newest_first().iter().map(|r| r.id).collect();
        assert_eq!(again, ids);
    }

    #[test]
    fn test_capacity_evicts_oldest() {
        let log = RequestLog::new(2);
        for n in 0..5 {
            capture(&log, json!(n));
        }

        let ids: Vec<u64> = log.newest_first().iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![5, 4]);
    }

    #[test]
    fn test_clear() {
        let log = RequestLog::new(10);
        capture(&log, Value::Null);
        capture(&log, Value::Null);

        assert_eq!(log.clear(), 2);
        assert!(log.is_empty());

        // ids are not reused after a clear
        assert_eq!(capture(&log, Value::Null), 3);
    }
}
