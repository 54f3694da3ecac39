use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// A POST request kept for the request viewer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CapturedRequest {
    pub id: u64,
    /// ISO-8601 receive time
    pub timestamp: String,
    pub method: String,
    pub headers: BTreeMap<String, String>,
    pub body: Value,
    pub query: BTreeMap<String, String>,
}
