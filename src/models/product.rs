use serde::{Deserialize, Serialize};
use std::fmt;

/// Product identifiers arrive either as JSON numbers or strings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ProductId {
    Number(u64),
    Text(String),
}

impl ProductId {
    pub fn is_blank(&self) -> bool {
        match self {
            ProductId::Number(n) => *n == 0,
            ProductId::Text(s) => s.trim().is_empty(),
        }
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProductId::Number(n) => write!(f, "{}", n),
            ProductId::Text(s) => f.write_str(s),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductUpdate {
    pub product_id: ProductId,
    pub status: String,
    pub updated_by: String,
    pub updated_at: String,
    pub processing_time: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ProductUpdateResponse {
    pub success: bool,
    pub message: String,
    pub data: ProductUpdate,
}
