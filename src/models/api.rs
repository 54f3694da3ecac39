use crate::models::user::UserRecord;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
pub struct UserListResponse {
    pub success: bool,
    pub data: Vec<UserRecord>,
    pub message: String,
    pub count: usize,
}

impl UserListResponse {
    pub fn new(users: Vec<UserRecord>) -> Self {
        let count = users.len();
        Self {
            success: true,
            data: users,
            message: format!("Found {} users", count),
            count,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UserLookupResponse {
    pub success: bool,
    pub data: UserRecord,
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserActionResponse {
    pub success: bool,
    pub message: String,
    pub timestamp: String,
    pub data: Option<UserRecord>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub old_user: Option<UserRecord>,
    pub all_users: Vec<UserRecord>,
    pub count: usize,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SuccessResponse {
    pub success: bool,
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub timestamp: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MethodNotAllowedResponse {
    pub error: String,
    pub method: String,
    pub allowed_methods: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaptureResponse {
    pub success: bool,
    pub message: String,
    pub request_id: u64,
    pub total_requests: usize,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PingResponse {
    pub message: String,
    pub method: String,
    pub url: String,
    pub timestamp: String,
}
