use crate::core::error::{ProductError, RegistryError};
use crate::models::product::ProductId;
use crate::models::user::UserStatus;
use serde::Deserialize;
use serde_json::Value;

/// Partial user record as posted by clients. Every field is optional;
/// which ones are required depends on the action.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPayload {
    pub id: Option<u32>,
    pub name: Option<String>,
    pub status: Option<String>,
    pub device_model: Option<String>,
}

/// Body of `POST /users`
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserActionRequest {
    pub action: Option<String>,
    pub user: Option<UserPayload>,
    /// Sent by some firmware revisions; only logged
    pub old_user: Option<Value>,
    /// Device-side timestamp; only logged
    pub timestamp: Option<Value>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub id: Option<u32>,
    pub name: String,
    pub status: UserStatus,
    pub device_model: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserPatch {
    pub id: u32,
    pub name: Option<String>,
    pub status: Option<UserStatus>,
    pub device_model: Option<String>,
}

/// A registry mutation whose required fields have been checked
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserCommand {
    Add(NewUser),
    Update(UserPatch),
    Delete { id: u32 },
}

impl UserCommand {
    pub fn action(&self) -> &'static str {
        match self {
            UserCommand::Add(_) => "add",
            UserCommand::Update(_) => "update",
            UserCommand::Delete { .. } => "delete",
        }
    }

    /// Build a command from an action name and its payload.
    ///
    /// The action is checked before the payload, so an unknown action is
    /// reported even when the payload is missing too.
    pub fn parse(action: &str, payload: Option<UserPayload>) -> Result<Self, RegistryError> {
        match action {
            "add" => {
                let payload = payload.unwrap_or_default();
                let (name, device_model) = match (
                    present(payload.name),
                    present(payload.device_model),
                ) {
                    (Some(name), Some(device_model)) => (name, device_model),
                    _ => {
                        return Err(RegistryError::Validation(
                            "Missing required fields: name and deviceModel".to_string(),
                        ))
                    }
                };

                Ok(UserCommand::Add(NewUser {
                    id: payload.id.filter(|id| *id != 0),
                    name,
                    status: parse_status(payload.status)?.unwrap_or_default(),
                    device_model,
                }))
            }
            "update" => {
                let payload = payload.unwrap_or_default();
                let id = require_id(payload.id)?;

                Ok(UserCommand::Update(UserPatch {
                    id,
                    name: present(payload.name),
                    status: parse_status(payload.status)?,
                    device_model: present(payload.device_model),
                }))
            }
            "delete" => {
                let payload = payload.unwrap_or_default();
                Ok(UserCommand::Delete {
                    id: require_id(payload.id)?,
                })
            }
            other => Err(RegistryError::UnknownAction(other.to_string())),
        }
    }
}

impl UserActionRequest {
    pub fn validate(self) -> Result<UserCommand, RegistryError> {
        let action = self
            .action
            .as_deref()
            .map(str::trim)
            .filter(|a| !a.is_empty())
            .unwrap_or("(none)")
            .to_string();

        UserCommand::parse(&action, self.user)
    }
}

/// Body of `POST /api/product`
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductStatusRequest {
    pub username: Option<String>,
    pub product_id: Option<ProductId>,
    pub status: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedProductStatus {
    pub username: String,
    pub product_id: ProductId,
    pub status: UserStatus,
}

impl ProductStatusRequest {
    pub fn validate(self) -> Result<ValidatedProductStatus, ProductError> {
        let username = present(self.username);
        let product_id = self.product_id.filter(|p| !p.is_blank());
        let status = present(self.status);

        let (username, product_id, status) = match (username, product_id, status) {
            (Some(u), Some(p), Some(s)) => (u, p, s),
            _ => return Err(ProductError::MissingFields),
        };

        let status = status
            .parse::<UserStatus>()
            .map_err(|_| ProductError::InvalidStatus)?;

        Ok(ValidatedProductStatus {
            username,
            product_id,
            status,
        })
    }
}

fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn require_id(id: Option<u32>) -> Result<u32, RegistryError> {
    id.filter(|id| *id != 0)
        .ok_or_else(|| RegistryError::Validation("Missing required field: user ID".to_string()))
}

fn parse_status(status: Option<String>) -> Result<Option<UserStatus>, RegistryError> {
    present(status)
        .map(|s| s.parse::<UserStatus>().map_err(RegistryError::Validation))
        .transpose()
}
