use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Lifecycle status shared by users and products
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserStatus {
    #[default]
    Active,
    Inactive,
    Pending,
    Discontinued,
}

impl UserStatus {
    pub const ALL: [UserStatus; 4] = [
        UserStatus::Active,
        UserStatus::Inactive,
        UserStatus::Pending,
        UserStatus::Discontinued,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            UserStatus::Active => "active",
            UserStatus::Inactive => "inactive",
            UserStatus::Pending => "pending",
            UserStatus::Discontinued => "discontinued",
        }
    }

    /// Comma separated list of accepted values, used in error messages
    pub fn accepted_values() -> String {
        Self::ALL
            .iter()
            .map(|s| s.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for UserStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| format!("Status must be one of: {}", Self::accepted_values()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    pub id: u32,
    pub name: String,
    pub status: UserStatus,
    pub device_model: String,
}

impl UserRecord {
    pub fn new(id: u32, name: impl Into<String>, status: UserStatus, device_model: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            status,
            device_model: device_model.into(),
        }
    }

    /// Legacy username form: lowercase, whitespace runs collapsed to `_`
    pub fn username(&self) -> String {
        let mut slug = String::with_capacity(self.name.len());
        let mut in_space = false;

        for c in self.name.chars() {
            if c.is_whitespace() {
                if !in_space {
                    slug.push('_');
                }
                in_space = true;
            } else {
                slug.extend(c.to_lowercase());
                in_space = false;
            }
        }

        slug
    }
}

/// Records every fresh registry starts with
pub fn default_users() -> Vec<UserRecord> {
    vec![
        UserRecord::new(1, "John Doe", UserStatus::Active, "iPhone 15 Pro"),
        UserRecord::new(2, "Jane Smith", UserStatus::Inactive, "Samsung Galaxy S24"),
        UserRecord::new(3, "Mike Johnson", UserStatus::Active, "Google Pixel 8"),
        UserRecord::new(4, "Sarah Wilson", UserStatus::Inactive, "OnePlus 12"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_round_trips_through_str() {
        for status in UserStatus::ALL {
            assert_eq!(status.as_str().parse::<UserStatus>().unwrap(), status);
        }
    }

    #[test]
    fn test_unknown_status_is_rejected() {
        let err = "archived".parse::<UserStatus>().unwrap_err();
        assert_eq!(
            err,
            "Status must be one of: active, inactive, pending, discontinued"
        );
    }

    #[test]
    fn test_record_serializes_camel_case() {
        let user = UserRecord::new(7, "Ann", UserStatus::Pending, "Pixel");
        let json = serde_json::to_value(&user).unwrap();

        assert_eq!(json["deviceModel"], "Pixel");
        assert_eq!(json["status"], "pending");
        assert!(json.get("device_model").is_none());
    }

    #[test]
    fn test_username_slug() {
        let user = UserRecord::new(1, "Mike  Johnson", UserStatus::Active, "x");
        assert_eq!(user.username(), "mike_johnson");

        let user = UserRecord::new(1, "Sarah\tWilson Jr", UserStatus::Active, "x");
        assert_eq!(user.username(), "sarah_wilson_jr");
    }

    #[test]
    fn test_default_users_are_seeded_in_order() {
        let users = default_users();
        let ids: Vec<u32> = users.iter().map(|u| u.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4]);
        assert_eq!(users[1].device_model, "Samsung Galaxy S24");
    }
}
