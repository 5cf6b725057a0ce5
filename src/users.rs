//! Technicians and end users.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::client::RmmClient;
use crate::custom_fields::CustomFields;
use crate::error::RmmError;
use crate::query::{is_zero, path_with_options};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct User {
    pub id: i64,
    pub firstname: String,
    pub lastname: String,
    pub email: String,
    pub phone: String,
    pub enabled: bool,
    pub administrator: bool,
    pub permit_all_clients: bool,
    pub notify_all_clients: bool,
    pub must_change_pw: bool,
    pub mfa_configured: bool,
    pub user_type: Option<UserType>,
    pub invitation_status: Option<InvitationStatus>,
    /// Set for end users only.
    pub organization_id: i64,
    pub device_ids: Vec<i64>,
    pub tags: Vec<String>,
    pub fields: CustomFields,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserType {
    Technician,
    EndUser,
    #[serde(other)]
    Unknown,
}

impl UserType {
    pub fn as_str(self) -> &'static str {
        match self {
            UserType::Technician => "TECHNICIAN",
            UserType::EndUser => "END_USER",
            UserType::Unknown => "UNKNOWN",
        }
    }
}

impl fmt::Display for UserType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserType {
    type Err = RmmError;

    /// Accepts the wire names, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "TECHNICIAN" => Ok(UserType::Technician),
            "END_USER" => Ok(UserType::EndUser),
            _ => Err(RmmError::InvalidInput(format!("invalid user type '{s}'"))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InvitationStatus {
    Pending,
    Registered,
    Expired,
    #[serde(other)]
    Unknown,
}

#[derive(Serialize)]
struct UserListOptions {
    #[serde(rename = "userType", skip_serializing_if = "is_zero")]
    user_type: Option<UserType>,
}

/// Lists users, optionally restricted to one user type.
///
/// # Errors
///
/// `RmmError::InvalidInput` for `UserType::Unknown`, which the server
/// cannot filter on; no request is sent in that case.
pub async fn list_users(
    client: &RmmClient,
    user_type: Option<UserType>,
) -> crate::error::Result<Vec<User>> {
    if user_type == Some(UserType::Unknown) {
        return Err(RmmError::InvalidInput(
            "invalid user type 'UNKNOWN'".to_string(),
        ));
    }
    let path = path_with_options("users", &UserListOptions { user_type })?;
    client.get(&path).await
}

/// Lists the end users of one organization.
pub async fn list_organization_users(
    client: &RmmClient,
    organization_id: i64,
) -> crate::error::Result<Vec<User>> {
    client
        .get(&format!("organization/{organization_id}/end-users"))
        .await
}
