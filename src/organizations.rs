//! Organization management.
//!
//! Organizations are the top-level tenant in NinjaOne; devices, locations
//! and end users all belong to one.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::client::RmmClient;
use crate::custom_fields::CustomFields;
use crate::devices::Device;
use crate::error::RmmError;
use crate::locations::Location;
use crate::query::{is_zero, path_with_options};

// ── Response types ─────────────────────────────────────────────────────

/// Summary form of an organization.
///
/// `id` is left out of the JSON body when zero, so the same type serves
/// as the create/update payload.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Organization {
    #[serde(skip_serializing_if = "is_zero")]
    pub id: i64,
    pub name: String,
    pub description: String,
    pub user_data: CustomFields,
    pub node_approval_mode: Option<ApprovalMode>,
    pub tags: Vec<String>,
    pub fields: CustomFields,
}

/// Organization with locations, role policies and product settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OrganizationDetailed {
    #[serde(skip_serializing_if = "is_zero")]
    pub id: i64,
    pub name: String,
    pub description: String,
    pub user_data: CustomFields,
    pub node_approval_mode: Option<ApprovalMode>,
    pub tags: Vec<String>,
    pub fields: CustomFields,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub locations: Vec<Location>,
    pub policies: Vec<OrganizationPolicyItem>,
    /// Keyed by product: `trayicon`, `splashtop`, `teamviewer`, `backup`,
    /// `psa`.
    #[serde(skip_serializing_if = "HashMap::is_empty")]
    pub settings: HashMap<String, OrganizationSetting>,
}

/// Policy assignment for one device role.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OrganizationPolicyItem {
    pub node_role_id: i64,
    pub policy_id: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrganizationSetting {
    pub product: String,
    pub enabled: bool,
    pub targets: Vec<String>,
    pub options: HashMap<String, Value>,
}

/// How newly enrolled devices are approved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ApprovalMode {
    Automatic,
    Manual,
    Reject,
    #[serde(other)]
    Unknown,
}

#[derive(Serialize)]
struct CreateOptions {
    #[serde(rename = "templateOrganizationId", skip_serializing_if = "is_zero")]
    template_organization_id: i64,
}

// ── Endpoint functions ─────────────────────────────────────────────────

/// Lists all organizations.
pub async fn list_organizations(client: &RmmClient) -> crate::error::Result<Vec<Organization>> {
    client.get("organizations").await
}

/// Lists all organizations with locations, policies and settings.
pub async fn list_organizations_detailed(
    client: &RmmClient,
) -> crate::error::Result<Vec<OrganizationDetailed>> {
    client.get("organizations-detailed").await
}

/// Retrieves one organization by ID.
pub async fn get_organization(
    client: &RmmClient,
    organization_id: i64,
) -> crate::error::Result<OrganizationDetailed> {
    client.get(&format!("organization/{organization_id}")).await
}

/// Creates an organization. A non-zero `template_organization_id` copies
/// policies and settings from that organization.
///
/// # Errors
///
/// - `RmmError::Api`: 400 when the name is missing or already taken.
/// - `RmmError::DispatchAuth`: token acquisition failed.
pub async fn create_organization(
    client: &RmmClient,
    organization: &OrganizationDetailed,
    template_organization_id: i64,
) -> crate::error::Result<OrganizationDetailed> {
    let path = path_with_options(
        "organizations",
        &CreateOptions {
            template_organization_id,
        },
    )?;
    client.post(&path, organization).await
}

/// Updates an organization. The ID selects the target and is not sent in
/// the body.
///
/// # Errors
///
/// `RmmError::InvalidInput` when `organization.id` is zero; no request is
/// sent in that case.
pub async fn update_organization(
    client: &RmmClient,
    organization: &Organization,
) -> crate::error::Result<()> {
    if organization.id == 0 {
        return Err(RmmError::InvalidInput(
            "organization ID required".to_string(),
        ));
    }
    let body = Organization {
        id: 0,
        ..organization.clone()
    };
    client
        .patch(&format!("organization/{}", organization.id), &body)
        .await
}

pub async fn get_organization_custom_fields(
    client: &RmmClient,
    organization_id: i64,
) -> crate::error::Result<CustomFields> {
    client
        .get(&format!("organization/{organization_id}/custom-fields"))
        .await
}

/// Updates custom field values of an organization. Keys absent from
/// `fields` keep their current value.
pub async fn set_organization_custom_fields(
    client: &RmmClient,
    organization_id: i64,
    fields: &CustomFields,
) -> crate::error::Result<()> {
    client
        .patch(&format!("organization/{organization_id}/custom-fields"), fields)
        .await
}

pub async fn list_organization_locations(
    client: &RmmClient,
    organization_id: i64,
) -> crate::error::Result<Vec<Location>> {
    client
        .get(&format!("organization/{organization_id}/locations"))
        .await
}

pub async fn list_organization_devices(
    client: &RmmClient,
    organization_id: i64,
) -> crate::error::Result<Vec<Device>> {
    client
        .get(&format!("organization/{organization_id}/devices"))
        .await
}
