//! Locations (sites) within organizations.

use serde::{Deserialize, Serialize};

use crate::client::RmmClient;
use crate::custom_fields::CustomFields;

/// A location. `organization_id` is only filled by [`list_locations`];
/// per-organization listings omit it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Location {
    pub id: i64,
    pub name: String,
    pub address: String,
    pub description: String,
    pub user_data: CustomFields,
    pub tags: Vec<String>,
    pub fields: CustomFields,
    pub organization_id: i64,
}

/// Lists locations across all organizations.
pub async fn list_locations(client: &RmmClient) -> crate::error::Result<Vec<Location>> {
    client.get("locations").await
}

pub async fn get_location_custom_fields(
    client: &RmmClient,
    organization_id: i64,
    location_id: i64,
) -> crate::error::Result<CustomFields> {
    client
        .get(&format!(
            "organization/{organization_id}/location/{location_id}/custom-fields"
        ))
        .await
}

/// Updates custom field values of a location.
pub async fn set_location_custom_fields(
    client: &RmmClient,
    organization_id: i64,
    location_id: i64,
    fields: &CustomFields,
) -> crate::error::Result<()> {
    client
        .patch(
            &format!("organization/{organization_id}/location/{location_id}/custom-fields"),
            fields,
        )
        .await
}
