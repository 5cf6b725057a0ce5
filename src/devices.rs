//! Device lookup, search and custom fields.
//!
//! - [`get_device`]: one device by ID.
//! - [`list_devices`]: all devices, optionally filtered by a device filter
//!   expression (`df`) and paged with `after` / `pageSize`.
//! - [`search_devices`]: free-text search.
//! - [`list_device_roles`], [`list_policies`]: role and policy catalogs.
//! - [`get_device_custom_fields`], [`set_device_custom_fields`],
//!   [`load_device_custom_fields`]: the `device/{id}/custom-fields`
//!   sub-resource.
//!
//! ## Device filters
//!
//! `df` uses NinjaOne's filter syntax, e.g. `org = 12`,
//! `class in (WINDOWS_SERVER, LINUX_SERVER)` or `offline`. The filter is
//! passed through verbatim; only URL encoding is applied.

use serde::{Deserialize, Serialize};

use crate::client::RmmClient;
use crate::custom_fields::CustomFields;
use crate::locations::Location;
use crate::organizations::Organization;
use crate::query::{is_zero, path_with_options};
use crate::wire_time::WireTime;

// ── Response types ─────────────────────────────────────────────────────

/// A managed device (node) as returned by the API.
///
/// Fields after `references` are only populated by the detailed listing
/// (`devices-detailed`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Device {
    pub id: i64,
    pub parent_device_id: i64,
    pub organization_id: i64,
    pub location_id: i64,
    pub node_class: Option<NodeClass>,
    pub node_role_id: i64,
    pub role_policy_id: i64,
    pub policy_id: i64,
    pub approval_status: Option<ApprovalStatus>,
    pub offline: bool,
    pub display_name: String,
    pub system_name: String,
    pub dns_name: String,
    pub netbios_name: String,
    pub created: WireTime,
    pub last_contact: WireTime,
    pub last_update: WireTime,
    pub user_data: CustomFields,
    pub tags: Vec<String>,
    /// Custom field values. Only filled by [`load_device_custom_fields`];
    /// the listing endpoints leave it empty.
    pub fields: CustomFields,
    pub maintenance: Option<Maintenance>,
    pub references: Option<DeviceReferences>,

    #[serde(rename = "ipAddress", skip_serializing_if = "Vec::is_empty")]
    pub ip_addresses: Vec<String>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub public_ip: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub notes: Vec<DeviceNote>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub device_type: String,
}

/// Maintenance window state of a device.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Maintenance {
    pub status: Option<MaintenanceStatus>,
    pub start: WireTime,
    pub end: WireTime,
}

/// Related entities expanded inline by some endpoints.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DeviceReferences {
    pub organization: Option<Organization>,
    pub location: Option<Location>,
    pub role_policy: Option<Policy>,
    pub policy: Option<Policy>,
    pub role: Option<DeviceRole>,
}

/// Free-text note attached to a device.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeviceNote {
    pub text: String,
}

/// A device policy.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Policy {
    pub id: i64,
    pub parent_policy_id: i64,
    pub name: String,
    pub description: String,
    pub node_class: Option<NodeClass>,
    pub updated: WireTime,
    pub node_class_default: bool,
    pub tags: Vec<String>,
    pub fields: CustomFields,
}

/// A device role.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DeviceRole {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub node_class: Option<NodeClass>,
    pub custom: bool,
    pub chassis_type: Option<Chassis>,
    pub created: WireTime,
    pub tags: Vec<String>,
    pub fields: CustomFields,
}

/// Device class. `Unknown` absorbs classes added after this crate was
/// written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NodeClass {
    WindowsServer,
    WindowsWorkstation,
    LinuxWorkstation,
    Mac,
    Android,
    AppleIos,
    AppleIpados,
    VmwareVmHost,
    VmwareVmGuest,
    HypervVmmHost,
    HypervVmmGuest,
    LinuxServer,
    MacServer,
    CloudMonitorTarget,
    NmsSwitch,
    NmsRouter,
    NmsFirewall,
    NmsPrivateNetworkGateway,
    NmsPrinter,
    NmsScanner,
    NmsDialManager,
    NmsWap,
    NmsIpsla,
    NmsComputer,
    NmsVmHost,
    NmsAppliance,
    NmsOther,
    NmsServer,
    NmsPhone,
    NmsVirtualMachine,
    NmsNetworkManagementAgent,
    #[serde(other)]
    Unknown,
}

/// Hardware chassis of a role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Chassis {
    Desktop,
    Laptop,
    Mobile,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ApprovalStatus {
    Pending,
    Approved,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MaintenanceStatus {
    Failed,
    Pending,
    InMaintenance,
    #[serde(other)]
    Unknown,
}

// ── Request types ──────────────────────────────────────────────────────

/// Query options for [`list_devices`]. Unset fields are omitted.
#[derive(Debug, Clone, Default, Serialize)]
pub struct DeviceListOptions {
    /// Device filter expression.
    #[serde(rename = "df", skip_serializing_if = "is_zero")]
    pub filter: String,
    /// Return devices with an ID greater than this one.
    #[serde(rename = "after", skip_serializing_if = "is_zero")]
    pub after: i64,
    /// Maximum number of devices to return.
    #[serde(rename = "pageSize", skip_serializing_if = "is_zero")]
    pub page_size: u32,
    /// Use `devices-detailed`, which adds references, IPs and notes.
    #[serde(skip)]
    pub detailed: bool,
}

#[derive(Serialize)]
struct SearchOptions<'a> {
    #[serde(rename = "q", skip_serializing_if = "is_zero")]
    query: &'a str,
    #[serde(rename = "limit", skip_serializing_if = "is_zero")]
    limit: u32,
}

// ── Endpoint functions ─────────────────────────────────────────────────

/// Retrieves one device by ID.
///
/// # Errors
///
/// - `RmmError::Api`: 404 when the device does not exist or is outside
///   the application's scope.
/// - `RmmError::DispatchAuth`: token acquisition failed.
/// - `RmmError::Transport`: transport-level failure.
pub async fn get_device(client: &RmmClient, device_id: i64) -> crate::error::Result<Device> {
    client.get(&format!("device/{device_id}")).await
}

/// Lists devices, using `devices-detailed` when `options.detailed` is set.
pub async fn list_devices(
    client: &RmmClient,
    options: &DeviceListOptions,
) -> crate::error::Result<Vec<Device>> {
    let base = if options.detailed {
        "devices-detailed"
    } else {
        "devices"
    };
    let path = path_with_options(base, options)?;
    client.get(&path).await
}

/// Free-text device search. `limit == 0` leaves the server default.
pub async fn search_devices(
    client: &RmmClient,
    query: &str,
    limit: u32,
) -> crate::error::Result<Vec<Device>> {
    let path = path_with_options("devices/search", &SearchOptions { query, limit })?;
    client.get(&path).await
}

/// Lists all device roles.
pub async fn list_device_roles(client: &RmmClient) -> crate::error::Result<Vec<DeviceRole>> {
    client.get("roles").await
}

/// Lists all policies.
pub async fn list_policies(client: &RmmClient) -> crate::error::Result<Vec<Policy>> {
    client.get("policies").await
}

/// Retrieves the custom field values of a device.
pub async fn get_device_custom_fields(
    client: &RmmClient,
    device_id: i64,
) -> crate::error::Result<CustomFields> {
    client.get(&format!("device/{device_id}/custom-fields")).await
}

/// Updates custom field values of a device. Only the keys present in
/// `fields` are changed.
pub async fn set_device_custom_fields(
    client: &RmmClient,
    device_id: i64,
    fields: &CustomFields,
) -> crate::error::Result<()> {
    client
        .patch(&format!("device/{device_id}/custom-fields"), fields)
        .await
}

/// Fetches the custom fields of `device` and stores them in
/// `device.fields`. On error `device` is left unchanged.
pub async fn load_device_custom_fields(
    client: &RmmClient,
    device: &mut Device,
) -> crate::error::Result<()> {
    device.fields = get_device_custom_fields(client, device.id).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::to_query_string;

    #[test]
    fn device_deserializes_full_response() {
        let json = r#"{
            "id": 42,
            "parentDeviceId": 0,
            "organizationId": 3,
            "locationId": 7,
            "nodeClass": "WINDOWS_WORKSTATION",
            "nodeRoleId": 5,
            "rolePolicyId": 9,
            "policyId": 10,
            "approvalStatus": "APPROVED",
            "offline": false,
            "displayName": "Reception PC",
            "systemName": "RECEPTION-01",
            "dnsName": "reception-01.contoso.local",
            "netbiosName": "RECEPTION-01",
            "created": 1690000000.5,
            "lastContact": 1700666991.1700666,
            "lastUpdate": 0,
            "userData": null,
            "tags": ["front-desk"],
            "maintenance": {"status": "IN_MAINTENANCE", "start": 1700000000, "end": 1700003600},
            "references": {
                "organization": {"id": 3, "name": "Contoso"},
                "role": {"id": 5, "name": "Workstation", "chassisType": "DESKTOP"}
            }
        }"#;
        let device: Device = serde_json::from_str(json).unwrap();
        assert_eq!(device.id, 42);
        assert_eq!(device.node_class, Some(NodeClass::WindowsWorkstation));
        assert_eq!(device.approval_status, Some(ApprovalStatus::Approved));
        assert_eq!(device.system_name, "RECEPTION-01");
        assert!(!device.created.is_zero());
        assert!(device.last_update.is_zero());
        assert!(device.user_data.is_empty());
        assert_eq!(device.tags, vec!["front-desk"]);

        let maintenance = device.maintenance.unwrap();
        assert_eq!(maintenance.status, Some(MaintenanceStatus::InMaintenance));
        assert!(!maintenance.end.is_zero());

        let refs = device.references.unwrap();
        assert_eq!(refs.organization.unwrap().name, "Contoso");
        assert_eq!(refs.role.unwrap().chassis_type, Some(Chassis::Desktop));
    }

    #[test]
    fn device_deserializes_minimal_response() {
        let device: Device = serde_json::from_str(r#"{"id": 1}"#).unwrap();
        assert_eq!(device.id, 1);
        assert!(device.node_class.is_none());
        assert!(device.tags.is_empty());
        assert!(device.references.is_none());
    }

    #[test]
    fn ip_addresses_use_singular_wire_key() {
        let device: Device =
            serde_json::from_str(r#"{"id": 7, "ipAddress": ["10.0.0.5", "fe80::1"]}"#).unwrap();
        assert_eq!(device.ip_addresses, vec!["10.0.0.5", "fe80::1"]);

        let value = serde_json::to_value(&device).unwrap();
        assert_eq!(value["ipAddress"][0], "10.0.0.5");
        assert!(value.get("ipAddresses").is_none());
    }

    #[test]
    fn unknown_node_class_does_not_break_decoding() {
        let device: Device =
            serde_json::from_str(r#"{"id": 1, "nodeClass": "QUANTUM_MAINFRAME"}"#).unwrap();
        assert_eq!(device.node_class, Some(NodeClass::Unknown));
    }

    #[test]
    fn node_class_wire_names() {
        assert_eq!(
            serde_json::to_value(NodeClass::NmsPrivateNetworkGateway).unwrap(),
            "NMS_PRIVATE_NETWORK_GATEWAY"
        );
        assert_eq!(serde_json::to_value(NodeClass::AppleIpados).unwrap(), "APPLE_IPADOS");
        assert_eq!(serde_json::to_value(NodeClass::HypervVmmGuest).unwrap(), "HYPERV_VMM_GUEST");
    }

    #[test]
    fn list_options_omit_unset_fields() {
        let opts = DeviceListOptions {
            page_size: 100,
            detailed: true,
            ..Default::default()
        };
        assert_eq!(to_query_string(&opts).unwrap(), "pageSize=100");

        let opts = DeviceListOptions {
            filter: "org = 3".to_string(),
            after: 250,
            ..Default::default()
        };
        assert_eq!(to_query_string(&opts).unwrap(), "df=org+%3D+3&after=250");
    }

    #[test]
    fn search_options_encode_query_and_limit() {
        let q = to_query_string(&SearchOptions { query: "reception pc", limit: 5 }).unwrap();
        assert_eq!(q, "q=reception+pc&limit=5");
        let q = to_query_string(&SearchOptions { query: "", limit: 0 }).unwrap();
        assert_eq!(q, "");
    }
}
