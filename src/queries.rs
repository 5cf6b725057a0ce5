//! Fleet-wide inventory reports (`queries/*`).
//!
//! Each report returns one page of rows plus a server-side cursor. Rows
//! carry the `device_id` they were collected from and the collection
//! `timestamp`.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::client::RmmClient;
use crate::query::{is_zero, path_with_options};
use crate::wire_time::WireTime;

// ── Response types ─────────────────────────────────────────────────────

/// One page of a report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct Report<T> {
    #[serde(default)]
    pub cursor: ReportCursor,
    #[serde(default = "Vec::new")]
    pub results: Vec<T>,
}

/// Server-side cursor of a report.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportCursor {
    pub name: String,
    pub offset: i64,
    pub count: i64,
    pub expires: WireTime,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ComputerSystem {
    pub name: String,
    pub manufacturer: String,
    pub model: String,
    pub bios_serial_number: String,
    pub serial_number: String,
    pub domain: String,
    pub domain_role: String,
    pub number_of_processors: i64,
    /// Bytes.
    pub total_physical_memory: i64,
    pub virtual_machine: bool,
    pub chassis_type: String,
    pub device_id: i64,
    pub timestamp: WireTime,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OperatingSystem {
    pub name: String,
    pub manufacturer: String,
    pub architecture: String,
    pub last_boot_time: WireTime,
    pub build_number: String,
    pub release_id: String,
    pub service_pack_major_version: i64,
    pub service_pack_minor_version: i64,
    pub locale: String,
    pub language: String,
    pub needs_reboot: bool,
    pub device_id: i64,
    pub timestamp: WireTime,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProcessorInfo {
    pub architecture: String,
    /// MHz.
    pub max_clock_speed: i64,
    pub device_id: i64,
    pub timestamp: WireTime,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DiskVolume {
    pub name: String,
    pub drive_letter: String,
    pub label: String,
    pub device_type: String,
    pub file_system: String,
    pub auto_mount: bool,
    pub compressed: bool,
    /// Bytes.
    pub capacity: i64,
    /// Bytes.
    pub free_space: i64,
    pub serial_number: String,
    pub bit_locker_status: BitLockerStatus,
    pub device_id: i64,
    pub timestamp: WireTime,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BitLockerStatus {
    pub conversion_status: String,
    pub encryption_method: String,
    pub protection_status: String,
    pub lock_status: String,
    pub initialized_for_protection: bool,
}

/// An installed software package.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Software {
    pub install_date: String,
    pub location: String,
    pub name: String,
    pub publisher: String,
    pub size: i64,
    pub version: String,
    pub product_code: String,
    pub device_id: i64,
    pub timestamp: WireTime,
}

// ── Request types ──────────────────────────────────────────────────────

/// Query options shared by every report.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ReportOptions {
    /// Device filter expression.
    #[serde(rename = "df", skip_serializing_if = "is_zero")]
    pub filter: String,
    #[serde(rename = "pageSize", skip_serializing_if = "is_zero")]
    pub page_size: u32,
}

// ── Endpoint functions ─────────────────────────────────────────────────

async fn query_report<T: DeserializeOwned>(
    client: &RmmClient,
    report: &str,
    options: &ReportOptions,
) -> crate::error::Result<Report<T>> {
    let path = path_with_options(&format!("queries/{report}"), options)?;
    client.get(&path).await
}

/// Manufacturer, model, memory and serial numbers per device.
pub async fn query_computer_systems(
    client: &RmmClient,
    options: &ReportOptions,
) -> crate::error::Result<Report<ComputerSystem>> {
    query_report(client, "computer-systems", options).await
}

/// Operating system name, build and reboot state per device.
pub async fn query_operating_systems(
    client: &RmmClient,
    options: &ReportOptions,
) -> crate::error::Result<Report<OperatingSystem>> {
    query_report(client, "operating-systems", options).await
}

pub async fn query_processors(
    client: &RmmClient,
    options: &ReportOptions,
) -> crate::error::Result<Report<ProcessorInfo>> {
    query_report(client, "processor-report", options).await
}

/// Disk volumes with capacity and BitLocker state.
pub async fn query_volumes(
    client: &RmmClient,
    options: &ReportOptions,
) -> crate::error::Result<Report<DiskVolume>> {
    query_report(client, "volumes", options).await
}

/// Installed software inventory.
pub async fn query_software(
    client: &RmmClient,
    options: &ReportOptions,
) -> crate::error::Result<Report<Software>> {
    query_report(client, "software", options).await
}
