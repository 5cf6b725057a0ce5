//! Active alerts (triggered conditions).
//!
//! - [`list_alerts`]: all alerts, optionally filtered by device filter or
//!   source type.
//! - [`list_device_alerts`]: alerts of a single device.
//!
//! `lang` and `tz` localize the alert message text on the server side.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::client::RmmClient;
use crate::devices::Device;
use crate::query::{is_zero, path_with_options};
use crate::wire_time::WireTime;

// ── Response types ─────────────────────────────────────────────────────

/// A triggered alert.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Alert {
    /// Activity series UID.
    pub uid: String,
    pub device_id: i64,
    pub message: String,
    pub create_time: WireTime,
    pub update_time: WireTime,
    pub source_type: Option<AlertOrigin>,
    /// Policy element that raised the alert.
    pub source_config_uid: String,
    pub source_name: String,
    pub subject: String,
    pub user_id: i64,
    pub psa_ticket_id: i64,
    pub ticket_template_id: i64,
    /// Condition-specific payload, passed through untouched.
    pub data: Value,
    /// Inline device, when the server expands it.
    pub device: Option<Device>,
}

/// What raised an alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AlertOrigin {
    AgentOffline,
    ConditionAgentCpu,
    ConditionAgentMemory,
    ConditionAgentNetwork,
    ConditionAgentDiskIo,
    ConditionAgentDiskFreeSpace,
    ConditionAgentDiskUsage,
    ConditionAgentCvssScore,
    ConditionAgentPatchLastInstalled,
    ConditionNmsCpu,
    ConditionNmsMemory,
    ConditionNmsNetworkTrafficBits,
    ConditionNmsNetworkTrafficPercent,
    ConditionNmsNetworkStatus,
    ConditionNmsNetworkStatusChange,
    ConditionPing,
    ConditionPingLatency,
    ConditionPingPacketLoss,
    ConditionPingResponse,
    ConditionSystemUptime,
    // Misspelled on the wire.
    #[serde(rename = "CONDITION_SMART_STATUS_DEGRATED")]
    ConditionSmartStatusDegraded,
    ConditionRaidHealthStatus,
    ConditionScriptResult,
    ConditionHttp,
    ConditionHttpResponse,
    ConditionPort,
    ConditionPortScan,
    ConditionSyslog,
    ConditionConfigurationFile,
    ConditionSnmptrap,
    ConditionCriticalEvent,
    ConditionDns,
    ConditionEmail,
    ConditionCustomSnmp,
    ShadowprotectBackupjobCreate,
    ShadowprotectBackupjobUpdate,
    ShadowprotectBackupjobDelete,
    ShadowprotectBackupjobExecute,
    ImagemanagerManagedfolderCreate,
    ImagemanagerManagedfolderUpdate,
    ImagemanagerManagedfolderDelete,
    ImagemanagerManagedfolderExecute,
    TeamviewerConnection,
    RetrieveAgentLogs,
    ScheduledTask,
    ConditionWindowsEventLogTriggered,
    ConditionWindowsServiceStateChanged,
    UiMessageActionReboot,
    UiMessageBdInstallationIssues,
    GravityzoneUiMessageInstallationIssues,
    AvQuarantineThreat,
    AvRestoreThreat,
    AvDeleteThreat,
    AvRemoveThreat,
    BitdefenderRestoreThreat,
    BitdefenderDeleteThreat,
    ConditionBitlockerStatus,
    ConditionFilevaultStatus,
    ConditionLinuxProcess,
    #[serde(rename = "CONDITION_LINUX_Daemon")]
    ConditionLinuxDaemon,
    ConditionLinuxProcessResource,
    ConditionLinuxProcessResourceCpu,
    ConditionLinuxProcessResourceMemory,
    ConditionLinuxDiskFreeSpace,
    ConditionLinuxDiskUsage,
    ConditionVmAggregateCpuUsage,
    ConditionVmDiskUsage,
    ConditionVmHostDatastore,
    ConditionVmHostUptime,
    ConditionVmHostDeviceDown,
    ConditionVmHostBadSensors,
    ConditionVmHostSensorHealth,
    ConditionVmGuestGuestOperationalMode,
    ConditionVmGuestSnapshotSize,
    ConditionVmGuestSnapshotLifespan,
    ConditionVmGuestToolsNotRunning,
    ConditionHvGuestCheckpointSize,
    ConditionHvGuestCheckpointLifespan,
    ConditionSoftware,
    ConditionWindowsProcessState,
    ConditionWindowsProcessResourceCpu,
    ConditionWindowsProcessResourceMemory,
    ConditionMacProcessState,
    ConditionMacProcessResourceCpu,
    ConditionMacProcessResourceMemory,
    #[serde(rename = "CONDITION_MAC_DEAMON")]
    ConditionMacDaemon,
    ConditionCustomField,
    ConditionPendingReboot,
    #[serde(other)]
    Unknown,
}

// ── Request types ──────────────────────────────────────────────────────

/// Query options for [`list_alerts`]. `source_type: None` means all
/// sources.
#[derive(Debug, Clone, Default, Serialize)]
pub struct AlertListOptions {
    /// Device filter expression.
    #[serde(rename = "filter", skip_serializing_if = "is_zero")]
    pub filter: String,
    #[serde(rename = "sourceType", skip_serializing_if = "is_zero")]
    pub source_type: Option<AlertOrigin>,
    #[serde(rename = "lang", skip_serializing_if = "is_zero")]
    pub lang: String,
    #[serde(rename = "tz", skip_serializing_if = "is_zero")]
    pub tz: String,
}

/// Localization options for [`list_device_alerts`].
#[derive(Debug, Clone, Default, Serialize)]
pub struct DeviceAlertOptions {
    #[serde(rename = "lang", skip_serializing_if = "is_zero")]
    pub lang: String,
    #[serde(rename = "tz", skip_serializing_if = "is_zero")]
    pub tz: String,
}

// ── Endpoint functions ─────────────────────────────────────────────────

/// Lists active alerts.
///
/// # Errors
///
/// - `RmmError::Api`: 400 on a malformed filter expression.
/// - `RmmError::DispatchAuth`: token acquisition failed.
/// - `RmmError::Transport`: transport-level failure.
pub async fn list_alerts(
    client: &RmmClient,
    options: &AlertListOptions,
) -> crate::error::Result<Vec<Alert>> {
    let path = path_with_options("alerts", options)?;
    client.get(&path).await
}

/// Lists active alerts of one device.
pub async fn list_device_alerts(
    client: &RmmClient,
    device_id: i64,
    options: &DeviceAlertOptions,
) -> crate::error::Result<Vec<Alert>> {
    let path = path_with_options(&format!("device/{device_id}/alerts"), options)?;
    client.get(&path).await
}
