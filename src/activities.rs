//! Activity log and the classification enums shared with tickets.
//!
//! The log is returned newest first. Paging is manual: pass the smallest
//! `id` of the previous page as `older_than` to fetch the next one.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::client::RmmClient;
use crate::query::{is_zero, path_with_options};
use crate::wire_time::WireTime;

// ── Shared enums ───────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Severity {
    None,
    Minor,
    Moderate,
    Major,
    Critical,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Priority {
    None,
    Low,
    Medium,
    High,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActivityResult {
    Success,
    Failure,
    Unsupported,
    Uncompleted,
    #[serde(other)]
    Unknown,
}

/// Subsystem that recorded an activity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActivityType {
    #[serde(rename = "ACTIONSET")]
    ActionSet,
    Action,
    Condition,
    #[serde(rename = "CONDITION_ACTIONSET")]
    ConditionActionSet,
    ConditionAction,
    Antivirus,
    PatchManagement,
    Teamviewer,
    Monitor,
    System,
    Comment,
    Shadowprotect,
    Imagemanager,
    HelpRequest,
    SoftwarePatchManagement,
    Splashtop,
    Cloudberry,
    CloudberryBackup,
    ScheduledTask,
    Rdp,
    Scripting,
    Security,
    RemoteTools,
    Virtualization,
    Psa,
    Mdm,
    NinjaRemote,
    NinjaQuickConnect,
    NinjaNetworkDiscovery,
    #[serde(other)]
    Unknown,
}

// ── Response types ─────────────────────────────────────────────────────

/// One page of the activity log.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ActivityLog {
    pub last_activity_id: i64,
    pub activities: Vec<Activity>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Activity {
    pub id: i64,
    pub activity_time: WireTime,
    pub device_id: i64,
    pub series_uid: String,
    pub status_code: String,
    pub status: String,
    pub source_config_uid: String,
    pub source_name: String,
    pub subject: String,
    pub user_id: i64,
    pub message: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub data: Value,
    pub severity: Option<Severity>,
    pub priority: Option<Priority>,
    pub activity_type: Option<ActivityType>,
    pub activity_result: Option<ActivityResult>,
}

// ── Request types ──────────────────────────────────────────────────────

/// Query options for [`get_activity_log`]. Every key is optional and
/// omitted when left at its default.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ActivityLogOptions {
    /// Activities recorded after this date (`YYYYMMDD`).
    #[serde(rename = "after", skip_serializing_if = "is_zero")]
    pub after: String,
    /// Activities recorded before this date (`YYYYMMDD`).
    #[serde(rename = "before", skip_serializing_if = "is_zero")]
    pub before: String,
    /// `SYSTEM`, `DEVICE`, `USER` or `ALL` (server default).
    #[serde(rename = "class", skip_serializing_if = "is_zero")]
    pub class: String,
    /// Device filter expression.
    #[serde(rename = "df", skip_serializing_if = "is_zero")]
    pub device_filter: String,
    #[serde(rename = "lang", skip_serializing_if = "is_zero")]
    pub lang: String,
    /// Activities newer than this activity ID.
    #[serde(rename = "newerThan", skip_serializing_if = "is_zero")]
    pub newer_than: i64,
    /// Activities older than this activity ID.
    #[serde(rename = "olderThan", skip_serializing_if = "is_zero")]
    pub older_than: i64,
    /// 10 to 1000; the server default is 200.
    #[serde(rename = "pageSize", skip_serializing_if = "is_zero")]
    pub page_size: u32,
    /// Activities of one alert series.
    #[serde(rename = "seriesUid", skip_serializing_if = "is_zero")]
    pub series_uid: String,
    /// Activities of one script or policy element.
    #[serde(rename = "sourceConfigUid", skip_serializing_if = "is_zero")]
    pub source_config_uid: String,
    #[serde(rename = "status", skip_serializing_if = "is_zero")]
    pub status: String,
    #[serde(rename = "type", skip_serializing_if = "is_zero")]
    pub activity_type: String,
    #[serde(rename = "tz", skip_serializing_if = "is_zero")]
    pub tz: String,
    #[serde(rename = "user", skip_serializing_if = "is_zero")]
    pub user: String,
}

// ── Endpoint functions ─────────────────────────────────────────────────

/// Fetches one page of the activity log, newest first.
pub async fn get_activity_log(
    client: &RmmClient,
    options: &ActivityLogOptions,
) -> crate::error::Result<ActivityLog> {
    let path = path_with_options("activities", options)?;
    client.get(&path).await
}
