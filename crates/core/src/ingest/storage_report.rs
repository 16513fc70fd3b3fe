//! Storage health report payload validation.
//!
//! Severity is carried by the alert counts; no message is synthesized here.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::fields::FieldReader;
use super::SERVER_ADDRESS_FIELD;
use crate::error::CoreError;
use crate::types::Percent;

/// One mount point reported above its usage threshold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiskOverThreshold {
    #[serde(alias = "mount_point")]
    pub mount: String,
    #[serde(alias = "filesystem")]
    pub device: String,
    #[serde(alias = "usage", alias = "percent")]
    pub usage_percent: Percent,
    #[serde(default)]
    pub size: Option<String>,
    #[serde(default)]
    pub used: Option<String>,
    #[serde(default)]
    pub free: Option<String>,
}

/// A validated storage report ready for insertion.
#[derive(Debug, Clone, PartialEq)]
pub struct NewStorageReport {
    pub server_ip: String,
    pub total_alerts: i32,
    pub critical_alerts: i32,
    pub warning_alerts: i32,
    pub critical_disk_mount: Option<String>,
    pub critical_disk_usage: Option<Percent>,
    pub disks_over_threshold: Option<Vec<DiskOverThreshold>>,
    pub top_folders: Option<Value>,
    pub raid_status: bool,
    pub smart_status: bool,
    pub filesystem_status: bool,
    pub network_status: bool,
    pub iowait_percent: Option<Percent>,
    pub summary: Option<String>,
    pub full_report: Option<Value>,
}

/// Validate a storage report payload.
///
/// Only the server address is required. Counts default to zero, subsystem
/// flags default to healthy, and the structured fields default to absent.
pub fn prepare_storage_report(payload: Value) -> Result<NewStorageReport, CoreError> {
    let mut reader = FieldReader::new(&payload)?;

    let server_ip = reader.required_str(SERVER_ADDRESS_FIELD);
    let total_alerts = reader.count_or_zero("total_alerts");
    let critical_alerts = reader.count_or_zero("critical_alerts");
    let warning_alerts = reader.count_or_zero("warning_alerts");
    let critical_disk_mount = reader.optional_string("critical_disk_mount");
    let critical_disk_usage = reader.optional_f64("critical_disk_usage");
    let disks_over_threshold = read_disks(&mut reader, &payload);
    let top_folders = reader.optional_json("top_folders");
    let raid_status = reader.healthy_unless_false("raid_status");
    let smart_status = reader.healthy_unless_false("smart_status");
    let filesystem_status = reader.healthy_unless_false("filesystem_status");
    let network_status = reader.healthy_unless_false("network_status");
    let iowait_percent = reader.optional_f64("iowait_percent");
    let summary = reader.optional_string("summary");
    let full_report = reader.optional_json("full_report");

    reader.finish()?;

    let Some(server_ip) = server_ip else {
        return Err(CoreError::Internal(
            "server address missing after validation".to_string(),
        ));
    };

    Ok(NewStorageReport {
        server_ip,
        total_alerts,
        critical_alerts,
        warning_alerts,
        critical_disk_mount,
        critical_disk_usage,
        disks_over_threshold,
        top_folders,
        raid_status,
        smart_status,
        filesystem_status,
        network_status,
        iowait_percent,
        summary,
        full_report,
    })
}

/// Parse `disks_over_threshold`, reporting each malformed entry by index.
fn read_disks(reader: &mut FieldReader<'_>, payload: &Value) -> Option<Vec<DiskOverThreshold>> {
    const FIELD: &str = "disks_over_threshold";

    let entries = match payload.get(FIELD) {
        None | Some(Value::Null) => return None,
        Some(Value::Array(entries)) => entries,
        Some(_) => {
            reader.reject(FIELD, "must be an array");
            return None;
        }
    };

    let mut disks = Vec::with_capacity(entries.len());
    for (i, entry) in entries.iter().enumerate() {
        match DiskOverThreshold::deserialize(entry) {
            Ok(disk) => disks.push(disk),
            Err(e) => reader.reject(format!("{FIELD}[{i}]"), e.to_string()),
        }
    }
    Some(disks)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
