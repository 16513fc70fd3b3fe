//! Health sample payload validation and classification.

use serde_json::Value;

use super::fields::FieldReader;
use super::SERVER_ADDRESS_FIELD;
use crate::error::CoreError;
use crate::monitoring::thresholds::{resolve_error_message, SampleReading};
use crate::types::Percent;

/// A validated, classified health sample ready for insertion.
#[derive(Debug, Clone, PartialEq)]
pub struct NewHealthSample {
    pub server_ip: String,
    pub cpu_usage: Percent,
    pub memory_usage: Percent,
    pub memory_total: Option<i64>,
    pub memory_used: Option<i64>,
    pub disk_usage: Percent,
    pub disk_total: Option<i64>,
    pub disk_used: Option<i64>,
    pub load_average: Option<f64>,
    pub uptime: Option<i64>,
    pub network_rx: Option<i64>,
    pub network_tx: Option<i64>,
    pub processes_total: Option<i32>,
    pub processes_running: Option<i32>,
    pub is_error: bool,
    pub error_message: Option<String>,
    /// The payload exactly as the agent sent it.
    pub raw_data: Value,
}

/// Validate an agent payload and derive its error state.
///
/// Fails with [`CoreError::Validation`] listing every violated field. On
/// success the stored message is the agent's own message when it sent one,
/// otherwise the threshold classifier output.
pub fn prepare_health_sample(payload: Value) -> Result<NewHealthSample, CoreError> {
    let mut reader = FieldReader::new(&payload)?;

    let server_ip = reader.required_str(SERVER_ADDRESS_FIELD);
    let cpu_usage = reader.required_percent("cpu_usage");
    let memory_usage = reader.required_percent("memory_usage");
    let disk_usage = reader.required_percent("disk_usage");

    let memory_total = reader.optional_i64("memory_total");
    let memory_used = reader.optional_i64("memory_used");
    let disk_total = reader.optional_i64("disk_total");
    let disk_used = reader.optional_i64("disk_used");
    let load_average = reader.optional_f64("load_average");
    let uptime = reader.optional_i64("uptime");
    let network_rx = reader.optional_i64("network_rx");
    let network_tx = reader.optional_i64("network_tx");
    let processes_total = reader.optional_i32("processes_total");
    let processes_running = reader.optional_i32("processes_running");
    let explicit_message = reader.optional_string("error_message");

    reader.finish()?;

    // finish() succeeded, so every required field was read.
    let (Some(server_ip), Some(cpu_usage), Some(memory_usage), Some(disk_usage)) =
        (server_ip, cpu_usage, memory_usage, disk_usage)
    else {
        return Err(CoreError::Internal(
            "required health sample field missing after validation".to_string(),
        ));
    };

    let reading = SampleReading {
        cpu_usage,
        memory_usage,
        disk_usage,
        load_average,
    };
    let error_message = resolve_error_message(explicit_message.as_deref(), &reading);

    Ok(NewHealthSample {
        server_ip,
        cpu_usage,
        memory_usage,
        memory_total,
        memory_used,
        disk_usage,
        disk_total,
        disk_used,
        load_average,
        uptime,
        network_rx,
        network_tx,
        processes_total,
        processes_running,
        is_error: error_message.is_some(),
        error_message,
        raw_data: payload,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn violated_fields(err: CoreError) -> Vec<String> {
        match err {
            CoreError::Validation(v) => v.into_iter().map(|f| f.field).collect(),
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn valid_payload_passes_through() {
        let payload = json!({
            "server_ip": "10.0.0.42",
            "cpu_usage": 12.5,
            "memory_usage": 40,
            "disk_usage": 55.0,
            "memory_total": 17179869184_i64,
            "memory_used": 6871947673_i64,
            "load_average": 0.75,
            "uptime": 86400,
            "network_rx": 1024,
            "network_tx": 2048.0,
            "processes_total": 210,
            "processes_running": 3
        });
        let sample = prepare_health_sample(payload.clone()).expect("valid payload");

        assert_eq!(sample.server_ip, "10.0.0.42");
        assert_eq!(sample.memory_usage, 40.0);
        assert_eq!(sample.memory_total, Some(17_179_869_184));
        assert_eq!(sample.network_tx, Some(2048));
        assert_eq!(sample.disk_total, None);
        assert_eq!(sample.processes_running, Some(3));
        assert!(!sample.is_error);
        assert_eq!(sample.error_message, None);
        assert_eq!(sample.raw_data, payload);
    }

    #[test]
    fn every_violation_is_reported() {
        let err = prepare_health_sample(json!({
            "server_ip": "",
            "cpu_usage": 150,
            "memory_usage": -1,
            "disk_usage": "90"
        }))
        .unwrap_err();

        assert_eq!(
            violated_fields(err),
            vec!["server_ip", "cpu_usage", "memory_usage", "disk_usage"]
        );
    }

    #[test]
    fn missing_required_fields_are_reported() {
        let err = prepare_health_sample(json!({})).unwrap_err();
        assert_eq!(violated_fields(err).len(), 4);
    }

    #[test]
    fn range_bounds_are_inclusive() {
        let sample = prepare_health_sample(json!({
            "server_ip": "10.0.0.1",
            "cpu_usage": 0,
            "memory_usage": 100,
            "disk_usage": 100.0
        }))
        .expect("boundary values are valid");
        assert!(sample.is_error, "100% memory and disk are critical");
    }

    #[test]
    fn wrongly_typed_optional_fields_are_rejected() {
        let err = prepare_health_sample(json!({
            "server_ip": "10.0.0.1",
            "cpu_usage": 1,
            "memory_usage": 1,
            "disk_usage": 1,
            "uptime": "a while",
            "memory_total": true,
            "load_average": null
        }))
        .unwrap_err();
        assert_eq!(violated_fields(err), vec!["memory_total", "uptime"]);
    }

    #[test]
    fn fractional_counters_are_truncated() {
        let sample = prepare_health_sample(json!({
            "server_ip": "10.0.0.1",
            "cpu_usage": 10,
            "memory_usage": 20,
            "disk_usage": 30,
            "uptime": 12345.67,
            "network_rx": 1536.5,
            "network_tx": 0.9,
            "processes_total": 210.4
        }))
        .expect("fractional counters are coerced");

        assert_eq!(sample.uptime, Some(12_345));
        assert_eq!(sample.network_rx, Some(1_536));
        assert_eq!(sample.network_tx, Some(0));
        assert_eq!(sample.processes_total, Some(210));
    }

    #[test]
    fn process_count_outside_i32_is_rejected() {
        let err = prepare_health_sample(json!({
            "server_ip": "10.0.0.1",
            "cpu_usage": 10,
            "memory_usage": 20,
            "disk_usage": 30,
            "processes_total": 5_000_000_000_i64
        }))
        .unwrap_err();
        assert_eq!(violated_fields(err), vec!["processes_total"]);
    }

    #[test]
    fn non_object_body_is_rejected() {
        let err = prepare_health_sample(json!([1, 2, 3])).unwrap_err();
        assert_eq!(violated_fields(err), vec!["body"]);
    }

    #[test]
    fn critical_cpu_derives_error_message() {
        let sample = prepare_health_sample(json!({
            "server_ip": "192.168.1.10",
            "cpu_usage": 97,
            "memory_usage": 50,
            "disk_usage": 40
        }))
        .expect("valid payload");
        assert!(sample.is_error);
        assert_eq!(sample.error_message.as_deref(), Some("CPU crítica: 97.0%"));
    }

    #[test]
    fn explicit_error_message_overrides_thresholds() {
        let sample = prepare_health_sample(json!({
            "server_ip": "192.168.1.10",
            "cpu_usage": 97,
            "memory_usage": 50,
            "disk_usage": 40,
            "error_message": "smartd reported failures"
        }))
        .expect("valid payload");
        assert!(sample.is_error);
        assert_eq!(
            sample.error_message.as_deref(),
            Some("smartd reported failures")
        );
    }

    #[test]
    fn explicit_message_marks_error_below_thresholds() {
        let sample = prepare_health_sample(json!({
            "server_ip": "10.0.0.3",
            "cpu_usage": 5,
            "memory_usage": 5,
            "disk_usage": 5,
            "error_message": "backup job failed"
        }))
        .expect("valid payload");
        assert!(sample.is_error);
    }

    #[test]
    fn address_is_trimmed() {
        let sample = prepare_health_sample(json!({
            "server_ip": "  10.0.0.9 ",
            "cpu_usage": 1,
            "memory_usage": 1,
            "disk_usage": 1
        }))
        .expect("valid payload");
        assert_eq!(sample.server_ip, "10.0.0.9");
    }
}
