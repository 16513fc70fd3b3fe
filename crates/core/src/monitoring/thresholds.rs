//! Critical-threshold classifier for incoming health samples.
//!
//! The thresholds are fixed. Each check fires independently and the faults
//! are reported in CPU, memory, disk, load order.

use crate::types::Percent;

/// CPU utilization at or above this value is critical.
pub const CPU_CRITICAL_PERCENT: Percent = 95.0;

/// Memory utilization at or above this value is critical.
pub const MEMORY_CRITICAL_PERCENT: Percent = 95.0;

/// Disk utilization at or above this value is critical.
pub const DISK_CRITICAL_PERCENT: Percent = 95.0;

/// A load average at or above this value is considered high.
pub const LOAD_AVERAGE_HIGH: f64 = 8.0;

/// Separator used when several faults are folded into one error message.
pub const FAULT_SEPARATOR: &str = " | ";

/// The subset of a health sample the classifier looks at.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SampleReading {
    pub cpu_usage: Percent,
    pub memory_usage: Percent,
    pub disk_usage: Percent,
    pub load_average: Option<f64>,
}

/// Return every threshold fault present in `reading`, in fixed order.
pub fn classify(reading: &SampleReading) -> Vec<String> {
    let mut faults = Vec::new();

    if reading.cpu_usage >= CPU_CRITICAL_PERCENT {
        faults.push(format!("CPU crítica: {:.1}%", reading.cpu_usage));
    }
    if reading.memory_usage >= MEMORY_CRITICAL_PERCENT {
        faults.push(format!("Memória crítica: {:.1}%", reading.memory_usage));
    }
    if reading.disk_usage >= DISK_CRITICAL_PERCENT {
        faults.push(format!("Disco crítico: {:.1}%", reading.disk_usage));
    }
    if let Some(load) = reading.load_average {
        if load >= LOAD_AVERAGE_HIGH {
            faults.push(format!("Load alto: {load:.2}"));
        }
    }

    faults
}

/// Fold the classifier output into a single message, `None` when clean.
pub fn automatic_error_message(reading: &SampleReading) -> Option<String> {
    let faults = classify(reading);
    if faults.is_empty() {
        None
    } else {
        Some(faults.join(FAULT_SEPARATOR))
    }
}

/// Pick the message stored on a sample.
///
/// An explicit, non-blank message from the agent always wins over the
/// threshold-derived one. The sample is an error iff the result is `Some`.
pub fn resolve_error_message(explicit: Option<&str>, reading: &SampleReading) -> Option<String> {
    match explicit.map(str::trim) {
        Some(msg) if !msg.is_empty() => Some(msg.to_string()),
        _ => automatic_error_message(reading),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
