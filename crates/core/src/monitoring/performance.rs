//! Fleet-wide performance rollup and per-server warning flag.

use serde::Serialize;

use crate::types::Percent;

/// Utilization above this value marks an online server as "warning"
/// in the fleet list (below the critical thresholds of the classifier).
pub const WARNING_PERCENT: Percent = 80.0;

/// Utilization triple of one server's current snapshot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Utilization {
    pub cpu_usage: Percent,
    pub memory_usage: Percent,
    pub disk_usage: Percent,
}

/// Averages across the servers whose metrics snapshot is fresh.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FleetPerformance {
    /// Number of servers that contributed to the averages.
    pub servers_sampled: usize,
    pub avg_cpu_usage: Percent,
    pub avg_memory_usage: Percent,
    pub avg_disk_usage: Percent,
    /// Mean headroom across the three resources: 100 means fully idle.
    pub health_score: Percent,
}

impl FleetPerformance {
    /// Average the given snapshots. Returns `None` for an empty input.
    ///
    /// Callers only pass servers with a fresh metrics snapshot; a server
    /// that is online through its storage report alone has no utilization
    /// to contribute.
    pub fn from_snapshots<I>(snapshots: I) -> Option<Self>
    where
        I: IntoIterator<Item = Utilization>,
    {
        let (count, cpu, memory, disk) = snapshots.into_iter().fold(
            (0usize, 0.0, 0.0, 0.0),
            |(n, cpu, memory, disk), u| {
                (n + 1, cpu + u.cpu_usage, memory + u.memory_usage, disk + u.disk_usage)
            },
        );
        if count == 0 {
            return None;
        }

        let n = count as f64;
        let avg_cpu_usage = cpu / n;
        let avg_memory_usage = memory / n;
        let avg_disk_usage = disk / n;
        let health_score =
            ((100.0 - avg_cpu_usage) + (100.0 - avg_memory_usage) + (100.0 - avg_disk_usage)) / 3.0;

        Some(Self {
            servers_sampled: count,
            avg_cpu_usage,
            avg_memory_usage,
            avg_disk_usage,
            health_score,
        })
    }
}

/// `true` when an online server has any resource above [`WARNING_PERCENT`].
/// Offline servers never warn.
pub fn has_warnings(is_online: bool, utilization: Option<Utilization>) -> bool {
    if !is_online {
        return false;
    }
    utilization.is_some_and(|u| {
        u.cpu_usage > WARNING_PERCENT
            || u.memory_usage > WARNING_PERCENT
            || u.disk_usage > WARNING_PERCENT
    })
}
