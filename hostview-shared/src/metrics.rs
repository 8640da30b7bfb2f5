use serde::{Deserialize, Serialize};

use crate::fields::Describable;

/// Point-in-time host telemetry. A field is `None` when its sub-report was
/// dropped by the collection policy.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct Snapshot {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cpu_info: Option<Vec<CpuInfo>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disk_info: Option<Vec<DiskPartition>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host_info: Option<HostInfo>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub virtual_memory: Option<VirtualMemory>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub net_info: Option<Vec<NetCounters>>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct CpuInfo {
    pub cpu: usize,
    pub name: String,
    pub vendor_id: String,
    pub brand: String,
    pub mhz: u64,
    pub usage_percent: f32,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct DiskPartition {
    pub device: String,
    pub mountpoint: String,
    pub fstype: String,
    pub kind: String,
    pub removable: bool,
    pub total_bytes: u64,
    pub available_bytes: u64,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct HostInfo {
    pub hostname: String,
    pub os: String,
    pub os_version: String,
    pub kernel_version: String,
    pub arch: String,
    pub uptime_secs: u64,
    pub boot_time: u64,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct VirtualMemory {
    pub total: u64,
    pub available: u64,
    pub used: u64,
    pub free: u64,
    pub used_percent: f64,
    pub swap_total: u64,
    pub swap_used: u64,
    pub swap_free: u64,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct NetCounters {
    pub name: String,
    pub mac: String,
    pub bytes_sent: u64,
    pub bytes_recv: u64,
    pub packets_sent: u64,
    pub packets_recv: u64,
    pub errin: u64,
    pub errout: u64,
}

impl Describable for Snapshot {}
impl Describable for CpuInfo {}
impl Describable for DiskPartition {}
impl Describable for HostInfo {}
impl Describable for VirtualMemory {}
impl Describable for NetCounters {}

impl VirtualMemory {
    /// Fills in `used_percent` from `used` and `total`.
    pub fn with_used_percent(mut self) -> Self {
        self.used_percent = if self.total == 0 {
            0.0
        } else {
            (self.used as f64 / self.total as f64) * 100.0
        };
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::FieldValue;

    #[test]
    fn test_snapshot_skips_absent_reports() {
        let snapshot = Snapshot {
            host_info: Some(HostInfo::default()),
            ..Default::default()
        };
        let json = serde_json::to_value(&snapshot).unwrap();
        let obj = json.as_object().unwrap();
        assert_eq!(obj.len(), 1);
        assert!(obj.contains_key("host_info"));
    }

    #[test]
    fn test_zero_host_info_describes_every_field() {
        let map = HostInfo::default().fields();
        assert_eq!(map.len(), 7);
        assert_eq!(map["hostname"], FieldValue::Text(String::new()));
        assert_eq!(map["uptime_secs"].as_u64(), Some(0));
    }

    #[test]
    fn test_net_counters_fields_by_name() {
        let counters = NetCounters {
            name: "lo".into(),
            bytes_sent: 10,
            bytes_recv: 20,
            ..Default::default()
        };
        let map = counters.fields();
        assert_eq!(map.len(), 8);
        assert_eq!(map["name"].as_text(), Some("lo"));
        assert_eq!(map["bytes_recv"].as_u64(), Some(20));
    }

    #[test]
    fn test_used_percent() {
        let mem = VirtualMemory {
            total: 200,
            used: 50,
            ..Default::default()
        }
        .with_used_percent();
        assert_eq!(mem.used_percent, 25.0);

        let empty = VirtualMemory::default().with_used_percent();
        assert_eq!(empty.used_percent, 0.0);
    }
}
