use sysinfo::{
    CpuRefreshKind, Disks, MemoryRefreshKind, Networks, RefreshKind, System,
    MINIMUM_CPU_UPDATE_INTERVAL,
};
use thiserror::Error;

use hostview_shared::metrics::{CpuInfo, DiskPartition, HostInfo, NetCounters, VirtualMemory};

#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("{0} unavailable")]
    Unavailable(&'static str),
    #[error("{0}")]
    Other(String),
}

/// One fallible fetch per sub-report. Fetches are independent of each other.
pub trait MetricsSource: Send + Sync {
    fn cpus(&self) -> Result<Vec<CpuInfo>, ProbeError>;
    fn disks(&self) -> Result<Vec<DiskPartition>, ProbeError>;
    fn host(&self) -> Result<HostInfo, ProbeError>;
    fn memory(&self) -> Result<VirtualMemory, ProbeError>;
    fn networks(&self) -> Result<Vec<NetCounters>, ProbeError>;
}

/// Reads the local host through `sysinfo`.
#[derive(Debug, Default, Clone, Copy)]
pub struct SysinfoSource;

impl MetricsSource for SysinfoSource {
    fn cpus(&self) -> Result<Vec<CpuInfo>, ProbeError> {
        let mut sys = System::new_with_specifics(
            RefreshKind::nothing().with_cpu(CpuRefreshKind::everything()),
        );
        // usage is a delta between two refreshes; this runs on the blocking pool
        std::thread::sleep(MINIMUM_CPU_UPDATE_INTERVAL);
        sys.refresh_cpu_usage();

        let cpus: Vec<CpuInfo> = sys
            .cpus()
            .iter()
            .enumerate()
            .map(|(index, cpu)| CpuInfo {
                cpu: index,
                name: cpu.name().to_string(),
                vendor_id: cpu.vendor_id().to_string(),
                brand: cpu.brand().to_string(),
                mhz: cpu.frequency(),
                usage_percent: cpu.cpu_usage(),
            })
            .collect();

        if cpus.is_empty() {
            return Err(ProbeError::Unavailable("cpu list"));
        }
        Ok(cpus)
    }

    fn disks(&self) -> Result<Vec<DiskPartition>, ProbeError> {
        let disks = Disks::new_with_refreshed_list();
        Ok(disks
            .iter()
            .map(|disk| DiskPartition {
                device: disk.name().to_string_lossy().into_owned(),
                mountpoint: disk.mount_point().display().to_string(),
                fstype: disk.file_system().to_string_lossy().into_owned(),
                kind: format!("{:?}", disk.kind()),
                removable: disk.is_removable(),
                total_bytes: disk.total_space(),
                available_bytes: disk.available_space(),
            })
            .collect())
    }

    fn host(&self) -> Result<HostInfo, ProbeError> {
        let hostname = System::host_name().ok_or(ProbeError::Unavailable("host name"))?;
        Ok(HostInfo {
            hostname,
            os: System::name().unwrap_or_default(),
            os_version: System::os_version().unwrap_or_default(),
            kernel_version: System::kernel_version().unwrap_or_default(),
            arch: std::env::consts::ARCH.to_string(),
            uptime_secs: System::uptime(),
            boot_time: System::boot_time(),
        })
    }

    fn memory(&self) -> Result<VirtualMemory, ProbeError> {
        let sys = System::new_with_specifics(
            RefreshKind::nothing().with_memory(MemoryRefreshKind::everything()),
        );
        if sys.total_memory() == 0 {
            return Err(ProbeError::Unavailable("memory totals"));
        }

        Ok(VirtualMemory {
            total: sys.total_memory(),
            available: sys.available_memory(),
            used: sys.used_memory(),
            free: sys.free_memory(),
            swap_total: sys.total_swap(),
            swap_used: sys.used_swap(),
            swap_free: sys.free_swap(),
            ..Default::default()
        }
        .with_used_percent())
    }

    fn networks(&self) -> Result<Vec<NetCounters>, ProbeError> {
        let networks = Networks::new_with_refreshed_list();
        let mut counters: Vec<NetCounters> = networks
            .iter()
            .map(|(name, data)| NetCounters {
                name: name.clone(),
                mac: data.mac_address().to_string(),
                bytes_sent: data.total_transmitted(),
                bytes_recv: data.total_received(),
                packets_sent: data.total_packets_transmitted(),
                packets_recv: data.total_packets_received(),
                errin: data.total_errors_on_received(),
                errout: data.total_errors_on_transmitted(),
            })
            .collect();
        counters.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(counters)
    }
}
