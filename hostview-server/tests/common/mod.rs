#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::atomic::{AtomicU64, Ordering};

use axum::Router;
use tokio::net::TcpListener;

use hostview_server::metrics::{MetricsSource, ProbeError};
use hostview_shared::metrics::{CpuInfo, DiskPartition, HostInfo, NetCounters, VirtualMemory};

/// Reports a different memory reading on every collection, like a busy host.
#[derive(Default)]
pub struct ChangingSource {
    pub collections: AtomicU64,
}

impl MetricsSource for ChangingSource {
    fn cpus(&self) -> Result<Vec<CpuInfo>, ProbeError> {
        Ok(vec![CpuInfo {
            name: "cpu0".into(),
            brand: "Test CPU".into(),
            mhz: 2400,
            ..Default::default()
        }])
    }

    fn disks(&self) -> Result<Vec<DiskPartition>, ProbeError> {
        Ok(vec![DiskPartition {
            device: "/dev/sda1".into(),
            mountpoint: "/".into(),
            fstype: "ext4".into(),
            ..Default::default()
        }])
    }

    fn host(&self) -> Result<HostInfo, ProbeError> {
        Ok(HostInfo {
            hostname: "test-host".into(),
            os: "TestOS".into(),
            ..Default::default()
        })
    }

    fn memory(&self) -> Result<VirtualMemory, ProbeError> {
        let n = self.collections.fetch_add(1, Ordering::SeqCst) + 1;
        Ok(VirtualMemory {
            total: 1_000_000,
            used: 1000 * n,
            ..Default::default()
        }
        .with_used_percent())
    }

    fn networks(&self) -> Result<Vec<NetCounters>, ProbeError> {
        Err(ProbeError::Unavailable("network counters"))
    }
}

/// Serves `app` on an ephemeral loopback port with peer addresses attached.
pub async fn spawn(app: Router) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let _ = hostview_server::server::serve(listener, app).await;
    });
    addr
}

pub async fn get(addr: SocketAddr) -> reqwest::Response {
    reqwest::get(format!("http://{addr}/")).await.unwrap()
}
