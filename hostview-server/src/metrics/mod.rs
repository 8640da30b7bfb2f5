mod source;

pub use source::{MetricsSource, ProbeError, SysinfoSource};

use std::sync::Arc;

use clap::ValueEnum;
use thiserror::Error;
use tracing::{debug, info};

use hostview_shared::metrics::Snapshot;

/// What to do when a single sub-report cannot be fetched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum MetricErrorPolicy {
    /// Substitute an empty report.
    #[default]
    ZeroFill,
    /// Leave the report out of the snapshot.
    Omit,
    /// Fail the whole collection.
    Fail,
}

/// When the snapshot is taken.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SnapshotPolicy {
    /// Fresh snapshot on every request.
    Live,
    /// One snapshot at startup, served for the process lifetime.
    Cached,
}

#[derive(Debug, Error)]
pub enum CollectError {
    #[error("failed to collect {report}: {source}")]
    Probe {
        report: &'static str,
        #[source]
        source: ProbeError,
    },
    #[error("metrics collection task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// Runs every sub-fetch and applies `policy` to the ones that fail.
pub fn collect(
    source: &dyn MetricsSource,
    policy: MetricErrorPolicy,
) -> Result<Snapshot, CollectError> {
    Ok(Snapshot {
        cpu_info: resolve("cpu", source.cpus(), policy)?,
        disk_info: resolve("disk", source.disks(), policy)?,
        host_info: resolve("host", source.host(), policy)?,
        virtual_memory: resolve("memory", source.memory(), policy)?,
        net_info: resolve("network", source.networks(), policy)?,
    })
}

fn resolve<T: Default>(
    report: &'static str,
    result: Result<T, ProbeError>,
    policy: MetricErrorPolicy,
) -> Result<Option<T>, CollectError> {
    let err = match result {
        Ok(value) => return Ok(Some(value)),
        Err(err) => err,
    };

    match policy {
        MetricErrorPolicy::ZeroFill => {
            debug!(report, error = %err, "sub-fetch failed, using empty report");
            Ok(Some(T::default()))
        }
        MetricErrorPolicy::Omit => {
            debug!(report, error = %err, "sub-fetch failed, omitting report");
            Ok(None)
        }
        MetricErrorPolicy::Fail => Err(CollectError::Probe {
            report,
            source: err,
        }),
    }
}

async fn collect_blocking(
    source: Arc<dyn MetricsSource>,
    policy: MetricErrorPolicy,
) -> Result<Snapshot, CollectError> {
    tokio::task::spawn_blocking(move || collect(source.as_ref(), policy)).await?
}

/// Hands out snapshots according to a [`SnapshotPolicy`].
#[derive(Clone)]
pub enum SnapshotProvider {
    Live {
        source: Arc<dyn MetricsSource>,
        errors: MetricErrorPolicy,
    },
    Cached(Arc<Snapshot>),
}

impl SnapshotProvider {
    /// Under [`SnapshotPolicy::Cached`] this performs the one collection.
    pub async fn new(
        policy: SnapshotPolicy,
        source: Arc<dyn MetricsSource>,
        errors: MetricErrorPolicy,
    ) -> Result<Self, CollectError> {
        match policy {
            SnapshotPolicy::Live => Ok(SnapshotProvider::Live { source, errors }),
            SnapshotPolicy::Cached => {
                let snapshot = collect_blocking(source, errors).await?;
                info!("cached host metrics snapshot taken at startup");
                Ok(SnapshotProvider::Cached(Arc::new(snapshot)))
            }
        }
    }

    pub async fn snapshot(&self) -> Result<Arc<Snapshot>, CollectError> {
        match self {
            SnapshotProvider::Live { source, errors } => {
                let snapshot = collect_blocking(source.clone(), *errors).await?;
                Ok(Arc::new(snapshot))
            }
            SnapshotProvider::Cached(snapshot) => Ok(snapshot.clone()),
        }
    }
}
