use clap::Parser;

use crate::metrics::{MetricErrorPolicy, SnapshotPolicy};

/// Settings for the HTML page service.
#[derive(Debug, Clone, Parser)]
#[command(name = "hostview-page", version, about = "Serve host metrics as an HTML page")]
pub struct PageConfig {
    /// Text shown at the top of the page
    #[arg(long, env = "RESPONSE_TEXT", default_value = "")]
    pub response_text: String,

    /// Listen port
    #[arg(long, env = "PORT", default_value_t = 8080)]
    pub port: u16,

    /// Exit immediately with this status code instead of serving
    #[arg(long, env = "DEBUG_EXIT")]
    pub debug_exit: Option<String>,

    #[arg(long, env = "SNAPSHOT_POLICY", value_enum, default_value_t = SnapshotPolicy::Live)]
    pub snapshot_policy: SnapshotPolicy,

    #[arg(long, env = "METRIC_ERRORS", value_enum, default_value_t = MetricErrorPolicy::ZeroFill)]
    pub metric_errors: MetricErrorPolicy,
}

/// Settings for the JSON service.
#[derive(Debug, Clone, Parser)]
#[command(name = "hostview-json", version, about = "Serve host metrics as JSON")]
pub struct JsonConfig {
    /// Listen host
    #[arg(long, env = "HOST", default_value = "localhost")]
    pub host: String,

    /// Listen port
    #[arg(long, env = "PORT", default_value_t = 9000)]
    pub port: u16,

    #[arg(long, env = "SNAPSHOT_POLICY", value_enum, default_value_t = SnapshotPolicy::Cached)]
    pub snapshot_policy: SnapshotPolicy,

    #[arg(long, env = "METRIC_ERRORS", value_enum, default_value_t = MetricErrorPolicy::ZeroFill)]
    pub metric_errors: MetricErrorPolicy,
}
