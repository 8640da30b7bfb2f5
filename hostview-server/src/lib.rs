pub mod api;
pub mod config;
pub mod debug;
pub mod logging;
pub mod metrics;
pub mod response;
pub mod server;
