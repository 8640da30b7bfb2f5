pub mod fields;
pub mod metrics;
