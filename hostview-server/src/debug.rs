use anyhow::{Context, Result};
use tracing::info;

pub const EXIT_ENV_KEY: &str = "DEBUG_EXIT";

/// Parses the debug-exit override. `None` means start normally.
pub fn exit_code(raw: Option<&str>) -> Result<Option<i32>> {
    let Some(raw) = raw else {
        return Ok(None);
    };
    let code = raw
        .parse::<i32>()
        .with_context(|| format!("error parsing exit code {raw} to int"))?;
    Ok(Some(code))
}

/// Reads `DEBUG_EXIT` straight from the environment, so the hook runs before
/// any other setting is parsed.
pub fn apply_env_exit_hook() -> Result<()> {
    let raw = std::env::var_os(EXIT_ENV_KEY).map(|v| v.to_string_lossy().into_owned());
    apply_exit_hook(raw.as_deref())
}

/// Exits the process when a debug-exit code is configured.
pub fn apply_exit_hook(raw: Option<&str>) -> Result<()> {
    if let Some(code) = exit_code(raw)? {
        info!("exiting with code {code} requested by env {EXIT_ENV_KEY}");
        std::process::exit(code);
    }
    Ok(())
}
