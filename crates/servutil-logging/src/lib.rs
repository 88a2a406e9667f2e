//! Console verbosity for servutil
//!
//! Decides which output categories (error, warn, info, log, debug, trace) a
//! process prints, from explicit [`LogSettings`] and the `VERBOSITY*`
//! environment variables, and hands back a [`Console`] that enforces it.

#![allow(clippy::must_use_candidate, clippy::needless_pass_by_value)]

mod category;
mod console;
mod settings;

pub use category::{Category, Verbosity};
pub use console::{CONSOLE_TARGET, Console};
pub use settings::{
    APP_ENV_VAR, EXCLUDE_VAR, INCLUDE_VAR, LogSettings, LogSettingsError, VERBOSITY_VAR, Visibility,
};

/// Initialize console output
///
/// Resolves `settings` against the environment, installs a
/// `tracing-subscriber` fmt subscriber filtered by `log_filter` (console
/// events are always let through, the [`Console`] filters those itself) and
/// announces which categories are shown. An already installed global
/// subscriber is kept.
///
/// # Errors
///
/// Returns an error if the settings or the environment hold an invalid level
/// or category, or if `log_filter` is not a valid filter directive
pub fn init(settings: LogSettings, log_filter: &str) -> anyhow::Result<Console> {
    use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

    let console = Console::from_settings(settings)?;

    let filter = EnvFilter::try_new(format!("{log_filter},{CONSOLE_TARGET}=trace"))
        .map_err(|e| anyhow::anyhow!("invalid log filter `{log_filter}`: {e}"))?;

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false);

    if tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init()
        .is_err()
    {
        tracing::debug!("global subscriber already installed, keeping it");
    }

    tracing::info!(target: CONSOLE_TARGET, "{}", console.announcement());

    Ok(console)
}
