use std::backtrace::Backtrace;
use std::fmt::Display;

use crate::{Category, LogSettings, LogSettingsError, Visibility};

/// Target attached to every console event
pub const CONSOLE_TARGET: &str = "console";

/// Console handle that drops output from hidden categories
///
/// Passed explicitly to the code that prints, instead of rewiring a global.
/// Shown output goes to `tracing` under the [`CONSOLE_TARGET`] target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Console {
    visibility: Visibility,
}

impl Console {
    pub const fn new(visibility: Visibility) -> Self {
        Self { visibility }
    }

    /// Build a console from settings merged with the environment
    ///
    /// # Errors
    ///
    /// Returns an error if the environment holds invalid settings
    pub fn from_settings(settings: LogSettings) -> Result<Self, LogSettingsError> {
        settings.resolve().map(Self::new)
    }

    pub fn is_enabled(&self, category: Category) -> bool {
        self.visibility.is_shown(category)
    }

    pub const fn visibility(&self) -> &Visibility {
        &self.visibility
    }

    /// Labels of the shown categories, e.g. `["errors", "warnings"]`
    pub fn showing(&self) -> Vec<&'static str> {
        self.visibility.categories().map(Category::label).collect()
    }

    /// `Showing: [errors | warnings | ...]`
    pub fn announcement(&self) -> String {
        format!("Showing: [{}]", self.showing().join(" | "))
    }

    /// Print `message` in `category` if it is shown; returns whether it was
    pub fn emit(&self, category: Category, message: impl Display) -> bool {
        if !self.is_enabled(category) {
            return false;
        }
        match category {
            Category::Error => tracing::error!(target: CONSOLE_TARGET, category = "error", "{message}"),
            Category::Warn => tracing::warn!(target: CONSOLE_TARGET, category = "warn", "{message}"),
            Category::Info => tracing::info!(target: CONSOLE_TARGET, category = "info", "{message}"),
            Category::Log => tracing::info!(target: CONSOLE_TARGET, category = "log", "{message}"),
            Category::Debug => tracing::debug!(target: CONSOLE_TARGET, category = "debug", "{message}"),
            Category::Trace => {
                let backtrace = Backtrace::capture();
                tracing::trace!(target: CONSOLE_TARGET, category = "trace", %backtrace, "{message}");
            }
        }
        true
    }

    pub fn error(&self, message: impl Display) {
        self.emit(Category::Error, message);
    }

    pub fn warn(&self, message: impl Display) {
        self.emit(Category::Warn, message);
    }

    pub fn info(&self, message: impl Display) {
        self.emit(Category::Info, message);
    }

    pub fn log(&self, message: impl Display) {
        self.emit(Category::Log, message);
    }

    pub fn debug(&self, message: impl Display) {
        self.emit(Category::Debug, message);
    }

    /// Print with the current backtrace attached
    pub fn trace(&self, message: impl Display) {
        self.emit(Category::Trace, message);
    }
}
