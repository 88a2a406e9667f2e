use serde::Deserialize;
use strum::{EnumCount, IntoEnumIterator};

use crate::{Category, Verbosity};

/// Environment variable holding the verbosity level (1-6)
pub const VERBOSITY_VAR: &str = "VERBOSITY";
/// Environment variable listing categories shown regardless of level
pub const INCLUDE_VAR: &str = "VERBOSITY_INCLUDE";
/// Environment variable listing categories never force-shown by include
pub const EXCLUDE_VAR: &str = "VERBOSITY_EXCLUDE";
/// Environment variable naming the deployment environment
pub const APP_ENV_VAR: &str = "APP_ENV";

/// Errors raised while reading console settings
#[derive(Debug, thiserror::Error)]
pub enum LogSettingsError {
    /// Verbosity outside 1-6 or not a number
    #[error("invalid verbosity level `{0}`, expected a number from 1 to 6")]
    InvalidLevel(String),

    /// Name that is not one of error, warn, info, log, debug, trace
    #[error("unknown log category `{0}`")]
    UnknownCategory(String),
}

/// Console verbosity settings
///
/// Every field is optional; unset fields fall back to the environment and
/// then to the built-in default (level 3 when `APP_ENV=production`, 6
/// otherwise).
///
/// ```toml
/// level = 2
/// include = ["debug"]
/// exclude = ["trace"]
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LogSettings {
    /// Verbosity level (1-6)
    #[serde(default)]
    pub level: Option<Verbosity>,
    /// Categories shown regardless of level
    #[serde(default)]
    pub include: Vec<Category>,
    /// Categories excluded from `include`
    #[serde(default)]
    pub exclude: Vec<Category>,
}

impl LogSettings {
    /// Read settings from `VERBOSITY`, `VERBOSITY_INCLUDE` and
    /// `VERBOSITY_EXCLUDE`; unset or empty variables leave the field unset
    ///
    /// # Errors
    ///
    /// Returns an error if a variable holds an invalid level or category
    pub fn from_env() -> Result<Self, LogSettingsError> {
        let level = env_var(VERBOSITY_VAR).map(|raw| raw.parse()).transpose()?;
        let include = env_var(INCLUDE_VAR)
            .map(|raw| Category::parse_list(&raw))
            .transpose()?
            .unwrap_or_default();
        let exclude = env_var(EXCLUDE_VAR)
            .map(|raw| Category::parse_list(&raw))
            .transpose()?
            .unwrap_or_default();

        Ok(Self {
            level,
            include,
            exclude,
        })
    }

    /// Fill unset fields from `fallback`
    #[must_use]
    pub fn or(self, fallback: Self) -> Self {
        Self {
            level: self.level.or(fallback.level),
            include: if self.include.is_empty() {
                fallback.include
            } else {
                self.include
            },
            exclude: if self.exclude.is_empty() {
                fallback.exclude
            } else {
                self.exclude
            },
        }
    }

    /// Level used when neither the settings nor the environment name one
    pub fn default_level() -> Verbosity {
        match env_var(APP_ENV_VAR) {
            Some(env) if env.eq_ignore_ascii_case("production") => Verbosity::INFO,
            _ => Verbosity::TRACE,
        }
    }

    /// Merge with the environment and decide which categories are shown
    ///
    /// # Errors
    ///
    /// Returns an error if the environment holds invalid settings
    pub fn resolve(self) -> Result<Visibility, LogSettingsError> {
        let merged = self.or(Self::from_env()?);
        let level = merged.level.unwrap_or_else(Self::default_level);
        Ok(Visibility::new(level, &merged.include, &merged.exclude))
    }
}

/// Which categories end up on the console
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Visibility {
    shown: [bool; Category::COUNT],
}

impl Visibility {
    /// A category is shown when the level covers it, or when it is included
    /// and not excluded
    pub fn new(level: Verbosity, include: &[Category], exclude: &[Category]) -> Self {
        let mut shown = [false; Category::COUNT];
        for category in Category::iter() {
            shown[category.index()] =
                level.covers(category) || (include.contains(&category) && !exclude.contains(&category));
        }
        Self { shown }
    }

    pub fn is_shown(&self, category: Category) -> bool {
        self.shown[category.index()]
    }

    /// Shown categories, least verbose first
    pub fn categories(&self) -> impl Iterator<Item = Category> + '_ {
        Category::iter().filter(move |category| self.is_shown(*category))
    }
}

fn env_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|value| !value.trim().is_empty())
}
