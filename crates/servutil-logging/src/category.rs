use serde::Deserialize;
use strum::{AsRefStr, Display, EnumCount, EnumIter, EnumString};

use crate::LogSettingsError;

/// Console output categories, from least to most verbose
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Display, AsRefStr, EnumString, EnumIter, EnumCount,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Category {
    Error,
    Warn,
    Info,
    Log,
    Debug,
    Trace,
}

impl Category {
    /// Lowest verbosity level at which the category is shown
    pub const fn rank(self) -> u8 {
        match self {
            Self::Error => 1,
            Self::Warn => 2,
            Self::Info => 3,
            Self::Log => 4,
            Self::Debug => 5,
            Self::Trace => 6,
        }
    }

    /// Label used when announcing which categories are shown
    pub const fn label(self) -> &'static str {
        match self {
            Self::Error => "errors",
            Self::Warn => "warnings",
            Self::Info => "info",
            Self::Log => "logs",
            Self::Debug => "debug",
            Self::Trace => "trace",
        }
    }

    pub(crate) fn index(self) -> usize {
        usize::from(self.rank()) - 1
    }

    /// Parse a comma separated list of category names
    ///
    /// Blank entries are skipped.
    ///
    /// # Errors
    ///
    /// Returns an error for names that are not a category
    pub fn parse_list(list: &str) -> Result<Vec<Self>, LogSettingsError> {
        list.split(',')
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(|name| {
                name.parse()
                    .map_err(|_| LogSettingsError::UnknownCategory(name.to_owned()))
            })
            .collect()
    }
}

/// Console verbosity, 1 (errors only) through 6 (everything)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Deserialize)]
#[serde(try_from = "u8")]
pub struct Verbosity(u8);

impl Verbosity {
    pub const ERROR: Self = Self(1);
    pub const INFO: Self = Self(3);
    pub const TRACE: Self = Self(6);

    pub const fn get(self) -> u8 {
        self.0
    }

    /// Whether a category is covered by this level alone
    pub const fn covers(self, category: Category) -> bool {
        self.0 >= category.rank()
    }
}

impl TryFrom<u8> for Verbosity {
    type Error = LogSettingsError;

    fn try_from(level: u8) -> Result<Self, Self::Error> {
        if (1..=6).contains(&level) {
            Ok(Self(level))
        } else {
            Err(LogSettingsError::InvalidLevel(level.to_string()))
        }
    }
}

impl std::str::FromStr for Verbosity {
    type Err = LogSettingsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        trimmed
            .parse::<u8>()
            .map_err(|_| LogSettingsError::InvalidLevel(trimmed.to_owned()))
            .and_then(Self::try_from)
    }
}

#[cfg(test)]
mod tests {
    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn categories_are_ordered_by_rank() {
        let ranks: Vec<u8> = Category::iter().map(Category::rank).collect();
        assert_eq!(ranks, vec![1, 2, 3, 4, 5, 6]);
        assert_eq!(Category::COUNT, 6);
    }

    #[test]
    fn names_parse_case_insensitively() {
        assert_eq!("warn".parse::<Category>().unwrap(), Category::Warn);
        assert_eq!("DEBUG".parse::<Category>().unwrap(), Category::Debug);
        assert_eq!(Category::Log.to_string(), "log");
    }

    #[test]
    fn list_parsing() {
        assert_eq!(
            Category::parse_list("debug, trace,,").unwrap(),
            vec![Category::Debug, Category::Trace]
        );
        assert!(Category::parse_list("").unwrap().is_empty());

        let err = Category::parse_list("info,verbose").unwrap_err();
        assert!(matches!(err, LogSettingsError::UnknownCategory(name) if name == "verbose"));
    }

    #[test]
    fn verbosity_bounds() {
        assert_eq!("3".parse::<Verbosity>().unwrap(), Verbosity::INFO);
        assert!("0".parse::<Verbosity>().is_err());
        assert!("7".parse::<Verbosity>().is_err());
        assert!("loud".parse::<Verbosity>().is_err());
    }

    #[test]
    fn verbosity_covers_lower_ranks() {
        assert!(Verbosity::INFO.covers(Category::Error));
        assert!(Verbosity::INFO.covers(Category::Info));
        assert!(!Verbosity::INFO.covers(Category::Log));
        assert!(Verbosity::TRACE.covers(Category::Trace));
    }
}
