//! crates/logging/src/levels.rs
//! Fine-grained numeric severity levels and their names.
//!
//! Every standard tier (`DEBUG`, `INFO`, `WARNING`, `ERROR`, `CRITICAL`) is
//! split into ten sub-levels: the base name sits on the multiple of ten and
//! `<TIER>1`..`<TIER>9` occupy the following nine numbers. The table is a
//! `static` array that nothing mutates, so lookups are deterministic.

use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A numeric severity. Larger numbers are more severe.
///
/// ```
/// use finelog::Level;
///
/// assert_eq!(Level::WARNING3, Level(33));
/// assert_eq!(Level::WARNING3.to_string(), "WARNING3");
/// assert_eq!("warning3".parse::<Level>().unwrap(), Level(33));
/// assert_eq!(Level(61).to_string(), "LEVEL61");
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Level(pub u32);

macro_rules! level_table {
    ($( $name:ident = $value:literal ),* $(,)?) => {
        impl Level {
            $(
                #[doc = concat!("`", stringify!($name), "` (", stringify!($value), ").")]
                pub const $name: Self = Self($value);
            )*
        }

        /// Canonical names, ordered by level number.
        static NAMED_LEVELS: &[(&str, Level)] = &[
            $( (stringify!($name), Level::$name), )*
        ];
    };
}

level_table! {
    LOG_ALL = 0,
    TRACE = 5,
    DEBUG = 10, DEBUG1 = 11, DEBUG2 = 12, DEBUG3 = 13, DEBUG4 = 14,
    DEBUG5 = 15, DEBUG6 = 16, DEBUG7 = 17, DEBUG8 = 18, DEBUG9 = 19,
    INFO = 20, INFO1 = 21, INFO2 = 22, INFO3 = 23, INFO4 = 24,
    INFO5 = 25, INFO6 = 26, INFO7 = 27, INFO8 = 28, INFO9 = 29,
    WARNING = 30, WARNING1 = 31, WARNING2 = 32, WARNING3 = 33, WARNING4 = 34,
    WARNING5 = 35, WARNING6 = 36, WARNING7 = 37, WARNING8 = 38, WARNING9 = 39,
    ERROR = 40, ERROR1 = 41, ERROR2 = 42, ERROR3 = 43, ERROR4 = 44,
    ERROR5 = 45, ERROR6 = 46, ERROR7 = 47, ERROR8 = 48, ERROR9 = 49,
    CRITICAL = 50, CRITICAL1 = 51, CRITICAL2 = 52, CRITICAL3 = 53, CRITICAL4 = 54,
    CRITICAL5 = 55, CRITICAL6 = 56, CRITICAL7 = 57, CRITICAL8 = 58, CRITICAL9 = 59,
    LOG_OFF = 100,
}

/// Names accepted by [`number_for`] that never come back from [`name_for`].
static ALIASES: &[(&str, Level)] = &[
    ("WARN", Level::WARNING),
    ("WARN1", Level::WARNING1),
    ("WARN2", Level::WARNING2),
    ("WARN3", Level::WARNING3),
    ("WARN4", Level::WARNING4),
    ("WARN5", Level::WARNING5),
    ("WARN6", Level::WARNING6),
    ("WARN7", Level::WARNING7),
    ("WARN8", Level::WARNING8),
    ("WARN9", Level::WARNING9),
    ("NOTICE", Level::INFO5),
];

const SYNTHETIC_PREFIX: &str = "LEVEL";

/// The five standard severity tiers that carry ten sub-levels each.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Tier {
    /// Levels 10..=19.
    Debug,
    /// Levels 20..=29.
    Info,
    /// Levels 30..=39.
    Warning,
    /// Levels 40..=49.
    Error,
    /// Levels 50..=59.
    Critical,
}

impl Tier {
    /// All tiers from least to most severe.
    pub const ALL: [Self; 5] = [
        Self::Debug,
        Self::Info,
        Self::Warning,
        Self::Error,
        Self::Critical,
    ];

    /// Upper-case name of the tier's base level.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Debug => "DEBUG",
            Self::Info => "INFO",
            Self::Warning => "WARNING",
            Self::Error => "ERROR",
            Self::Critical => "CRITICAL",
        }
    }

    /// The tier's base level (a multiple of ten).
    #[must_use]
    pub const fn base(self) -> Level {
        match self {
            Self::Debug => Level::DEBUG,
            Self::Info => Level::INFO,
            Self::Warning => Level::WARNING,
            Self::Error => Level::ERROR,
            Self::Critical => Level::CRITICAL,
        }
    }
}

impl Level {
    /// Returns the raw level number.
    #[must_use]
    pub const fn value(self) -> u32 {
        self.0
    }

    /// Returns the tier this level belongs to, if it lies in `10..=59`.
    #[must_use]
    pub const fn tier(self) -> Option<Tier> {
        match self.0 {
            10..=19 => Some(Tier::Debug),
            20..=29 => Some(Tier::Info),
            30..=39 => Some(Tier::Warning),
            40..=49 => Some(Tier::Error),
            50..=59 => Some(Tier::Critical),
            _ => None,
        }
    }

    /// Returns the sub-level offset (`0..=9`) within the tier, if any.
    #[must_use]
    pub const fn offset(self) -> Option<u32> {
        match self.tier() {
            Some(_) => Some(self.0 % 10),
            None => None,
        }
    }

    /// Returns the canonical name; see [`name_for`].
    #[must_use]
    pub fn name(self) -> Cow<'static, str> {
        name_for(self)
    }

    /// Reports whether this level has a registered canonical name.
    #[must_use]
    pub fn is_named(self) -> bool {
        canonical_name(self).is_some()
    }

    /// Maps the level onto the closest `tracing` verbosity.
    #[cfg(feature = "tracing")]
    #[must_use]
    pub const fn tracing_level(self) -> tracing::Level {
        match self.0 {
            0..=9 => tracing::Level::TRACE,
            10..=19 => tracing::Level::DEBUG,
            20..=29 => tracing::Level::INFO,
            30..=39 => tracing::Level::WARN,
            _ => tracing::Level::ERROR,
        }
    }
}

impl From<u32> for Level {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

impl From<Level> for u32 {
    fn from(level: Level) -> Self {
        level.0
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match canonical_name(*self) {
            Some(name) => f.write_str(name),
            None => write!(f, "{SYNTHETIC_PREFIX}{}", self.0),
        }
    }
}

impl FromStr for Level {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        parse_level_name(s)
    }
}

/// A level given either by number or by name.
///
/// Anything that names a level converts into a `LevelSpec`, so APIs taking
/// `impl Into<LevelSpec>` accept [`Level`], `u32`, `&str` and `String`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LevelSpec {
    /// A numeric level; always valid.
    Number(u32),
    /// A level name, alias, or `LEVEL<digits>` form; resolved case-insensitively.
    Name(String),
}

impl LevelSpec {
    /// Resolves the spec into a [`Level`]; see [`number_for`].
    pub fn resolve(&self) -> Result<Level> {
        match self {
            Self::Number(value) => Ok(Level(*value)),
            Self::Name(name) => parse_level_name(name),
        }
    }
}

impl From<Level> for LevelSpec {
    fn from(level: Level) -> Self {
        Self::Number(level.0)
    }
}

impl From<u32> for LevelSpec {
    fn from(value: u32) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for LevelSpec {
    fn from(name: &str) -> Self {
        Self::Name(name.to_owned())
    }
}

impl From<String> for LevelSpec {
    fn from(name: String) -> Self {
        Self::Name(name)
    }
}

impl fmt::Display for LevelSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(value) => fmt::Display::fmt(&Level(*value), f),
            Self::Name(name) => f.write_str(name),
        }
    }
}

fn canonical_name(level: Level) -> Option<&'static str> {
    NAMED_LEVELS
        .iter()
        .find(|(_, candidate)| *candidate == level)
        .map(|(name, _)| *name)
}

/// Returns the canonical name of `level`, or `LEVEL<number>` for numbers
/// without a registered name.
///
/// ```
/// use finelog::{name_for, Level};
///
/// assert_eq!(name_for(Level(25)), "INFO5");
/// assert_eq!(name_for(Level(7)), "LEVEL7");
/// ```
#[must_use]
pub fn name_for(level: Level) -> Cow<'static, str> {
    match canonical_name(level) {
        Some(name) => Cow::Borrowed(name),
        None => Cow::Owned(format!("{SYNTHETIC_PREFIX}{}", level.0)),
    }
}

/// Resolves a level number or name into a [`Level`].
///
/// Numbers pass through unchanged. Names are upper-cased, then matched
/// against the canonical names and the aliases (`WARN`, `WARN1`..`WARN9`,
/// `NOTICE`), and finally parsed as `LEVEL<digits>`.
///
/// ```
/// use finelog::{number_for, Level};
///
/// assert_eq!(number_for("warn2")?, Level(32));
/// assert_eq!(number_for("LEVEL61")?, Level(61));
/// assert_eq!(number_for(17u32)?, Level(17));
/// assert!(number_for("LEVELxyz").is_err());
/// # Ok::<(), finelog::Error>(())
/// ```
pub fn number_for(spec: impl Into<LevelSpec>) -> Result<Level> {
    spec.into().resolve()
}

fn parse_level_name(name: &str) -> Result<Level> {
    let upper = name.to_ascii_uppercase();
    if let Some(level) = NAMED_LEVELS
        .iter()
        .chain(ALIASES)
        .find(|(candidate, _)| *candidate == upper)
        .map(|(_, level)| *level)
    {
        return Ok(level);
    }

    upper
        .strip_prefix(SYNTHETIC_PREFIX)
        .filter(|digits| !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()))
        .and_then(|digits| digits.parse::<u32>().ok())
        .map(Level)
        .ok_or_else(|| Error::InvalidLevelName(name.to_owned()))
}

/// Iterates over every level that has a canonical name, ordered by number.
pub fn named_levels() -> impl Iterator<Item = (&'static str, Level)> {
    NAMED_LEVELS.iter().copied()
}

/// Iterates over the aliases accepted by [`number_for`].
pub fn level_aliases() -> impl Iterator<Item = (&'static str, Level)> {
    ALIASES.iter().copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_levels_keep_standard_numbers() {
        assert_eq!(Level::DEBUG.value(), 10);
        assert_eq!(Level::INFO.value(), 20);
        assert_eq!(Level::WARNING.value(), 30);
        assert_eq!(Level::ERROR.value(), 40);
        assert_eq!(Level::CRITICAL.value(), 50);
    }

    #[test]
    fn canonical_name_prefers_warning_over_warn() {
        assert_eq!(name_for(Level(30)), "WARNING");
        assert_eq!(name_for(Level(37)), "WARNING7");
    }

    #[test]
    fn notice_is_an_alias_for_info5() {
        assert_eq!(number_for("NOTICE").unwrap(), Level::INFO5);
        assert_eq!(name_for(Level::INFO5), "INFO5");
    }

    #[test]
    fn extra_named_levels_resolve() {
        assert_eq!(number_for("log_all").unwrap(), Level(0));
        assert_eq!(number_for("Trace").unwrap(), Level(5));
        assert_eq!(number_for("LOG_OFF").unwrap(), Level(100));
        assert_eq!(name_for(Level(100)), "LOG_OFF");
    }

    #[test]
    fn synthetic_names_round_trip() {
        assert_eq!(name_for(Level(61)), "LEVEL61");
        assert_eq!(number_for("level61").unwrap(), Level(61));
    }

    #[test]
    fn synthetic_prefix_requires_plain_digits() {
        for bad in ["LEVEL", "LEVELxyz", "LEVEL+3", "LEVEL-3", "LEVEL 3", ""] {
            let err = number_for(bad).unwrap_err();
            assert!(matches!(err, Error::InvalidLevelName(ref name) if name == bad));
        }
    }

    #[test]
    fn tier_and_offset_split_levels() {
        assert_eq!(Level(47).tier(), Some(Tier::Error));
        assert_eq!(Level(47).offset(), Some(7));
        assert_eq!(Level(5).tier(), None);
        assert_eq!(Level(60).offset(), None);
        for tier in Tier::ALL {
            assert_eq!(tier.base().to_string(), tier.name());
        }
    }

    #[test]
    fn named_table_is_sorted_and_unique() {
        let levels: Vec<Level> = named_levels().map(|(_, level)| level).collect();
        assert!(levels.windows(2).all(|pair| pair[0] < pair[1]));
        assert_eq!(levels.len(), 53);
    }

    #[test]
    fn aliases_never_shadow_canonical_names() {
        for (alias, level) in level_aliases() {
            assert_ne!(name_for(level), alias);
        }
    }

    #[test]
    fn level_spec_deserializes_from_number_or_name() {
        let number: LevelSpec = serde_json::from_str("23").unwrap();
        let name: LevelSpec = serde_json::from_str("\"info3\"").unwrap();
        assert_eq!(number.resolve().unwrap(), name.resolve().unwrap());
    }

    #[cfg(feature = "tracing")]
    #[test]
    fn tracing_level_follows_tier() {
        assert_eq!(Level::TRACE.tracing_level(), tracing::Level::TRACE);
        assert_eq!(Level::DEBUG9.tracing_level(), tracing::Level::DEBUG);
        assert_eq!(Level::INFO5.tracing_level(), tracing::Level::INFO);
        assert_eq!(Level::WARNING1.tracing_level(), tracing::Level::WARN);
        assert_eq!(Level::CRITICAL.tracing_level(), tracing::Level::ERROR);
    }
}
