use std::collections::HashMap;
use std::fmt;
use std::sync::OnceLock;

use super::methods::SHORTHAND_TABLE;
use crate::levels::Level;

/// What a shorthand does with its arguments.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Operation {
    /// Print-style join.
    Log,
    /// `{}` template substitution.
    LogFmt,
    /// Print-style join inside a banner.
    Banner,
    /// Template substitution inside a banner.
    BannerFmt,
    /// Pretty-print each value, then join.
    Pp,
    /// Pretty-print each value, then substitute.
    PpFmt,
}

impl Operation {
    /// Every operation, in method-name order.
    pub const ALL: [Self; 6] = [
        Self::Log,
        Self::LogFmt,
        Self::Banner,
        Self::BannerFmt,
        Self::Pp,
        Self::PpFmt,
    ];

    /// The text placed between the tier and the sub-level number.
    #[must_use]
    pub const fn suffix(self) -> &'static str {
        match self {
            Self::Log => "",
            Self::LogFmt => "fmt",
            Self::Banner => "banner",
            Self::BannerFmt => "bannerfmt",
            Self::Pp => "pp",
            Self::PpFmt => "ppfmt",
        }
    }

    /// Whether the first argument is a template.
    #[must_use]
    pub const fn takes_template(self) -> bool {
        matches!(self, Self::LogFmt | Self::BannerFmt | Self::PpFmt)
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Log => f.write_str("log"),
            other => f.write_str(other.suffix()),
        }
    }
}

/// One generated per-level method, available for lookup by name.
///
/// ```
/// use finelog::{Level, Operation, Shorthand};
///
/// let shorthand = Shorthand::lookup("infobanner5").unwrap();
/// assert_eq!(shorthand.level(), Level::INFO5);
/// assert_eq!(shorthand.op(), Operation::Banner);
/// assert_eq!(Shorthand::all().count(), 300);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Shorthand {
    name: &'static str,
    level: Level,
    op: Operation,
}

impl Shorthand {
    pub(crate) const fn new(name: &'static str, level: Level, op: Operation) -> Self {
        Self { name, level, op }
    }

    /// The method name, e.g. `warningppfmt3`.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// The level the method logs at.
    #[must_use]
    pub const fn level(&self) -> Level {
        self.level
    }

    /// The operation it performs.
    #[must_use]
    pub const fn op(&self) -> Operation {
        self.op
    }

    /// Finds a shorthand by method name, ignoring ASCII case.
    #[must_use]
    pub fn lookup(name: &str) -> Option<Self> {
        static INDEX: OnceLock<HashMap<&'static str, Shorthand>> = OnceLock::new();
        let index = INDEX.get_or_init(|| {
            SHORTHAND_TABLE
                .iter()
                .map(|shorthand| (shorthand.name, *shorthand))
                .collect()
        });
        index.get(name.to_ascii_lowercase().as_str()).copied()
    }

    /// All generated shorthands, ordered by level then operation.
    pub fn all() -> impl Iterator<Item = Self> {
        SHORTHAND_TABLE.iter().copied()
    }

    /// Builds the method name for `level` and `op`: lowercase tier, the
    /// operation suffix, then the sub-level number when it is not zero.
    /// Levels outside `10..=59` have no shorthand.
    #[must_use]
    pub fn derive_name(level: Level, op: Operation) -> Option<String> {
        let tier = level.tier()?;
        let mut name = tier.name().to_ascii_lowercase();
        name.push_str(op.suffix());
        match level.offset() {
            Some(0) | None => {}
            Some(offset) => name.push_str(&offset.to_string()),
        }
        Some(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_matches_naming_rule() {
        for shorthand in Shorthand::all() {
            assert_eq!(
                Shorthand::derive_name(shorthand.level(), shorthand.op()).as_deref(),
                Some(shorthand.name())
            );
        }
    }

    #[test]
    fn every_level_has_every_operation() {
        for value in 10..60 {
            for op in Operation::ALL {
                let name = Shorthand::derive_name(Level(value), op).unwrap();
                let found = Shorthand::lookup(&name).unwrap();
                assert_eq!(found.level(), Level(value));
                assert_eq!(found.op(), op);
            }
        }
    }

    #[test]
    fn lookup_examples() {
        assert_eq!(Shorthand::lookup("info").unwrap().level(), Level::INFO);
        assert_eq!(Shorthand::lookup("criticalppfmt9").unwrap().level(), Level::CRITICAL9);
        assert_eq!(Shorthand::lookup("WarningFmt2").unwrap().op(), Operation::LogFmt);
        assert!(Shorthand::lookup("info10").is_none());
        assert!(Shorthand::lookup("trace").is_none());
    }

    #[test]
    fn levels_outside_tiers_have_no_name() {
        assert!(Shorthand::derive_name(Level::TRACE, Operation::Log).is_none());
        assert!(Shorthand::derive_name(Level(60), Operation::Pp).is_none());
    }

    #[test]
    fn template_operations_are_flagged() {
        let templated: Vec<_> = Operation::ALL.into_iter().filter(|op| op.takes_template()).collect();
        assert_eq!(templated, vec![Operation::LogFmt, Operation::BannerFmt, Operation::PpFmt]);
    }
}
