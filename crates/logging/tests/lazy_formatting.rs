//! Integration tests for suppressed log calls.
//!
//! A call at a disabled level must return before any argument is
//! serialized or any template is parsed. These tests log a value whose
//! serialization counts its invocations and then fails.

use std::sync::atomic::{AtomicUsize, Ordering};

use finelog::{Args, Error, Level, Logger, LoggerOptions, Operation, Shorthand, args};
use serde::{Serialize, Serializer};
use test_support::{capture, unique_name};

/// Serializes by bumping a counter and failing.
struct Exploding<'a>(&'a AtomicUsize);

impl Serialize for Exploding<'_> {
    fn serialize<S: Serializer>(&self, _serializer: S) -> Result<S::Ok, S::Error> {
        self.0.fetch_add(1, Ordering::SeqCst);
        Err(serde::ser::Error::custom("formatting was attempted"))
    }
}

fn logger_at(level: Level) -> Logger {
    Logger::get_or_create(
        &unique_name("lazy"),
        &LoggerOptions::new().level(level).stream(capture()),
    )
    .expect("configure logger")
}

// ============================================================================
// Suppressed Levels
// ============================================================================

/// Verifies a DEBUG3 call above a DEBUG5 threshold never formats.
#[test]
fn debug3_below_debug5_is_never_formatted() {
    let log = logger_at(Level::DEBUG5);
    let calls = AtomicUsize::new(0);

    log.debug3(args![Exploding(&calls)]).unwrap();
    log.debugfmt3("{}", args![Exploding(&calls)]).unwrap();
    log.debugbanner3(args![Exploding(&calls)]).unwrap();
    log.debugbannerfmt3("{}", args![Exploding(&calls)]).unwrap();
    log.debugpp3(args![Exploding(&calls)]).unwrap();
    log.debugppfmt3("{}", args![Exploding(&calls)]).unwrap();

    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

/// Verifies every shorthand below the threshold stays lazy, including
/// by-name dispatch.
#[test]
fn every_suppressed_shorthand_is_lazy() {
    let log = logger_at(Level::CRITICAL9);
    let calls = AtomicUsize::new(0);

    for shorthand in Shorthand::all().filter(|s| s.level() < Level::CRITICAL9) {
        let args = if shorthand.op().takes_template() {
            args!["{}", Exploding(&calls)]
        } else {
            args![Exploding(&calls)]
        };
        log.dispatch(shorthand.name(), args).unwrap();
    }

    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

/// Verifies malformed templates are not parsed when suppressed.
#[test]
fn broken_templates_are_ignored_when_suppressed() {
    let log = logger_at(Level::ERROR);
    log.warningfmt9("{0} {", ()).unwrap();
    log.infoppfmt("{:d}", args!["not a number"]).unwrap();
    log.logfmt("DEBUG", "{missing}", Args::new()).unwrap();
}

// ============================================================================
// Enabled Levels
// ============================================================================

/// Verifies an enabled call does format, and reports the failure.
#[test]
fn enabled_call_formats_once_and_fails() {
    let log = logger_at(Level::DEBUG5);
    let calls = AtomicUsize::new(0);

    let err = log.debug5(args![Exploding(&calls)]).unwrap_err();

    assert!(matches!(err, Error::Format(_)));
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

/// Verifies the template operations are flagged consistently with dispatch.
#[test]
fn template_operations_take_a_template() {
    let templated: Vec<_> = Shorthand::all()
        .filter(|s| s.level() == Level::INFO)
        .filter(|s| s.op().takes_template())
        .map(|s| s.op())
        .collect();
    assert_eq!(
        templated,
        [Operation::LogFmt, Operation::BannerFmt, Operation::PpFmt]
    );
}
