//! Per-level shorthands, generated from one table row per level.
//!
//! Each row `LEVEL: log logfmt banner bannerfmt pp ppfmt;` produces six
//! methods on [`Logger`], a `Logger::LEVEL` constant and six entries in the
//! by-name lookup table used by [`Shorthand::lookup`].

use super::Logger;
use super::shorthand::{Operation, Shorthand};
use crate::error::Result;
use crate::format::Args;
use crate::host::HostLogger;
use crate::levels::Level;

macro_rules! shorthands {
    ($( $level:ident: $log:ident $logfmt:ident $banner:ident $bannerfmt:ident $pp:ident $ppfmt:ident; )+) => {
        impl Logger {
            $(
                #[doc = concat!("The `", stringify!($level), "` level.")]
                pub const $level: Level = Level::$level;
            )+
        }

        impl<H: HostLogger> Logger<H> {
            $(
                #[doc = concat!("Logs `args` joined print-style at `", stringify!($level), "`.")]
                #[track_caller]
                pub fn $log<'a>(&self, args: impl Into<Args<'a>>) -> Result<()> {
                    self.log(Level::$level, args)
                }

                #[doc = concat!("Logs `template` filled from `args` at `", stringify!($level), "`.")]
                #[track_caller]
                pub fn $logfmt<'a>(&self, template: &str, args: impl Into<Args<'a>>) -> Result<()> {
                    self.logfmt(Level::$level, template, args)
                }

                #[doc = concat!("Logs `args` as a banner at `", stringify!($level), "`.")]
                #[track_caller]
                pub fn $banner<'a>(&self, args: impl Into<Args<'a>>) -> Result<()> {
                    self.banner(Level::$level, args)
                }

                #[doc = concat!("Logs a banner around `template` filled from `args` at `", stringify!($level), "`.")]
                #[track_caller]
                pub fn $bannerfmt<'a>(&self, template: &str, args: impl Into<Args<'a>>) -> Result<()> {
                    self.bannerfmt(Level::$level, template, args)
                }

                #[doc = concat!("Pretty-prints `args` at `", stringify!($level), "`.")]
                #[track_caller]
                pub fn $pp<'a>(&self, args: impl Into<Args<'a>>) -> Result<()> {
                    self.pp(Level::$level, args)
                }

                #[doc = concat!("Fills `template` with pretty-printed `args` at `", stringify!($level), "`.")]
                #[track_caller]
                pub fn $ppfmt<'a>(&self, template: &str, args: impl Into<Args<'a>>) -> Result<()> {
                    self.ppfmt(Level::$level, template, args)
                }
            )+
        }

        pub(super) static SHORTHAND_TABLE: &[Shorthand] = &[
            $(
                Shorthand::new(stringify!($log), Level::$level, Operation::Log),
                Shorthand::new(stringify!($logfmt), Level::$level, Operation::LogFmt),
                Shorthand::new(stringify!($banner), Level::$level, Operation::Banner),
                Shorthand::new(stringify!($bannerfmt), Level::$level, Operation::BannerFmt),
                Shorthand::new(stringify!($pp), Level::$level, Operation::Pp),
                Shorthand::new(stringify!($ppfmt), Level::$level, Operation::PpFmt),
            )+
        ];
    };
}

shorthands! {
    DEBUG: debug debugfmt debugbanner debugbannerfmt debugpp debugppfmt;
    DEBUG1: debug1 debugfmt1 debugbanner1 debugbannerfmt1 debugpp1 debugppfmt1;
    DEBUG2: debug2 debugfmt2 debugbanner2 debugbannerfmt2 debugpp2 debugppfmt2;
    DEBUG3: debug3 debugfmt3 debugbanner3 debugbannerfmt3 debugpp3 debugppfmt3;
    DEBUG4: debug4 debugfmt4 debugbanner4 debugbannerfmt4 debugpp4 debugppfmt4;
    DEBUG5: debug5 debugfmt5 debugbanner5 debugbannerfmt5 debugpp5 debugppfmt5;
    DEBUG6: debug6 debugfmt6 debugbanner6 debugbannerfmt6 debugpp6 debugppfmt6;
    DEBUG7: debug7 debugfmt7 debugbanner7 debugbannerfmt7 debugpp7 debugppfmt7;
    DEBUG8: debug8 debugfmt8 debugbanner8 debugbannerfmt8 debugpp8 debugppfmt8;
    DEBUG9: debug9 debugfmt9 debugbanner9 debugbannerfmt9 debugpp9 debugppfmt9;
    INFO: info infofmt infobanner infobannerfmt infopp infoppfmt;
    INFO1: info1 infofmt1 infobanner1 infobannerfmt1 infopp1 infoppfmt1;
    INFO2: info2 infofmt2 infobanner2 infobannerfmt2 infopp2 infoppfmt2;
    INFO3: info3 infofmt3 infobanner3 infobannerfmt3 infopp3 infoppfmt3;
    INFO4: info4 infofmt4 infobanner4 infobannerfmt4 infopp4 infoppfmt4;
    INFO5: info5 infofmt5 infobanner5 infobannerfmt5 infopp5 infoppfmt5;
    INFO6: info6 infofmt6 infobanner6 infobannerfmt6 infopp6 infoppfmt6;
    INFO7: info7 infofmt7 infobanner7 infobannerfmt7 infopp7 infoppfmt7;
    INFO8: info8 infofmt8 infobanner8 infobannerfmt8 infopp8 infoppfmt8;
    INFO9: info9 infofmt9 infobanner9 infobannerfmt9 infopp9 infoppfmt9;
    WARNING: warning warningfmt warningbanner warningbannerfmt warningpp warningppfmt;
    WARNING1: warning1 warningfmt1 warningbanner1 warningbannerfmt1 warningpp1 warningppfmt1;
    WARNING2: warning2 warningfmt2 warningbanner2 warningbannerfmt2 warningpp2 warningppfmt2;
    WARNING3: warning3 warningfmt3 warningbanner3 warningbannerfmt3 warningpp3 warningppfmt3;
    WARNING4: warning4 warningfmt4 warningbanner4 warningbannerfmt4 warningpp4 warningppfmt4;
    WARNING5: warning5 warningfmt5 warningbanner5 warningbannerfmt5 warningpp5 warningppfmt5;
    WARNING6: warning6 warningfmt6 warningbanner6 warningbannerfmt6 warningpp6 warningppfmt6;
    WARNING7: warning7 warningfmt7 warningbanner7 warningbannerfmt7 warningpp7 warningppfmt7;
    WARNING8: warning8 warningfmt8 warningbanner8 warningbannerfmt8 warningpp8 warningppfmt8;
    WARNING9: warning9 warningfmt9 warningbanner9 warningbannerfmt9 warningpp9 warningppfmt9;
    ERROR: error errorfmt errorbanner errorbannerfmt errorpp errorppfmt;
    ERROR1: error1 errorfmt1 errorbanner1 errorbannerfmt1 errorpp1 errorppfmt1;
    ERROR2: error2 errorfmt2 errorbanner2 errorbannerfmt2 errorpp2 errorppfmt2;
    ERROR3: error3 errorfmt3 errorbanner3 errorbannerfmt3 errorpp3 errorppfmt3;
    ERROR4: error4 errorfmt4 errorbanner4 errorbannerfmt4 errorpp4 errorppfmt4;
    ERROR5: error5 errorfmt5 errorbanner5 errorbannerfmt5 errorpp5 errorppfmt5;
    ERROR6: error6 errorfmt6 errorbanner6 errorbannerfmt6 errorpp6 errorppfmt6;
    ERROR7: error7 errorfmt7 errorbanner7 errorbannerfmt7 errorpp7 errorppfmt7;
    ERROR8: error8 errorfmt8 errorbanner8 errorbannerfmt8 errorpp8 errorppfmt8;
    ERROR9: error9 errorfmt9 errorbanner9 errorbannerfmt9 errorpp9 errorppfmt9;
    CRITICAL: critical criticalfmt criticalbanner criticalbannerfmt criticalpp criticalppfmt;
    CRITICAL1: critical1 criticalfmt1 criticalbanner1 criticalbannerfmt1 criticalpp1 criticalppfmt1;
    CRITICAL2: critical2 criticalfmt2 criticalbanner2 criticalbannerfmt2 criticalpp2 criticalppfmt2;
    CRITICAL3: critical3 criticalfmt3 criticalbanner3 criticalbannerfmt3 criticalpp3 criticalppfmt3;
    CRITICAL4: critical4 criticalfmt4 criticalbanner4 criticalbannerfmt4 criticalpp4 criticalppfmt4;
    CRITICAL5: critical5 criticalfmt5 criticalbanner5 criticalbannerfmt5 criticalpp5 criticalppfmt5;
    CRITICAL6: critical6 criticalfmt6 criticalbanner6 criticalbannerfmt6 criticalpp6 criticalppfmt6;
    CRITICAL7: critical7 criticalfmt7 criticalbanner7 criticalbannerfmt7 criticalpp7 criticalppfmt7;
    CRITICAL8: critical8 criticalfmt8 criticalbanner8 criticalbannerfmt8 criticalpp8 criticalppfmt8;
    CRITICAL9: critical9 criticalfmt9 criticalbanner9 criticalbannerfmt9 criticalpp9 criticalppfmt9;
}
