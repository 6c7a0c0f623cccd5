//! FFmpeg setup and console verbosity.
//!
//! FFmpeg prints its own diagnostics to stderr independently of the Rust
//! [`log`](https://crates.io/crates/log) facade. [`FfmpegLogLevel`] lets the
//! binary (or any library user) tune that output without importing
//! `ffmpeg-next` directly.
//!
//! # Example
//!
//! ```no_run
//! use framegrab::FfmpegLogLevel;
//!
//! let level: FfmpegLogLevel = "error".parse().unwrap();
//! framegrab::set_ffmpeg_log_level(level);
//! ```

use std::{
    fmt::{Display, Formatter, Result as FmtResult},
    str::FromStr,
};

use ffmpeg_next::util::log::Level;

/// FFmpeg internal log verbosity, most quiet first.
///
/// Each variant maps onto one of FFmpeg's `AV_LOG_*` thresholds; messages
/// below the selected severity are suppressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FfmpegLogLevel {
    /// No output at all.
    Quiet,
    /// Conditions after which the process aborts.
    Panic,
    /// Unrecoverable errors.
    Fatal,
    /// Recoverable errors.
    Error,
    /// Warnings (FFmpeg's own default).
    Warning,
    /// Informational messages.
    Info,
    /// Verbose informational messages.
    Verbose,
    /// Debugging messages.
    Debug,
    /// Everything.
    Trace,
}

impl FfmpegLogLevel {
    const ALL: [(FfmpegLogLevel, &'static str, Level); 9] = [
        (FfmpegLogLevel::Quiet, "quiet", Level::Quiet),
        (FfmpegLogLevel::Panic, "panic", Level::Panic),
        (FfmpegLogLevel::Fatal, "fatal", Level::Fatal),
        (FfmpegLogLevel::Error, "error", Level::Error),
        (FfmpegLogLevel::Warning, "warning", Level::Warning),
        (FfmpegLogLevel::Info, "info", Level::Info),
        (FfmpegLogLevel::Verbose, "verbose", Level::Verbose),
        (FfmpegLogLevel::Debug, "debug", Level::Debug),
        (FfmpegLogLevel::Trace, "trace", Level::Trace),
    ];

    /// Lower-case name accepted by [`FromStr`].
    pub fn name(self) -> &'static str {
        Self::ALL
            .iter()
            .find(|(level, _, _)| *level == self)
            .map_or("warning", |(_, name, _)| name)
    }

    fn to_ffmpeg_level(self) -> Level {
        Self::ALL
            .iter()
            .find(|(level, _, _)| *level == self)
            .map_or(Level::Warning, |(_, _, ffmpeg_level)| *ffmpeg_level)
    }

    fn from_ffmpeg_level(ffmpeg_level: Level) -> Option<Self> {
        Self::ALL
            .iter()
            .find(|(_, _, candidate)| *candidate == ffmpeg_level)
            .map(|(level, _, _)| *level)
    }
}

impl Display for FfmpegLogLevel {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.name())
    }
}

impl FromStr for FfmpegLogLevel {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let lowered = value.trim().to_ascii_lowercase();
        let lookup = if lowered == "warn" { "warning" } else { lowered.as_str() };
        Self::ALL
            .iter()
            .find(|(_, name, _)| *name == lookup)
            .map(|(level, _, _)| *level)
            .ok_or_else(|| {
                let names: Vec<&str> = Self::ALL.iter().map(|(_, name, _)| *name).collect();
                format!("unknown FFmpeg log level '{value}' (expected one of: {})", names.join(", "))
            })
    }
}

/// Set FFmpeg's console verbosity. Does not affect `log` crate output.
pub fn set_ffmpeg_log_level(level: FfmpegLogLevel) {
    ffmpeg_next::util::log::set_level(level.to_ffmpeg_level());
}

/// Current FFmpeg console verbosity, if it maps onto a known level.
pub fn get_ffmpeg_log_level() -> Option<FfmpegLogLevel> {
    ffmpeg_next::util::log::get_level()
        .ok()
        .and_then(FfmpegLogLevel::from_ffmpeg_level)
}

/// Initialise FFmpeg's format, codec, and network layers.
///
/// Safe to call repeatedly; [`crate::MediaFile::open`] calls it on every
/// open.
pub(crate) fn init() -> Result<(), ffmpeg_next::Error> {
    ffmpeg_next::init()
}

#[cfg(test)]
mod tests {
    use super::FfmpegLogLevel;

    #[test]
    fn parses_names_and_aliases() {
        assert_eq!("quiet".parse::<FfmpegLogLevel>(), Ok(FfmpegLogLevel::Quiet));
        assert_eq!("WARN".parse::<FfmpegLogLevel>(), Ok(FfmpegLogLevel::Warning));
        assert_eq!(" Trace ".parse::<FfmpegLogLevel>(), Ok(FfmpegLogLevel::Trace));
        assert!("loud".parse::<FfmpegLogLevel>().is_err());
    }

    #[test]
    fn set_level_is_read_back() {
        super::set_ffmpeg_log_level(FfmpegLogLevel::Error);
        assert_eq!(super::get_ffmpeg_log_level(), Some(FfmpegLogLevel::Error));
    }

    #[test]
    fn init_can_repeat() {
        assert!(super::init().is_ok());
        assert!(super::init().is_ok());
    }

    #[test]
    fn display_round_trips_through_from_str() {
        for (level, _, _) in FfmpegLogLevel::ALL {
            assert_eq!(level.to_string().parse::<FfmpegLogLevel>(), Ok(level));
        }
    }
}
