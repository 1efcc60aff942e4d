//! Severity model of the log-line header.

use {
    std::str::FromStr,
    thiserror::Error,
};

/// Glyphs of the severities, indexed by their discriminant.
const SEVERITY_GLYPHS: [u8; 4] = *b"IWEF";

/// Upper-case names of the severities, indexed by their discriminant.
const SEVERITY_NAMES: [&str; 4] = ["INFO", "WARNING", "ERROR", "FATAL"];

/// Error when a severity name cannot be parsed via [`Severity::from_str`].
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown severity name {0:?}")]
pub struct ParseSeverityError(String);

/// Ordered criticality of a log line: `Info < Warning < Error < Fatal`.
///
/// Every severity maps to exactly one upper-case ASCII glyph which starts
/// the log-line header. Raw values entering through [`Severity::from_u8`]
/// that lie outside the defined range fall back to [`Severity::Info`], so
/// header formatting keeps working on corrupted input.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum Severity {
    /// Routine operational message.
    Info = 0,
    /// Something unexpected that the program can compensate for.
    Warning = 1,
    /// An operation failed.
    Error = 2,
    /// The program cannot continue.
    Fatal = 3,
}

impl Severity {
    /// The single-character glyph of this severity (`I`, `W`, `E` or `F`).
    #[must_use]
    pub const fn glyph(self) -> u8 {
        SEVERITY_GLYPHS[self as usize]
    }

    /// The upper-case name of this severity.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        SEVERITY_NAMES[self as usize]
    }

    /// Converts a raw discriminant back into a severity.
    ///
    /// Values outside the defined range map to [`Severity::Info`] instead of
    /// failing; a malformed severity must never abort header formatting.
    #[must_use]
    pub const fn from_u8(raw: u8) -> Self {
        match raw {
            1 => Self::Warning,
            2 => Self::Error,
            3 => Self::Fatal,
            _ => Self::Info,
        }
    }
}

impl FromStr for Severity {
    type Err = ParseSeverityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SEVERITY_NAMES
            .iter()
            .position(|name| name.eq_ignore_ascii_case(s))
            .map(|idx| Self::from_u8(idx as u8))
            .ok_or_else(|| ParseSeverityError(s.to_string()))
    }
}

impl From<log::Level> for Severity {
    fn from(level: log::Level) -> Self {
        match level {
            log::Level::Error => Self::Error,
            log::Level::Warn => Self::Warning,
            log::Level::Info | log::Level::Debug | log::Level::Trace => Self::Info,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn glyphs() {
        assert_eq!(Severity::Info.glyph(), b'I');
        assert_eq!(Severity::Warning.glyph(), b'W');
        assert_eq!(Severity::Error.glyph(), b'E');
        assert_eq!(Severity::Fatal.glyph(), b'F');
    }

    #[test]
    fn ordering() {
        assert!(Severity::Info < Severity::Warning);
        assert!(Severity::Warning < Severity::Error);
        assert!(Severity::Error < Severity::Fatal);
    }

    #[test]
    fn from_u8_clamps_out_of_range_to_info() {
        assert_eq!(Severity::from_u8(0), Severity::Info);
        assert_eq!(Severity::from_u8(3), Severity::Fatal);
        assert_eq!(Severity::from_u8(4), Severity::Info);
        assert_eq!(Severity::from_u8(u8::MAX), Severity::Info);
    }

    #[test]
    fn parse_names_case_insensitively() {
        assert_eq!("info".parse::<Severity>().unwrap(), Severity::Info);
        assert_eq!("WARNING".parse::<Severity>().unwrap(), Severity::Warning);
        assert_eq!("Error".parse::<Severity>().unwrap(), Severity::Error);
        assert_eq!("fatal".parse::<Severity>().unwrap(), Severity::Fatal);

        assert!("verbose".parse::<Severity>().is_err());
        assert!("".parse::<Severity>().is_err());
    }

    #[test]
    fn from_log_level() {
        assert_eq!(Severity::from(log::Level::Error), Severity::Error);
        assert_eq!(Severity::from(log::Level::Warn), Severity::Warning);
        assert_eq!(Severity::from(log::Level::Info), Severity::Info);
        assert_eq!(Severity::from(log::Level::Debug), Severity::Info);
        assert_eq!(Severity::from(log::Level::Trace), Severity::Info);
    }
}
