//! Caller resolution: determining the source file and line of the code that
//! issued a logging call.
//!
//! Resolution is an injected capability so the formatting core stays
//! decoupled from any particular introspection mechanism and tests can
//! supply canned locations. The production capability is [`CallSite`],
//! captured through `#[track_caller]` at the logging entry point.

use std::panic::Location;

/// File name substituted when caller resolution fails.
pub const UNKNOWN_FILE: &str = "???";

/// A source location resolved for one logging call.
///
/// Produced once per call and immutable afterwards. The file is reduced to
/// its final path segment before it reaches the header, keeping the header
/// width bounded and readable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedLocation<'a> {
    file: &'a str,
    line: u32,
}

impl<'a> ResolvedLocation<'a> {
    /// Location used when resolution fails. Line 1 is not a real line
    /// number, but tolerated; formatting proceeds with it rather than
    /// aborting the log call.
    pub const UNKNOWN: ResolvedLocation<'static> = ResolvedLocation {
        file: UNKNOWN_FILE,
        line: 1,
    };

    /// Creates a location from a file name and a raw line number.
    ///
    /// Negative lines are clamped to 0; they are not real line numbers but
    /// must not break formatting.
    #[must_use]
    pub fn new(file: &'a str, line: i64) -> Self {
        Self {
            file,
            line: line.clamp(0, i64::from(u32::MAX)) as u32,
        }
    }

    /// The source file of this location.
    #[must_use]
    pub const fn file(&self) -> &'a str {
        self.file
    }

    /// The line number of this location.
    #[must_use]
    pub const fn line(&self) -> u32 {
        self.line
    }

    /// Reduces the file to the segment after the last path separator.
    ///
    /// `file!()`-style paths use the host platform's separator, so both `/`
    /// and `\` are recognized.
    #[must_use]
    pub fn shortened(self) -> Self {
        let file = self
            .file
            .rsplit(['/', '\\'])
            .next()
            .unwrap_or(self.file);
        Self { file, ..self }
    }
}

/// Capability to resolve the source location a number of stack frames above
/// the logging entry point.
///
/// `depth` lets wrapper layers report *their* caller's location instead of
/// their own. Implementations return `None` when the requested frame is
/// unavailable; [`resolve_caller`] then substitutes the sentinel location.
pub trait CallerResolver {
    /// Resolves the location `depth` frames above the entry point, or
    /// `None` when the frame cannot be resolved.
    fn locate(&self, depth: usize) -> Option<ResolvedLocation<'_>>;
}

/// Resolves the caller via `resolver`, never failing.
///
/// On success the file is reduced to its final path segment and the second
/// tuple element is `true`. On failure the sentinel location (`"???"`,
/// line 1) is substituted and the second element is `false` — the header
/// assembler proceeds either way.
#[must_use]
pub fn resolve_caller(resolver: &dyn CallerResolver, depth: usize) -> (ResolvedLocation<'_>, bool) {
    match resolver.locate(depth) {
        Some(location) => (location.shortened(), true),
        None => (ResolvedLocation::UNKNOWN, false),
    }
}

/// The production resolver: a call site captured at the logging entry point.
///
/// [`CallSite::here`] is `#[track_caller]`, so the captured location is that
/// of the caller of the innermost non-annotated frame. Wrapper layers that
/// want to report their own caller add `#[track_caller]` to their functions,
/// pushing the capture one frame further up — the moral equivalent of
/// `depth + 1` in a frame-walking runtime. A capture therefore only answers
/// `depth == 0`; deeper requests report failure and take the sentinel path.
#[derive(Debug, Clone, Copy)]
pub struct CallSite(&'static Location<'static>);

impl CallSite {
    /// Captures the caller of the surrounding `#[track_caller]` chain.
    #[must_use]
    #[track_caller]
    pub fn here() -> Self {
        Self(Location::caller())
    }
}

impl CallerResolver for CallSite {
    fn locate(&self, depth: usize) -> Option<ResolvedLocation<'_>> {
        (depth == 0).then(|| ResolvedLocation::new(self.0.file(), i64::from(self.0.line())))
    }
}
