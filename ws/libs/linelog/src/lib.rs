//! Fixed-layout log-line header formatting and the minimal logging runtime
//! around it.
//!
//! Every log line starts with the same prefix — severity glyph, local
//! timestamp, process id, caller file and line:
//!
//! ```text
//! I 2024-03-07 14:05:09      42 server.go:128] message text
//! ```
//!
//! Header formatting runs once per log call, so it is kept off the generic
//! formatting machinery: digits are encoded by hand into a stack scratch
//! buffer ([`scratch`]) at fixed byte offsets ([`header`]), and the result
//! lands in a buffer borrowed from a free list ([`pool`]). Caller location
//! ([`caller`]) and wall-clock time ([`clock`]) are injected capabilities,
//! so the formatting core stays deterministic under test.
//!
//! [`Logger`] ties the pieces together and implements [`log::Log`], so the
//! standard `log` macros work after [`Logger::install`].

#![deny(
    clippy::all,
    clippy::cargo,
    clippy::nursery,
    clippy::must_use_candidate
)]
// I can't do anything about this; fault of the dependencies
#![allow(clippy::multiple_crate_versions)]
#![deny(missing_docs)]
#![deny(missing_debug_implementations)]
#![deny(rustdoc::all)]

pub mod caller;
pub mod clock;
pub mod header;
mod logger;
pub mod pool;
pub mod scratch;
pub mod severity;

pub use {
    caller::{
        CallSite,
        CallerResolver,
        ResolvedLocation,
        resolve_caller,
    },
    clock::{
        Clock,
        SystemClock,
        WallTime,
    },
    header::format_header,
    logger::Logger,
    pool::{
        BufferPool,
        PooledBuffer,
    },
    scratch::Scratch,
    severity::{
        ParseSeverityError,
        Severity,
    },
};
