//! The logger facade: ties the process id, clock, buffer pool and sink
//! together and plugs the header formatter into the [`log`] facade.

use {
    crate::{
        caller::{
            CallSite,
            CallerResolver,
            ResolvedLocation,
            resolve_caller,
        },
        clock::{
            Clock,
            SystemClock,
        },
        header::format_header,
        pool::{
            BufferPool,
            PooledBuffer,
        },
        severity::Severity,
    },
    log::{
        LevelFilter,
        Log,
        Metadata,
        Record,
        SetLoggerError,
    },
    std::{
        fmt,
        io::{
            self,
            Write,
        },
        sync::{
            Mutex,
            PoisonError,
            atomic::{
                AtomicU64,
                AtomicU8,
                Ordering,
            },
        },
    },
};

/// Formats and writes complete log lines.
///
/// A `Logger` owns the collaborators of the header formatter: the process
/// id (captured once at startup and injected), a [`Clock`], a
/// [`BufferPool`] and a byte sink. Emission never fails outwardly — sink
/// errors are counted and swallowed, malformed inputs are clamped by the
/// formatter.
///
/// The logger also implements [`log::Log`], so after [`Logger::install`]
/// the standard `log` macros route through the header formatter with the
/// caller location carried by the [`Record`].
pub struct Logger {
    pid: u32,
    clock: Box<dyn Clock>,
    pool: BufferPool,
    sink: Mutex<Box<dyn Write + Send>>,
    threshold: AtomicU8,
    dropped: AtomicU64,
}

impl Logger {
    /// Creates a logger writing to stderr with the system clock.
    ///
    /// `pid` is the process identifier shown in every header; capture it
    /// once at startup (`std::process::id()`) and inject it here.
    #[must_use]
    pub fn new(pid: u32) -> Self {
        Self {
            pid,
            clock: Box::new(SystemClock),
            pool: BufferPool::default(),
            sink: Mutex::new(Box::new(io::stderr())),
            threshold: AtomicU8::new(Severity::Info as u8),
            dropped: AtomicU64::new(0),
        }
    }

    /// Replaces the wall-clock source.
    pub fn set_clock(&mut self, clock: Box<dyn Clock>) {
        self.clock = clock;
    }

    /// Replaces the byte sink the formatted lines are written to.
    pub fn set_sink(&mut self, sink: Box<dyn Write + Send>) {
        self.sink = Mutex::new(sink);
    }

    /// Sets the minimum severity that is emitted.
    pub fn set_threshold(&self, threshold: Severity) {
        self.threshold.store(threshold as u8, Ordering::Release);
    }

    /// The minimum severity that is emitted.
    #[must_use]
    pub fn threshold(&self) -> Severity {
        Severity::from_u8(self.threshold.load(Ordering::Acquire))
    }

    /// Number of lines lost to sink write errors.
    #[must_use]
    pub fn dropped_count(&self) -> u64 {
        self.dropped.load(Ordering::Relaxed)
    }

    /// Formats a header for the given location into a pooled buffer.
    ///
    /// The buffer ends with the trailing space after `]`, ready for the
    /// message text to be appended. See [`crate::header`] for the layout.
    #[must_use]
    pub fn format_header(&self, severity: Severity, file: &str, line: i64) -> PooledBuffer {
        let mut buf = self.pool.acquire();
        format_header(severity, &self.clock.now(), self.pid, file, line, &mut buf);
        buf
    }

    /// Resolves the caller through `resolver` and formats a header for it.
    ///
    /// Besides the filled buffer this returns the resolved location, so
    /// callers that need the same file/line elsewhere (a fatal-exit dump,
    /// for example) do not resolve twice. When resolution fails the header
    /// carries the sentinel location and formatting proceeds normally.
    #[must_use]
    pub fn header<'r>(
        &self,
        severity: Severity,
        resolver: &'r dyn CallerResolver,
        depth: usize,
    ) -> (PooledBuffer, ResolvedLocation<'r>) {
        let (location, _ok) = resolve_caller(resolver, depth);
        let buf = self.format_header(severity, location.file(), i64::from(location.line()));
        (buf, location)
    }

    /// Formats and writes one complete log line for the calling location.
    ///
    /// The location is captured via `#[track_caller]`; wrapper functions
    /// that should report *their* caller add the attribute themselves.
    #[track_caller]
    pub fn emit(&self, severity: Severity, args: fmt::Arguments<'_>) {
        let site = CallSite::here();
        self.emit_at(severity, &site, 0, args);
    }

    /// Formats and writes one complete log line, resolving the caller
    /// through an explicit resolver and depth.
    pub fn emit_at(
        &self,
        severity: Severity,
        resolver: &dyn CallerResolver,
        depth: usize,
        args: fmt::Arguments<'_>,
    ) {
        if severity < self.threshold() {
            return;
        }
        let (mut buf, _location) = self.header(severity, resolver, depth);
        self.finish_line(&mut buf, args);
    }

    /// Appends the message and newline to a header buffer and writes it out.
    fn finish_line(&self, buf: &mut PooledBuffer, args: fmt::Arguments<'_>) {
        // Writing into a Vec<u8> cannot fail.
        let _ = write!(buf, "{args}");
        if !buf.ends_with(b"\n") {
            buf.push(b'\n');
        }

        let mut sink = self.sink.lock().unwrap_or_else(PoisonError::into_inner);
        if sink.write_all(buf).is_err() {
            self.dropped.fetch_add(1, Ordering::Relaxed);
        }
    }

    /// Flushes the sink.
    ///
    /// This is the one place where an I/O error surfaces to the caller;
    /// emission itself never fails.
    pub fn flush(&self) -> io::Result<()> {
        self.sink
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .flush()
    }

    /// Installs this logger as the global [`log`] backend.
    ///
    /// This must only be called once per process.
    pub fn install(self, max_level: LevelFilter) -> Result<(), SetLoggerError> {
        log::set_boxed_logger(Box::new(self))?;
        log::set_max_level(max_level);
        Ok(())
    }
}

impl Log for Logger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        Severity::from(metadata.level()) >= self.threshold()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let severity = Severity::from(record.level());
        let mut buf = if let Some(file) = record.file()
            && let Some(line) = record.line()
        {
            self.format_header(severity, file, i64::from(line))
        } else {
            let unknown = ResolvedLocation::UNKNOWN;
            self.format_header(severity, unknown.file(), i64::from(unknown.line()))
        };
        self.finish_line(&mut buf, *record.args());
    }

    fn flush(&self) {
        let _ = self.flush();
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("pid", &self.pid)
            .field("threshold", &self.threshold())
            .field("dropped", &self.dropped_count())
            .finish_non_exhaustive()
    }
}
