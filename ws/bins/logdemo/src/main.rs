//! Demo binary: installs the linelog logger and emits sample lines through
//! both the direct API and the `log` macros.
//!
//! An optional first argument names a JSON config file, see `config`.

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

use {
    anyhow::Context,
    crate::config::Config,
    linelog::{
        Logger,
        Severity,
    },
    log::LevelFilter,
    std::path::Path,
};

mod config;

fn main() -> anyhow::Result<()> {
    let config = match std::env::args().nth(1) {
        Some(path) => Config::read_from_disk(Path::new(&path))?,
        None => Config::default(),
    };

    let pid = config.pid();
    let logger = Logger::new(pid);
    logger.set_threshold(config.threshold()?);

    // Direct API: the location of this call ends up in the header.
    logger.emit(
        Severity::Info,
        format_args!("logdemo starting with pid {pid}"),
    );

    logger
        .install(LevelFilter::Trace)
        .context("installing the global logger")?;

    // Facade API: location comes from the log macros.
    log::info!("hello through the log facade");
    log::warn!("headers keep their columns for every severity");
    log::error!("and errors are no different");

    log::logger().flush();
    Ok(())
}
