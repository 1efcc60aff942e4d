//! JSON configuration of the demo binary.

use {
    anyhow::Context,
    linelog::Severity,
    serde::{
        Deserialize,
        Serialize,
    },
    std::{
        fs,
        path::Path,
    },
};

/// The configuration of a demo run.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Minimum severity that is emitted, by name (`"info"`, `"warning"`,
    /// `"error"`, `"fatal"`).
    threshold: Option<String>,
    /// Process id override, for reproducible header output.
    pid: Option<u32>,
}

impl Config {
    /// Reads the configuration from disk and returns the parsed JSON.
    pub fn read_from_disk(path: &Path) -> anyhow::Result<Self> {
        let bytes =
            fs::read(path).with_context(|| format!("reading config {}", path.display()))?;
        serde_json::from_slice(&bytes).context("parsing config JSON")
    }

    /// The configured threshold; [`Severity::Info`] when unset.
    pub fn threshold(&self) -> anyhow::Result<Severity> {
        self.threshold.as_deref().map_or(Ok(Severity::Info), |name| {
            name.parse().context("invalid threshold in config")
        })
    }

    /// The process id to show in headers.
    pub fn pid(&self) -> u32 {
        self.pid.unwrap_or_else(std::process::id)
    }
}
