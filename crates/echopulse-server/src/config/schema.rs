use serde::Deserialize;

use echopulse_core::{EchoPulseError, Result};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    pub version: u32,

    #[serde(default)]
    pub server: ServerSection,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            version: 1,
            server: ServerSection::default(),
        }
    }
}

impl ServerConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(EchoPulseError::Config(format!(
                "unsupported config version: {}",
                self.version
            )));
        }

        self.server.validate()?;

        Ok(())
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerSection {
    #[serde(default = "default_listen")]
    pub listen: String,

    /// Close a session whenever the running request total crosses a multiple
    /// of this value. 0 disables the policy.
    #[serde(default = "default_close_every")]
    pub close_every: u64,

    #[serde(default = "default_report_interval_ms")]
    pub report_interval_ms: u64,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            listen: default_listen(),
            close_every: default_close_every(),
            report_interval_ms: default_report_interval_ms(),
        }
    }
}

impl ServerSection {
    pub fn validate(&self) -> Result<()> {
        if self.listen.is_empty() {
            return Err(EchoPulseError::Config(
                "server.listen must not be empty".into(),
            ));
        }
        if !(100..=60_000).contains(&self.report_interval_ms) {
            return Err(EchoPulseError::Config(
                "server.report_interval_ms must be between 100 and 60000".into(),
            ));
        }
        Ok(())
    }
}

fn default_listen() -> String {
    "127.0.0.1:4001".into()
}
fn default_close_every() -> u64 {
    50_000
}
fn default_report_interval_ms() -> u64 {
    1_000
}
