//! Configuration loading and validation for the API service.
//!
//! All values are read from environment variables at startup. The process will
//! exit with a clear error message if any required variable is missing or invalid.

use anyhow::{Context, Result};
use envelope::MasterKey;
use serde::Deserialize;

/// Validated API service configuration.
#[derive(Clone, Deserialize)]
pub struct Config {
    /// Master key as 64 hex characters. **Required.** Never logged.
    pub master_key_hex: String,

    /// Port the HTTP server listens on.
    #[serde(default = "default_listen_port")]
    pub listen_port: u16,

    /// OTLP endpoint for span export. Logs only when unset.
    #[serde(default)]
    pub otel_exporter_otlp_endpoint: Option<String>,

    /// Tracing log level (e.g. `"info"`, `"debug"`).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_listen_port() -> u16 {
    3001
}
fn default_log_level() -> String {
    "info".into()
}

impl Config {
    /// Load and validate configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if any required variable is absent or cannot be parsed.
    pub fn from_env() -> Result<Self> {
        let cfg = config::Config::builder()
            .add_source(config::Environment::default())
            .build()
            .context("failed to build configuration from environment")?;

        let c: Config = cfg
            .try_deserialize()
            .context("failed to deserialise configuration")?;

        c.validate()?;
        Ok(c)
    }

    /// Decode the configured master key.
    ///
    /// # Errors
    ///
    /// Returns an error if `MASTER_KEY_HEX` is not 64 hex characters.
    pub fn master_key(&self) -> Result<MasterKey> {
        MasterKey::from_hex(self.master_key_hex.trim())
            .context("MASTER_KEY_HEX must be exactly 64 hex characters")
    }

    /// Validate all fields, returning a descriptive error on the first failure.
    fn validate(&self) -> Result<()> {
        if self.master_key_hex.trim().is_empty() {
            anyhow::bail!("MASTER_KEY_HEX is required and must not be empty");
        }
        self.master_key()?;

        if let Some(endpoint) = &self.otel_exporter_otlp_endpoint {
            if endpoint.trim().is_empty() {
                anyhow::bail!("OTEL_EXPORTER_OTLP_ENDPOINT must not be blank when set");
            }
        }
        Ok(())
    }
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("master_key_hex", &"[REDACTED]")
            .field("listen_port", &self.listen_port)
            .field("otel_exporter_otlp_endpoint", &self.otel_exporter_otlp_endpoint)
            .field("log_level", &self.log_level)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MK_HEX: &str = "00112233445566778899aabbccddeeff00112233445566778899aabbccddeeff";

    fn valid() -> Config {
        Config {
            master_key_hex: MK_HEX.into(),
            listen_port: default_listen_port(),
            otel_exporter_otlp_endpoint: None,
            log_level: default_log_level(),
        }
    }

    #[test]
    fn defaults_are_correct() {
        assert_eq!(default_listen_port(), 3001);
        assert_eq!(default_log_level(), "info");
    }

    #[test]
    fn validate_accepts_valid_config() {
        let cfg = valid();
        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.master_key().unwrap().version(), 1);
    }

    #[test]
    fn validate_rejects_empty_master_key() {
        let cfg = Config {
            master_key_hex: "  ".into(),
            ..valid()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn validate_rejects_short_master_key() {
        let cfg = Config {
            master_key_hex: "00112233".into(),
            ..valid()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn validate_rejects_non_hex_master_key() {
        let cfg = Config {
            master_key_hex: "zz".repeat(32),
            ..valid()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn validate_rejects_blank_otlp_endpoint() {
        let cfg = Config {
            otel_exporter_otlp_endpoint: Some("".into()),
            ..valid()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn debug_redacts_master_key() {
        let dbg = format!("{:?}", valid());
        assert!(dbg.contains("REDACTED"));
        assert!(!dbg.contains(MK_HEX));
    }
}
