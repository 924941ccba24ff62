use anyhow::{Context, Result};
use config::{Config, Environment, File};
use rust_decimal::Decimal;
use serde::Deserialize;
use splitledger_core::SettlementConfig;

/// CLI settings: defaults, then `splitledger.toml`, then `SPLITLEDGER_*` env vars
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// Default tracing filter when `RUST_LOG` is unset
    pub log_level: String,
    pub epsilon: Decimal,
    pub top_days: usize,
    pub top_payers: usize,
    pub currency_symbol: String,
}

impl Settings {
    pub fn load(path: Option<&str>) -> Result<Self> {
        let defaults = SettlementConfig::default();

        let settings: Settings = Config::builder()
            .set_default("log_level", "info")?
            .set_default("epsilon", defaults.epsilon.to_string())?
            .set_default("top_days", defaults.top_days as u64)?
            .set_default("top_payers", defaults.top_payers as u64)?
            .set_default("currency_symbol", defaults.currency_symbol)?
            .add_source(File::with_name(path.unwrap_or("splitledger")).required(path.is_some()))
            .add_source(Environment::with_prefix("SPLITLEDGER").try_parsing(true))
            .build()
            .context("failed to read configuration")?
            .try_deserialize()
            .context("invalid configuration")?;

        settings.engine_config().validate()?;
        Ok(settings)
    }

    pub fn engine_config(&self) -> SettlementConfig {
        SettlementConfig {
            epsilon: self.epsilon,
            top_days: self.top_days,
            top_payers: self.top_payers,
            currency_symbol: self.currency_symbol.clone(),
        }
    }
}
