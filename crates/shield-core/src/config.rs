//! Layered configuration: defaults → JSON file → environment

use anyhow::{Context, Result};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use shield_common::ConfigError;
use shield_pricing::PricingConfig;
use shield_reputation::ReputationConfig;
use std::path::Path;
use std::str::FromStr;
use tracing::info;

/// Environment variable naming a JSON configuration file
pub const CONFIG_PATH_VAR: &str = "SHIELD_CONFIG_PATH";

/// FreelanceShield core configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ShieldConfig {
    /// Reputation aggregation settings
    pub reputation: ReputationConfig,
    /// Premium pricing settings
    pub pricing: PricingConfig,
}

impl ShieldConfig {
    /// Load configuration from `.env`, an optional JSON file and `SHIELD_*` variables
    pub fn load() -> Result<Self> {
        // Try to load .env file
        let _ = dotenvy::dotenv();

        Self::load_with(|key| std::env::var(key).ok())
    }

    /// Load using `lookup` in place of the process environment
    pub fn load_with(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut cfg = match lookup(CONFIG_PATH_VAR) {
            Some(path) => Self::from_file(&path)?,
            None => Self::default(),
        };

        if let Some(val) = lookup("SHIELD_BASE_RATE") {
            cfg.pricing.base_rate = parse_var("SHIELD_BASE_RATE", &val)?;
        }
        if let Some(val) = lookup("SHIELD_DISCOUNT_THRESHOLD") {
            cfg.pricing.discount_threshold = parse_var("SHIELD_DISCOUNT_THRESHOLD", &val)?;
        }
        if let Some(val) = lookup("SHIELD_MAX_DISCOUNT") {
            cfg.pricing.max_discount = parse_var("SHIELD_MAX_DISCOUNT", &val)?;
        }
        if let Some(val) = lookup("SHIELD_ADAPTER_TIMEOUT_MS") {
            cfg.reputation.adapter_timeout_ms = parse_var("SHIELD_ADAPTER_TIMEOUT_MS", &val)?;
        }

        cfg.validate().context("Invalid FreelanceShield configuration")?;

        info!(
            base_rate = %cfg.pricing.base_rate,
            discount_threshold = cfg.pricing.discount_threshold,
            adapter_timeout_ms = cfg.reputation.adapter_timeout_ms,
            "Loaded configuration"
        );
        Ok(cfg)
    }

    /// Read a JSON file; missing sections and fields keep their defaults
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;

        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }

    /// Validate both sections
    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        self.reputation.validate()?;
        self.pricing.validate()
    }

    /// Override the reputation section
    pub fn with_reputation(mut self, reputation: ReputationConfig) -> Self {
        self.reputation = reputation;
        self
    }

    /// Override the pricing section
    pub fn with_pricing(mut self, pricing: PricingConfig) -> Self {
        self.pricing = pricing;
        self
    }

    /// Base rate shortcut
    pub fn with_base_rate(mut self, base_rate: Decimal) -> Self {
        self.pricing.base_rate = base_rate;
        self
    }
}

fn parse_var<T>(name: &str, value: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    value
        .trim()
        .parse()
        .with_context(|| format!("{name}={value:?} could not be parsed"))
}
