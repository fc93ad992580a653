//! Error types for the FreelanceShield core
//!
//! Provides a unified error type and domain-specific error variants

use thiserror::Error;

use crate::types::reputation::{ReputationDimension, ReputationSource};

/// Result type alias using ShieldError
pub type Result<T> = std::result::Result<T, ShieldError>;

/// Unified error type for FreelanceShield operations
#[derive(Debug, Error)]
pub enum ShieldError {
    // Provider errors (normally recovered inside the adapter boundary)
    #[error("Adapter error: {0}")]
    Adapter(#[from] AdapterError),

    // Record construction errors
    #[error("Record error: {0}")]
    Record(#[from] RecordError),

    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    // Pricing request validation errors
    #[error("Invalid request: {0}")]
    InvalidRequest(#[from] RequestError),

    // Pricing computation errors
    #[error("Pricing error: {0}")]
    Pricing(#[from] PricingError),

    // Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    // Generic internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Attestation provider failures
#[derive(Debug, Error)]
pub enum AdapterError {
    #[error("Provider {source_name} unavailable: {reason}")]
    Unavailable { source_name: String, reason: String },

    #[error("Provider {source_name} returned malformed data: {reason}")]
    Malformed { source_name: String, reason: String },

    #[error("Provider {source_name} timed out after {timeout_ms}ms")]
    Timeout { source_name: String, timeout_ms: u64 },
}

impl AdapterError {
    pub fn unavailable(source: ReputationSource, reason: impl Into<String>) -> Self {
        AdapterError::Unavailable {
            source_name: source.to_string(),
            reason: reason.into(),
        }
    }

    pub fn malformed(source: ReputationSource, reason: impl Into<String>) -> Self {
        AdapterError::Malformed {
            source_name: source.to_string(),
            reason: reason.into(),
        }
    }
}

/// Rejected reputation observations
#[derive(Debug, Error)]
pub enum RecordError {
    #[error("Record value {value} for {dimension} from {source_name} is outside [0, 1]")]
    InvalidValue {
        source_name: String,
        dimension: ReputationDimension,
        value: f64,
    },

    #[error("Record weight {weight} for {dimension} from {source_name} is outside [0, 1e12]")]
    InvalidWeight {
        source_name: String,
        dimension: ReputationDimension,
        weight: f64,
    },
}

/// Startup configuration failures
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{set} weights sum to {sum}, expected 1.0")]
    WeightSum { set: &'static str, sum: f64 },

    #[error("{set} weights missing an entry for {key}")]
    MissingWeight { set: &'static str, key: String },

    #[error("Invalid prior for {scope}: alpha={alpha}, beta={beta} (both must be positive)")]
    InvalidPrior { scope: String, alpha: f64, beta: f64 },

    #[error("Invalid parameter {name}: {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    #[error("Adapter for {0} registered more than once")]
    DuplicateSource(ReputationSource),
}

impl ConfigError {
    pub fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        ConfigError::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }
}

/// Pricing request validation failures
#[derive(Debug, Error)]
pub enum RequestError {
    #[error("Coverage amount must be positive")]
    NonPositiveCoverage,

    #[error("Coverage amount {amount} outside allowed range [{min}, {max}]")]
    CoverageOutOfRange { amount: u64, min: u64, max: u64 },

    #[error("Coverage period must be positive")]
    NonPositivePeriod,

    #[error("Coverage period {days} days outside allowed range [{min}, {max}]")]
    PeriodOutOfRange { days: u32, min: u32, max: u32 },

    #[error("Reputation score {0} outside [0, 100]")]
    ReputationOutOfRange(f64),

    #[error("Market volatility {0} outside [0, 20]")]
    VolatilityOutOfRange(f64),

    #[error("Unknown job type: {0}")]
    UnknownJobType(String),

    #[error("Unknown industry: {0}")]
    UnknownIndustry(String),

    #[error("Invalid subject address: {0}")]
    InvalidSubject(String),
}

/// Pricing calculation errors
#[derive(Debug, Error)]
pub enum PricingError {
    #[error("Premium factor product {0} cannot be represented as an amount")]
    Overflow(f64),
}

// Implement From for common external error types
impl From<serde_json::Error> for ShieldError {
    fn from(err: serde_json::Error) -> Self {
        ShieldError::Serialization(err.to_string())
    }
}

impl From<anyhow::Error> for ShieldError {
    fn from(err: anyhow::Error) -> Self {
        ShieldError::Internal(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ShieldError::InvalidRequest(RequestError::UnknownJobType("plumbing".to_string()));
        assert!(err.to_string().contains("plumbing"));
    }

    #[test]
    fn test_weight_sum_error() {
        let err = ConfigError::WeightSum {
            set: "dimension",
            sum: 0.9,
        };
        assert!(err.to_string().contains("0.9"));
    }

    #[test]
    fn test_adapter_error_names_source() {
        let err = AdapterError::unavailable(ReputationSource::Colony, "connection refused");
        assert!(err.to_string().contains("colony"));
        assert!(err.to_string().contains("connection refused"));
    }
}
