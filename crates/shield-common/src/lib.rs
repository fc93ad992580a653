//! # Shield Common
//!
//! Shared types, errors, and protocol constants for the FreelanceShield core.
//!
//! ## Core Types
//!
//! - [`SubjectKey`]: validated chain address of the party being scored
//! - [`ReputationRecord`]: one normalized attestation from a provider
//! - [`ReputationProfile`]: aggregated reputation for a subject
//! - [`PolicyRequest`]/[`PremiumQuote`]: pricing input and fully broken-down output
//!
//! ## Errors
//!
//! Every fallible operation returns [`Result`] with a [`ShieldError`], which
//! folds the per-domain enums in [`error`] together.

pub mod error;
pub mod types;

// Re-export commonly used types at crate root
pub use error::{
    AdapterError, ConfigError, PricingError, RecordError, RequestError, Result, ShieldError,
};
pub use types::{
    policy::{Industry, JobType, PolicyRequest, PremiumFactors, PremiumQuote, RiskWeightBreakdown},
    reputation::{
        BayesianPrior, Provenance, ReputationDimension, ReputationProfile, ReputationRecord,
        ReputationSource,
    },
    subject::{EthereumAddress, SolanaAddress, SubjectKey},
};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Upper bound of the reputation score on the pricing API
pub const MAX_REPUTATION_SCORE: f64 = 100.0;

/// Lower bound of the reputation score on the pricing API
pub const MIN_REPUTATION_SCORE: f64 = 0.0;

/// Largest discount reputation may ever grant (30%)
pub const MAX_REPUTATION_DISCOUNT: f64 = 0.30;

/// Smallest reputation multiplier (1 - max discount)
pub const MIN_REPUTATION_MULTIPLIER: f64 = 1.0 - MAX_REPUTATION_DISCOUNT;

/// Upper bound of the market volatility indicator
pub const MAX_MARKET_VOLATILITY: f64 = 20.0;

/// Tolerance when checking that a weight set sums to 1.0
pub const WEIGHT_SUM_TOLERANCE: f64 = 1e-9;

/// Largest evidence mass a single record may carry
pub const MAX_RECORD_WEIGHT: f64 = 1e12;

/// Cap on the summed evidence mass per dimension or source
///
/// Keeps `(α + p) / (α + β + n)` strictly below 1.0 in f64.
pub const MAX_EVIDENCE_MASS: f64 = 1e12;

/// Lamports per SOL
pub const LAMPORTS_PER_SOL: u64 = 1_000_000_000;

/// Default per-adapter timeout in milliseconds
pub const DEFAULT_ADAPTER_TIMEOUT_MS: u64 = 2000;
