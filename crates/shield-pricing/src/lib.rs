//! # Shield Pricing
//!
//! Deterministic insurance premium pricing for the FreelanceShield protocol.
//!
//! ## Pricing Formula
//!
//! ```text
//! Premium = BaseRate × C × P × R × D × M
//! ```
//!
//! Where:
//! - C: Coverage factor (log-shaped, 1.0 at 1 SOL)
//! - P: Period factor (super-linear, 1.0 at 30 days)
//! - R: Risk weight (job type × industry × claims history)
//! - D: Reputation multiplier (up to 30% off for scores above the threshold)
//! - M: Market adjustment (volatility)
//!
//! The premium never falls below the protocol minimum, the price of the
//! smallest coverage for the shortest period.

pub mod config;
pub mod pricing;

pub use config::PricingConfig;
pub use pricing::{DiscountMapper, PricingEngine};
