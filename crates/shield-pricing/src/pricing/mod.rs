//! Premium pricing
//!
//! - [`engine`]: request validation and the premium formula
//! - [`factors`]: coverage, period, risk and market multipliers
//! - [`discount`]: reputation score to premium multiplier
//! - [`risk`]: advisory 0-100 risk score

pub mod discount;
pub mod engine;
pub mod factors;
pub mod risk;

pub use discount::DiscountMapper;
pub use engine::PricingEngine;
