//! Core data types for the FreelanceShield core

pub mod policy;
pub mod reputation;
pub mod subject;
