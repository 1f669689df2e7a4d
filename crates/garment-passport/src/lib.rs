//! Core library for the garment transparency passport service.
//!
//! The interesting logic lives in [`workflows::passport`]: a declarative
//! four-pillar scoring rubric and a multi-leg supply-chain emissions
//! estimator. Everything else here is service scaffolding (configuration,
//! telemetry, error mapping) shared by the API crate.

pub mod config;
pub mod error;
pub mod telemetry;
pub mod workflows;
