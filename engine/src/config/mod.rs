//! Config Module
//!
//! Centralized configuration for the sandbox world and player parameters.

pub mod sandbox_config;

pub use sandbox_config::SandboxConfig;
