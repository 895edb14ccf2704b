//! Test utilities for Propelty services.
//!
//! Provides `MockSession` for cookie-authenticated requests and `TestEnv` for settings.
//! Import in tests only; never in production code.

pub mod auth;
pub mod env;
