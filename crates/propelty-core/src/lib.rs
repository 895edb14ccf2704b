//! Service plumbing shared by Propelty binaries: environment config helpers,
//! tracing setup, request ids, health checks and serde helpers.

pub mod config;
pub mod health;
pub mod middleware;
pub mod serde;
pub mod tracing;
