//! Auth types shared across Propelty services.
//!
//! Provides the session cookie policy and the cookie builders that apply it.

pub mod cookie;
