//! Learning sessions
//!
//! This module provides:
//! - Scheduler configuration (TOML-loadable, with defaults)
//! - Grades, batch entries and answer outcomes
//! - The batch scheduler that re-queues and graduates items

pub mod config;
pub mod models;
pub mod scheduler;

pub use config::{ConfigError, SchedulerConfig};
pub use models::*;
pub use scheduler::{SessionError, SessionScheduler};
