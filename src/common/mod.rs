//! Common plumbing shared by the smoke and run drivers

pub mod config;
pub mod error;
pub mod logging;

pub use config::EngineConfig;
pub use error::{Error, Result};
