//! Core module - shared infrastructure for souschef
//!
//! This module contains foundational types, configuration, and error handling
//! used throughout the application.

pub mod config;
pub mod error;
pub mod types;

pub use config::Config;
pub use error::{Result, SousChefError};
pub use types::*;
