//! # TreeMatch Common Library
//!
//! Shared code for the TreeMatch services:
//! - Error type shared by database and configuration code
//! - Configuration loading (CLI → ENV → TOML → defaults)
//! - Database initialization and row models
//! - Soil property threshold table and classification

pub mod config;
pub mod db;
pub mod error;
pub mod thresholds;

pub use error::{Error, Result};
pub use thresholds::{classify, get_recommendation, Band, Classification, PropertyThresholds};
