//! # SoundStore Common Library
//!
//! Shared code for the SoundStore services including:
//! - Error and result types
//! - Configuration loading and root folder resolution
//! - Database initialization and schema
//! - Timestamp and identifier helpers

pub mod config;
pub mod db;
pub mod error;
pub mod time;
pub mod uuid_utils;

pub use error::{Error, Result};
