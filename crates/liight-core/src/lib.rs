//! Liight Core Library
//!
//! This crate provides the domain models, error types, configuration and shared
//! validation used by the intake pipeline, the storage and mail services and the
//! HTTP API.

pub mod config;
pub mod constants;
pub mod error;
pub mod models;
pub mod validation;

// Re-export commonly used types
pub use config::{BaseConfig, Config, DkimSettings, SmtpSettings, StudioConfig};
pub use error::{AppError, ErrorMetadata, LogLevel};
