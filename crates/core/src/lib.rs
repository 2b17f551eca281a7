//! Core types and shared functionality for jobparse.
//!
//! This crate provides:
//! - The normalized vacancy record and its response envelope
//! - Unified error types
//! - Configuration structures

pub mod config;
pub mod error;
pub mod vacancy;

pub use config::{AppConfig, ConfigError};
pub use error::Error;
pub use vacancy::{Currency, UNKNOWN_COMPANY, UNKNOWN_TITLE, VacancyRecord, VacancyResponse, WorkFormat};
