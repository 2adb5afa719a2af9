//! # fnpack Core Infrastructure
//!
//! File: cli/src/core/mod.rs
//!
//! ## Overview
//!
//! This module aggregates the infrastructure shared by every command:
//! - `config`: configuration discovery, loading, path expansion and validation
//! - `error`: the `FnpackError` enum and the crate-wide `Result` alias
//!
//! ```rust
//! use crate::core::config; // For loading configuration
//! use crate::core::error::{FnpackError, Result}; // For error handling
//! ```
//!
pub mod config;
pub mod error;
