//! SkinAura Core - Shared types library.
//!
//! This crate provides common types used across all SkinAura components:
//! - `storefront` - Public-facing e-commerce service
//! - `integration-tests` - Cross-service workflow tests
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no storage access, no HTTP.
//! This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, prices, emails, and statuses

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
