//! Wrenfield Core - Shared types library.
//!
//! This crate provides the domain types used across all Wrenfield components:
//! - `storefront` - Public-facing catalog API
//! - `cli` - Command-line tools for seeding and management
//!
//! # Architecture
//!
//! The core crate contains only types and pure transforms - no I/O, no HTTP
//! clients, no database access. Everything here is deterministic given its
//! inputs, which keeps the view-model layer testable without a running CMS.
//!
//! # Modules
//!
//! - [`types`] - Catalog records (categories, products, media, settings) and
//!   the intake payloads written by the public forms
//! - [`richtext`] - The closed block tree used for product descriptions and
//!   its HTML/plain-text renderers
//! - [`view`] - Flattened view models consumed by presentation code

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod richtext;
pub mod types;
pub mod view;

pub use types::*;
