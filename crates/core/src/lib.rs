//! Cartkeeper Core - Shared types library.
//!
//! This crate provides common types used across all Cartkeeper components:
//! - `cart` - Cart store, inventory gateway and persistence
//! - `cli` - Command-line catalog browser and cart manager
//!
//! # Architecture
//!
//! The core crate contains only types and pure cart arithmetic - no I/O, no
//! HTTP clients, no storage. This keeps it lightweight and allows it to be
//! used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype IDs, prices, catalog records and the cart itself

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
