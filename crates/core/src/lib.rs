//! Shopdesk Core - Shared record types.
//!
//! This crate provides the records the store backend hands to the console:
//! - `admin` - Backend client, session store, and view-state cache
//! - `cli` - The `shopdesk` command-line console
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no HTTP
//! clients. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for backend IDs, prices, emails, and statuses
//! - [`entities`] - Products, carts, comments, replies, notifications, dashboard
//! - [`specs`] - Product specification rows and their object encoding
//! - [`search`] - Case-insensitive product search

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod entities;
pub mod search;
pub mod specs;
pub mod types;

pub use entities::*;
pub use types::*;
pub use search::{SearchTerm, filter_products};
pub use specs::{SpecRow, SpecRowError, Specifications};
