//! Xomo Admin Core - Shared types library.
//!
//! This crate provides the common types used across the Xomo admin console
//! components:
//! - `console` - Controller and REST client library
//! - `cli` - Operator command-line tool
//!
//! # Architecture
//!
//! The core crate contains only types and traits - no I/O, no HTTP clients.
//! Resource records are normalized here once, at deserialization time, so
//! nothing downstream ever branches on raw backend response shapes.
//!
//! # Modules
//!
//! - [`types`] - Resource IDs, normalized roles and statuses
//! - [`records`] - One normalized record struct per resource kind
//! - [`record`] - The [`record::ResourceRecord`] abstraction list controllers
//!   are generic over, plus sort-key and partial-merge helpers

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod record;
pub mod records;
pub mod types;

pub use record::{MergeError, ResourceRecord, SortKey, json_field_text, merge_partial};
pub use records::*;
pub use types::*;
