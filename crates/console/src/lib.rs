//! Xomo Admin Console - list controller and REST client library.
//!
//! Every screen of the admin console follows the same cycle: fetch a
//! collection, filter and sort it client-side, mutate individual items, and
//! reconcile the result back into the in-memory collection. This crate owns
//! that cycle once, for every resource kind:
//!
//! - [`controller::ResourceListController`] - the load → filter/sort →
//!   mutate → reconcile state machine
//! - [`client::ResourceClient`] - the abstract collaborator the controller
//!   drives, with [`client::RestClient`] binding it to the Xomo REST API
//! - [`session::SessionContext`] - injected session/auth state (bearer
//!   token, current admin), hydrated once at startup instead of read ad hoc
//! - [`kinds`] - per-resource-kind route tables and list configurations
//!
//! View layers (the CLI here; a web front end elsewhere) render the
//! controller's working collection and forward user actions into it. The
//! controller never prompts, never renders, and never lets a failed remote
//! call escape as anything but an [`error::OperationError`].

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod client;
pub mod config;
pub mod controller;
pub mod error;
pub mod kinds;
pub mod session;

pub use client::{ImageUpload, ResourceClient, RestClient};
pub use config::ConsoleConfig;
pub use controller::{FilterState, ListConfig, ResourceListController, SortDirection, SortSpec};
pub use error::{ApiError, ErrorKind, Operation, OperationError};
pub use session::{CurrentAdmin, SessionContext};
