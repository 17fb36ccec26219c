//! Shared primitive types: IDs, roles, statuses.

mod id;
mod role;
mod status;

pub use id::ResourceId;
pub use role::Role;
pub use status::OrderStatus;
