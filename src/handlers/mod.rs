//! HTTP handlers for resource CRUD and unmatched routes.

pub mod fallback;
pub mod resource;

pub use fallback::route_not_found;
pub use resource::*;
