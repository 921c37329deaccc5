//! Request extractors that reject with `AppError` so every failure uses the
//! standard `{message}` envelope.

pub mod id;
pub mod json;

pub use id::EntityId;
pub use json::ValidJson;
