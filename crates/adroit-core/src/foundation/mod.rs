//! Foundation value types shared by every layer.

pub mod request;
pub mod response;

pub use request::{CLI_METHOD, Request};
pub use response::Response;
