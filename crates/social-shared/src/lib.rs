//! # Social Shared
//!
//! Wire types of the social media API: request bodies, response bodies and
//! the RFC 7807 error document. Kept free of domain dependencies so clients
//! can depend on it alone.

pub mod dto;
pub mod response;
pub mod root;

pub use response::ErrorResponse;
pub use root::ApiRootResponse;
