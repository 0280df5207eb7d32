//! # Social Core
//!
//! The domain layer of the social media API: posts, comments, likes and
//! hashtags, the rules that guard them, and the ports infrastructure must
//! implement. No database or HTTP dependencies live here.

pub mod domain;
pub mod error;
pub mod ports;
pub mod services;

pub use error::{DomainError, RepoError};
