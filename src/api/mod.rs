//! Client for the remote form service

mod client;
mod error;
mod traits;

pub use client::{HttpFormApi, DEFAULT_BASE_URL};
pub use error::ApiError;
pub use traits::FormApi;

#[cfg(test)]
pub use traits::MockFormApi;
