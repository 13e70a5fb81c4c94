//! Client side of the remote task API.

mod client;
mod error;

pub use client::{HttpTaskApi, TaskApi};
pub use error::ApiError;
