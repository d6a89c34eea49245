//! Core types and traits for the OpenMemory REST API.
//!
//! DTOs mirror the canister's JSON bodies. Memory records and search hits are
//! kept as the decoded JSON and only read through accessors.

mod dto;
mod error;
mod traits;

pub use dto::*;
pub use error::ClientError;
pub use traits::MemoryService;
