//! HTTP client for the OpenMemory canister.
//!
//! [`MemoryClient`] is the async client; [`blocking::MemoryClient`] offers the
//! same calls for synchronous callers.

pub mod blocking;
mod client;
mod config;
#[cfg(feature = "test-util")]
pub mod mock;
mod response;

pub use client::MemoryClient;
pub use config::{ClientConfig, DEFAULT_BASE_URL, ENV_BASE_URL, ENV_TOKEN};
pub use openmemory_types::*;
