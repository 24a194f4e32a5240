//! Core components of the `edinet-rs` client.
//!
//! This module contains the foundational building blocks of the library:
//! - The main [`EdinetClient`] and its builder.
//! - The primary [`EdinetError`] type.
//! - Shared data models like [`FilingDocument`].
//! - Internal networking helpers.

/// The main client (`EdinetClient`), builder, and configuration.
pub mod client;
/// The primary error type (`EdinetError`) for the crate.
pub mod error;
/// Shared data models used across multiple API modules.
pub mod models;

pub(crate) mod net;

// convenient re-exports so most code can just `use crate::core::EdinetClient`
pub use client::{EdinetClient, EdinetClientBuilder};
pub use error::EdinetError;
pub use models::{ArchiveMember, FilingDocument};
