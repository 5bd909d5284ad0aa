//! # pkgreg Core
//!
//! In-process bookkeeping of which configuration to use when launching a
//! given version of a server.
//!
//! ## Components
//!
//! - [`PackageRegistry`] - Maps version identifiers to opaque run configurations
//! - [`Registration`] - Revocable handle returned from a successful registration
//! - [`RegistryError`] - Errors raised by registry operations
//!
//! The registry has no built-in global instance. Applications decide whether
//! to keep one per process or scope it to a test, and share it with
//! `Arc<PackageRegistry>` when several threads need it.

mod error;
pub mod registry;

pub use error::RegistryError;
pub use registry::{PackageEntry, PackageRegistry, Registration};
