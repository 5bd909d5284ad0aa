//! Package registry and the registrations it hands out.

mod package;
mod registration;

pub use package::{PackageEntry, PackageRegistry};
pub use registration::Registration;
