//! Registration handles.

use std::fmt;
use std::ptr;
use std::sync::{Arc, Weak};

use tracing::debug;

use super::package::Shared;

struct RegistrationInfo {
    version: String,
    id: u64,
    owner: Weak<Shared>,
}

/// Handle for a package added with [`PackageRegistry::register`].
///
/// Clones refer to the same registration and compare equal. The handle does
/// not keep the registry alive, and dropping it does not unregister anything.
///
/// [`PackageRegistry::register`]: super::PackageRegistry::register
#[derive(Clone)]
pub struct Registration {
    info: Arc<RegistrationInfo>,
}

impl Registration {
    pub(crate) fn new(version: String, id: u64, owner: Weak<Shared>) -> Self {
        Self {
            info: Arc::new(RegistrationInfo { version, id, owner }),
        }
    }

    /// The version this registration was issued for.
    pub fn version(&self) -> &str {
        &self.info.version
    }

    pub(crate) fn id(&self) -> u64 {
        self.info.id
    }

    /// Check if the issuing registry still exists.
    pub fn is_registry_alive(&self) -> bool {
        self.info.owner.strong_count() > 0
    }

    /// Unregister this package without a reference to the registry.
    ///
    /// Returns `false` if the registry has been dropped or the entry is no
    /// longer held by this registration.
    pub fn unregister(&self) -> bool {
        match self.info.owner.upgrade() {
            Some(shared) => shared.remove(&self.info.version, self.info.id),
            None => {
                debug!(version = %self.info.version, "Registry already dropped");
                false
            }
        }
    }

    pub(crate) fn is_owned_by(&self, shared: &Arc<Shared>) -> bool {
        ptr::eq(self.info.owner.as_ptr(), Arc::as_ptr(shared))
    }
}

impl PartialEq for Registration {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.info, &other.info)
    }
}

impl Eq for Registration {}

impl fmt::Debug for Registration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registration")
            .field("version", &self.info.version)
            .field("id", &self.info.id)
            .field("registry_alive", &self.is_registry_alive())
            .finish()
    }
}
