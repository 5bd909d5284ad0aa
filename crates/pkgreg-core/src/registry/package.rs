//! Package registry for tracking how to run each server version.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;
use serde::Serialize;
use tracing::{debug, warn};

use super::registration::Registration;
use crate::error::RegistryError;

#[cfg(test)]
#[path = "package_tests.rs"]
mod tests;

/// A stored configuration together with the id of the registration that owns it.
struct Slot {
    id: u64,
    configuration: String,
}

struct State {
    next_id: u64,
    entries: BTreeMap<String, Slot>,
}

/// State shared between a registry and its registrations.
///
/// The registry holds the only strong reference, so this allocation is also
/// the lifetime token: once the registry is dropped, weak references held by
/// registrations stop upgrading.
pub(crate) struct Shared {
    state: Mutex<State>,
}

impl Shared {
    /// Remove `version` only if it is still held by registration `id`.
    pub(crate) fn remove(&self, version: &str, id: u64) -> bool {
        let mut state = self.state.lock();
        let matches = state
            .entries
            .get(version)
            .is_some_and(|slot| slot.id == id);
        if matches {
            state.entries.remove(version);
        }
        drop(state);

        debug!(version, id, removed = matches, "Unregistered package");
        matches
    }
}

/// Snapshot of one registered package.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PackageEntry {
    pub version: String,
    pub configuration: String,
}

/// Registry mapping server versions to the configuration used to run them.
///
/// Every operation runs under a single lock, so concurrent calls behave as if
/// they were executed one after another. The configuration string is opaque
/// here; interpreting it (a Java classpath, an executable path) is up to the
/// caller.
///
/// Dropping the registry while [`Registration`]s are still around is fine.
/// Those registrations notice the registry is gone and their
/// [`Registration::unregister`] returns `false`.
pub struct PackageRegistry {
    shared: Arc<Shared>,
}

impl PackageRegistry {
    /// Create a new, empty registry.
    pub fn new() -> Self {
        Self {
            shared: Arc::new(Shared {
                state: Mutex::new(State {
                    next_id: 0,
                    entries: BTreeMap::new(),
                }),
            }),
        }
    }

    /// Register the configuration used to run `version`.
    ///
    /// Returns [`RegistryError::DuplicateVersion`] if `version` is already
    /// registered; nothing is changed in that case.
    pub fn register(
        &self,
        version: impl Into<String>,
        configuration: impl Into<String>,
    ) -> Result<Registration, RegistryError> {
        let version = version.into();
        let configuration = configuration.into();

        let id = {
            let mut state = self.shared.state.lock();
            if state.entries.contains_key(&version) {
                warn!(version = %version, "Rejected duplicate package registration");
                return Err(RegistryError::DuplicateVersion(version));
            }
            state.next_id += 1;
            let id = state.next_id;
            state
                .entries
                .insert(version.clone(), Slot { id, configuration });
            id
        };

        debug!(version = %version, id, "Registered package");
        Ok(Registration::new(version, id, Arc::downgrade(&self.shared)))
    }

    /// Unregister the package added by `registration`.
    ///
    /// Returns `true` if this call removed the entry. Returns `false` if it
    /// was already removed, if the version has since been registered again by
    /// someone else, or if `registration` came from another registry.
    ///
    /// Servers already started with the configuration are not affected.
    pub fn unregister(&self, registration: &Registration) -> bool {
        if !registration.is_owned_by(&self.shared) {
            debug!(
                version = registration.version(),
                "Ignoring registration issued by another registry"
            );
            return false;
        }

        self.shared.remove(registration.version(), registration.id())
    }

    /// Number of registered packages.
    pub fn size(&self) -> usize {
        self.shared.state.lock().entries.len()
    }

    /// Check if no packages are registered.
    pub fn is_empty(&self) -> bool {
        self.size() == 0
    }

    /// Check if `version` is registered.
    pub fn contains(&self, version: &str) -> bool {
        self.shared.state.lock().entries.contains_key(version)
    }

    /// Get the configuration registered for `version`.
    pub fn get(&self, version: &str) -> Option<String> {
        self.shared
            .state
            .lock()
            .entries
            .get(version)
            .map(|slot| slot.configuration.clone())
    }

    /// List registered versions in ascending order.
    pub fn versions(&self) -> Vec<String> {
        self.shared.state.lock().entries.keys().cloned().collect()
    }

    /// Snapshot all registered packages in ascending version order.
    pub fn entries(&self) -> Vec<PackageEntry> {
        self.shared
            .state
            .lock()
            .entries
            .iter()
            .map(|(version, slot)| PackageEntry {
                version: version.clone(),
                configuration: slot.configuration.clone(),
            })
            .collect()
    }

    /// Get the configuration of the newest registered version.
    ///
    /// "Newest" is the greatest version under plain string ordering, so
    /// `"2.0"` is newer than `"10.0"`. Version components are not parsed.
    pub fn find_newest(&self) -> Option<String> {
        self.find_newest_entry().map(|entry| entry.configuration)
    }

    /// Like [`find_newest`](Self::find_newest), but also reports the version.
    pub fn find_newest_entry(&self) -> Option<PackageEntry> {
        self.shared
            .state
            .lock()
            .entries
            .last_key_value()
            .map(|(version, slot)| PackageEntry {
                version: version.clone(),
                configuration: slot.configuration.clone(),
            })
    }
}

impl Default for PackageRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for PackageRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PackageRegistry")
            .field("versions", &self.versions())
            .finish()
    }
}

impl Drop for PackageRegistry {
    fn drop(&mut self) {
        let remaining = self.shared.state.lock().entries.len();
        if remaining > 0 {
            debug!(remaining, "Dropping package registry with live registrations");
        }
    }
}
