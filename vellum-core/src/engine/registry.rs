//! Activity registry
//!
//! Maps activity names to factories. Filled during setup; the engine seals it
//! when the first frame runs, after which registration is refused.

use heapless::Vec;

use crate::activity::{into_factory, Activity, ActivityFactory};
use crate::error::RegistryError;

use super::control::{ActivityControl, EventControl};
use super::events::{self, Name};

/// Maximum number of registered activities
pub const MAX_ACTIVITIES: usize = 16;

struct Entry {
    name: Name,
    factory: ActivityFactory,
}

/// Name to factory table
#[derive(Default)]
pub struct Registry {
    entries: Vec<Entry, MAX_ACTIVITIES>,
    sealed: bool,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `factory` under `name`, replacing any earlier factory
    pub fn register<F, A>(&mut self, name: &str, factory: F) -> Result<(), RegistryError>
    where
        F: Fn(ActivityControl, EventControl) -> A + 'static,
        A: Activity + 'static,
    {
        let name = self.check(name)?;
        self.insert(name, into_factory(factory))
    }

    /// Decorator-style registration
    ///
    /// The name is checked now; [`Registration::with`] registers the factory
    /// and hands it back unchanged.
    ///
    /// ```ignore
    /// let home = registry.register_activity("home")?.with(Home::new)?;
    /// ```
    pub fn register_activity(&mut self, name: &str) -> Result<Registration<'_>, RegistryError> {
        let name = self.check(name)?;
        Ok(Registration {
            registry: self,
            name,
        })
    }

    pub fn get(&self, name: &str) -> Option<&ActivityFactory> {
        self.entries
            .iter()
            .find(|e| e.name.as_str() == name)
            .map(|e| &e.factory)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Registered names in registration order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.name.as_str())
    }

    /// Refuse further registration
    pub fn seal(&mut self) {
        if !self.sealed {
            debug!("Registry sealed with {} activities", self.entries.len());
        }
        self.sealed = true;
    }

    pub fn is_sealed(&self) -> bool {
        self.sealed
    }

    fn check(&self, name: &str) -> Result<Name, RegistryError> {
        if self.sealed {
            return Err(RegistryError::Sealed);
        }
        Ok(events::name(name)?)
    }

    fn insert(&mut self, name: Name, factory: ActivityFactory) -> Result<(), RegistryError> {
        if let Some(entry) = self.entries.iter_mut().find(|e| e.name == name) {
            debug!("Replacing activity '{}'", name.as_str());
            entry.factory = factory;
            return Ok(());
        }
        self.entries
            .push(Entry { name, factory })
            .map_err(|_| RegistryError::Full)
    }
}

/// Pending decorator-style registration
pub struct Registration<'a> {
    registry: &'a mut Registry,
    name: Name,
}

impl Registration<'_> {
    /// Register `factory` and return it unchanged
    pub fn with<F, A>(self, factory: F) -> Result<F, RegistryError>
    where
        F: Fn(ActivityControl, EventControl) -> A + Clone + 'static,
        A: Activity + 'static,
    {
        self.registry
            .insert(self.name, into_factory(factory.clone()))?;
        Ok(factory)
    }
}
