//! Backend registry and resolver.
//!
//! The resolver owns an ordered list of backend registrations and matches
//! locations to backends, either explicitly via a URI scheme or by probing
//! each backend's `supports` predicate. Backends are instantiated lazily
//! through fallible factories and cached by name on success; a factory
//! failure marks the backend invalid for that attempt only, so a fixed
//! backend can be retried without restarting the process.
//!
//! There is no global resolver. Construct one (usually
//! [`Resolver::with_builtins`]) and pass it where needed.
//!
//! Not thread-safe: the load-and-cache step uses `RefCell` interior
//! mutability, which is fine for the single-threaded design this crate
//! assumes. Sharing a resolver across threads requires external locking.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::backend::Backend;
use crate::book::Phonebook;
use crate::error::{Result, RoloError};
use crate::uri::Uri;

/// Fallible constructor for a backend. Failure is isolated per backend and
/// never fatal to discovery or probing.
pub type BackendFactory = fn() -> Result<Box<dyn Backend>>;

struct Registration {
    name: &'static str,
    factory: BackendFactory,
}

pub struct Resolver {
    registrations: Vec<Registration>,
    cache: RefCell<HashMap<&'static str, Rc<dyn Backend>>>,
}

impl Resolver {
    /// An empty resolver with no backends registered.
    pub fn new() -> Self {
        Self {
            registrations: Vec::new(),
            cache: RefCell::new(HashMap::new()),
        }
    }

    /// A resolver with the built-in backends. Registration order is the
    /// probing order, so csv wins ties against json.
    pub fn with_builtins() -> Self {
        let mut resolver = Self::new();
        resolver.register("csv", crate::backends::csv::backend);
        resolver.register("json", crate::backends::json::backend);
        resolver
    }

    /// Register a backend under `name`. The first registration of a name
    /// wins; later duplicates are ignored.
    pub fn register(&mut self, name: &'static str, factory: BackendFactory) {
        if self.registrations.iter().any(|reg| reg.name == name) {
            tracing::debug!(name, "ignoring duplicate backend registration");
            return;
        }
        self.registrations.push(Registration { name, factory });
    }

    /// Registered backend names, in the deterministic probing order.
    /// Listing only; nothing is instantiated.
    pub fn discover(&self) -> Vec<&'static str> {
        self.registrations.iter().map(|reg| reg.name).collect()
    }

    /// The backend registered under `name`, instantiating and caching it
    /// on first use.
    ///
    /// Fails with `UnknownBackend` for unregistered names and
    /// `InvalidBackend` when the factory fails or produces a backend whose
    /// declared name disagrees with its registration. Invalid backends are
    /// not cached.
    pub fn resolve(&self, name: &str) -> Result<Rc<dyn Backend>> {
        if let Some(backend) = self.cache.borrow().get(name) {
            return Ok(Rc::clone(backend));
        }
        let registration = self
            .registrations
            .iter()
            .find(|reg| reg.name == name)
            .ok_or_else(|| RoloError::UnknownBackend(name.to_string()))?;

        let backend = (registration.factory)().map_err(|err| {
            tracing::warn!(name, error = %err, "backend failed to load");
            RoloError::InvalidBackend(registration.name.to_string())
        })?;
        if backend.name() != registration.name {
            tracing::warn!(
                registered = registration.name,
                declared = backend.name(),
                "backend name disagrees with its registration"
            );
            return Err(RoloError::InvalidBackend(registration.name.to_string()));
        }

        let backend: Rc<dyn Backend> = Rc::from(backend);
        self.cache
            .borrow_mut()
            .insert(registration.name, Rc::clone(&backend));
        Ok(backend)
    }

    /// The first registered backend whose `supports` accepts `location`,
    /// or `None`. Invalid backends are skipped, not fatal.
    pub fn backend_for_location(&self, location: &str) -> Option<Rc<dyn Backend>> {
        for registration in &self.registrations {
            match self.resolve(registration.name) {
                Ok(backend) => {
                    if backend.supports(location) {
                        return Some(backend);
                    }
                }
                Err(err) => {
                    tracing::warn!(name = registration.name, error = %err, "skipping backend");
                }
            }
        }
        None
    }

    /// Open a phonebook over `location` (a URI string or bare location).
    ///
    /// The returned phonebook is empty; call [`Phonebook::load`] to read
    /// entries from storage.
    pub fn open(&self, location: &str) -> Result<Phonebook> {
        let mut uri = Uri::parse(location)?;
        uri.absolutize(self);
        let scheme = uri
            .scheme()
            .ok_or_else(|| RoloError::NoBackendFound(uri.location().to_string()))?;
        let backend = self.resolve(scheme)?;
        backend.open(&uri)
    }
}

impl Default for Resolver {
    fn default() -> Self {
        Self::with_builtins()
    }
}
