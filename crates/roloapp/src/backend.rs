//! The backend plugin interface.
//!
//! A storage backend is split in two, handling the "which" and the "how":
//!
//! - [`Backend`] describes one storage format to the resolver: its name
//!   (the URI scheme), a pure `supports` predicate for auto-detection, and
//!   a factory opening a [`Phonebook`] over a location.
//! - [`Format`] is the codec a phonebook delegates `load`/`save` to. Format
//!   adapters read and write contacts; they never re-derive the record
//!   shape, which belongs to the field registry alone.
//!
//! Interface conformance is checked by the compiler. What remains checked
//! at runtime is the registration factory a backend is constructed
//! through, which may fail and is then isolated by the resolver (see
//! [`Resolver`]).
//!
//! [`Resolver`]: crate::resolver::Resolver

use crate::book::Phonebook;
use crate::contact::Contact;
use crate::error::Result;
use crate::fields;
use crate::uri::Uri;

/// Contract a storage backend satisfies.
pub trait Backend {
    /// The backend name, used as the URI scheme.
    fn name(&self) -> &'static str;

    /// Short human-readable description.
    fn description(&self) -> &'static str;

    /// Whether this backend can handle `location`. Pure predicate: path
    /// and extension inspection only, no I/O.
    fn supports(&self, location: &str) -> bool;

    /// The subset of registry fields this backend can persist.
    /// Defaults to the full registry.
    fn supported_fields(&self) -> Vec<&'static str> {
        fields::field_names().collect()
    }

    /// Open a phonebook over `uri`. The phonebook starts empty; callers
    /// populate it with [`Phonebook::load`].
    fn open(&self, uri: &Uri) -> Result<Phonebook>;
}

/// Codec for one concrete on-disk format.
pub trait Format {
    /// Read all contacts from `location`.
    ///
    /// A missing file is an empty collection, not an error, so a fresh
    /// location is usable immediately.
    fn load(&self, location: &str) -> Result<Vec<Contact>>;

    /// Write a complete snapshot of `entries` to `location`.
    fn save(&self, location: &str, entries: &[Contact]) -> Result<()>;

    /// The subset of registry fields this format persists.
    fn supported_fields(&self) -> Vec<&'static str> {
        fields::field_names().collect()
    }
}
