//! # roloapp
//!
//! A UI-agnostic address-book library. The `rolo` binary is one client of
//! this crate; nothing in here writes to stdout/stderr, assumes a
//! terminal, or exits the process.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │  Resolver (resolver.rs)                                  │
//! │  - registers backends, probes `supports`, opens URIs     │
//! └──────────────────────────────────────────────────────────┘
//!                            │
//!                            ▼
//! ┌──────────────────────────────────────────────────────────┐
//! │  Backend / Format traits (backend.rs, backends/)         │
//! │  - per-format load/save codecs behind one contract       │
//! └──────────────────────────────────────────────────────────┘
//!                            │
//!                            ▼
//! ┌──────────────────────────────────────────────────────────┐
//! │  Phonebook (book.rs) ── owns ──► Contact (contact.rs)    │
//! │  - ordered collection, search, sort, copy-on-add         │
//! └──────────────────────────────────────────────────────────┘
//!                            │
//!                            ▼
//! ┌──────────────────────────────────────────────────────────┐
//! │  Field registry (fields.rs)                              │
//! │  - field names, labels, kinds, validation/coercion       │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! The usual session: parse a location into a [`Uri`], let a [`Resolver`]
//! pick the backend (explicitly via the scheme, or by probing), `load()`
//! the returned [`Phonebook`], operate on it, `save()`. Saving is always
//! explicit; the library never persists behind the caller's back.
//!
//! ## Threading
//!
//! Single-threaded by design. The resolver caches backends through
//! `RefCell` and is deliberately not `Sync`; wrap it in your own locking
//! if you must share it.
//!
//! ## Module overview
//!
//! - [`fields`]: the fixed, ordered field catalogue and value validation
//! - [`contact`]: the typed record
//! - [`book`]: the ordered collection bound to one location
//! - [`backend`]: the plugin contract backends implement
//! - [`backends`]: built-in csv and json backends
//! - [`resolver`]: backend registry, probing and URI opening
//! - [`uri`]: `scheme://location` locators
//! - [`config`]: on-disk configuration
//! - [`error`]: the crate error type

pub mod backend;
pub mod backends;
pub mod book;
pub mod config;
pub mod contact;
pub mod error;
pub mod fields;
pub mod resolver;
pub mod uri;

pub use backend::{Backend, Format};
pub use book::{BookTag, Phonebook, Query};
pub use config::RoloConfig;
pub use contact::Contact;
pub use error::{Result, RoloError};
pub use fields::{FieldKind, FieldSpec, FIELDS};
pub use resolver::Resolver;
pub use uri::Uri;
