//! The phonebook collection: an ordered set of contacts bound to one
//! storage location.
//!
//! A [`Phonebook`] owns its contacts. Adding a contact that is already
//! owned by another book stores a detached copy instead, so a contact
//! belongs to at most one book. The parent bookkeeping runs through the
//! internal attach/detach operations only; no other code path touches it.
//!
//! Iteration order is insertion order. [`Phonebook::sort_by_field`]
//! returns a new ordered view and never mutates the stored order.
//! Mutation during iteration is prevented by the borrow checker.

use std::sync::atomic::{AtomicU64, Ordering};

use regex::Regex;

use crate::backend::Format;
use crate::contact::Contact;
use crate::error::{Result, RoloError};
use crate::fields;
use crate::uri::Uri;

/// Opaque process-unique identity of a phonebook, carried by contacts as
/// their parent reference. Only ever compared, never dereferenced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BookTag(u64);

impl BookTag {
    pub(crate) fn next() -> Self {
        static COUNTER: AtomicU64 = AtomicU64::new(1);
        BookTag(COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

/// Search pattern for [`Phonebook::find_all`].
pub enum Query<'a> {
    /// Arbitrary predicate over the whole contact; the field list is
    /// ignored for this form.
    Predicate(Box<dyn Fn(&Contact) -> bool + 'a>),
    /// Substring containment against the listed fields' rendered values.
    Substring { pattern: String, ignore_case: bool },
    /// Regular expression match against the listed fields.
    Regex(Regex),
}

impl<'a> Query<'a> {
    pub fn predicate(f: impl Fn(&Contact) -> bool + 'a) -> Self {
        Query::Predicate(Box::new(f))
    }

    pub fn substring(pattern: impl Into<String>, ignore_case: bool) -> Self {
        Query::Substring {
            pattern: pattern.into(),
            ignore_case,
        }
    }

    pub fn regex(pattern: Regex) -> Self {
        Query::Regex(pattern)
    }
}

pub struct Phonebook {
    uri: Uri,
    entries: Vec<Contact>,
    format: Box<dyn Format>,
    tag: BookTag,
}

impl Phonebook {
    /// Create an empty phonebook over `uri`, delegating persistence to
    /// `format`. Backends call this from their `open` factories.
    pub fn new(uri: Uri, format: Box<dyn Format>) -> Self {
        Self {
            uri,
            entries: Vec::new(),
            format,
            tag: BookTag::next(),
        }
    }

    pub fn uri(&self) -> &Uri {
        &self.uri
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The contact at `index` (insertion order), if any.
    pub fn get(&self, index: usize) -> Option<&Contact> {
        self.entries.get(index)
    }

    /// Contacts in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, Contact> {
        self.entries.iter()
    }

    // The only place a contact is linked to this book. Keeps the parent
    // invariant in one function instead of at every call site.
    fn attach(&mut self, mut contact: Contact) {
        contact.parent = Some(self.tag);
        self.entries.push(contact);
    }

    // The only place a contact is unlinked.
    fn detach_at(&mut self, index: usize) -> Contact {
        let mut contact = self.entries.remove(index);
        contact.parent = None;
        contact
    }

    /// Add `contact` at the end. A contact already owned by a phonebook is
    /// not moved: a detached copy is stored instead.
    pub fn add(&mut self, contact: Contact) {
        let entry = if contact.parent().is_some() {
            contact.detached_copy()
        } else {
            contact
        };
        self.attach(entry);
    }

    /// Remove the first entry structurally equal to `contact` and return
    /// it, detached.
    pub fn remove(&mut self, contact: &Contact) -> Result<Contact> {
        let pos = self
            .entries
            .iter()
            .position(|entry| entry == contact)
            .ok_or(RoloError::NotFound)?;
        Ok(self.detach_at(pos))
    }

    /// Remove the entry at `index` (insertion order) and return it,
    /// detached.
    pub fn remove_at(&mut self, index: usize) -> Result<Contact> {
        if index >= self.entries.len() {
            return Err(RoloError::NotFound);
        }
        Ok(self.detach_at(index))
    }

    /// Remove all entries.
    pub fn clear(&mut self) {
        // Dropped entries need no detaching; nothing can observe them.
        self.entries.clear();
    }

    /// Search the book. `fields` lists the fields text patterns are
    /// matched against; it is ignored for predicate queries and must be
    /// non-empty otherwise.
    pub fn find_all<'b>(&'b self, query: &Query<'_>, search_fields: &[&str]) -> Result<Vec<&'b Contact>> {
        if let Query::Predicate(pred) = query {
            return Ok(self.entries.iter().filter(|entry| pred(entry)).collect());
        }
        if search_fields.is_empty() {
            return Err(RoloError::NoFieldsSpecified);
        }
        // Reject unknown fields up front, before any matching runs.
        for field in search_fields {
            fields::field_kind(field)?;
        }

        let matches = match query {
            Query::Predicate(_) => unreachable!("handled above"),
            Query::Substring {
                pattern,
                ignore_case,
            } => {
                let needle = if *ignore_case {
                    pattern.to_lowercase()
                } else {
                    pattern.clone()
                };
                self.entries
                    .iter()
                    .filter(|entry| {
                        search_fields.iter().any(|field| {
                            let value = entry.get(field).unwrap_or_default();
                            if *ignore_case {
                                value.to_lowercase().contains(&needle)
                            } else {
                                value.contains(&needle)
                            }
                        })
                    })
                    .collect()
            }
            Query::Regex(re) => self
                .entries
                .iter()
                .filter(|entry| {
                    search_fields
                        .iter()
                        .any(|field| re.is_match(entry.get(field).unwrap_or_default()))
                })
                .collect(),
        };
        Ok(matches)
    }

    /// A new ordering of the entries by `field`, leaving the stored order
    /// untouched. The sort is stable; keys compare in byte order, after
    /// lowercasing when `ignore_case` is set.
    pub fn sort_by_field(
        &self,
        field: &str,
        descending: bool,
        ignore_case: bool,
    ) -> Result<Vec<&Contact>> {
        fields::field_kind(field)?;
        let mut keyed: Vec<(String, &Contact)> = self
            .entries
            .iter()
            .map(|entry| {
                let value = entry.get(field).unwrap_or_default();
                let key = if ignore_case {
                    value.to_lowercase()
                } else {
                    value.to_string()
                };
                (key, entry)
            })
            .collect();
        // A reversed comparator keeps the sort stable for equal keys,
        // which plain sort-then-reverse would not.
        if descending {
            keyed.sort_by(|a, b| b.0.cmp(&a.0));
        } else {
            keyed.sort_by(|a, b| a.0.cmp(&b.0));
        }
        Ok(keyed.into_iter().map(|(_, entry)| entry).collect())
    }

    /// The fields the underlying format can persist.
    pub fn supported_fields(&self) -> Vec<&'static str> {
        self.format.supported_fields()
    }

    /// Re-read the book from its location, discarding in-memory state.
    /// A missing file yields an empty book.
    pub fn load(&mut self) -> Result<()> {
        let loaded = self.format.load(self.uri.location())?;
        tracing::debug!(location = %self.uri, count = loaded.len(), "loaded phonebook");
        self.entries.clear();
        for contact in loaded {
            self.add(contact);
        }
        Ok(())
    }

    /// Write a complete snapshot to the location. Always explicit and
    /// caller-driven; nothing in this crate saves implicitly.
    pub fn save(&self) -> Result<()> {
        self.format.save(self.uri.location(), &self.entries)?;
        tracing::debug!(location = %self.uri, count = self.entries.len(), "saved phonebook");
        Ok(())
    }
}

impl<'a> IntoIterator for &'a Phonebook {
    type Item = &'a Contact;
    type IntoIter = std::slice::Iter<'a, Contact>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
