//! The contact record: one address-book entry, typed over the field
//! registry.
//!
//! A [`Contact`] always holds a value for every registered field (the empty
//! string is the universal empty value), so there are no partial records.
//! All writes go through [`Contact::set`], which validates and coerces the
//! value for the field's kind; a failed write leaves the previous value in
//! place.
//!
//! A contact carries an opaque parent tag identifying the [`Phonebook`]
//! that owns it, or none when detached. The tag exists only so that adding
//! an already-owned contact to another book forces a copy; it is never
//! dereferenced.
//!
//! [`Phonebook`]: crate::book::Phonebook

use std::fmt;
use std::hash::{Hash, Hasher};

use crate::book::BookTag;
use crate::error::Result;
use crate::fields::{self, FIELDS};

#[derive(Debug, Clone)]
pub struct Contact {
    // One canonical string per registry field, in registry order.
    values: Vec<String>,
    pub(crate) parent: Option<BookTag>,
}

impl Contact {
    /// Create an empty contact: every field at its empty value, detached.
    pub fn new() -> Self {
        Self {
            values: vec![String::new(); FIELDS.len()],
            parent: None,
        }
    }

    /// Create a contact from `(field, value)` pairs; unlisted fields stay
    /// empty.
    pub fn from_pairs<'a, I>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut contact = Self::new();
        for (field, value) in pairs {
            contact.set(field, value)?;
        }
        Ok(contact)
    }

    /// The value of `field`, in canonical form.
    pub fn get(&self, field: &str) -> Result<&str> {
        let pos = fields::field_position(field)?;
        Ok(&self.values[pos])
    }

    /// Set `field` to `raw`, validating and coercing per the field's kind.
    ///
    /// All-or-nothing: on failure the previous value is untouched. The
    /// empty string always succeeds and clears the field.
    pub fn set(&mut self, field: &str, raw: &str) -> Result<()> {
        let pos = fields::field_position(field)?;
        let canonical = fields::coerce_value(field, raw)?;
        self.values[pos] = canonical;
        Ok(())
    }

    /// True iff every field holds its empty value.
    pub fn is_empty(&self) -> bool {
        self.values.iter().all(|value| value.is_empty())
    }

    /// The owning phonebook's tag, or `None` when detached.
    pub fn parent(&self) -> Option<BookTag> {
        self.parent
    }

    /// Deep copy with the parent cleared.
    pub fn detached_copy(&self) -> Contact {
        Contact {
            values: self.values.clone(),
            parent: None,
        }
    }

    /// `(name, value)` pairs in registry order.
    pub fn items(&self) -> impl Iterator<Item = (&'static str, &str)> + '_ {
        FIELDS
            .iter()
            .zip(self.values.iter())
            .map(|(spec, value)| (spec.name, value.as_str()))
    }

    /// One-line rendering: "firstname lastname".
    pub fn short_display(&self) -> String {
        let firstname = self.get("firstname").unwrap_or_default();
        let lastname = self.get("lastname").unwrap_or_default();
        format!("{} {}", firstname, lastname).trim().to_string()
    }

    /// Multi-line rendering: one `label: value` line per non-empty field,
    /// in registry order.
    pub fn long_display(&self) -> String {
        let mut out = String::new();
        for (spec, value) in FIELDS.iter().zip(self.values.iter()) {
            if !value.is_empty() {
                out.push_str(spec.label);
                out.push_str(": ");
                out.push_str(value);
                out.push('\n');
            }
        }
        out
    }
}

impl Default for Contact {
    fn default() -> Self {
        Self::new()
    }
}

// Equality and hashing cover the field mapping only; the parent tag is
// bookkeeping, not content.
impl PartialEq for Contact {
    fn eq(&self, other: &Self) -> bool {
        self.values == other.values
    }
}

impl Eq for Contact {}

impl Hash for Contact {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.values.hash(state);
    }
}

impl fmt::Display for Contact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.short_display())
    }
}
