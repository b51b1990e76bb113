//! JSON backend: an array of field-name to value objects.
//!
//! Values are the canonical string forms the field registry produces.
//! Unknown keys in an object are skipped on load so books written by a
//! newer field registry still open; missing keys stay at the empty value.

use serde_json::{Map, Value};

use crate::backend::{Backend, Format};
use crate::book::Phonebook;
use crate::contact::Contact;
use crate::error::{Result, RoloError};
use crate::fields;
use crate::uri::Uri;

use super::{has_extension, read_if_exists, write_atomic};

pub fn backend() -> Result<Box<dyn Backend>> {
    Ok(Box::new(JsonBackend))
}

struct JsonBackend;

impl Backend for JsonBackend {
    fn name(&self) -> &'static str {
        "json"
    }

    fn description(&self) -> &'static str {
        "JSON array of field/value objects"
    }

    fn supports(&self, location: &str) -> bool {
        has_extension(location, "json")
    }

    fn open(&self, uri: &Uri) -> Result<Phonebook> {
        Ok(Phonebook::new(uri.clone(), Box::new(JsonFormat)))
    }
}

struct JsonFormat;

impl Format for JsonFormat {
    fn load(&self, location: &str) -> Result<Vec<Contact>> {
        let Some(content) = read_if_exists(location)? else {
            return Ok(Vec::new());
        };
        if content.trim().is_empty() {
            return Ok(Vec::new());
        }

        let objects: Vec<Map<String, Value>> = serde_json::from_str(&content)?;
        let mut entries = Vec::new();
        for object in objects {
            let mut contact = Contact::new();
            for (key, value) in object {
                if fields::get_spec(&key).is_none() {
                    tracing::debug!(field = %key, location, "skipping unknown field");
                    continue;
                }
                let Value::String(text) = value else {
                    return Err(RoloError::format(
                        location,
                        format!("field {} is not a string", key),
                    ));
                };
                contact.set(&key, &text)?;
            }
            entries.push(contact);
        }
        Ok(entries)
    }

    fn save(&self, location: &str, entries: &[Contact]) -> Result<()> {
        let objects: Vec<Map<String, Value>> = entries
            .iter()
            .map(|entry| {
                // Insertion follows registry order; the map preserves it.
                entry
                    .items()
                    .map(|(name, value)| (name.to_string(), Value::String(value.to_string())))
                    .collect()
            })
            .collect();
        let content = serde_json::to_string_pretty(&objects)?;
        write_atomic(location, &content)
    }
}
