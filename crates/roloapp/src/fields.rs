//! The field registry: the fixed, ordered catalogue of contact fields.
//!
//! This is the single source of truth for which fields a [`Contact`] holds,
//! what they are called in user-facing output, and how their values are
//! validated. The registry is a compile-time constant; its order drives
//! display and on-disk serialization.
//!
//! [`Contact`]: crate::contact::Contact

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{Result, RoloError};

/// The semantic type of a field, governing validation and coercion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Free-form text, accepted as-is.
    Text,
    /// Base-10 integer. Stored in canonical form ("05" becomes "5").
    Integer,
    /// Phone number: digits, whitespace and the characters `- ( ) /`.
    PhoneNumber,
    /// Mail address of the form `local@domain.tld`.
    Email,
    /// Calendar date, parsed permissively and stored as ISO `YYYY-MM-DD`.
    Date,
}

/// Specification for a single field.
#[derive(Debug, Clone)]
pub struct FieldSpec {
    /// The field name used in the API and in file headers.
    pub name: &'static str,
    /// The user-facing label.
    pub label: &'static str,
    /// The kind of value this field holds.
    pub kind: FieldKind,
}

impl FieldSpec {
    const fn new(name: &'static str, label: &'static str, kind: FieldKind) -> Self {
        Self { name, label, kind }
    }
}

/// Registry of all contact fields, in display and serialization order.
///
/// Field names are unique. Adding a field means adding an entry here.
pub const FIELDS: &[FieldSpec] = &[
    FieldSpec::new("title", "Title", FieldKind::Text),
    FieldSpec::new("firstname", "First name", FieldKind::Text),
    FieldSpec::new("lastname", "Last name", FieldKind::Text),
    FieldSpec::new("street", "Street and number", FieldKind::Text),
    FieldSpec::new("postcode", "Postal code", FieldKind::Text),
    FieldSpec::new("town", "Town", FieldKind::Text),
    FieldSpec::new("country", "Country", FieldKind::Text),
    FieldSpec::new("postbox", "Post office box", FieldKind::Integer),
    FieldSpec::new("mobile", "Mobile", FieldKind::PhoneNumber),
    FieldSpec::new("phone", "Phone", FieldKind::PhoneNumber),
    FieldSpec::new("email", "eMail", FieldKind::Email),
    FieldSpec::new("birthdate", "Date of birth", FieldKind::Date),
    FieldSpec::new("tags", "Tags", FieldKind::Text),
];

/// Look up a field spec by name.
pub fn get_spec(name: &str) -> Option<&'static FieldSpec> {
    FIELDS.iter().find(|spec| spec.name == name)
}

/// All field names, in registry order.
pub fn field_names() -> impl Iterator<Item = &'static str> {
    FIELDS.iter().map(|spec| spec.name)
}

/// The user-facing label for `name`.
pub fn translate_field(name: &str) -> Result<&'static str> {
    get_spec(name)
        .map(|spec| spec.label)
        .ok_or_else(|| RoloError::NoSuchField(name.to_string()))
}

/// The kind of `name`.
pub fn field_kind(name: &str) -> Result<FieldKind> {
    get_spec(name)
        .map(|spec| spec.kind)
        .ok_or_else(|| RoloError::NoSuchField(name.to_string()))
}

/// Position of `name` in the registry. Used to index a contact's value
/// vector, which is laid out in registry order.
pub(crate) fn field_position(name: &str) -> Result<usize> {
    FIELDS
        .iter()
        .position(|spec| spec.name == name)
        .ok_or_else(|| RoloError::NoSuchField(name.to_string()))
}

static PHONE_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[-()/\d\s]+$").unwrap());
static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.\w+$").unwrap());

// Accepted input formats for Date fields, tried in order.
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%d.%m.%Y", "%m/%d/%Y", "%Y/%m/%d"];

impl FieldKind {
    /// Coerce `raw` into this kind's canonical string form.
    ///
    /// Returns the reason for rejection on failure. The empty string is
    /// handled by [`coerce_value`] before kind validation applies.
    fn coerce(self, raw: &str) -> std::result::Result<String, String> {
        match self {
            FieldKind::Text => Ok(raw.to_string()),
            FieldKind::Integer => raw
                .parse::<i64>()
                .map(|n| n.to_string())
                .map_err(|_| "not a base-10 integer".to_string()),
            FieldKind::PhoneNumber => {
                if PHONE_PATTERN.is_match(raw) {
                    Ok(raw.to_string())
                } else {
                    Err("not a phone number".to_string())
                }
            }
            FieldKind::Email => {
                if EMAIL_PATTERN.is_match(raw) {
                    Ok(raw.to_string())
                } else {
                    Err("not a mail address".to_string())
                }
            }
            FieldKind::Date => DATE_FORMATS
                .iter()
                .find_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok())
                .map(|date| date.format("%Y-%m-%d").to_string())
                .ok_or_else(|| "not a date".to_string()),
        }
    }
}

/// Validate and coerce `raw` for `field`, returning the canonical form.
///
/// The empty string is always accepted and stored as the empty value,
/// bypassing kind validation: an unset field is always valid.
pub fn coerce_value(field: &str, raw: &str) -> Result<String> {
    let kind = field_kind(field)?;
    if raw.is_empty() {
        return Ok(String::new());
    }
    kind.coerce(raw).map_err(|reason| RoloError::InvalidFieldValue {
        field: field.to_string(),
        value: raw.to_string(),
        reason,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_names_are_unique() {
        for (i, spec) in FIELDS.iter().enumerate() {
            assert!(
                FIELDS[i + 1..].iter().all(|other| other.name != spec.name),
                "duplicate field name: {}",
                spec.name
            );
        }
    }

    #[test]
    fn registry_order_is_stable() {
        let names: Vec<_> = field_names().collect();
        assert_eq!(names[0], "title");
        assert_eq!(names[1], "firstname");
        assert_eq!(names[2], "lastname");
        assert_eq!(*names.last().unwrap(), "tags");
        assert_eq!(names.len(), 13);
    }

    #[test]
    fn translate_field_returns_label() {
        assert_eq!(translate_field("email").unwrap(), "eMail");
        assert_eq!(translate_field("firstname").unwrap(), "First name");
    }

    #[test]
    fn translate_unknown_field_fails() {
        assert!(matches!(
            translate_field("nickname"),
            Err(RoloError::NoSuchField(_))
        ));
    }

    #[test]
    fn field_kind_lookup() {
        assert_eq!(field_kind("postbox").unwrap(), FieldKind::Integer);
        assert_eq!(field_kind("mobile").unwrap(), FieldKind::PhoneNumber);
        assert_eq!(field_kind("birthdate").unwrap(), FieldKind::Date);
        assert!(field_kind("unknown").is_err());
    }

    #[test]
    fn integer_coercion_canonicalizes() {
        assert_eq!(coerce_value("postbox", "05").unwrap(), "5");
        assert_eq!(coerce_value("postbox", "42").unwrap(), "42");
        assert!(coerce_value("postbox", "forty-two").is_err());
    }

    #[test]
    fn phone_grammar() {
        assert!(coerce_value("phone", "0123 / 456 78-90").is_ok());
        assert!(coerce_value("phone", "(030) 1234567").is_ok());
        assert!(coerce_value("phone", "call me").is_err());
    }

    #[test]
    fn email_grammar() {
        assert_eq!(coerce_value("email", "a@b.co").unwrap(), "a@b.co");
        assert!(coerce_value("email", "not-an-email").is_err());
        assert!(coerce_value("email", "user@nodot").is_err());
        assert!(coerce_value("email", "a b@c.de").is_err());
    }

    #[test]
    fn date_formats_are_permissive() {
        assert_eq!(coerce_value("birthdate", "1984-05-23").unwrap(), "1984-05-23");
        assert_eq!(coerce_value("birthdate", "23.05.1984").unwrap(), "1984-05-23");
        assert_eq!(coerce_value("birthdate", "05/23/1984").unwrap(), "1984-05-23");
        assert_eq!(coerce_value("birthdate", "1984/05/23").unwrap(), "1984-05-23");
        assert!(coerce_value("birthdate", "yesterday").is_err());
    }

    #[test]
    fn empty_value_bypasses_validation() {
        assert_eq!(coerce_value("email", "").unwrap(), "");
        assert_eq!(coerce_value("postbox", "").unwrap(), "");
        assert_eq!(coerce_value("birthdate", "").unwrap(), "");
    }

    #[test]
    fn empty_value_still_requires_known_field() {
        assert!(coerce_value("nope", "").is_err());
    }
}
