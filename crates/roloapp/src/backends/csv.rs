//! CSV backend: the reference on-disk format.
//!
//! UTF-8, first row is the header carrying the field names in registry
//! order, one row per contact, empty string for empty fields. Quoting
//! follows RFC 4180: fields containing commas, quotes or newlines are
//! quoted, quotes are doubled. The codec is small enough to live here and
//! is tested below.

use crate::backend::{Backend, Format};
use crate::book::Phonebook;
use crate::contact::Contact;
use crate::error::{Result, RoloError};
use crate::fields;
use crate::uri::Uri;

use super::{has_extension, read_if_exists, write_atomic};

pub fn backend() -> Result<Box<dyn Backend>> {
    Ok(Box::new(CsvBackend))
}

struct CsvBackend;

impl Backend for CsvBackend {
    fn name(&self) -> &'static str {
        "csv"
    }

    fn description(&self) -> &'static str {
        "comma separated values, one row per entry"
    }

    fn supports(&self, location: &str) -> bool {
        has_extension(location, "csv")
    }

    fn open(&self, uri: &Uri) -> Result<Phonebook> {
        Ok(Phonebook::new(uri.clone(), Box::new(CsvFormat)))
    }
}

struct CsvFormat;

impl Format for CsvFormat {
    fn load(&self, location: &str) -> Result<Vec<Contact>> {
        let Some(content) = read_if_exists(location)? else {
            return Ok(Vec::new());
        };
        if content.trim().is_empty() {
            return Ok(Vec::new());
        }

        let rows = parse_csv(&content).map_err(|message| RoloError::format(location, message))?;
        let mut rows = rows.into_iter();
        let header = rows.next().unwrap_or_default();
        for name in &header {
            if fields::get_spec(name).is_none() {
                return Err(RoloError::format(
                    location,
                    format!("unknown field in header: {}", name),
                ));
            }
        }

        let mut entries = Vec::new();
        for (line, row) in rows.enumerate() {
            if row.len() != header.len() {
                return Err(RoloError::format(
                    location,
                    format!(
                        "row {} has {} fields, expected {}",
                        line + 2,
                        row.len(),
                        header.len()
                    ),
                ));
            }
            let mut contact = Contact::new();
            for (name, value) in header.iter().zip(row.iter()) {
                contact.set(name, value)?;
            }
            entries.push(contact);
        }
        Ok(entries)
    }

    fn save(&self, location: &str, entries: &[Contact]) -> Result<()> {
        let columns: Vec<&str> = self.supported_fields();
        let mut out = String::new();
        write_row(&mut out, columns.iter().copied());
        for entry in entries {
            write_row(
                &mut out,
                columns.iter().map(|field| entry.get(field).unwrap_or_default()),
            );
        }
        write_atomic(location, &out)
    }
}

fn write_row<'a>(out: &mut String, values: impl Iterator<Item = &'a str>) {
    let mut first = true;
    for value in values {
        if !first {
            out.push(',');
        }
        first = false;
        if value.contains(['"', ',', '\n', '\r']) {
            out.push('"');
            out.push_str(&value.replace('"', "\"\""));
            out.push('"');
        } else {
            out.push_str(value);
        }
    }
    out.push('\n');
}

/// Parse RFC 4180 CSV into records of fields. A trailing newline does not
/// produce an empty trailing record.
fn parse_csv(input: &str) -> std::result::Result<Vec<Vec<String>>, String> {
    let mut records = Vec::new();
    let mut record: Vec<String> = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut chars = input.chars().peekable();

    while let Some(c) = chars.next() {
        if in_quotes {
            match c {
                '"' => {
                    if chars.peek() == Some(&'"') {
                        chars.next();
                        field.push('"');
                    } else {
                        in_quotes = false;
                    }
                }
                _ => field.push(c),
            }
            continue;
        }
        match c {
            '"' => {
                if field.is_empty() {
                    in_quotes = true;
                } else {
                    return Err("quote inside unquoted field".to_string());
                }
            }
            ',' => record.push(std::mem::take(&mut field)),
            '\r' | '\n' => {
                if c == '\r' && chars.peek() == Some(&'\n') {
                    chars.next();
                }
                record.push(std::mem::take(&mut field));
                records.push(std::mem::take(&mut record));
            }
            _ => field.push(c),
        }
    }
    if in_quotes {
        return Err("unterminated quoted field".to_string());
    }
    if !field.is_empty() || !record.is_empty() {
        record.push(field);
        records.push(record);
    }
    Ok(records)
}
