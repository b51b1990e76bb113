use anyhow::{bail, Context, Result};
use console::style;

use roloapp::{fields, Contact, Phonebook, Query, Resolver};

fn open_loaded(resolver: &Resolver, location: &str) -> Result<Phonebook> {
    let mut book = resolver
        .open(location)
        .with_context(|| format!("cannot open address book {}", location))?;
    book.load()
        .with_context(|| format!("cannot read address book {}", location))?;
    Ok(book)
}

fn print_entry_line(position: usize, contact: &Contact) {
    let name = contact.short_display();
    let name = if name.is_empty() {
        style("(unnamed)").dim().to_string()
    } else {
        name
    };
    let email = contact.get("email").unwrap_or_default();
    if email.is_empty() {
        println!("{:>3}  {}", position, name);
    } else {
        println!("{:>3}  {}  <{}>", position, name, email);
    }
}

pub fn list(
    resolver: &Resolver,
    location: &str,
    sort: Option<&str>,
    desc: bool,
    ignore_case: bool,
) -> Result<()> {
    let book = open_loaded(resolver, location)?;
    if book.is_empty() {
        println!("{}", style("Address book is empty.").dim());
        return Ok(());
    }
    match sort {
        Some(field) => {
            for (i, entry) in book.sort_by_field(field, desc, ignore_case)?.iter().enumerate() {
                print_entry_line(i + 1, entry);
            }
        }
        None => {
            for (i, entry) in book.iter().enumerate() {
                print_entry_line(i + 1, entry);
            }
        }
    }
    Ok(())
}

pub fn show(resolver: &Resolver, location: &str, index: usize) -> Result<()> {
    let book = open_loaded(resolver, location)?;
    let entry = index
        .checked_sub(1)
        .and_then(|i| book.get(i))
        .with_context(|| format!("no entry at position {}", index))?;
    print!("{}", entry.long_display());
    Ok(())
}

pub fn add(resolver: &Resolver, location: &str, assignments: &[String]) -> Result<()> {
    let mut contact = Contact::new();
    for assignment in assignments {
        let (field, value) = assignment
            .split_once('=')
            .with_context(|| format!("expected field=value, got {:?}", assignment))?;
        contact.set(field, value)?;
    }
    if contact.is_empty() {
        bail!("refusing to add an empty entry");
    }

    let mut book = open_loaded(resolver, location)?;
    let line = contact.short_display();
    book.add(contact);
    book.save()?;
    println!("Added {}", style(line).bold());
    Ok(())
}

pub fn remove(resolver: &Resolver, location: &str, indexes: &[usize]) -> Result<()> {
    let mut book = open_loaded(resolver, location)?;

    // Highest position first, so earlier removals don't shift later ones.
    let mut positions = indexes.to_vec();
    positions.sort_unstable();
    positions.dedup();
    for &position in positions.iter().rev() {
        let entry = position
            .checked_sub(1)
            .filter(|&i| i < book.len())
            .map(|i| book.remove_at(i))
            .transpose()?
            .with_context(|| format!("no entry at position {}", position))?;
        println!("Removed {}", entry.short_display());
    }
    book.save()?;
    Ok(())
}

pub fn search(
    resolver: &Resolver,
    location: &str,
    pattern: &str,
    search_fields: &[String],
    use_regex: bool,
    ignore_case: bool,
) -> Result<()> {
    let book = open_loaded(resolver, location)?;

    let fields: Vec<&str> = if search_fields.is_empty() {
        fields::field_names().collect()
    } else {
        search_fields.iter().map(String::as_str).collect()
    };
    let query = if use_regex {
        Query::regex(regex::Regex::new(pattern).context("invalid regular expression")?)
    } else {
        Query::substring(pattern, ignore_case)
    };

    let matches = book.find_all(&query, &fields)?;
    if matches.is_empty() {
        println!("{}", style("No matches.").dim());
        return Ok(());
    }
    for (i, entry) in matches.iter().enumerate() {
        print_entry_line(i + 1, entry);
    }
    Ok(())
}

pub fn backends(resolver: &Resolver) -> Result<()> {
    for name in resolver.discover() {
        match resolver.resolve(name) {
            Ok(backend) => {
                println!("{:<8} {}", style(name).bold(), backend.description());
            }
            Err(err) => {
                println!("{:<8} {}", style(name).red(), err);
            }
        }
    }
    Ok(())
}

pub fn convert(resolver: &Resolver, source: &str, dest: &str) -> Result<()> {
    let source_book = open_loaded(resolver, source)?;
    let mut dest_book = open_loaded(resolver, dest)?;

    for entry in &source_book {
        dest_book.add(entry.clone());
    }
    dest_book.save()?;
    println!(
        "Copied {} entries from {} to {}",
        source_book.len(),
        source_book.uri(),
        dest_book.uri()
    );
    Ok(())
}
