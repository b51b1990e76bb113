use roloapp::{Contact, Query, Resolver};

fn ada() -> Contact {
    Contact::from_pairs([
        ("firstname", "Ada"),
        ("lastname", "Lovelace"),
        ("email", "ada@example.com"),
    ])
    .unwrap()
}

#[test]
fn end_to_end_csv_scenario() {
    let dir = tempfile::tempdir().unwrap();
    let uri = format!("csv://{}", dir.path().join("test.csv").display());

    // Fresh location: opens and loads as empty.
    let resolver = Resolver::with_builtins();
    let mut book = resolver.open(&uri).unwrap();
    book.load().unwrap();
    assert!(book.is_empty());

    book.add(ada());
    book.save().unwrap();

    // A separate resolver sees the saved entry.
    let resolver = Resolver::with_builtins();
    let mut reopened = resolver.open(&uri).unwrap();
    reopened.load().unwrap();
    assert_eq!(reopened.len(), 1);
    assert_eq!(reopened.get(0).unwrap().get("lastname").unwrap(), "Lovelace");
}

#[test]
fn round_trip_is_fieldwise_equal() {
    let resolver = Resolver::with_builtins();
    for format in ["csv", "json"] {
        let dir = tempfile::tempdir().unwrap();
        let uri = format!(
            "{}://{}",
            format,
            dir.path().join("book").with_extension(format).display()
        );

        let mut book = resolver.open(&uri).unwrap();
        book.add(ada());
        let mut grace = Contact::from_pairs([
            ("firstname", "Grace"),
            ("lastname", "Hopper"),
            ("birthdate", "09.12.1906"),
            ("postbox", "12"),
        ])
        .unwrap();
        grace.set("town", "Arlington").unwrap();
        book.add(grace);
        book.save().unwrap();

        let mut reopened = resolver.open(&uri).unwrap();
        reopened.load().unwrap();
        let original: Vec<_> = book.iter().collect();
        let loaded: Vec<_> = reopened.iter().collect();
        assert_eq!(original, loaded, "{} round trip", format);
    }
}

#[test]
fn integer_fields_compare_in_canonical_form() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("book.csv");
    // A hand-written file using a non-canonical integer literal.
    std::fs::write(&path, "lastname,postbox\nLovelace,05\n").unwrap();

    let resolver = Resolver::with_builtins();
    let mut book = resolver.open(path.to_str().unwrap()).unwrap();
    book.load().unwrap();

    let expected = Contact::from_pairs([("lastname", "Lovelace"), ("postbox", "5")]).unwrap();
    assert_eq!(book.get(0).unwrap(), &expected);
}

#[test]
fn load_is_idempotent_and_resets_state() {
    let dir = tempfile::tempdir().unwrap();
    let uri = format!("csv://{}", dir.path().join("book.csv").display());

    let resolver = Resolver::with_builtins();
    let mut book = resolver.open(&uri).unwrap();
    book.add(ada());
    book.save().unwrap();

    book.load().unwrap();
    let first: Vec<Contact> = book.iter().cloned().collect();
    book.load().unwrap();
    let second: Vec<Contact> = book.iter().cloned().collect();
    assert_eq!(first, second);

    // In-memory edits not saved are discarded by a reload.
    book.add(Contact::from_pairs([("lastname", "Unsaved")]).unwrap());
    assert_eq!(book.len(), 2);
    book.load().unwrap();
    assert_eq!(book.len(), 1);
}

#[test]
fn copy_on_add_between_books() {
    let dir = tempfile::tempdir().unwrap();
    let resolver = Resolver::with_builtins();
    let mut a = resolver
        .open(&format!("csv://{}", dir.path().join("a.csv").display()))
        .unwrap();
    let mut b = resolver
        .open(&format!("json://{}", dir.path().join("b.json").display()))
        .unwrap();

    a.add(ada());
    let owned = a.get(0).unwrap().clone();
    b.add(owned);

    assert_eq!(a.len(), 1);
    assert_eq!(b.len(), 1);
    assert_eq!(a.get(0).unwrap(), b.get(0).unwrap());
    assert_ne!(a.get(0).unwrap().parent(), b.get(0).unwrap().parent());
}

#[test]
fn search_after_load() {
    let dir = tempfile::tempdir().unwrap();
    let uri = format!("csv://{}", dir.path().join("book.csv").display());

    let resolver = Resolver::with_builtins();
    let mut book = resolver.open(&uri).unwrap();
    book.add(ada());
    book.add(Contact::from_pairs([("firstname", "Grace"), ("lastname", "Hopper")]).unwrap());
    book.save().unwrap();

    let mut reopened = resolver.open(&uri).unwrap();
    reopened.load().unwrap();
    let found = reopened
        .find_all(&Query::substring("lovelace", true), &["lastname"])
        .unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].get("firstname").unwrap(), "Ada");
}
