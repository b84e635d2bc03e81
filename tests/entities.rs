use dtdparser::{DeclScanner, NullErrorSink, SimpleEntityTable, StrCursor, Token};

fn scan_one(input: &str, is_external: bool, container: &SimpleEntityTable) -> Token {
    let mut src = StrCursor::new(input);
    let mut scanner = DeclScanner::with_external(container, &mut src, is_external);
    let mut sink = NullErrorSink;
    scanner.get(&mut sink).expect("scan should succeed")
}

#[test]
fn internal_entity_with_quoted_value() {
    let table = SimpleEntityTable::new();
    let token = scan_one(r#"<!ENTITY copyright "Copyright 2024">"#, true, &table);
    assert_eq!(
        token,
        Token::EntityDecl {
            name: "copyright".into(),
            is_parameter: false,
            is_extern: false,
            public_id: None,
            system_id: None,
            value: Some("Copyright 2024".into()),
            extern_notation: None,
        }
    );
}

#[test]
fn parameter_entity_flag_and_value() {
    let table = SimpleEntityTable::new();
    let token = scan_one(r#"<!ENTITY % ISOLat1 "&#60;test&#62;">"#, true, &table);
    match token {
        Token::EntityDecl {
            is_parameter,
            value,
            ..
        } => {
            assert!(is_parameter);
            assert_eq!(value.as_deref(), Some("<test>"));
        }
        other => panic!("unexpected token: {:?}", other),
    }
}

#[test]
fn general_entity_reference_inside_value_is_copied_literally() {
    let table = SimpleEntityTable::new();
    let token = scan_one(r#"<!ENTITY greeting "Hi &friend;, &#65;!">"#, true, &table);
    match token {
        Token::EntityDecl { value, .. } => {
            assert_eq!(value.as_deref(), Some("Hi &friend;, A!"));
        }
        other => panic!("unexpected token: {:?}", other),
    }
}

#[test]
fn unterminated_named_reference_right_before_closing_quote_does_not_swallow_it() {
    // "&foo" has no ";" before the literal's closing '"'. The closing
    // quote must still terminate the literal instead of being copied
    // into the accumulator as part of the reference.
    let table = SimpleEntityTable::new();
    let token = scan_one(r#"<!ENTITY x "&foo">"#, true, &table);
    match token {
        Token::EntityDecl { value, .. } => {
            assert_eq!(value.as_deref(), Some("&foo"));
        }
        other => panic!("unexpected token: {:?}", other),
    }
}

#[test]
fn external_entity_with_system_id() {
    let table = SimpleEntityTable::new();
    let token = scan_one(r#"<!ENTITY logo SYSTEM "logo.gif" NDATA gif>"#, true, &table);
    assert_eq!(
        token,
        Token::EntityDecl {
            name: "logo".into(),
            is_parameter: false,
            is_extern: true,
            public_id: None,
            system_id: Some("logo.gif".into()),
            value: None,
            extern_notation: Some("gif".into()),
        }
    );
}

#[test]
fn external_entity_with_public_and_system_id() {
    let table = SimpleEntityTable::new();
    let token = scan_one(
        r#"<!ENTITY chap1 PUBLIC "-//Example//TEXT Chapter 1//EN" "chap1.xml">"#,
        true,
        &table,
    );
    assert_eq!(
        token,
        Token::EntityDecl {
            name: "chap1".into(),
            is_parameter: false,
            is_extern: true,
            public_id: Some("-//Example//TEXT Chapter 1//EN".into()),
            system_id: Some("chap1.xml".into()),
            value: None,
            extern_notation: None,
        }
    );
}

#[test]
fn parameter_entity_reference_splices_across_two_declarations() {
    // The tokenizer does not auto-populate the container from the first
    // EntityDecl it returns; that's the DTD builder's job. We simulate
    // the builder having already declared "x" by the time the second
    // entity is scanned.
    let mut table = SimpleEntityTable::new();
    table.declare_parameter("x", "abc");

    let external = scan_one(r#"<!ENTITY y "%x;-tail">"#, true, &table);
    match external {
        Token::EntityDecl { value, .. } => assert_eq!(value.as_deref(), Some("abc-tail")),
        other => panic!("unexpected token: {:?}", other),
    }

    let internal = scan_one(r#"<!ENTITY y "%x;-tail">"#, false, &table);
    match internal {
        Token::EntityDecl { value, .. } => assert_eq!(value.as_deref(), Some("%x;-tail")),
        other => panic!("unexpected token: {:?}", other),
    }
}
