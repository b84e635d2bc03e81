use dtdparser::{DeclScanner, NullErrorSink, SimpleEntityTable, StrCursor, Token};

fn tokens_of(input: &str) -> Vec<Token> {
    let table = SimpleEntityTable::new();
    let mut src = StrCursor::new(input);
    let mut scanner = DeclScanner::with_external(&table, &mut src, true);
    let mut sink = NullErrorSink;
    let mut out = Vec::new();
    loop {
        let token = scanner.get(&mut sink).expect("scan should succeed");
        let done = token == Token::Eof;
        out.push(token);
        if done {
            break;
        }
    }
    out
}

#[test]
fn include_section_emits_its_declarations() {
    let tokens = tokens_of("<![INCLUDE[<!ELEMENT a EMPTY><!ELEMENT b EMPTY>]]>");
    assert_eq!(tokens.len(), 3);
    assert!(matches!(tokens[0], Token::ElementDecl { .. }));
    assert!(matches!(tokens[1], Token::ElementDecl { .. }));
    assert_eq!(tokens[2], Token::Eof);
}

#[test]
fn ignore_section_emits_nothing() {
    let tokens = tokens_of("<![IGNORE[<!ELEMENT a EMPTY>]]><!ELEMENT b EMPTY>");
    assert_eq!(tokens.len(), 2);
    match &tokens[0] {
        Token::ElementDecl { name, .. } => assert_eq!(name, "b"),
        other => panic!("unexpected token: {:?}", other),
    }
}

#[test]
fn ignore_section_tracks_nested_conditional_markers() {
    // A naive "stop at the first ]]>" scanner would end this IGNORE
    // section three characters too early, at the inner section's close.
    let tokens = tokens_of(
        "<![IGNORE[<![INCLUDE[<!ELEMENT inner EMPTY>]]>]]><!ELEMENT outer EMPTY>",
    );
    assert_eq!(tokens.len(), 2);
    match &tokens[0] {
        Token::ElementDecl { name, .. } => assert_eq!(name, "outer"),
        other => panic!("unexpected token: {:?}", other),
    }
}

#[test]
fn unterminated_ignore_section_is_fatal() {
    let table = SimpleEntityTable::new();
    let mut src = StrCursor::new("<![IGNORE[<!ELEMENT a EMPTY>");
    let mut scanner = DeclScanner::with_external(&table, &mut src, true);
    let mut sink = NullErrorSink;
    assert!(scanner.get(&mut sink).is_err());
}

#[test]
fn conditional_sections_are_illegal_in_internal_subset() {
    let table = SimpleEntityTable::new();
    let mut src = StrCursor::new("<![INCLUDE[<!ELEMENT a EMPTY>]]>");
    let mut scanner = DeclScanner::with_external(&table, &mut src, false);
    let mut sink = NullErrorSink;
    assert!(scanner.get(&mut sink).is_err());
}
