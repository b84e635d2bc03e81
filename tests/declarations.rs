use dtdparser::{
    AttDefault, AttType, AttrDecl, ContentSpec, DeclScanner, NullErrorSink, Quantifier,
    RecoverableError, SimpleEntityTable, StrCursor, Token, VecErrorSink,
};

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
fn empty_element() {
    assert_eq!(
        tokens_of("<!ELEMENT br EMPTY>"),
        vec![
            Token::ElementDecl {
                name: "br".into(),
                content_spec: ContentSpec::Empty,
            },
            Token::Eof,
        ]
    );
}

#[test]
fn any_element() {
    assert_eq!(
        tokens_of("<!ELEMENT div ANY>"),
        vec![
            Token::ElementDecl {
                name: "div".into(),
                content_spec: ContentSpec::Any,
            },
            Token::Eof,
        ]
    );
}

#[test]
fn attlist_with_enumerated_and_notation_types() {
    let tokens = tokens_of(
        r#"<!ATTLIST video kind (sd|hd) "sd" codec NOTATION (avc|vp9) #IMPLIED>"#,
    );
    assert_eq!(
        tokens,
        vec![
            Token::AttListDecl {
                name: "video".into(),
                attributes: vec![
                    AttrDecl {
                        name: "kind".into(),
                        att_type: AttType::Enumerated {
                            is_notation: false,
                            names: vec!["sd".into(), "hd".into()],
                        },
                        default: AttDefault::Custom {
                            value: "sd".into(),
                            is_fixed: false,
                        },
                    },
                    AttrDecl {
                        name: "codec".into(),
                        att_type: AttType::Enumerated {
                            is_notation: true,
                            names: vec!["avc".into(), "vp9".into()],
                        },
                        default: AttDefault::Implied,
                    },
                ],
            },
            Token::Eof,
        ]
    );
}

#[test]
fn processing_instruction_with_content() {
    assert_eq!(
        tokens_of("<?xml-stylesheet href=\"a.xsl\"?>"),
        vec![
            Token::ProcessingInstruction {
                target: "xml-stylesheet".into(),
                content: Some("href=\"a.xsl\"".into()),
            },
            Token::Eof,
        ]
    );
}

#[test]
fn processing_instruction_without_content() {
    assert_eq!(
        tokens_of("<?target?>"),
        vec![
            Token::ProcessingInstruction {
                target: "target".into(),
                content: None,
            },
            Token::Eof,
        ]
    );
}

#[test]
fn text_declaration_at_start_of_external_subset() {
    assert_eq!(
        tokens_of("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"),
        vec![
            Token::TextDecl {
                version: Some("1.0".into()),
                encoding: Some("UTF-8".into()),
            },
            Token::Eof,
        ]
    );
}

#[test]
fn nested_content_model_with_mixed_connectors_is_rejected() {
    let table = SimpleEntityTable::new();
    let mut src = StrCursor::new("<!ELEMENT x (a,b|c)>");
    let mut scanner = DeclScanner::with_external(&table, &mut src, true);
    let mut sink = NullErrorSink;
    assert!(scanner.get(&mut sink).is_err());
}

#[test]
fn mixed_content_with_duplicate_names_is_rejected() {
    let table = SimpleEntityTable::new();
    let mut src = StrCursor::new("<!ELEMENT p (#PCDATA|a|a)*>");
    let mut scanner = DeclScanner::with_external(&table, &mut src, true);
    let mut sink = NullErrorSink;
    assert!(scanner.get(&mut sink).is_err());
}

#[test]
fn mixed_content_missing_quantifier_is_salvaged_as_recoverable() {
    let table = SimpleEntityTable::new();
    let mut src = StrCursor::new("<!ELEMENT p (#PCDATA|a|b)>");
    let mut scanner = DeclScanner::with_external(&table, &mut src, true);
    let mut sink = VecErrorSink::new();

    let token = scanner.get(&mut sink).expect("missing '*' should be salvaged, not fatal");
    assert_eq!(
        token,
        Token::ElementDecl {
            name: "p".into(),
            content_spec: ContentSpec::Mixed {
                names: vec!["a".into(), "b".into()],
                quantifier: Quantifier::ZeroOrMore,
            },
        }
    );
    assert!(matches!(
        sink.errors(),
        [(RecoverableError::QuantifierMissing, _)]
    ));
}

#[test]
fn nested_group_particle_with_quantifier() {
    let tokens = tokens_of("<!ELEMENT x ((a|b)+,c)>");
    match &tokens[0] {
        Token::ElementDecl { content_spec, .. } => match content_spec {
            ContentSpec::Sequence { children, quantifier } => {
                assert_eq!(*quantifier, Quantifier::One);
                assert_eq!(children.len(), 2);
                match &children[0] {
                    ContentSpec::Choice { children, quantifier } => {
                        assert_eq!(*quantifier, Quantifier::OneOrMore);
                        assert_eq!(children.len(), 2);
                    }
                    other => panic!("unexpected particle: {:?}", other),
                }
            }
            other => panic!("unexpected content model: {:?}", other),
        },
        other => panic!("unexpected token: {:?}", other),
    }
}
