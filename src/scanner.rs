//! The recursive-descent declaration scanner (spec.md §4.3).

use crate::charclass::{is_pubid_char, is_space, is_xml_name, is_xml_name_start};
use crate::container::Container;
use crate::error::{Error, ErrorSink, RecoverableError, TextPos};
use crate::reference::{expand_character_reference, expand_parameter_reference, read_name};
use crate::source::SourceCursor;
use crate::stream::IntermediateStream;
use crate::token::{AttDefault, AttType, AttrDecl, ContentSpec, Quantifier, Token, TokenizedType};

/// Produces one [`Token`] per call to [`DeclScanner::get`], reading
/// declarations out of a DOCTYPE internal or external subset.
pub struct DeclScanner<'c, 's, C: SourceCursor> {
    stream: IntermediateStream<'c, C>,
    container: &'s dyn Container,
    is_external: bool,
    /// Conditional-section nesting depth (`_includes` in spec.md §4.3).
    includes: usize,
}

impl<'c, 's, C: SourceCursor> DeclScanner<'c, 's, C> {
    /// Creates a scanner over an *external* subset.
    pub fn new(container: &'s dyn Container, source: &'c mut C) -> Self {
        Self::with_external(container, source, true)
    }

    /// Creates a scanner, explicitly choosing internal vs. external.
    ///
    /// The internal/external distinction governs the subset's end
    /// character (`]` vs. true EOF), whether text declarations and
    /// conditional sections are legal, and whether parameter-entity
    /// references inside entity-value literals are expanded.
    pub fn with_external(container: &'s dyn Container, source: &'c mut C, is_external: bool) -> Self {
        DeclScanner {
            stream: IntermediateStream::new(source),
            container,
            is_external,
            includes: 0,
        }
    }

    /// Whether this scanner is reading an external subset.
    pub fn is_external(&self) -> bool {
        self.is_external
    }

    /// The unexpanded source text consumed so far.
    pub fn content(&self) -> String {
        self.stream.content()
    }

    /// Reads the next token.
    ///
    /// Returns [`Token::Eof`] once the subset's end is reached with
    /// conditional-section nesting back at zero. Recoverable errors are
    /// reported to `sink`; everything else is a fatal [`Error`] that
    /// aborts the current call.
    pub fn get(&mut self, sink: &mut dyn ErrorSink) -> Result<Token, Error> {
        loop {
            self.stream.skip_spaces();

            match self.stream.current() {
                None => {
                    return if self.includes == 0 {
                        Ok(Token::Eof)
                    } else {
                        Err(Error::Eof(self.stream.gen_text_pos()))
                    };
                }
                Some(']') => {
                    if self.includes > 0 && self.stream.continues_with("]]>") {
                        self.stream.advance(3);
                        self.includes -= 1;
                        log::trace!("closed conditional section, depth now {}", self.includes);
                        continue;
                    } else if !self.is_external && self.includes == 0 {
                        return Ok(Token::Eof);
                    } else {
                        return Err(Error::DtdInvalid(self.stream.gen_text_pos()));
                    }
                }
                Some('<') => return self.scan_markup(sink),
                Some('%') => {
                    self.stream.next();
                    let mut acc = String::new();
                    expand_parameter_reference(&mut self.stream, self.container, &mut acc, true)?;
                    continue;
                }
                Some(_) => return Err(Error::DtdInvalid(self.stream.gen_text_pos())),
            }
        }
    }

    fn scan_markup(&mut self, sink: &mut dyn ErrorSink) -> Result<Token, Error> {
        let pos = self.stream.gen_text_pos();
        self.stream.next(); // '<'

        match self.stream.current() {
            Some('?') => {
                self.stream.next();
                self.scan_pi_or_textdecl()
            }
            Some('!') => {
                self.stream.next();
                if self.stream.continues_with("--") {
                    self.stream.advance(2);
                    self.scan_comment(sink)
                } else if self.stream.continues_with("ENTITY") {
                    self.stream.advance(6);
                    self.scan_entity_decl(sink)
                } else if self.stream.continues_with("ELEMENT") {
                    self.stream.advance(7);
                    self.scan_element_decl(sink)
                } else if self.stream.continues_with("ATTLIST") {
                    self.stream.advance(7);
                    self.scan_attlist_decl(sink)
                } else if self.stream.continues_with("NOTATION") {
                    self.stream.advance(8);
                    self.scan_notation_decl(sink)
                } else if self.is_external && self.stream.current() == Some('[') {
                    self.stream.next();
                    self.scan_conditional_section(sink)
                } else {
                    sink.report(RecoverableError::UndefinedMarkupDeclaration, pos);
                    Err(Error::DtdDeclInvalid(pos))
                }
            }
            _ => Err(Error::DtdInvalid(pos)),
        }
    }

    // ---- Processing instructions & text declarations (§4.3.1) ----

    fn scan_pi_or_textdecl(&mut self) -> Result<Token, Error> {
        let pos = self.stream.gen_text_pos();
        let target = match read_name(&mut self.stream) {
            Some(name) => name,
            None => return Err(Error::XmlInvalidPI(pos)),
        };

        if target.eq_ignore_ascii_case("xml") && self.is_external {
            return self.scan_text_decl(pos);
        }

        if self.stream.continues_with("?>") {
            self.stream.advance(2);
            return Ok(Token::ProcessingInstruction {
                target,
                content: None,
            });
        }

        if !matches!(self.stream.current(), Some(c) if is_space(c)) {
            return Err(Error::XmlInvalidPI(pos));
        }
        self.stream.skip_spaces();

        let mut content = String::new();
        loop {
            match self.stream.current() {
                None => return Err(Error::Eof(self.stream.gen_text_pos())),
                Some('?') if self.stream.continues_with("?>") => {
                    self.stream.advance(2);
                    break;
                }
                Some(c) => {
                    content.push(c);
                    self.stream.next();
                }
            }
        }

        Ok(Token::ProcessingInstruction {
            target,
            content: Some(content),
        })
    }

    fn scan_text_decl(&mut self, pos: TextPos) -> Result<Token, Error> {
        self.stream.skip_spaces();
        let mut version = None;
        let mut encoding = None;

        if self.stream.continues_with("version") {
            self.stream.advance(7);
            version = Some(self.scan_pseudo_attr_value(|c| c.is_ascii_digit() || c == '.')?);
            self.stream.skip_spaces();
        }

        if self.stream.continues_with("encoding") {
            self.stream.advance(8);
            encoding = Some(self.scan_pseudo_attr_value(|c| {
                c.is_ascii_alphanumeric() || c == '.' || c == '_' || c == '-'
            })?);
            self.stream.skip_spaces();
        }

        if !self.stream.continues_with("?>") {
            return Err(Error::XmlInvalidPI(pos));
        }
        self.stream.advance(2);

        Ok(Token::TextDecl { version, encoding })
    }

    fn scan_pseudo_attr_value<F: Fn(char) -> bool>(&mut self, is_valid: F) -> Result<String, Error> {
        self.stream.skip_spaces();
        if self.stream.current() != Some('=') {
            return Err(Error::XmlInvalidPI(self.stream.gen_text_pos()));
        }
        self.stream.next();
        self.stream.skip_spaces();

        let quote = match self.stream.current() {
            Some('"') => '"',
            Some('\'') => '\'',
            _ => return Err(Error::XmlInvalidPI(self.stream.gen_text_pos())),
        };
        self.stream.next();

        let value = self.stream.consume_while(|c| c != quote);
        if !value.chars().all(&is_valid) {
            return Err(Error::XmlInvalidPI(self.stream.gen_text_pos()));
        }

        if self.stream.current() != Some(quote) {
            return Err(Error::Eof(self.stream.gen_text_pos()));
        }
        self.stream.next();

        Ok(value)
    }

    // ---- Comments (§4.3.2) ----

    fn scan_comment(&mut self, sink: &mut dyn ErrorSink) -> Result<Token, Error> {
        let mut data = String::new();
        loop {
            match self.stream.current() {
                None => {
                    sink.report(RecoverableError::UnexpectedEof, self.stream.gen_text_pos());
                    break;
                }
                Some('-') if self.stream.continues_with("--") => {
                    self.stream.advance(2);
                    if self.stream.current() != Some('>') {
                        return Err(Error::CommentEndedUnexpected(self.stream.gen_text_pos()));
                    }
                    self.stream.next();
                    break;
                }
                Some(c) => {
                    data.push(c);
                    self.stream.next();
                }
            }
        }
        Ok(Token::Comment { data })
    }

    // ---- Conditional sections (§4.3.3) ----

    fn scan_conditional_section(&mut self, sink: &mut dyn ErrorSink) -> Result<Token, Error> {
        self.stream.skip_spaces();

        if self.stream.continues_with("INCLUDE") {
            self.stream.advance(7);
            self.stream.skip_spaces();
            if self.stream.current() != Some('[') {
                return Err(Error::DtdDeclInvalid(self.stream.gen_text_pos()));
            }
            self.stream.next();
            self.includes += 1;
            log::trace!("opened INCLUDE section, depth now {}", self.includes);
            self.get(sink)
        } else if self.stream.continues_with("IGNORE") {
            self.stream.advance(6);
            self.stream.skip_spaces();
            if self.stream.current() != Some('[') {
                return Err(Error::DtdDeclInvalid(self.stream.gen_text_pos()));
            }
            self.stream.next();
            log::trace!("skipping IGNORE section");
            self.skip_ignored_section()?;
            self.get(sink)
        } else {
            Err(Error::DtdDeclInvalid(self.stream.gen_text_pos()))
        }
    }

    /// Skips forward to the `]]>` that closes this IGNORE section,
    /// tracking nested `<![` openings so an inner conditional section's
    /// own closer doesn't end the outer one early. See DESIGN.md for
    /// why this differs from a naive "stop at nesting == 0" check.
    fn skip_ignored_section(&mut self) -> Result<(), Error> {
        let mut nesting = 0usize;
        loop {
            match self.stream.current() {
                None => return Err(Error::DtdInvalid(self.stream.gen_text_pos())),
                Some(_) if self.stream.continues_with("<![") => {
                    self.stream.advance(3);
                    nesting += 1;
                }
                Some(_) if self.stream.continues_with("]]>") => {
                    self.stream.advance(3);
                    if nesting == 0 {
                        return Ok(());
                    }
                    nesting -= 1;
                }
                Some(_) => {
                    self.stream.next();
                }
            }
        }
    }

    // ---- Entity declarations (§4.3.4) ----

    fn scan_entity_decl(&mut self, sink: &mut dyn ErrorSink) -> Result<Token, Error> {
        self.expect_whitespace(Error::DtdEntityInvalid)?;

        let is_parameter = if self.stream.current() == Some('%') {
            self.stream.next();
            self.expect_whitespace(Error::DtdEntityInvalid)?;
            true
        } else {
            false
        };

        let name = self.read_declared_name(Error::DtdEntityInvalid)?;
        self.expect_whitespace(Error::DtdEntityInvalid)?;

        if self.stream.continues_with("SYSTEM") || self.stream.continues_with("PUBLIC") {
            let is_public = self.stream.continues_with("PUBLIC");
            self.stream.advance(6);
            self.expect_whitespace(Error::DtdEntityInvalid)?;

            let public_id = if is_public {
                let p = self.scan_pubid_literal(sink)?;
                self.expect_whitespace(Error::DtdEntityInvalid)?;
                Some(p)
            } else {
                None
            };
            let system_id = Some(self.scan_system_literal(sink)?);

            let mut extern_notation = None;
            self.stream.skip_spaces();
            if !is_parameter && self.stream.continues_with("NDATA") {
                self.stream.advance(5);
                self.expect_whitespace(Error::DtdEntityInvalid)?;
                extern_notation = Some(self.read_declared_name(Error::DtdEntityInvalid)?);
            }

            self.stream.skip_spaces();
            self.close_decl(sink)?;

            Ok(Token::EntityDecl {
                name,
                is_parameter,
                is_extern: true,
                public_id,
                system_id,
                value: None,
                extern_notation,
            })
        } else {
            let value = self.scan_expanding_literal(sink, false)?;
            self.stream.skip_spaces();
            self.close_decl(sink)?;

            Ok(Token::EntityDecl {
                name,
                is_parameter,
                is_extern: false,
                public_id: None,
                system_id: None,
                value: Some(value),
                extern_notation: None,
            })
        }
    }

    // ---- Attribute-list declarations (§4.3.5) ----

    fn scan_attlist_decl(&mut self, sink: &mut dyn ErrorSink) -> Result<Token, Error> {
        self.expect_whitespace(Error::DtdAttListInvalid)?;
        let name = self.read_declared_name(Error::DtdAttListInvalid)?;

        let mut attributes = Vec::new();
        loop {
            self.stream.skip_spaces();
            match self.stream.current() {
                Some('>') => {
                    self.stream.next();
                    break;
                }
                None => {
                    sink.report(RecoverableError::UnexpectedEof, self.stream.gen_text_pos());
                    break;
                }
                _ => attributes.push(self.scan_attr_decl(sink)?),
            }
        }

        Ok(Token::AttListDecl { name, attributes })
    }

    fn scan_attr_decl(&mut self, sink: &mut dyn ErrorSink) -> Result<AttrDecl, Error> {
        let name = self.read_declared_name(Error::DtdAttListInvalid)?;
        self.expect_whitespace(Error::DtdAttListInvalid)?;
        let att_type = self.scan_att_type()?;
        self.stream.skip_spaces();
        let default = self.scan_att_default(sink)?;
        Ok(AttrDecl {
            name,
            att_type,
            default,
        })
    }

    fn scan_att_type(&mut self) -> Result<AttType, Error> {
        if self.stream.current() == Some('(') {
            self.stream.next();
            let names = self.scan_enumeration()?;
            return Ok(AttType::Enumerated {
                is_notation: false,
                names,
            });
        }

        let keyword = self.stream.consume_while(|c| c.is_ascii_uppercase());
        match keyword.as_str() {
            "CDATA" => Ok(AttType::StringType),
            "IDREFS" => Ok(AttType::Tokenized(TokenizedType::IdRefs)),
            "IDREF" => Ok(AttType::Tokenized(TokenizedType::IdRef)),
            "ID" => Ok(AttType::Tokenized(TokenizedType::Id)),
            "ENTITIES" => Ok(AttType::Tokenized(TokenizedType::Entities)),
            "ENTITY" => Ok(AttType::Tokenized(TokenizedType::Entity)),
            "NMTOKENS" => Ok(AttType::Tokenized(TokenizedType::NmTokens)),
            "NMTOKEN" => Ok(AttType::Tokenized(TokenizedType::NmToken)),
            "NOTATION" => {
                self.expect_whitespace(Error::DtdTypeInvalid)?;
                if self.stream.current() != Some('(') {
                    return Err(Error::DtdTypeInvalid(self.stream.gen_text_pos()));
                }
                self.stream.next();
                let names = self.scan_enumeration()?;
                Ok(AttType::Enumerated {
                    is_notation: true,
                    names,
                })
            }
            _ => Err(Error::DtdTypeInvalid(self.stream.gen_text_pos())),
        }
    }

    fn scan_enumeration(&mut self) -> Result<Vec<String>, Error> {
        let mut names = Vec::new();
        loop {
            self.stream.skip_spaces();
            names.push(self.read_declared_name(Error::DtdTypeInvalid)?);
            self.stream.skip_spaces();
            match self.stream.current() {
                Some('|') => {
                    self.stream.next();
                }
                Some(')') => {
                    self.stream.next();
                    break;
                }
                _ => return Err(Error::DtdTypeInvalid(self.stream.gen_text_pos())),
            }
        }
        Ok(names)
    }

    fn scan_att_default(&mut self, sink: &mut dyn ErrorSink) -> Result<AttDefault, Error> {
        if self.stream.current() == Some('#') {
            self.stream.next();
            let keyword = self.stream.consume_while(|c| c.is_ascii_uppercase());
            return match keyword.as_str() {
                "REQUIRED" => Ok(AttDefault::Required),
                "IMPLIED" => Ok(AttDefault::Implied),
                "FIXED" => {
                    self.expect_whitespace(Error::DtdAttListInvalid)?;
                    let value = self.scan_expanding_literal(sink, true)?;
                    Ok(AttDefault::Custom {
                        value,
                        is_fixed: true,
                    })
                }
                _ => Err(Error::DtdAttListInvalid(self.stream.gen_text_pos())),
            };
        }

        let value = self.scan_expanding_literal(sink, true)?;
        Ok(AttDefault::Custom {
            value,
            is_fixed: false,
        })
    }

    // ---- Notation declarations (§4.3.6) ----

    fn scan_notation_decl(&mut self, sink: &mut dyn ErrorSink) -> Result<Token, Error> {
        self.expect_whitespace(Error::DtdDeclInvalid)?;
        let name = self.read_declared_name(Error::DtdDeclInvalid)?;
        self.expect_whitespace(Error::DtdDeclInvalid)?;

        let (public_id, system_id) = if self.stream.continues_with("PUBLIC") {
            self.stream.advance(6);
            self.expect_whitespace(Error::DtdDeclInvalid)?;
            let pubid = self.scan_notation_pubid_literal(sink)?;
            self.stream.skip_spaces();
            let system = match self.stream.current() {
                Some('"') | Some('\'') => Some(self.scan_system_literal(sink)?),
                _ => None,
            };
            (Some(pubid), system)
        } else if self.stream.continues_with("SYSTEM") {
            self.stream.advance(6);
            self.expect_whitespace(Error::DtdDeclInvalid)?;
            (None, Some(self.scan_notation_system_literal(sink)?))
        } else {
            return Err(Error::DtdDeclInvalid(self.stream.gen_text_pos()));
        };

        self.stream.skip_spaces();
        self.close_decl(sink)?;

        Ok(Token::NotationDecl {
            name,
            public_id,
            system_id,
        })
    }

    /// Reads a `NOTATION`'s mandatory `PUBLIC` literal, recoverably
    /// salvaging a missing quoted literal as empty (spec.md §7's
    /// `NotationPublicInvalid`) instead of failing the whole
    /// declaration.
    fn scan_notation_pubid_literal(&mut self, sink: &mut dyn ErrorSink) -> Result<String, Error> {
        match self.stream.current() {
            Some('"') | Some('\'') => self.scan_pubid_literal(sink),
            _ => {
                sink.report(RecoverableError::NotationPublicInvalid, self.stream.gen_text_pos());
                Ok(String::new())
            }
        }
    }

    /// Reads a `NOTATION`'s mandatory `SYSTEM` literal, recoverably
    /// salvaging a missing quoted literal as empty (spec.md §7's
    /// `NotationSystemInvalid`) instead of failing the whole
    /// declaration.
    fn scan_notation_system_literal(&mut self, sink: &mut dyn ErrorSink) -> Result<String, Error> {
        match self.stream.current() {
            Some('"') | Some('\'') => self.scan_system_literal(sink),
            _ => {
                sink.report(RecoverableError::NotationSystemInvalid, self.stream.gen_text_pos());
                Ok(String::new())
            }
        }
    }

    // ---- Element declarations (§4.3.7) ----

    fn scan_element_decl(&mut self, sink: &mut dyn ErrorSink) -> Result<Token, Error> {
        self.expect_whitespace(Error::DtdDeclInvalid)?;
        let name = self.read_declared_name(Error::DtdDeclInvalid)?;
        self.expect_whitespace(Error::DtdDeclInvalid)?;

        let content_spec = self.scan_content_spec(sink)?;

        self.stream.skip_spaces();
        self.close_decl(sink)?;

        Ok(Token::ElementDecl { name, content_spec })
    }

    fn scan_content_spec(&mut self, sink: &mut dyn ErrorSink) -> Result<ContentSpec, Error> {
        if self.stream.continues_with("EMPTY") {
            self.stream.advance(5);
            return Ok(ContentSpec::Empty);
        }
        if self.stream.continues_with("ANY") {
            self.stream.advance(3);
            return Ok(ContentSpec::Any);
        }
        if self.stream.current() == Some('(') {
            self.stream.next();
            self.stream.skip_spaces();
            if self.stream.continues_with("#PCDATA") {
                self.stream.advance(7);
                return self.scan_mixed_content(sink);
            }
            return self.scan_children_group(sink);
        }
        Err(Error::DtdTypeContent(self.stream.gen_text_pos()))
    }

    /// Parses `( #PCDATA (| Name)* )`, per spec.md §3's invariant that
    /// element names in a `Mixed` model must be unique (a structural
    /// error, reported fatally) and §7's classification of a missing
    /// mandatory `*` as recoverable (salvaged here as `ZeroOrMore`).
    fn scan_mixed_content(&mut self, sink: &mut dyn ErrorSink) -> Result<ContentSpec, Error> {
        let mut names: Vec<String> = Vec::new();
        loop {
            self.stream.skip_spaces();
            match self.stream.current() {
                Some(')') => {
                    self.stream.next();
                    break;
                }
                Some('|') => {
                    self.stream.next();
                    self.stream.skip_spaces();
                    let name = self.read_declared_name(Error::DtdTypeContent)?;
                    if names.contains(&name) {
                        return Err(Error::DtdTypeContent(self.stream.gen_text_pos()));
                    }
                    names.push(name);
                }
                _ => return Err(Error::DtdTypeContent(self.stream.gen_text_pos())),
            }
        }

        if names.is_empty() {
            return Ok(ContentSpec::Mixed {
                names,
                quantifier: Quantifier::One,
            });
        }

        if self.stream.current() == Some('*') {
            self.stream.next();
        } else {
            sink.report(RecoverableError::QuantifierMissing, self.stream.gen_text_pos());
        }

        Ok(ContentSpec::Mixed {
            names,
            quantifier: Quantifier::ZeroOrMore,
        })
    }

    fn scan_children_group(&mut self, sink: &mut dyn ErrorSink) -> Result<ContentSpec, Error> {
        let mut children = Vec::new();
        let mut connector: Option<char> = None;

        loop {
            self.stream.skip_spaces();
            children.push(self.scan_particle(sink)?);
            self.stream.skip_spaces();

            match self.stream.current() {
                Some(')') => {
                    self.stream.next();
                    break;
                }
                Some(c) if c == ',' || c == '|' => {
                    if let Some(expected) = connector {
                        if expected != c {
                            return Err(Error::DtdTypeContent(self.stream.gen_text_pos()));
                        }
                    } else {
                        connector = Some(c);
                    }
                    self.stream.next();
                }
                _ => return Err(Error::DtdTypeContent(self.stream.gen_text_pos())),
            }
        }

        let quantifier = self.scan_quantifier();

        Ok(match connector {
            Some('|') => ContentSpec::Choice {
                children,
                quantifier,
            },
            _ => ContentSpec::Sequence {
                children,
                quantifier,
            },
        })
    }

    fn scan_particle(&mut self, sink: &mut dyn ErrorSink) -> Result<ContentSpec, Error> {
        if self.stream.current() == Some('(') {
            self.stream.next();
            self.stream.skip_spaces();
            self.scan_children_group(sink)
        } else {
            let name = self.read_declared_name(Error::DtdTypeContent)?;
            let quantifier = self.scan_quantifier();
            Ok(ContentSpec::Name { name, quantifier })
        }
    }

    fn scan_quantifier(&mut self) -> Quantifier {
        match self.stream.current() {
            Some('?') => {
                self.stream.next();
                Quantifier::ZeroOrOne
            }
            Some('*') => {
                self.stream.next();
                Quantifier::ZeroOrMore
            }
            Some('+') => {
                self.stream.next();
                Quantifier::OneOrMore
            }
            _ => Quantifier::One,
        }
    }

    // ---- Shared low-level helpers ----

    fn expect_whitespace(&mut self, err: fn(TextPos) -> Error) -> Result<(), Error> {
        if !matches!(self.stream.current(), Some(c) if is_space(c)) {
            return Err(err(self.stream.gen_text_pos()));
        }
        self.stream.skip_spaces();
        Ok(())
    }

    /// Reads an XML Name, transparently expanding any `%pe;` references
    /// embedded in it (spec.md §4.3.4: "with possible `%pe;` expansion
    /// embedded").
    fn read_declared_name(&mut self, err: fn(TextPos) -> Error) -> Result<String, Error> {
        let pos = self.stream.gen_text_pos();
        let mut acc = String::new();
        loop {
            match self.stream.current() {
                Some('%') => {
                    self.stream.next();
                    expand_parameter_reference(&mut self.stream, self.container, &mut acc, true)?;
                }
                Some(c) if acc.is_empty() && is_xml_name_start(c) => {
                    acc.push(c);
                    self.stream.next();
                }
                Some(c) if !acc.is_empty() && is_xml_name(c) => {
                    acc.push(c);
                    self.stream.next();
                }
                _ => break,
            }
        }
        if acc.is_empty() {
            return Err(err(pos));
        }
        Ok(acc)
    }

    fn scan_system_literal(&mut self, sink: &mut dyn ErrorSink) -> Result<String, Error> {
        let quote = match self.stream.current() {
            Some('"') => '"',
            Some('\'') => '\'',
            _ => return Err(Error::DtdEntityInvalid(self.stream.gen_text_pos())),
        };
        self.stream.next();

        let mut out = String::new();
        loop {
            match self.stream.current() {
                None => {
                    sink.report(RecoverableError::UnexpectedEof, self.stream.gen_text_pos());
                    break;
                }
                Some(c) if c == quote => {
                    self.stream.next();
                    break;
                }
                Some('\0') => {
                    sink.report(RecoverableError::Null, self.stream.gen_text_pos());
                    out.push('\u{FFFD}');
                    self.stream.next();
                }
                Some(c) => {
                    out.push(c);
                    self.stream.next();
                }
            }
        }
        Ok(out)
    }

    fn scan_pubid_literal(&mut self, sink: &mut dyn ErrorSink) -> Result<String, Error> {
        let quote = match self.stream.current() {
            Some('"') => '"',
            Some('\'') => '\'',
            _ => return Err(Error::DtdEntityInvalid(self.stream.gen_text_pos())),
        };
        self.stream.next();

        let mut out = String::new();
        loop {
            match self.stream.current() {
                None => {
                    sink.report(RecoverableError::UnexpectedEof, self.stream.gen_text_pos());
                    break;
                }
                Some(c) if c == quote => {
                    self.stream.next();
                    break;
                }
                Some(c) => {
                    if !is_pubid_char(c) {
                        sink.report(RecoverableError::InvalidCharacter(c), self.stream.gen_text_pos());
                    }
                    out.push(c);
                    self.stream.next();
                }
            }
        }
        Ok(out)
    }

    /// Reads a quoted literal, expanding references the way spec.md
    /// §4.2/§4.3.4 describe for entity-value and attribute-default
    /// literals: `%pe;` only when the subset is external, `&#…;` always,
    /// and named `&name;` copied verbatim (never looked up).
    ///
    /// When `reject_lt` is set, a literal `<` is a hard error — this is
    /// how attribute-default literals differ from entity-value ones
    /// (spec.md §4.3.5).
    fn scan_expanding_literal(&mut self, sink: &mut dyn ErrorSink, reject_lt: bool) -> Result<String, Error> {
        let quote = match self.stream.current() {
            Some('"') => '"',
            Some('\'') => '\'',
            _ => return Err(Error::DtdEntityInvalid(self.stream.gen_text_pos())),
        };
        self.stream.next();

        let mut acc = String::new();
        loop {
            match self.stream.current() {
                None => {
                    sink.report(RecoverableError::UnexpectedEof, self.stream.gen_text_pos());
                    break;
                }
                Some(c) if c == quote => {
                    self.stream.next();
                    break;
                }
                Some('<') if reject_lt => {
                    return Err(Error::XmlLtInAttributeValue(self.stream.gen_text_pos()));
                }
                Some('\0') => {
                    sink.report(RecoverableError::Null, self.stream.gen_text_pos());
                    acc.push('\u{FFFD}');
                    self.stream.next();
                }
                Some('%') => {
                    self.stream.next();
                    expand_parameter_reference(&mut self.stream, self.container, &mut acc, self.is_external)?;
                }
                Some('&') => {
                    self.stream.next();
                    if self.stream.current() == Some('#') {
                        self.stream.next();
                        let ref_pos = self.stream.gen_text_pos();
                        expand_character_reference(&mut self.stream, ref_pos)?;
                        // The resolved character is now at the head; the
                        // plain fall-through arm below copies it in on
                        // the next iteration.
                    } else {
                        // Copy a named general-entity reference literally
                        // (spec.md §4.2: "not expanded further"). Only
                        // consume a character once it is confirmed to be
                        // part of the name or its `;` terminator — a
                        // non-name character (e.g. the literal's own
                        // closing quote) must be left for the outer loop
                        // to see, or it would be swallowed here and the
                        // literal's real terminator would be missed.
                        acc.push('&');
                        loop {
                            match self.stream.current() {
                                None => break,
                                Some(';') => {
                                    acc.push(';');
                                    self.stream.next();
                                    break;
                                }
                                Some(c) if is_xml_name(c) => {
                                    acc.push(c);
                                    self.stream.next();
                                }
                                Some(_) => break,
                            }
                        }
                    }
                }
                Some(c) => {
                    acc.push(c);
                    self.stream.next();
                }
            }
        }
        Ok(acc)
    }

    /// Consumes the declaration's closing `>`.
    ///
    /// A stray `]>` (the `CDATA`/conditional-section closer, a common
    /// typo in place of a bare `>`) is salvaged as
    /// [`RecoverableError::TagClosedWrong`]; any other garbage before
    /// `>` is skipped and reported as
    /// [`RecoverableError::InputUnexpected`]; running out of input
    /// entirely is salvaged as [`RecoverableError::UnexpectedEof`] —
    /// per spec.md §7, all three continue scanning rather than aborting
    /// the declaration the caller has otherwise already assembled.
    fn close_decl(&mut self, sink: &mut dyn ErrorSink) -> Result<(), Error> {
        if self.stream.current() == Some(']') && self.stream.continues_with("]>") {
            sink.report(RecoverableError::TagClosedWrong, self.stream.gen_text_pos());
            self.stream.advance(2);
            return Ok(());
        }

        if self.stream.current() != Some('>') {
            sink.report(RecoverableError::InputUnexpected, self.stream.gen_text_pos());
            while matches!(self.stream.current(), Some(c) if c != '>') {
                self.stream.next();
            }
        }

        match self.stream.current() {
            Some('>') => {
                self.stream.next();
                Ok(())
            }
            None => {
                sink.report(RecoverableError::UnexpectedEof, self.stream.gen_text_pos());
                Ok(())
            }
        }
    }
}
