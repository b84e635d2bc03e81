//! Character predicates over the XML 1.0 grammar.
//!
//! These mirror the teacher crate's `XmlCharExt`/`XmlByteExt` split
//! between Unicode-range checks (done on `char`) and ASCII-only checks
//! (done on `u8`/`char` without touching the range tables), extended
//! with the additional predicates the DTD grammar needs that a
//! plain-document tokenizer does not (pubid characters, hex digits,
//! "valid as a character reference").

/// `S ::= (#x20 | #x9 | #xD | #xA)+`
#[inline]
pub fn is_space(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\r' | '\n')
}

/// `NameStartChar` from <https://www.w3.org/TR/xml/#NT-NameStartChar>.
#[inline]
pub fn is_xml_name_start(c: char) -> bool {
    match c {
        'A'..='Z' | 'a'..='z' | ':' | '_' => true,
        '\u{C0}'..='\u{D6}'
        | '\u{D8}'..='\u{F6}'
        | '\u{F8}'..='\u{2FF}'
        | '\u{370}'..='\u{37D}'
        | '\u{37F}'..='\u{1FFF}'
        | '\u{200C}'..='\u{200D}'
        | '\u{2070}'..='\u{218F}'
        | '\u{2C00}'..='\u{2FEF}'
        | '\u{3001}'..='\u{D7FF}'
        | '\u{F900}'..='\u{FDCF}'
        | '\u{FDF0}'..='\u{FFFD}'
        | '\u{10000}'..='\u{EFFFF}' => true,
        _ => false,
    }
}

/// `NameChar` from <https://www.w3.org/TR/xml/#NT-NameChar>.
#[inline]
pub fn is_xml_name(c: char) -> bool {
    if is_xml_name_start(c) {
        return true;
    }

    match c {
        '-' | '.' | '0'..='9' | '\u{B7}' => true,
        '\u{300}'..='\u{36F}' | '\u{203F}'..='\u{2040}' => true,
        _ => false,
    }
}

/// `Char ::= #x9 | #xA | #xD | [#x20-#xD7FF] | [#xE000-#xFFFD] | [#x10000-#x10FFFF]`
#[inline]
pub fn is_xml_char(c: char) -> bool {
    match c {
        '\u{9}' | '\u{A}' | '\u{D}' => true,
        '\u{20}'..='\u{D7FF}' => true,
        '\u{E000}'..='\u{FFFD}' => true,
        '\u{10000}'..='\u{10FFFF}' => true,
        _ => false,
    }
}

/// Same range as [`is_xml_char`], the name spec.md uses for character
/// references specifically (`&#…;`/`&#x…;`).
#[inline]
pub fn is_valid_as_char_ref(c: char) -> bool {
    is_xml_char(c)
}

/// ASCII letter, `[A-Za-z]`.
#[inline]
pub fn is_letter(c: char) -> bool {
    c.is_ascii_alphabetic()
}

/// ASCII digit, `[0-9]`.
#[inline]
pub fn is_digit(c: char) -> bool {
    c.is_ascii_digit()
}

/// ASCII hex digit, `[0-9A-Fa-f]`.
#[inline]
pub fn is_hex(c: char) -> bool {
    c.is_ascii_hexdigit()
}

/// ASCII letter or digit.
#[inline]
pub fn is_alphanumeric_ascii(c: char) -> bool {
    c.is_ascii_alphanumeric()
}

/// ASCII uppercase letter.
#[inline]
pub fn is_uppercase_ascii(c: char) -> bool {
    c.is_ascii_uppercase()
}

/// `PubidChar ::= #x20 | #xD | #xA | [a-zA-Z0-9] | [-'()+,./:=?;!*#@$_%]`
#[inline]
pub fn is_pubid_char(c: char) -> bool {
    match c {
        ' ' | '\r' | '\n' => true,
        'a'..='z' | 'A'..='Z' | '0'..='9' => true,
        '-' | '\'' | '(' | ')' | '+' | ',' | '.' | '/' | ':' | '=' | '?' | ';' | '!' | '*'
        | '#' | '@' | '$' | '_' | '%' => true,
        _ => false,
    }
}
