//! The reference expander (spec.md §4.2).
//!
//! Two entry points, [`expand_parameter_reference`] and
//! [`expand_general_reference`], both called with the stream
//! positioned just after the sigil (`%` or `&`). Both splice their
//! resolved replacement text into the stream via
//! [`IntermediateStream::push`] rather than returning it, so scanning
//! resumes transparently at the splice point — the scanner never sees
//! the difference between reading through an entity and reading
//! original source text.
//!
//! Grounded in `xmlparser::Stream::consume_reference`'s try-then-commit
//! discipline and its decimal/hex numeric decode, generalized here to
//! also handle named parameter- and general-entity lookups and to
//! splice instead of just returning a resolved `char`.

use crate::charclass::{is_hex, is_valid_as_char_ref, is_xml_name, is_xml_name_start};
use crate::container::Container;
use crate::error::Error;
use crate::source::SourceCursor;
use crate::stream::IntermediateStream;

/// Reads an XML `Name` at the head of the stream.
///
/// Returns `None` (consuming nothing) if the current character is not
/// a valid `NameStartChar`.
pub(crate) fn read_name<C: SourceCursor>(stream: &mut IntermediateStream<C>) -> Option<String> {
    match stream.current() {
        Some(c) if is_xml_name_start(c) => {}
        _ => return None,
    }

    let mut name = String::new();
    name.push(stream.current().unwrap());
    stream.next();
    name.push_str(&stream.consume_while(is_xml_name));
    Some(name)
}

/// Expands a parameter-entity reference `%Name;`.
///
/// Must be called with the stream positioned right after the `%`.
///
/// - If `use_pe` is `false` (PE expansion is not allowed in the current
///   context — an entity-value literal in the internal subset), the
///   reference is *not* looked up at all: the raw `%Name` text is
///   appended to `accumulator` verbatim, matching how such a reference
///   is just part of the literal per spec.md §4.2.
/// - If `use_pe` is `true` and the name resolves, its replacement text
///   is spliced into the stream in place of the `%Name;` span.
/// - If `use_pe` is `true` and the name does not resolve,
///   [`Error::DtdPEReferenceInvalid`] is raised.
pub fn expand_parameter_reference<C: SourceCursor>(
    stream: &mut IntermediateStream<C>,
    container: &dyn Container,
    accumulator: &mut String,
    use_pe: bool,
) -> Result<(), Error> {
    let start_pos = stream.gen_text_pos();
    let name = match read_name(stream) {
        Some(name) => name,
        None => return Err(Error::DtdNameInvalid(start_pos)),
    };

    log::trace!("parameter reference %{}; (use={})", name, use_pe);

    if !use_pe {
        accumulator.push('%');
        accumulator.push_str(&name);
        // The literal is not required to be `;`-terminated by this path:
        // if a `;` follows it is part of the literal too, copied as-is
        // by the scanner's normal character-at-a-time loop.
        return Ok(());
    }

    if stream.current() != Some(';') {
        return Err(Error::DtdPEReferenceInvalid(stream.gen_text_pos()));
    }
    stream.next();

    match container.get_parameter(&name) {
        Some(entity) => {
            let remove = name.chars().count() + 2; // '%' + name + ';'
            stream.push(remove, entity.node_value());
            Ok(())
        }
        None => Err(Error::DtdPEReferenceInvalid(start_pos)),
    }
}

/// Expands a general-entity or character reference, `&Name;` /
/// `&#digits;` / `&#xhex;`.
///
/// Must be called with the stream positioned right after the `&`.
/// Splices the resolved text (the entity's replacement text, or the
/// single UTF-8-encoded character) into the stream.
pub fn expand_general_reference<C: SourceCursor>(
    stream: &mut IntermediateStream<C>,
    container: &dyn Container,
) -> Result<(), Error> {
    let start_pos = stream.gen_text_pos();

    if stream.current() == Some('#') {
        stream.next();
        return expand_character_reference(stream, start_pos);
    }

    let name = match read_name(stream) {
        Some(name) => name,
        None => return Err(Error::CharacterReferenceNotTerminated(start_pos)),
    };

    if stream.current() != Some(';') {
        return Err(Error::CharacterReferenceNotTerminated(start_pos));
    }
    stream.next();

    match container.get_entity(&name) {
        Some(entity) => {
            let remove = name.chars().count() + 2; // '&' + name + ';'
            stream.push(remove, entity.node_value());
            Ok(())
        }
        None => Err(Error::CharacterReferenceNotTerminated(start_pos)),
    }
}

pub(crate) fn expand_character_reference<C: SourceCursor>(
    stream: &mut IntermediateStream<C>,
    start_pos: crate::error::TextPos,
) -> Result<(), Error> {
    let (digits, radix) = if stream.current() == Some('x') {
        stream.next();
        (stream.consume_while(is_hex), 16)
    } else {
        (stream.consume_while(|c| c.is_ascii_digit()), 10)
    };

    if digits.is_empty() || stream.current() != Some(';') {
        return Err(Error::CharacterReferenceNotTerminated(start_pos));
    }
    stream.next();

    let code = u32::from_str_radix(&digits, radix)
        .map_err(|_| Error::CharacterReferenceInvalidCode(start_pos))?;
    let c = char::from_u32(code).ok_or(Error::CharacterReferenceInvalidCode(start_pos))?;
    if !is_valid_as_char_ref(c) {
        return Err(Error::CharacterReferenceInvalidCode(start_pos));
    }

    // "&#…;" is 3 + digits.len() + (1 for 'x' if hex) characters long.
    let prefix_extra = if radix == 16 { 1 } else { 0 };
    let remove = 3 + prefix_extra + digits.chars().count();
    let mut replacement = String::new();
    replacement.push(c);
    stream.push(remove, &replacement);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::container::SimpleEntityTable;
    use crate::source::StrCursor;

    #[test]
    fn parameter_reference_splices_replacement_text() {
        let mut table = SimpleEntityTable::new();
        table.declare_parameter("x", "abc");

        let mut src = StrCursor::new("%x;-tail");
        let mut stream = IntermediateStream::new(&mut src);
        stream.next(); // consume '%', land on 'x'
        let mut acc = String::new();
        expand_parameter_reference(&mut stream, &table, &mut acc, true).unwrap();

        assert_eq!(stream.current(), Some('a'));
        let rest = stream.consume_while(|_| true);
        assert_eq!(rest, "abc-tail");
    }

    #[test]
    fn parameter_reference_literal_when_not_used() {
        let mut table = SimpleEntityTable::new();
        table.declare_parameter("x", "abc");

        let mut src = StrCursor::new("%x;-tail");
        let mut stream = IntermediateStream::new(&mut src);
        stream.next();
        let mut acc = String::new();
        expand_parameter_reference(&mut stream, &table, &mut acc, false).unwrap();
        assert_eq!(acc, "%x");
        // Nothing was spliced: the ';' is still ahead in the stream.
        assert_eq!(stream.current(), Some(';'));
    }

    #[test]
    fn unknown_parameter_reference_is_fatal() {
        let table = SimpleEntityTable::new();
        let mut src = StrCursor::new("%missing;");
        let mut stream = IntermediateStream::new(&mut src);
        stream.next();
        let mut acc = String::new();
        let err = expand_parameter_reference(&mut stream, &table, &mut acc, true).unwrap_err();
        assert!(matches!(err, Error::DtdPEReferenceInvalid(_)));
    }

    #[test]
    fn decimal_character_reference_splices_character() {
        let table = SimpleEntityTable::new();
        let mut src = StrCursor::new("#65;X"); // 'A'
        let mut stream = IntermediateStream::new(&mut src);
        expand_general_reference(&mut stream, &table).unwrap();
        assert_eq!(stream.current(), Some('A'));
        stream.next();
        assert_eq!(stream.current(), Some('X'));
    }

    #[test]
    fn hex_character_reference_splices_character() {
        let table = SimpleEntityTable::new();
        let mut src = StrCursor::new("#x41;X"); // 'A'
        let mut stream = IntermediateStream::new(&mut src);
        expand_general_reference(&mut stream, &table).unwrap();
        assert_eq!(stream.current(), Some('A'));
    }

    #[test]
    fn named_general_reference_splices_replacement() {
        let mut table = SimpleEntityTable::new();
        table.declare_entity("amp", "&");
        let mut src = StrCursor::new("amp;X");
        let mut stream = IntermediateStream::new(&mut src);
        expand_general_reference(&mut stream, &table).unwrap();
        assert_eq!(stream.current(), Some('&'));
    }

    #[test]
    fn invalid_code_point_is_fatal() {
        let table = SimpleEntityTable::new();
        let mut src = StrCursor::new("#x0;"); // NUL is not a valid XML char
        let mut stream = IntermediateStream::new(&mut src);
        let err = expand_general_reference(&mut stream, &table).unwrap_err();
        assert!(matches!(err, Error::CharacterReferenceInvalidCode(_)));
    }
}
