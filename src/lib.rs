/*!

*dtdparser* is a low-level, pull-based [XML 1.0](https://www.w3.org/TR/xml/)
Document Type Definition (DTD) tokenizer.

Given a character stream positioned inside a DOCTYPE internal or external
subset, [`DeclScanner`] produces a lazy sequence of declaration tokens:
processing instructions, comments, entity declarations, element
(content-model) declarations, attribute-list declarations, notation
declarations, and text declarations.

## Example

```rust
use dtdparser::{Container, DeclScanner, NullErrorSink, SimpleEntityTable, StrCursor, Token};

let table = SimpleEntityTable::new();
let mut src = StrCursor::new(r#"<!ELEMENT br EMPTY>"#);
let mut scanner = DeclScanner::with_external(&table, &mut src, false);
let mut sink = NullErrorSink;

assert!(matches!(scanner.get(&mut sink), Ok(Token::ElementDecl { .. })));
```

## Scope

This crate is the tokenizer only. It does not validate documents against a
parsed DTD, resolve external system identifiers over the network, or
serialize a DTD back to text. It does not decode bytes into characters
(that's [`SourceCursor`]'s job) and it does not track which entities have
been declared across a document (that's [`Container`]'s job) — both are
traits an embedder implements over whatever infrastructure already decodes
their transport encoding and tracks their entity table. A minimal concrete
implementation of each ([`StrCursor`], [`SimpleEntityTable`]) is provided
for embedders and tests that don't already have their own.

## Safety

- The library should not panic outside of the documented `previous()` and
  `push()` preconditions. Any other panic is considered a critical bug and
  should be reported.
- The library forbids unsafe code.
*/

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod charclass;
mod container;
mod error;
mod reference;
mod scanner;
mod source;
mod stream;
mod token;

pub use charclass::*;
pub use container::*;
pub use error::*;
pub use scanner::*;
pub use source::*;
pub use stream::*;
pub use token::*;
