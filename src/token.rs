//! The token model (spec.md §3).

/// A DTD declaration token.
///
/// One `Token` is produced per call to [`crate::scanner::DeclScanner::get`].
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// Processing instruction.
    ///
    /// Example: `<?target content?>`
    ProcessingInstruction {
        /// The PI target name.
        target: String,
        /// Everything between the target and the closing `?>`, or `None`
        /// for a target with no content (`<?target?>`).
        content: Option<String>,
    },
    /// Text declaration.
    ///
    /// Only emitted at the very start of an *external* subset whose
    /// text begins with `<?xml …?>`.
    ///
    /// Example: `<?xml version="1.0" encoding="UTF-8"?>`
    TextDecl {
        /// The `version` pseudo-attribute, if present.
        version: Option<String>,
        /// The `encoding` pseudo-attribute, if present.
        encoding: Option<String>,
    },
    /// Comment.
    ///
    /// Example: `<!-- text -->`
    Comment {
        /// The comment's content, excluding the `<!--`/`-->` delimiters.
        data: String,
    },
    /// ENTITY declaration.
    ///
    /// Example: `<!ENTITY % x "abc">`
    EntityDecl {
        /// The entity's name.
        name: String,
        /// `true` for `<!ENTITY % name …>`, `false` for `<!ENTITY name …>`.
        is_parameter: bool,
        /// `true` when declared with `SYSTEM`/`PUBLIC` rather than a value
        /// literal.
        is_extern: bool,
        /// The `PUBLIC` identifier literal, when present.
        public_id: Option<String>,
        /// The `SYSTEM` identifier literal, when `is_extern`.
        system_id: Option<String>,
        /// The value literal, for internal (non-`is_extern`) entities.
        value: Option<String>,
        /// The `NDATA` notation name, for unparsed external general
        /// entities. Only ever set when `is_extern && !is_parameter`.
        extern_notation: Option<String>,
    },
    /// ELEMENT declaration.
    ///
    /// Example: `<!ELEMENT book (title, author+, chapter*)>`
    ElementDecl {
        /// The element type name.
        name: String,
        /// The content-model tree.
        content_spec: ContentSpec,
    },
    /// ATTLIST declaration.
    ///
    /// Example: `<!ATTLIST img src CDATA #REQUIRED>`
    AttListDecl {
        /// The element type name this attribute list applies to.
        name: String,
        /// The attribute definitions, in declaration order.
        attributes: Vec<AttrDecl>,
    },
    /// NOTATION declaration.
    ///
    /// Example: `<!NOTATION gif PUBLIC "-//IETF//NOTATION GIF89a//EN">`
    NotationDecl {
        /// The notation's name.
        name: String,
        /// The `PUBLIC` identifier literal, when present.
        public_id: Option<String>,
        /// The `SYSTEM` identifier literal, when present.
        system_id: Option<String>,
    },
    /// Terminal sentinel: the end of the subset was reached at
    /// conditional-section nesting depth zero.
    Eof,
}

/// A content-model quantifier suffix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quantifier {
    /// No suffix: exactly one.
    One,
    /// `?`
    ZeroOrOne,
    /// `*`
    ZeroOrMore,
    /// `+`
    OneOrMore,
}

/// An `<!ELEMENT>` content-model tree node.
#[derive(Debug, Clone, PartialEq)]
pub enum ContentSpec {
    /// `EMPTY`
    Empty,
    /// `ANY`
    Any,
    /// `(#PCDATA|a|b)*` or bare `(#PCDATA)`.
    Mixed {
        /// The element type names allowed to appear, in declaration order.
        names: Vec<String>,
        /// Always [`Quantifier::ZeroOrMore`] when `names` is non-empty,
        /// [`Quantifier::One`] for bare `(#PCDATA)`.
        quantifier: Quantifier,
    },
    /// A single element-type-name particle.
    Name {
        /// The element type name.
        name: String,
        /// The particle's quantifier suffix.
        quantifier: Quantifier,
    },
    /// A `,`-separated group: all children must appear in order.
    Sequence {
        /// The group's children, in order.
        children: Vec<ContentSpec>,
        /// The group's own quantifier suffix.
        quantifier: Quantifier,
    },
    /// A `|`-separated group: exactly one child may appear.
    Choice {
        /// The group's children, in order.
        children: Vec<ContentSpec>,
        /// The group's own quantifier suffix.
        quantifier: Quantifier,
    },
}

/// An attribute definition inside an `<!ATTLIST>` declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct AttrDecl {
    /// The attribute's name.
    pub name: String,
    /// The attribute's declared type.
    pub att_type: AttType,
    /// The attribute's default-value declaration.
    pub default: AttDefault,
}

/// An attribute's declared type.
#[derive(Debug, Clone, PartialEq)]
pub enum AttType {
    /// `CDATA`
    StringType,
    /// `ID`, `IDREF`, `IDREFS`, `ENTITY`, `ENTITIES`, `NMTOKEN`, `NMTOKENS`.
    Tokenized(TokenizedType),
    /// `(a|b|c)` or `NOTATION (a|b|c)`.
    Enumerated {
        /// `true` for `NOTATION (...)`, `false` for a bare enumeration.
        is_notation: bool,
        /// The allowed names/tokens, in declaration order.
        names: Vec<String>,
    },
}

/// The `TokenizedType` production.
#[allow(missing_docs)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenizedType {
    Id,
    IdRef,
    IdRefs,
    Entity,
    Entities,
    NmToken,
    NmTokens,
}

/// An attribute's default-value declaration.
#[derive(Debug, Clone, PartialEq)]
pub enum AttDefault {
    /// `#REQUIRED`
    Required,
    /// `#IMPLIED`
    Implied,
    /// A literal default value, optionally `#FIXED`.
    Custom {
        /// The default value literal.
        value: String,
        /// `true` when declared with `#FIXED`.
        is_fixed: bool,
    },
}
