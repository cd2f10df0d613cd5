use thiserror::Error;

/// Errors raised while reading an `osmChange` document.
///
/// Positions are byte offsets into the decompressed input.
#[derive(Debug, Error)]
pub enum ChangesetParseError {
    /// The XML itself is malformed.
    #[error("malformed XML near byte {position}")]
    Xml {
        /// Reader position when the error surfaced.
        position: u64,
        /// Error reported by the XML reader.
        #[source]
        source: quick_xml::Error,
    },
    /// An attribute could not be parsed or unescaped.
    #[error("malformed attribute on <{element}> near byte {position}")]
    Attribute {
        /// Local name of the element carrying the attribute.
        element: String,
        /// Reader position when the error surfaced.
        position: u64,
        /// Error reported by the XML reader.
        #[source]
        source: quick_xml::Error,
    },
    /// A closing tag had no matching open element.
    #[error("unexpected closing tag </{name}> near byte {position}")]
    UnexpectedEnd {
        /// Local name of the closing tag.
        name: String,
        /// Reader position when the tag was read.
        position: u64,
    },
    /// Input ended while an element was still open.
    #[error("input ended inside <{name}>")]
    Unclosed {
        /// Local name of the innermost open element.
        name: String,
    },
    /// An element started after the root element had already closed.
    #[error("extra root element <{name}> near byte {position}")]
    ExtraRoot {
        /// Local name of the second top-level element.
        name: String,
        /// Reader position when the element was read.
        position: u64,
    },
    /// Character data appeared outside the root element.
    #[error("text outside the root element near byte {position}")]
    TextOutsideRoot {
        /// Reader position when the text was read.
        position: u64,
    },
    /// The input held no root element.
    #[error("document has no root element")]
    EmptyDocument,
}
