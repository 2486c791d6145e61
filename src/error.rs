//! Error types for the converter.
//!
//! Every failure is terminal for a single conversion: nothing is retried and
//! no partially assembled document is ever returned.

/// Result type alias for converter operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while preparing text, assembling or checking a PDF.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// IO error (unreadable input, failed output write)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A character has no representation in the single-byte output encoding
    #[error("Cannot encode {character:?} in Latin-1 at line {line}, column {column}")]
    Encoding {
        /// The offending character
        character: char,
        /// 1-based index into the prepared line list
        line: usize,
        /// 1-based character column within that line
        column: usize,
    },

    /// Layout configuration that cannot produce a document
    #[error("Invalid configuration: {0}")]
    Configuration(String),

    /// Two objects were assigned the same id
    #[error("Duplicate object id: {0}")]
    DuplicateObject(u32),

    /// An object body references an id that is not in the document
    #[error("Object {from} references missing object {to} 0 R")]
    DanglingReference {
        /// Id of the referencing object
        from: u32,
        /// Id that was referenced
        to: u32,
    },

    /// A reference resolves, but to an object of the wrong role
    #[error("Object {from} /{key} points at object {to}, which is not a {expected}")]
    WrongTarget {
        /// Id of the referencing object
        from: u32,
        /// Dictionary key holding the reference
        key: String,
        /// Id that was referenced
        to: u32,
        /// Role the key requires
        expected: String,
    },

    /// Cross-reference table is missing or malformed
    #[error("Invalid cross-reference table: {0}")]
    InvalidXref(String),

    /// Parse error at specific byte offset
    #[error("Failed to parse at byte {offset}: {reason}")]
    ParseError {
        /// Byte offset where error occurred
        offset: usize,
        /// Reason for parse failure
        reason: String,
    },
}
