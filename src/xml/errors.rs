//! Error types for key list documents
//!
//! `XmlError` stops a read; `SchemaError` is reported and the offending
//! element is skipped.

use thiserror::Error;

/// Fatal document errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum XmlError {
    /// XML is malformed (not well-formed)
    #[error("Invalid XML: {0}")]
    InvalidXml(String),

    /// Container element has the wrong tag
    #[error("Expected <{expected}>, found <{found}>")]
    UnexpectedElement { expected: String, found: String },
}

pub type Result<T> = std::result::Result<T, XmlError>;

/// Non-fatal problem with one element
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("line {line}, column {column}: <{tag}>: {message}")]
pub struct SchemaError {
    pub tag: String,
    pub message: String,
    pub line: u32,
    pub column: u32,
}
