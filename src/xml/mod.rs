//! Structured document support: writing elements, reading attributes,
//! reporting schema errors and converting persisted ticks.

pub mod errors;
pub mod legacy;
pub mod reader;
pub mod time_base;
pub mod writer;

pub use errors::{Result, SchemaError, XmlError};
pub use time_base::{FileDivision, SameDivision, TimeBase, DIVISION};
pub use writer::XmlWriter;
