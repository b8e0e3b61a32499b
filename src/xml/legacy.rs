//! Key signatures stored by the previous file format
//!
//! Old files carry a `<KeySig>` element whose `<subtype>` child holds the
//! whole key signature packed into one integer.

use roxmltree::Node;

use crate::models::KeySigEvent;
use crate::xml::errors::SchemaError;
use crate::xml::reader::{int_child_text, schema_error};

/// Read a legacy `<KeySig>` element
pub fn read_key_sig(node: Node) -> Result<KeySigEvent, SchemaError> {
    match int_child_text(node, "subtype")? {
        Some(subtype) => Ok(KeySigEvent::from_subtype(subtype)),
        None => Err(schema_error(node, "missing <subtype>")),
    }
}
