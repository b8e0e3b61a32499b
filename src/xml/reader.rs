//! Attribute and child accessors over roxmltree nodes

use roxmltree::Node;

use crate::xml::errors::SchemaError;

/// Report a problem with `node` on the schema-error channel
pub fn schema_error(node: Node, message: impl Into<String>) -> SchemaError {
    let pos = node.document().text_pos_at(node.range().start);
    let error = SchemaError {
        tag: node.tag_name().name().to_string(),
        message: message.into(),
        line: pos.row,
        column: pos.col,
    };
    log::warn!("{}", error);
    error
}

/// Report an element that is not expected at this point of the document
pub fn dom_error(node: Node) -> SchemaError {
    schema_error(node, "unknown element")
}

/// Child elements of `node`, in document order
pub fn child_elements<'a, 'input>(
    node: Node<'a, 'input>,
) -> impl Iterator<Item = Node<'a, 'input>> {
    node.children().filter(|n| n.is_element())
}

/// Get first child element with given tag name
pub fn get_child<'a, 'input>(node: Node<'a, 'input>, tag: &str) -> Option<Node<'a, 'input>> {
    child_elements(node).find(|n| n.tag_name().name() == tag)
}

/// Integer attribute, `Ok(None)` when absent
pub fn int_attribute(node: Node, name: &str) -> Result<Option<i32>, SchemaError> {
    match node.attribute(name) {
        None => Ok(None),
        Some(value) => value.trim().parse::<i32>().map(Some).map_err(|_| {
            schema_error(node, format!("attribute {}=\"{}\" is not an integer", name, value))
        }),
    }
}

/// Integer text content of the first child named `tag`, `Ok(None)` when absent
pub fn int_child_text(node: Node, tag: &str) -> Result<Option<i32>, SchemaError> {
    let Some(child) = get_child(node, tag) else {
        return Ok(None);
    };
    let text = child.text().unwrap_or("").trim();
    text.parse::<i32>()
        .map(Some)
        .map_err(|_| schema_error(child, format!("\"{}\" is not an integer", text)))
}
