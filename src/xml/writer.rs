//! Indented element writer for key list documents

use std::fmt::{self, Write};

/// Builds an XML fragment one element at a time
#[derive(Debug, Default)]
pub struct XmlWriter {
    buffer: String,
    stack: Vec<String>,
}

impl XmlWriter {
    pub fn new() -> Self {
        Self::default()
    }

    fn indent(&mut self) {
        for _ in 0..self.stack.len() {
            self.buffer.push_str("  ");
        }
    }

    fn attributes(&mut self, attrs: &[(&str, &dyn fmt::Display)]) {
        for (name, value) in attrs {
            // writing into a String cannot fail
            let _ = write!(self.buffer, " {}=\"{}\"", name, xml_escape(&value.to_string()));
        }
    }

    /// Open a container element
    pub fn stag(&mut self, name: &str) {
        self.stag_with(name, &[]);
    }

    /// Open a container element with attributes
    pub fn stag_with(&mut self, name: &str, attrs: &[(&str, &dyn fmt::Display)]) {
        self.indent();
        self.buffer.push('<');
        self.buffer.push_str(name);
        self.attributes(attrs);
        self.buffer.push_str(">\n");
        self.stack.push(name.to_string());
    }

    /// Close the innermost open container
    pub fn etag(&mut self) {
        if let Some(name) = self.stack.pop() {
            self.indent();
            let _ = writeln!(self.buffer, "</{}>", name);
        }
    }

    /// Write an empty element
    pub fn tag_e(&mut self, name: &str, attrs: &[(&str, &dyn fmt::Display)]) {
        self.indent();
        self.buffer.push('<');
        self.buffer.push_str(name);
        self.attributes(attrs);
        self.buffer.push_str("/>\n");
    }

    /// Write an element holding text
    pub fn tag_text(&mut self, name: &str, text: &dyn fmt::Display) {
        self.indent();
        let _ = writeln!(self.buffer, "<{0}>{1}</{0}>", name, xml_escape(&text.to_string()));
    }

    /// Close any open containers and return the document text
    pub fn finish(mut self) -> String {
        while !self.stack.is_empty() {
            self.etag();
        }
        self.buffer
    }
}

/// Escape special XML characters
fn xml_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
