use std::{
    io::Read,
    sync::{Arc, Mutex},
};

use crate::sax::{Locator, attributes::Attribute, error::SAXParseError};

pub trait ContentHandler {
    fn characters(&self, data: &str) {
        let _ = data;
    }

    fn ignorable_whitespace(&self, data: &str) {
        let _ = data;
    }

    fn processing_instruction(&self, target: &str, data: &str) {
        let _ = (target, data);
    }

    fn set_document_locator(&self, locator: Arc<Locator>) {
        let _ = locator;
    }

    fn start_document(&self) {}
    fn end_document(&self) {}

    /// Report the start of an element.
    ///
    /// When namespace reporting is disabled, `uri` and `local_name` are
    /// empty and only `qname` is meaningful.
    fn start_element(&self, uri: &str, local_name: &str, qname: &str, atts: &[Attribute]) {
        let _ = (uri, local_name, qname, atts);
    }
    fn end_element(&self, uri: &str, local_name: &str, qname: &str) {
        let _ = (uri, local_name, qname);
    }

    fn start_prefix_mapping(&self, prefix: &str, uri: &str) {
        let _ = (prefix, uri);
    }
    fn end_prefix_mapping(&self, prefix: &str) {
        let _ = prefix;
    }
}

pub trait LexicalHandler {
    fn comment(&self, data: &str) {
        let _ = data;
    }

    fn start_cdata(&self) {}
    fn end_cdata(&self) {}

    fn start_dtd(&self, name: &str, public_id: Option<&str>, system_id: Option<&str>) {
        let _ = (name, public_id, system_id);
    }
    fn end_dtd(&self) {}
}

pub trait ErrorHandler {
    fn error(&self, error: SAXParseError) {
        let _ = error;
    }

    fn fatal_error(&self, error: SAXParseError) {
        let _ = error;
    }

    fn warning(&self, error: SAXParseError) {
        let _ = error;
    }
}

pub trait EntityResolver {
    /// Resolve an external entity.
    ///
    /// The parser never reads external entities itself; it pings the
    /// resolver once when the document element matches the DOCTYPE name,
    /// for hosts that key caches or catalogs off that event. Returning
    /// `None` is always acceptable.
    fn resolve_entity(&self, public_id: Option<&str>, system_id: &str) -> Option<Box<dyn Read>> {
        let _ = (public_id, system_id);
        None
    }
}

pub struct DefaultHTMLHandler;

impl ContentHandler for DefaultHTMLHandler {}
impl LexicalHandler for DefaultHTMLHandler {}
impl EntityResolver for DefaultHTMLHandler {}
impl ErrorHandler for DefaultHTMLHandler {
    fn error(&self, error: SAXParseError) {
        eprintln!("{error}")
    }

    fn fatal_error(&self, error: SAXParseError) {
        eprintln!("{error}")
    }

    fn warning(&self, error: SAXParseError) {
        eprintln!("{error}")
    }
}

/// Records every event as one line of text.
///
/// Useful for debugging and for asserting on exact event sequences in
/// tests; `htmlprocess --sax` prints this buffer.
#[derive(Default)]
pub struct DebugHandler {
    buffer: Mutex<String>,
}

impl DebugHandler {
    fn push(&self, line: String) {
        let mut buffer = self.buffer.lock().unwrap();
        buffer.push_str(&line);
        buffer.push('\n');
    }

    /// Take the accumulated event log, leaving the buffer empty.
    pub fn take_buffer(&self) -> String {
        std::mem::take(&mut self.buffer.lock().unwrap())
    }
}

impl ContentHandler for DebugHandler {
    fn characters(&self, data: &str) {
        self.push(format!("characters(\"{data}\")"));
    }

    fn ignorable_whitespace(&self, data: &str) {
        self.push(format!("ignorableWhitespace(\"{data}\")"));
    }

    fn processing_instruction(&self, target: &str, data: &str) {
        self.push(format!("processingInstruction({target}, {data})"));
    }

    fn start_document(&self) {
        self.push("startDocument()".into());
    }

    fn end_document(&self) {
        self.push("endDocument()".into());
    }

    fn start_element(&self, uri: &str, local_name: &str, qname: &str, atts: &[Attribute]) {
        let mut line = format!("startElement({uri}, {local_name}, {qname}");
        for att in atts {
            line.push_str(&format!(", {}=\"{}\"", att.qname, att.value));
        }
        line.push(')');
        self.push(line);
    }

    fn end_element(&self, uri: &str, local_name: &str, qname: &str) {
        self.push(format!("endElement({uri}, {local_name}, {qname})"));
    }

    fn start_prefix_mapping(&self, prefix: &str, uri: &str) {
        self.push(format!("startPrefixMapping({prefix}={uri})"));
    }

    fn end_prefix_mapping(&self, prefix: &str) {
        self.push(format!("endPrefixMapping({prefix})"));
    }
}

impl LexicalHandler for DebugHandler {
    fn comment(&self, data: &str) {
        self.push(format!("comment(\"{data}\")"));
    }

    fn start_cdata(&self) {
        self.push("startCDATA()".into());
    }

    fn end_cdata(&self) {
        self.push("endCDATA()".into());
    }

    fn start_dtd(&self, name: &str, public_id: Option<&str>, system_id: Option<&str>) {
        self.push(format!(
            "startDTD({name}, {}, {})",
            public_id.unwrap_or("None"),
            system_id.unwrap_or("None")
        ));
    }

    fn end_dtd(&self) {
        self.push("endDTD()".into());
    }
}

impl EntityResolver for DebugHandler {
    fn resolve_entity(&self, public_id: Option<&str>, system_id: &str) -> Option<Box<dyn Read>> {
        self.push(format!(
            "resolveEntity({}, {system_id})",
            public_id.unwrap_or("None")
        ));
        None
    }
}

impl ErrorHandler for DebugHandler {
    fn error(&self, error: SAXParseError) {
        self.push(format!("error({})", error.message));
    }

    fn fatal_error(&self, error: SAXParseError) {
        self.push(format!("fatalError({})", error.message));
    }

    fn warning(&self, error: SAXParseError) {
        self.push(format!("warning({})", error.message));
    }
}
