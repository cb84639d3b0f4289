//! Serialization of the SAX event stream back to well-formed XML.

use std::{
    fmt::Write,
    sync::{Arc, Mutex},
};

use crate::sax::{
    Locator,
    attributes::Attribute,
    handler::{ContentHandler, LexicalHandler},
};

/// Write `data` to `f` with escaping the following characters.
///
/// - `'\r'` (13, 0x0D)
/// - `'"'`  (34, 0x22)
/// - `'&'`  (38, 0x26)
/// - `'''`  (39, 0x27)
/// - `'<'`  (60, 0x3C)
/// - `'>'`  (62, 0x3E)
pub(crate) fn write_escaped_char_data<'a>(
    f: &mut (impl Write + 'a),
    data: &str,
) -> std::fmt::Result {
    let mut next = 0;
    for (i, b) in data.bytes().enumerate() {
        if matches!(b, b'\r' | b'"' | b'&' | b'\'' | b'<' | b'>') {
            f.write_str(&data[next..i])?;
            f.write_str("&#")?;
            f.write_char((b / 10 + b'0') as char)?;
            f.write_char((b % 10 + b'0') as char)?;
            f.write_char(';')?;
            next = i + 1;
        }
    }
    if next < data.len() {
        f.write_str(&data[next..])?;
    }
    Ok(())
}

/// Write `value` to `f` quoted with `"`, escaping `'\r'`, `'&'`, `'<'`,
/// and the quote itself.
pub(crate) fn write_escaped_att_value<'a>(
    f: &mut (impl Write + 'a),
    value: &str,
) -> std::fmt::Result {
    f.write_char('"')?;
    let mut next = 0;
    for (i, b) in value.bytes().enumerate() {
        if matches!(b, b'\r' | b'&' | b'<' | b'"') {
            f.write_str(&value[next..i])?;
            f.write_str("&#")?;
            f.write_char((b / 10 + b'0') as char)?;
            f.write_char((b % 10 + b'0') as char)?;
            f.write_char(';')?;
            next = i + 1;
        }
    }
    if next < value.len() {
        f.write_str(&value[next..])?;
    }
    f.write_char('"')
}

#[derive(Default)]
struct WriterState {
    buffer: String,
    /// A start-tag has been written but not yet closed with `>`
    open: bool,
    pending_mappings: Vec<(String, String)>,
}

impl WriterState {
    fn close_open_tag(&mut self) {
        if self.open {
            self.buffer.push('>');
            self.open = false;
        }
    }
}

/// A [`ContentHandler`]/[`LexicalHandler`] sink that renders the event
/// stream as XML text.
///
/// Since the parser guarantees a well-formed event stream, the output is
/// always a well-formed XML document. No indentation is applied.
#[derive(Default)]
pub struct XmlWriter {
    state: Mutex<WriterState>,
}

impl XmlWriter {
    /// Take the serialized document, leaving the writer empty.
    pub fn take_result(&self) -> String {
        std::mem::take(&mut self.state.lock().unwrap().buffer)
    }
}

impl ContentHandler for XmlWriter {
    fn start_document(&self) {
        let mut state = self.state.lock().unwrap();
        *state = WriterState::default();
        state.buffer.push_str("<?xml version=\"1.0\"?>\n");
    }

    fn start_prefix_mapping(&self, prefix: &str, uri: &str) {
        let mut state = self.state.lock().unwrap();
        state
            .pending_mappings
            .push((prefix.to_owned(), uri.to_owned()));
    }

    fn start_element(&self, _uri: &str, _local_name: &str, qname: &str, atts: &[Attribute]) {
        let mut state = self.state.lock().unwrap();
        state.close_open_tag();
        let mappings = std::mem::take(&mut state.pending_mappings);
        let buffer = &mut state.buffer;
        buffer.push('<');
        buffer.push_str(qname);
        for (prefix, uri) in mappings {
            if prefix.is_empty() {
                write!(buffer, " xmlns=").ok();
            } else {
                write!(buffer, " xmlns:{prefix}=").ok();
            }
            write_escaped_att_value(buffer, &uri).ok();
        }
        for att in atts {
            write!(buffer, " {}=", att.qname).ok();
            write_escaped_att_value(buffer, &att.value).ok();
        }
        state.open = true;
    }

    fn end_element(&self, _uri: &str, _local_name: &str, qname: &str) {
        let mut state = self.state.lock().unwrap();
        if state.open {
            state.buffer.push_str("/>");
            state.open = false;
        } else {
            let buffer = &mut state.buffer;
            buffer.push_str("</");
            buffer.push_str(qname);
            buffer.push('>');
        }
    }

    fn characters(&self, data: &str) {
        let mut state = self.state.lock().unwrap();
        state.close_open_tag();
        write_escaped_char_data(&mut state.buffer, data).ok();
    }

    fn ignorable_whitespace(&self, data: &str) {
        let mut state = self.state.lock().unwrap();
        state.close_open_tag();
        state.buffer.push_str(data);
    }

    fn processing_instruction(&self, target: &str, data: &str) {
        let mut state = self.state.lock().unwrap();
        state.close_open_tag();
        write!(state.buffer, "<?{target} {data}?>").ok();
    }

    fn set_document_locator(&self, _locator: Arc<Locator>) {}
}

impl LexicalHandler for XmlWriter {
    fn comment(&self, data: &str) {
        let mut state = self.state.lock().unwrap();
        state.close_open_tag();
        write!(state.buffer, "<!--{data}-->").ok();
    }

    fn start_dtd(&self, name: &str, public_id: Option<&str>, system_id: Option<&str>) {
        let mut state = self.state.lock().unwrap();
        state.close_open_tag();
        let buffer = &mut state.buffer;
        write!(buffer, "<!DOCTYPE {name}").ok();
        match (public_id, system_id) {
            (Some(public_id), Some(system_id)) => {
                write!(buffer, " PUBLIC \"{public_id}\" \"{system_id}\"").ok();
            }
            (Some(public_id), None) => {
                write!(buffer, " PUBLIC \"{public_id}\"").ok();
            }
            (None, Some(system_id)) => {
                write!(buffer, " SYSTEM \"{system_id}\"").ok();
            }
            (None, None) => {}
        }
        buffer.push_str(">\n");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn char_data_escaping() {
        let mut out = String::new();
        write_escaped_char_data(&mut out, "a < b & c").unwrap();
        assert_eq!(out, "a &#60; b &#38; c");
    }

    #[test]
    fn att_value_escaping() {
        let mut out = String::new();
        write_escaped_att_value(&mut out, "say \"hi\" & go").unwrap();
        assert_eq!(out, "\"say &#34;hi&#34; &#38; go\"");
    }
}
