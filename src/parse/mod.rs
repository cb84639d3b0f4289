//! The tree-fixup driver.
//!
//! Translates the scanner's lexical events into SAX events, guided by the
//! schema: auto-opening required ancestors, auto-closing mismatched
//! elements, restarting formatting elements, and absorbing bogons. Every
//! anomaly in the input is repaired or dropped; nothing here reports a
//! parse error.

pub(crate) mod element;

use std::mem::take;

use log::debug;

use crate::{
    chars,
    parse::element::Element,
    sax::parser::{HTMLReader, ParserOption},
    scan::ScanHandler,
    schema::{F_CDATA, F_NOFORCE, F_RESTART, M_ANY, M_EMPTY, M_ROOT},
    uri,
};

/// Characters that may appear in a public identifier.
const LEGAL_PUBID: &str =
    "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789-'()+,./:=?;!*#@$_%";

impl ScanHandler for HTMLReader {
    fn adup(&mut self, _buf: &str) {
        if self.new_element.is_none() || self.attribute_name.is_empty() {
            return;
        }
        let name = take(&mut self.attribute_name);
        if let Some(e) = self.new_element.as_mut() {
            e.set_attribute(&name, None, &name);
        }
    }

    fn aname(&mut self, buf: &str) {
        if self.new_element.is_none() {
            return;
        }
        self.attribute_name = self.make_name(buf).to_lowercase();
    }

    fn aval(&mut self, buf: &str) {
        if self.new_element.is_none() || self.attribute_name.is_empty() {
            return;
        }
        let value = self.expand_entities(buf);
        let name = take(&mut self.attribute_name);
        if let Some(e) = self.new_element.as_mut() {
            e.set_attribute(&name, None, &value);
        }
    }

    fn cdsect(&mut self, buf: &str) {
        self.lexical_handler.start_cdata();
        self.pcdata(buf);
        self.lexical_handler.end_cdata();
    }

    fn cmnt(&mut self, buf: &str) {
        self.lexical_handler.comment(buf);
    }

    /// Parsing the complete document type declaration is way too complex,
    /// but for many simple cases something useful can be extracted.
    ///
    /// ```text
    /// doctypedecl ::= '<!DOCTYPE' S Name (S ExternalID)? S? ('[' intSubset ']' S?)? '>'
    /// ExternalID  ::= 'SYSTEM' S SystemLiteral | 'PUBLIC' S PubidLiteral S SystemLiteral
    /// ```
    fn decl(&mut self, buf: &str) {
        let v = split(buf);
        let mut name = String::new();
        let mut system_id = String::new();
        let mut public_id = String::new();
        if v.first().map(String::as_str) == Some("DOCTYPE") {
            if self.doctype_present {
                return; // one doctype only!
            }
            self.doctype_present = true;
            if v.len() > 1 {
                name = v[1].clone();
                if v.len() > 3 && v[2] == "SYSTEM" {
                    system_id = v[3].clone();
                } else if v.len() > 3 && v[2] == "PUBLIC" {
                    public_id = v[3].clone();
                    if v.len() > 4 {
                        system_id = v[4].clone();
                    }
                }
            }
        }
        let public_id = trim_quotes(&public_id);
        let system_id = trim_quotes(&system_id);
        if name.is_empty() {
            return;
        }
        let public_id = clean_public_id(public_id);
        self.lexical_handler
            .start_dtd(&name, opt(&public_id), opt(system_id));
        self.lexical_handler.end_dtd();
        self.doctype_name = name;
        self.doctype_public_id = public_id;
        // the system id is reported as written but stored resolved
        let base = self.locator.system_id();
        self.doctype_system_id = uri::resolve(&base, system_id);
    }

    fn entity(&mut self, buf: &str) {
        self.entity = self.lookup_entity(buf);
    }

    fn eof(&mut self, _buf: &str) {
        if self.virgin_stack {
            if let Some(pcdata) = self.pcdata_type.clone() {
                self.rectify(Element::new(pcdata, false));
            }
        }
        while self.stack.len() > 1 {
            self.pop();
        }
        if !self.schema.uri().is_empty() {
            self.content_handler.end_prefix_mapping(self.schema.prefix());
        }
        self.content_handler.end_document();
    }

    fn etag(&mut self, buf: &str) {
        if self.etag_cdata(buf) {
            return;
        }
        self.etag_basic(buf);
    }

    fn gi(&mut self, buf: &str) {
        if self.new_element.is_some() {
            return;
        }
        let name = self.make_name(buf);
        if name.is_empty() {
            return;
        }
        let etype = match self.schema.get_element_type(&name) {
            Some(etype) => etype,
            None => {
                // Suppress unknown elements if ignore-bogons is on
                if self.config.is_enable(ParserOption::IgnoreBogons) {
                    debug!("suppressing bogon element <{name}>");
                    return;
                }
                let bogon_model = if self.config.is_enable(ParserOption::BogonsEmpty) {
                    M_EMPTY
                } else {
                    M_ANY
                };
                let root_bogons = self.config.is_enable(ParserOption::RootBogons);
                let bogon_member_of = if root_bogons { M_ANY } else { M_ANY & !M_ROOT };
                debug!("synthesizing element type for bogon <{name}>");
                self.schema.element_type(&name, bogon_model, bogon_member_of, 0);
                if !root_bogons {
                    if let Some(root) = self.schema.root_element_type() {
                        let root_name = root.name().to_owned();
                        let _ = self.schema.parent(&name, &root_name);
                    }
                }
                match self.schema.get_element_type(&name) {
                    Some(etype) => etype,
                    None => return,
                }
            }
        };
        self.new_element = Some(Element::new(
            etype,
            self.config.is_enable(ParserOption::DefaultAttributes),
        ));
    }

    fn pcdata(&mut self, buf: &str) {
        if buf.is_empty() {
            return;
        }
        let Some(pcdata) = self.pcdata_type.clone() else {
            return;
        };
        let all_white = buf.chars().all(chars::is_space);
        let top_can = self
            .stack
            .last()
            .is_some_and(|top| top.etype().can_contain(&pcdata));
        if all_white && !top_can {
            if self.config.is_enable(ParserOption::IgnorableWhitespace) {
                self.content_handler.ignorable_whitespace(buf);
            }
        } else {
            self.rectify(Element::new(pcdata, false));
            self.content_handler.characters(buf);
        }
    }

    fn pi(&mut self, buf: &str) {
        if self.new_element.is_some() || self.pi_target.is_empty() {
            return;
        }
        if self.pi_target.to_lowercase() == "xml" {
            return;
        }
        let data = buf.strip_suffix('?').unwrap_or(buf);
        let target = take(&mut self.pi_target);
        self.content_handler.processing_instruction(&target, data);
    }

    fn pitarget(&mut self, buf: &str) {
        if self.new_element.is_some() {
            return;
        }
        self.pi_target = self.make_name(buf).replace(':', "_");
    }

    fn stagc(&mut self, buf: &str) {
        let Some(e) = self.new_element.take() else {
            return;
        };
        if let Some(e) = self.rectify(e) {
            self.new_element = Some(e);
            return;
        }
        if self.stack.last().is_some_and(|top| top.model() == M_EMPTY) {
            // Force an immediate end tag
            self.etag_basic(buf);
        }
    }

    fn stage(&mut self, buf: &str) {
        let Some(e) = self.new_element.take() else {
            return;
        };
        if let Some(e) = self.rectify(e) {
            self.new_element = Some(e);
            return;
        }
        // Force an immediate end tag
        self.etag_basic(buf);
    }

    fn get_entity(&self) -> u32 {
        self.entity
    }

    fn cdata_mode_requested(&mut self) -> bool {
        take(&mut self.cdata_request)
    }
}

impl HTMLReader {
    /// Expand entity references in attribute values selectively: a
    /// reference is expanded iff it is properly terminated with `;`.
    fn expand_entities(&self, src: &str) -> String {
        let mut dst = String::with_capacity(src.len());
        let mut ref_start: Option<usize> = None;
        for ch in src.chars() {
            dst.push(ch);
            match ref_start {
                None if ch == '&' => ref_start = Some(dst.len()),
                None => {}
                Some(_) if chars::is_letter_or_digit(ch) || ch == '#' => {}
                Some(start) if ch == ';' => {
                    // properly terminated reference
                    let ent = self.lookup_entity(&dst[start..dst.len() - 1]);
                    if let Some(c) = char::from_u32(ent).filter(|_| ent != 0) {
                        dst.truncate(start - 1);
                        dst.push(c);
                    }
                    ref_start = None;
                }
                Some(_) => ref_start = None, // improperly terminated
            }
        }
        dst
    }

    /// Resolve numeric character references here, deferring to the schema
    /// for named ones. Returns 0 for anything unresolvable.
    fn lookup_entity(&self, buf: &str) -> u32 {
        if buf.is_empty() {
            return 0;
        }
        if let Some(rest) = buf.strip_prefix('#') {
            return if let Some(hex) = rest.strip_prefix(['x', 'X']) {
                parse_int_prefix(hex, 16)
            } else {
                parse_int_prefix(rest, 10)
            };
        }
        self.schema.get_entity(buf).unwrap_or(0)
    }

    /// The end-tag of an open CDATA element must match its name exactly
    /// (case-insensitively); anything else is replayed as literal text and
    /// the scanner goes back to CDATA mode.
    fn etag_cdata(&mut self, buf: &str) -> bool {
        let Some(top) = self.stack.last() else {
            return false;
        };
        if !self.config.is_enable(ParserOption::CDATAElements) || top.flags() & F_CDATA == 0 {
            return false;
        }
        if buf.to_lowercase() == top.name().to_lowercase() {
            return false;
        }
        self.content_handler.characters(&format!("</{buf}>"));
        self.cdata_request = true;
        true
    }

    fn etag_basic(&mut self, buf: &str) {
        self.new_element = None;
        let name = if !buf.is_empty() {
            // Canonicalize case of name
            let name = self.make_name(buf);
            let Some(etype) = self.schema.get_element_type(&name) else {
                debug!("ignoring mysterious end-tag </{name}>");
                return;
            };
            etype.name().to_owned()
        } else {
            let Some(top) = self.stack.last() else {
                return;
            };
            top.name().to_owned()
        };

        let mut target = None;
        let mut in_noforce = false;
        for i in (0..self.stack.len()).rev() {
            if self.stack[i].name() == name {
                target = Some(i);
                break;
            }
            if self.stack[i].flags() & F_NOFORCE != 0 {
                in_noforce = true;
            }
        }
        let Some(target) = target else {
            return; // ignore unknown etags
        };
        // never force-close the sentinel or the document element
        if target < 2 {
            return;
        }

        if in_noforce {
            // inside a no-force-close element: just mark end-of-life
            self.stack[target].preclose();
        } else {
            // restartably pop everything above the target
            while self.stack.len() - 1 > target {
                self.restartably_pop();
            }
            self.pop();
        }
        // pop any preclosed elements now at the top
        while self.stack.last().is_some_and(|e| e.is_preclosed()) {
            self.pop();
        }
        self.restart(None);
    }

    /// Adjust the stack so that `e` can be safely pushed: find a stack
    /// entry that can contain it, ascending through natural parents as
    /// needed, restartably pop down to it, then push the constructed chain.
    ///
    /// If no ancestor chain leads to a container, the element is handed
    /// back to the caller and nothing is emitted.
    fn rectify(&mut self, e: Element) -> Option<Element> {
        let default_attributes = self.config.is_enable(ParserOption::DefaultAttributes);
        let mut chain = vec![e];
        let mut found = None;
        loop {
            if let Some(i) = (0..self.stack.len())
                .rev()
                .find(|&i| self.stack[i].can_contain(&chain[0]))
            {
                found = Some(i);
                break;
            }
            let parent = chain[0]
                .parent_name()
                .and_then(|name| self.schema.get_element_type(name));
            match parent {
                Some(parent) => chain.insert(0, Element::new(parent, default_attributes)),
                None => break,
            }
        }
        let Some(found) = found else {
            if let Some(last) = chain.last() {
                debug!("dropping <{}>: no ancestor chain leads to a container", last.name());
            }
            return chain.pop();
        };

        while self.stack.len() - 1 != found {
            if self.stack.len() <= 2 {
                break;
            }
            self.restartably_pop();
        }

        let mut iter = chain.into_iter().peekable();
        while let Some(el) = iter.next() {
            if el.name() != "<pcdata>" {
                self.push(el);
            }
            self.restart(iter.peek());
        }
        self.new_element = None;
        None
    }

    /// Reopen saved restartable elements while they fit between the stack
    /// top and `e`, the element about to be started (if known).
    fn restart(&mut self, e: Option<&Element>) {
        loop {
            let fits = match (self.saved.front(), self.stack.last()) {
                (Some(head), Some(top)) => {
                    top.can_contain(head) && e.is_none_or(|e| head.can_contain(e))
                }
                _ => false,
            };
            if !fits {
                return;
            }
            let Some(head) = self.saved.pop_front() else {
                return;
            };
            self.push(head);
        }
    }

    /// Push an element, emitting `startElement` and any foreign prefix
    /// mappings it introduces.
    fn push(&mut self, mut e: Element) {
        e.clean();
        let namespaces = self.config.is_enable(ParserOption::Namespaces);
        if self.virgin_stack
            && !self.doctype_name.is_empty()
            && e.local_name().to_lowercase() == self.doctype_name.to_lowercase()
        {
            let _ = self
                .entity_resolver
                .resolve_entity(opt(&self.doctype_public_id), &self.doctype_system_id);
        }

        let prefix = prefix_of(e.name());
        let (namespace, local_name) = if namespaces {
            (e.namespace_name(), e.local_name())
        } else {
            ("", "")
        };
        if foreign(prefix, namespace, self.schema.uri()) {
            self.content_handler.start_prefix_mapping(prefix, namespace);
        }
        for att in e.atts() {
            let att_prefix = prefix_of(&att.qname);
            if foreign(att_prefix, &att.uri, self.schema.uri()) {
                self.content_handler.start_prefix_mapping(att_prefix, &att.uri);
            }
        }
        self.content_handler
            .start_element(namespace, local_name, e.name(), e.atts().as_slice());

        let cdata = e.flags() & F_CDATA != 0;
        self.stack.push(e);
        self.virgin_stack = false;
        if self.config.is_enable(ParserOption::CDATAElements) && cdata {
            self.cdata_request = true;
        }
    }

    /// Pop the stack irrevocably, emitting `endElement` and closing any
    /// foreign prefix mappings in reverse order.
    fn pop(&mut self) -> Option<Element> {
        let e = self.stack.pop()?;
        let namespaces = self.config.is_enable(ParserOption::Namespaces);
        let prefix = prefix_of(e.name());
        let (namespace, local_name) = if namespaces {
            (e.namespace_name(), e.local_name())
        } else {
            ("", "")
        };
        self.content_handler.end_element(namespace, local_name, e.name());
        if foreign(prefix, namespace, self.schema.uri()) {
            self.content_handler.end_prefix_mapping(prefix);
        }
        for att in e.atts().iter().rev() {
            let att_prefix = prefix_of(&att.qname);
            if foreign(att_prefix, &att.uri, self.schema.uri()) {
                self.content_handler.end_prefix_mapping(att_prefix);
            }
        }
        Some(e)
    }

    /// Pop the stack restartably: a popped element with the restart flag
    /// is anonymized and queued for reopening.
    fn restartably_pop(&mut self) {
        let Some(mut popped) = self.pop() else {
            return;
        };
        if self.config.is_enable(ParserOption::RestartElements) && popped.flags() & F_RESTART != 0 {
            popped.anonymize();
            self.saved.push_front(popped);
        }
    }

    /// Return the argument as a valid XML name: letters, digits, hyphens,
    /// dots, underscores, and at most one colon.
    fn make_name(&self, buf: &str) -> String {
        let translate_colons = self.config.is_enable(ParserOption::TranslateColons);
        let mut dst = String::with_capacity(buf.len());
        let mut seen_colon = false;
        let mut start = true;
        for ch in buf.chars() {
            if chars::is_letter(ch) || ch == '_' {
                start = false;
                dst.push(ch);
            } else if chars::is_digit(ch) || ch == '-' || ch == '.' {
                if start {
                    dst.push('_');
                }
                start = false;
                dst.push(ch);
            } else if ch == ':' && !seen_colon {
                seen_colon = true;
                if start {
                    dst.push('_');
                }
                start = true;
                dst.push(if translate_colons { '_' } else { ':' });
            }
        }
        if dst.is_empty() || dst.ends_with(':') {
            dst.push('_');
        }
        dst
    }
}

/// Get the prefix from a QName.
fn prefix_of(name: &str) -> &str {
    match name.split_once(':') {
        Some((prefix, _)) => prefix,
        None => "",
    }
}

/// A name is foreign when it carries a prefix and a namespace other than
/// the schema's own.
fn foreign(prefix: &str, namespace: &str, schema_uri: &str) -> bool {
    !(prefix.is_empty() || namespace.is_empty() || namespace == schema_uri)
}

fn opt(s: &str) -> Option<&str> {
    (!s.is_empty()).then_some(s)
}

/// Parse a leading run of digits in `radix`, ignoring trailing junk.
fn parse_int_prefix(s: &str, radix: u32) -> u32 {
    let mut value: u32 = 0;
    let mut any = false;
    for c in s.chars() {
        match c.to_digit(radix) {
            Some(d) => {
                any = true;
                value = value.saturating_mul(radix).saturating_add(d);
            }
            None => break,
        }
    }
    if any { value } else { 0 }
}

/// If the string is quoted, trim the quotes.
fn trim_quotes(s: &str) -> &str {
    let mut chars = s.chars();
    match (chars.next(), chars.next_back()) {
        (Some(first), Some(last)) if first == last && matches!(first, '\'' | '"') => {
            &s[1..s.len() - 1]
        }
        _ => s,
    }
}

/// Split the declaration into words or phrases separated by spaces,
/// keeping quoted phrases (and their quotes) intact.
fn split(val: &str) -> Vec<String> {
    let v = chars::normalize_whitespace(val);
    let mut out = vec![];
    let mut current = String::new();
    let (mut sq, mut dq) = (false, false);
    let mut last = '\0';
    for c in v.chars() {
        match c {
            '\'' if !dq && last != '\\' => {
                sq = !sq;
                current.push(c);
            }
            '"' if !sq && last != '\\' => {
                dq = !dq;
                current.push(c);
            }
            c if chars::is_space(c) && !sq && !dq => {
                if !current.is_empty() {
                    out.push(take(&mut current));
                }
            }
            c => current.push(c),
        }
        last = c;
    }
    if !current.is_empty() {
        out.push(current);
    }
    out
}

/// Replace junk in public identifiers with single spaces.
fn clean_public_id(src: &str) -> String {
    let mut dst = String::with_capacity(src.len());
    let mut suppress_space = true;
    for c in src.chars() {
        if LEGAL_PUBID.contains(c) {
            // legal but not whitespace
            dst.push(c);
            suppress_space = false;
        } else if suppress_space {
            // normalizable whitespace or junk
        } else {
            dst.push(' ');
            suppress_space = true;
        }
    }
    dst
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn doctype_splitting() {
        let v = split("DOCTYPE html PUBLIC \"-//W3C//DTD XHTML 1.0 Strict//EN\" \"xhtml1-strict.dtd\"");
        assert_eq!(
            v,
            [
                "DOCTYPE",
                "html",
                "PUBLIC",
                "\"-//W3C//DTD XHTML 1.0 Strict//EN\"",
                "\"xhtml1-strict.dtd\"",
            ]
        );
        assert_eq!(trim_quotes("\"abc\""), "abc");
        assert_eq!(trim_quotes("'abc'"), "abc");
        assert_eq!(trim_quotes("\"abc'"), "\"abc'");
        assert_eq!(trim_quotes(""), "");
    }

    #[test]
    fn public_id_cleaning() {
        assert_eq!(
            clean_public_id("-//W3C//DTD\u{2028}XHTML 1.0//EN"),
            "-//W3C//DTD XHTML 1.0//EN"
        );
        assert_eq!(clean_public_id("  x  "), "x ");
    }

    #[test]
    fn numeric_prefix_parsing() {
        assert_eq!(parse_int_prefix("38", 10), 38);
        assert_eq!(parse_int_prefix("26", 16), 0x26);
        assert_eq!(parse_int_prefix("38abc", 10), 38);
        assert_eq!(parse_int_prefix("", 10), 0);
        assert_eq!(parse_int_prefix("zz", 16), 0);
    }
}
