use std::{mem::take, sync::Arc};

use anyhtml::{
    sax::{Locator, source::InputSource},
    scan::{HTMLScanner, ScanHandler},
};

/// Records every lexical event; resolves a couple of entities so the
/// scanner's terminate/unget paths can be exercised without a schema.
#[derive(Default)]
struct Recorder {
    events: Vec<String>,
    entity: u32,
    gi_was_cdata_element: bool,
    pending_cdata: bool,
    locator: Option<Arc<Locator>>,
    gi_position: Option<(usize, usize)>,
}

impl Recorder {
    fn push(&mut self, name: &str, buf: &str) {
        self.events.push(format!("{name}({buf})"));
    }
}

impl ScanHandler for Recorder {
    fn adup(&mut self, buf: &str) {
        self.push("adup", buf);
    }
    fn aname(&mut self, buf: &str) {
        self.push("aname", buf);
    }
    fn aval(&mut self, buf: &str) {
        self.push("aval", buf);
    }
    fn cdsect(&mut self, buf: &str) {
        self.push("cdsect", buf);
    }
    fn cmnt(&mut self, buf: &str) {
        self.push("cmnt", buf);
    }
    fn decl(&mut self, buf: &str) {
        self.push("decl", buf);
    }
    fn entity(&mut self, buf: &str) {
        self.push("entity", buf);
        self.entity = match buf {
            "amp" => 38,
            "lt" => 60,
            _ => buf
                .strip_prefix('#')
                .and_then(|d| d.parse().ok())
                .unwrap_or(0),
        };
    }
    fn eof(&mut self, buf: &str) {
        self.push("eof", buf);
    }
    fn etag(&mut self, buf: &str) {
        self.push("etag", buf);
    }
    fn gi(&mut self, buf: &str) {
        self.push("gi", buf);
        self.gi_was_cdata_element = buf.eq_ignore_ascii_case("script");
        if let Some(locator) = &self.locator {
            self.gi_position = Some((locator.line(), locator.column()));
        }
    }
    fn pcdata(&mut self, buf: &str) {
        self.push("pcdata", buf);
    }
    fn pi(&mut self, buf: &str) {
        self.push("pi", buf);
    }
    fn pitarget(&mut self, buf: &str) {
        self.push("pitarget", buf);
    }
    fn stagc(&mut self, buf: &str) {
        self.push("stagc", buf);
        if self.gi_was_cdata_element {
            self.pending_cdata = true;
        }
    }
    fn stage(&mut self, buf: &str) {
        self.push("stage", buf);
    }
    fn get_entity(&self) -> u32 {
        self.entity
    }
    fn cdata_mode_requested(&mut self) -> bool {
        take(&mut self.pending_cdata)
    }
}

fn scan(input: &str) -> (Vec<String>, Option<(usize, usize)>) {
    let locator = Arc::new(Locator::default());
    let mut scanner = HTMLScanner::new(locator.clone());
    let mut source = InputSource::from_content(input);
    let mut recorder = Recorder {
        locator: Some(locator),
        ..Default::default()
    };
    scanner.scan(&mut source, &mut recorder).unwrap();
    (recorder.events, recorder.gi_position)
}

#[test]
fn start_tag_with_attributes() {
    let (events, _) = scan("<a href=\"x\" disabled>text</a>");
    assert_eq!(
        events,
        [
            "pcdata()",
            "gi(a)",
            "aname(href)",
            "aval(x)",
            "aname(disabled)",
            "adup()",
            "stagc()",
            "pcdata(text)",
            "etag(a)",
            "pcdata()",
            "eof()",
        ]
    );
}

#[test]
fn empty_tag_syntax() {
    let (events, _) = scan("<br/>");
    assert_eq!(events, ["pcdata()", "gi(br)", "stage()", "pcdata()", "eof()"]);
}

#[test]
fn comment_keeps_inner_dashes() {
    let (events, _) = scan("<!--a-b-->");
    assert_eq!(events, ["pcdata()", "cmnt(a-b)", "pcdata()", "eof()"]);
}

#[test]
fn declaration_and_pi() {
    let (events, _) = scan("<!DOCTYPE html><?target data?>");
    assert_eq!(
        events,
        [
            "pcdata()",
            "decl(DOCTYPE html)",
            "pcdata()",
            "pitarget(target)",
            "pi(data?)",
            "pcdata()",
            "eof()",
        ]
    );
}

#[test]
fn terminated_entity_is_resolved() {
    let (events, _) = scan("&lt;x");
    assert_eq!(
        events,
        ["pcdata()", "entity(lt)", "pcdata(<x)", "eof()"]
    );
}

#[test]
fn unknown_entity_stays_literal() {
    let (events, _) = scan("&zork;!");
    assert_eq!(
        events,
        ["pcdata()", "entity(zork)", "pcdata(&zork;!)", "eof()"]
    );
}

#[test]
fn cdata_mode_only_ends_at_etag() {
    let (events, _) = scan("<script>a<b</script>x");
    assert_eq!(
        events,
        [
            "pcdata()",
            "gi(script)",
            "stagc()",
            "pcdata(a<b)",
            "etag(script)",
            "pcdata(x)",
            "eof()",
        ]
    );
}

#[test]
fn cdata_section_content_is_reported_raw() {
    let (events, _) = scan("<![CDATA[x<y]]>");
    assert_eq!(events, ["pcdata()", "cdsect(x<y)", "pcdata()", "eof()"]);
}

#[test]
fn unterminated_tag_falls_back_to_text() {
    let (events, _) = scan("a< b");
    assert_eq!(events, ["pcdata(a)", "pcdata(< b)", "eof()"]);
}

#[test]
fn locator_marks_token_starts() {
    // the mark at `<` is still current when the tag name is reported
    let (_, position) = scan("ab\ncd<p>");
    assert_eq!(position, Some((2, 3)));
}
