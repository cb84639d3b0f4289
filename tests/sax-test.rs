use std::sync::Arc;

use anyhtml::{
    XHTML_NAMESPACE,
    sax::{
        handler::DebugHandler,
        parser::{HTMLReaderBuilder, IGNORE_BOGONS_FEATURE, ParserOption},
    },
    save::XmlWriter,
};

fn events(html: &str) -> String {
    events_with(html, |builder| builder)
}

fn events_with(
    html: &str,
    configure: impl FnOnce(HTMLReaderBuilder) -> HTMLReaderBuilder,
) -> String {
    let handler = Arc::new(DebugHandler::default());
    let builder = configure(HTMLReaderBuilder::new().set_handler(handler.clone()));
    let mut reader = builder.build();
    reader.parse_str(html, None).unwrap();
    handler.take_buffer()
}

fn expected(body: &[&str]) -> String {
    let mut lines = vec![
        "startDocument()".to_owned(),
        format!("startPrefixMapping(html={XHTML_NAMESPACE})"),
    ];
    lines.extend(body.iter().map(|s| s.to_string()));
    lines.push("endPrefixMapping(html)".to_owned());
    lines.push("endDocument()".to_owned());
    lines.join("\n") + "\n"
}

fn start(qname: &str) -> String {
    format!("startElement({XHTML_NAMESPACE}, {qname}, {qname})")
}

fn end(qname: &str) -> String {
    format!("endElement({XHTML_NAMESPACE}, {qname}, {qname})")
}

#[test]
fn sense_test() {
    assert_eq!(
        events("<html><body>woo!<br></body></html>"),
        expected(&[
            &start("html"),
            &start("body"),
            "characters(\"woo!\")",
            &format!("startElement({XHTML_NAMESPACE}, br, br, clear=\"none\")"),
            &end("br"),
            &end("body"),
            &end("html"),
        ])
    );
}

#[test]
fn unicode_content_is_untouched() {
    assert_eq!(
        events("<html><body>收藏品</body></html>"),
        expected(&[
            &start("html"),
            &start("body"),
            "characters(\"收藏品\")",
            &end("body"),
            &end("html"),
        ])
    );
}

#[test]
fn paragraphs_close_each_other() {
    assert_eq!(
        events("<p>one<p>two"),
        expected(&[
            &start("html"),
            &start("body"),
            &start("p"),
            "characters(\"one\")",
            &end("p"),
            &start("p"),
            "characters(\"two\")",
            &end("p"),
            &end("body"),
            &end("html"),
        ])
    );
}

#[test]
fn formatting_elements_restart() {
    assert_eq!(
        events("<b><i>x</b>y"),
        expected(&[
            &start("html"),
            &start("body"),
            &start("b"),
            &start("i"),
            "characters(\"x\")",
            &end("i"),
            &end("b"),
            &start("i"),
            "characters(\"y\")",
            &end("i"),
            &end("body"),
            &end("html"),
        ])
    );
}

#[test]
fn missing_table_scaffolding_is_inserted() {
    assert_eq!(
        events("<table><tr><td>cell"),
        expected(&[
            &start("html"),
            &start("body"),
            &start("table"),
            &start("tr"),
            &format!("startElement({XHTML_NAMESPACE}, td, td, colspan=\"1\", rowspan=\"1\")"),
            "characters(\"cell\")",
            &end("td"),
            &end("tr"),
            &end("table"),
            &end("body"),
            &end("html"),
        ])
    );
}

#[test]
fn script_content_is_cdata() {
    assert_eq!(
        events("<script>if (a<b) foo();</script>"),
        expected(&[
            &start("html"),
            &start("head"),
            &start("script"),
            "characters(\"if (a<b) foo();\")",
            &end("script"),
            &end("head"),
            &end("html"),
        ])
    );
}

#[test]
fn mismatched_end_tag_in_cdata_element_is_text() {
    assert_eq!(
        events("<script>a</scr>b</script>"),
        expected(&[
            &start("html"),
            &start("head"),
            &start("script"),
            "characters(\"a\")",
            "characters(\"</scr>\")",
            "characters(\"b\")",
            &end("script"),
            &end("head"),
            &end("html"),
        ])
    );
}

#[test]
fn empty_input_still_produces_a_document() {
    assert_eq!(
        events(""),
        expected(&[&start("html"), &start("body"), &end("body"), &end("html")])
    );
}

#[test]
fn lone_less_than_is_text() {
    assert_eq!(
        events("<"),
        expected(&[
            &start("html"),
            &start("body"),
            "characters(\"<\")",
            &end("body"),
            &end("html"),
        ])
    );
}

#[test]
fn unterminated_entity_at_eof() {
    assert_eq!(
        events("x&amp"),
        expected(&[
            &start("html"),
            &start("body"),
            "characters(\"x\")",
            "characters(\"&\")",
            &end("body"),
            &end("html"),
        ])
    );
}

#[test]
fn entities_in_text() {
    assert_eq!(
        events("<p>x&amp;y</p>"),
        expected(&[
            &start("html"),
            &start("body"),
            &start("p"),
            "characters(\"x\")",
            "characters(\"&y\")",
            &end("p"),
            &end("body"),
            &end("html"),
        ])
    );
}

#[test]
fn windows_1252_character_references_are_remapped() {
    assert_eq!(
        events("<p>&#147;q&#148;</p>"),
        expected(&[
            &start("html"),
            &start("body"),
            &start("p"),
            "characters(\"\u{201C}q\")",
            "characters(\"\u{201D}\")",
            &end("p"),
            &end("body"),
            &end("html"),
        ])
    );
}

#[test]
fn attribute_values_expand_terminated_references_only() {
    assert_eq!(
        events("<html><body><a href=\"x&amp;y\" title=\"a&amp\">t</a></body></html>"),
        expected(&[
            &start("html"),
            &start("body"),
            &format!(
                "startElement({XHTML_NAMESPACE}, a, a, shape=\"rect\", href=\"x&y\", title=\"a&amp\")"
            ),
            "characters(\"t\")",
            &end("a"),
            &end("body"),
            &end("html"),
        ])
    );
}

#[test]
fn numeric_character_references_in_attributes() {
    assert_eq!(
        events("<html><body><a href=\"&#65;&#x42;\">t</a></body></html>"),
        expected(&[
            &start("html"),
            &start("body"),
            &format!("startElement({XHTML_NAMESPACE}, a, a, shape=\"rect\", href=\"AB\")"),
            "characters(\"t\")",
            &end("a"),
            &end("body"),
            &end("html"),
        ])
    );
}

#[test]
fn valueless_attributes_take_their_own_name() {
    assert_eq!(
        events("<html><body><input checked></body></html>"),
        expected(&[
            &start("html"),
            &start("body"),
            &format!(
                "startElement({XHTML_NAMESPACE}, input, input, checked=\"checked\", type=\"text\")"
            ),
            &end("input"),
            &end("body"),
            &end("html"),
        ])
    );
}

#[test]
fn default_attributes_can_be_disabled() {
    assert_eq!(
        events_with("<html><body>woo!<br></body></html>", |b| {
            b.disable_option(ParserOption::DefaultAttributes)
        }),
        expected(&[
            &start("html"),
            &start("body"),
            "characters(\"woo!\")",
            &start("br"),
            &end("br"),
            &end("body"),
            &end("html"),
        ])
    );
}

#[test]
fn doctype_is_reported_once_and_pings_the_resolver() {
    let html = "<!DOCTYPE html PUBLIC \"-//W3C//DTD XHTML 1.0 Strict//EN\" \
                \"http://www.w3.org/TR/xhtml1/DTD/xhtml1-strict.dtd\">\
                <!DOCTYPE other><html><body>x</body></html>";
    assert_eq!(
        events(html),
        expected(&[
            "startDTD(html, -//W3C//DTD XHTML 1.0 Strict//EN, http://www.w3.org/TR/xhtml1/DTD/xhtml1-strict.dtd)",
            "endDTD()",
            "resolveEntity(-//W3C//DTD XHTML 1.0 Strict//EN, http://www.w3.org/TR/xhtml1/DTD/xhtml1-strict.dtd)",
            &start("html"),
            &start("body"),
            "characters(\"x\")",
            &end("body"),
            &end("html"),
        ])
    );
}

#[test]
fn comments_and_processing_instructions() {
    assert_eq!(
        events("<html><body><!--a-b--><?php echo?>x</body></html>"),
        expected(&[
            &start("html"),
            &start("body"),
            "comment(\"a-b\")",
            "processingInstruction(php, echo)",
            "characters(\"x\")",
            &end("body"),
            &end("html"),
        ])
    );
}

#[test]
fn xml_declaration_is_suppressed() {
    assert_eq!(
        events("<?xml version=\"1.0\"?><html><body>x</body></html>"),
        expected(&[
            &start("html"),
            &start("body"),
            "characters(\"x\")",
            &end("body"),
            &end("html"),
        ])
    );
}

#[test]
fn cdata_sections_are_wrapped() {
    assert_eq!(
        events("<html><body><![CDATA[x<y]]></body></html>"),
        expected(&[
            &start("html"),
            &start("body"),
            "startCDATA()",
            "characters(\"x<y\")",
            "endCDATA()",
            &end("body"),
            &end("html"),
        ])
    );
}

#[test]
fn bogons_are_adopted_by_default() {
    assert_eq!(
        events("<html><body><foo>hi</foo></body></html>"),
        expected(&[
            &start("html"),
            &start("body"),
            &start("foo"),
            "characters(\"hi\")",
            &end("foo"),
            &end("body"),
            &end("html"),
        ])
    );
}

#[test]
fn ignore_bogons_suppresses_unknown_elements() {
    assert_eq!(
        events_with("<html><body><foo>hi</foo></body></html>", |b| {
            b.enable_option(ParserOption::IgnoreBogons)
        }),
        expected(&[
            &start("html"),
            &start("body"),
            "characters(\"hi\")",
            &end("body"),
            &end("html"),
        ])
    );
}

#[test]
fn empty_bogons_close_immediately() {
    assert_eq!(
        events_with("<html><body><foo>hi</foo></body></html>", |b| {
            b.enable_option(ParserOption::BogonsEmpty)
        }),
        expected(&[
            &start("html"),
            &start("body"),
            &start("foo"),
            &end("foo"),
            "characters(\"hi\")",
            &end("body"),
            &end("html"),
        ])
    );
}

#[test]
fn foreign_prefixes_get_synthetic_namespaces() {
    assert_eq!(
        events("<html><body><svg:rect x=\"1\"/></body></html>"),
        expected(&[
            &start("html"),
            &start("body"),
            "startPrefixMapping(svg=urn:x-prefix:svg)",
            "startElement(urn:x-prefix:svg, rect, svg:rect, x=\"1\")",
            "endElement(urn:x-prefix:svg, rect, svg:rect)",
            "endPrefixMapping(svg)",
            &end("body"),
            &end("html"),
        ])
    );
}

#[test]
fn table_end_tag_inside_form_precloses_the_table() {
    assert_eq!(
        events("<table><form><tr><td>cell</table>rest"),
        expected(&[
            &start("html"),
            &start("body"),
            &start("table"),
            &format!(
                "startElement({XHTML_NAMESPACE}, form, form, enctype=\"application/x-www-form-urlencoded\", method=\"get\")"
            ),
            &start("tr"),
            &format!("startElement({XHTML_NAMESPACE}, td, td, colspan=\"1\", rowspan=\"1\")"),
            "characters(\"cell\")",
            "characters(\"rest\")",
            &end("td"),
            &end("tr"),
            &end("form"),
            &end("table"),
            &end("body"),
            &end("html"),
        ])
    );
}

#[test]
fn namespace_reporting_can_be_disabled() {
    assert_eq!(
        events_with("<html><body>x</body></html>", |b| {
            b.disable_option(ParserOption::Namespaces)
        }),
        expected(&[
            "startElement(, , html)",
            "startElement(, , body)",
            "characters(\"x\")",
            "endElement(, , body)",
            "endElement(, , html)",
        ])
    );
}

#[test]
fn whitespace_in_element_only_content() {
    // dropped by default
    assert_eq!(
        events("<html> <body>x</body></html>"),
        expected(&[
            &start("html"),
            &start("body"),
            "characters(\"x\")",
            &end("body"),
            &end("html"),
        ])
    );
    // reported when the feature is on
    assert_eq!(
        events_with("<html> <body>x</body></html>", |b| {
            b.enable_option(ParserOption::IgnorableWhitespace)
        }),
        expected(&[
            &start("html"),
            "ignorableWhitespace(\" \")",
            &start("body"),
            "characters(\"x\")",
            &end("body"),
            &end("html"),
        ])
    );
}

#[test]
fn features_are_settable_by_uri() {
    let mut reader = HTMLReaderBuilder::new().build();
    assert!(!reader.get_feature(IGNORE_BOGONS_FEATURE).unwrap());
    reader.set_feature(IGNORE_BOGONS_FEATURE, true).unwrap();
    assert!(reader.get_feature(IGNORE_BOGONS_FEATURE).unwrap());
    assert!(reader.parser_config().is_enable(ParserOption::IgnoreBogons));

    // standard SAX URIs are accepted but inert
    reader
        .set_feature("http://xml.org/sax/features/validation", true)
        .unwrap();
    assert!(
        reader
            .get_feature("http://xml.org/sax/features/validation")
            .unwrap()
    );

    assert!(reader.set_feature("urn:x-unknown:feature", true).is_err());
    assert!(reader.get_feature("urn:x-unknown:feature").is_err());
}

#[test]
fn malformed_bytes_are_reported_and_replaced() {
    let handler = Arc::new(DebugHandler::default());
    let mut reader = HTMLReaderBuilder::new()
        .set_handler(handler.clone())
        .build();
    reader.parse_reader(&b"<p>a\xFFb"[..], None).unwrap();
    let buffer = handler.take_buffer();
    assert!(buffer.contains("characters(\"a\u{FFFD}b\")"), "{buffer}");
    assert!(
        buffer.contains("warning(replaced 1 malformed input byte(s) with U+FFFD)"),
        "{buffer}"
    );
}

#[test]
fn serializer_produces_well_formed_xml() {
    let writer = Arc::new(XmlWriter::default());
    let mut reader = HTMLReaderBuilder::new()
        .set_content_handler(writer.clone())
        .set_lexical_handler(writer.clone())
        .build();
    reader
        .parse_str("<html><body>woo!<br></body></html>", None)
        .unwrap();
    assert_eq!(
        writer.take_result(),
        "<?xml version=\"1.0\"?>\n\
         <html xmlns:html=\"http://www.w3.org/1999/xhtml\"><body>woo!<br clear=\"none\"/></body></html>"
    );
}

#[test]
fn reparsing_serialized_output_is_stable() {
    let input = "<html><body>woo!<br></body></html>";
    let writer = Arc::new(XmlWriter::default());
    let mut reader = HTMLReaderBuilder::new()
        .set_content_handler(writer.clone())
        .set_lexical_handler(writer.clone())
        .build();
    reader.parse_str(input, None).unwrap();
    let serialized = writer.take_result();
    // the xmlns declaration and the XML declaration both disappear again,
    // so the event stream is identical to the first pass
    assert_eq!(events(input), events(&serialized));
}

#[test]
fn crlf_is_normalized() {
    assert_eq!(
        events("<html><body><pre>a\r\nb\rc</pre></body></html>"),
        expected(&[
            &start("html"),
            &start("body"),
            &start("pre"),
            "characters(\"a\nb\nc\")",
            &end("pre"),
            &end("body"),
            &end("html"),
        ])
    );
}

#[test]
fn self_closing_tags() {
    assert_eq!(
        events("<html><body><a href=\"x\"/>t</body></html>"),
        expected(&[
            &start("html"),
            &start("body"),
            &format!("startElement({XHTML_NAMESPACE}, a, a, shape=\"rect\", href=\"x\")"),
            &end("a"),
            "characters(\"t\")",
            &end("body"),
            &end("html"),
        ])
    );
}

#[test]
fn stray_end_tags_are_ignored() {
    assert_eq!(
        events("</p></html><p>x"),
        expected(&[
            &start("html"),
            &start("body"),
            &start("p"),
            "characters(\"x\")",
            &end("p"),
            &end("body"),
            &end("html"),
        ])
    );
}

#[test]
fn head_closes_when_body_content_appears() {
    assert_eq!(
        events("<title>t</title>x"),
        expected(&[
            &start("html"),
            &start("head"),
            &start("title"),
            "characters(\"t\")",
            &end("title"),
            &end("head"),
            &start("body"),
            "characters(\"x\")",
            &end("body"),
            &end("html"),
        ])
    );
}
