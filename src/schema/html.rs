//! The populated HTML schema: element catalogue, natural parents, default
//! attributes, and the named character entities of HTML 4.01.

use crate::{
    XHTML_NAMESPACE,
    sax::attributes::AttributeType,
    schema::{F_CDATA, F_NOFORCE, F_RESTART, M_ANY, M_EMPTY, M_PCDATA, M_ROOT, Schema},
};

// Content models specific to HTML. The reserved bits (M_ANY, M_EMPTY,
// M_PCDATA, M_ROOT) live in the schema module.
pub const M_AREA: u32 = 1 << 1;
pub const M_BLOCK: u32 = 1 << 2;
pub const M_BLOCKINLINE: u32 = 1 << 3;
pub const M_CELL: u32 = 1 << 4;
pub const M_COL: u32 = 1 << 5;
pub const M_DEF: u32 = 1 << 6;
pub const M_FORM: u32 = 1 << 7;
pub const M_FRAME: u32 = 1 << 8;
pub const M_HEAD: u32 = 1 << 9;
pub const M_HTML: u32 = 1 << 10;
pub const M_INLINE: u32 = 1 << 11;
pub const M_LEGEND: u32 = 1 << 12;
pub const M_LI: u32 = 1 << 13;
pub const M_NOLINK: u32 = 1 << 14;
pub const M_OPTION: u32 = 1 << 15;
pub const M_OPTIONS: u32 = 1 << 16;
pub const M_P: u32 = 1 << 17;
pub const M_PARAM: u32 = 1 << 18;
pub const M_TABLE: u32 = 1 << 19;
pub const M_TABULAR: u32 = 1 << 20;
pub const M_TR: u32 = 1 << 21;

/// `(name, model, member_of, flags)` for every known element.
#[rustfmt::skip]
const ELEMENT_TYPES: &[(&str, u32, u32, u32)] = &[
    ("<pcdata>",   M_EMPTY,                                M_PCDATA,                     0),
    ("<root>",     M_ROOT,                                 M_EMPTY,                      0),
    ("a",          M_PCDATA | M_NOLINK,                    M_INLINE,                     0),
    ("abbr",       M_PCDATA | M_INLINE,                    M_INLINE,                     0),
    ("acronym",    M_PCDATA | M_INLINE,                    M_INLINE,                     0),
    ("address",    M_PCDATA | M_INLINE | M_P,              M_BLOCK,                      0),
    ("applet",     M_PCDATA | M_PARAM | M_INLINE | M_BLOCK, M_INLINE | M_NOLINK,         0),
    ("area",       M_EMPTY,                                M_AREA,                       0),
    ("b",          M_PCDATA | M_INLINE,                    M_INLINE,                     F_RESTART),
    ("base",       M_EMPTY,                                M_HEAD,                       0),
    ("basefont",   M_EMPTY,                                M_INLINE | M_NOLINK,          0),
    ("bdo",        M_PCDATA | M_INLINE,                    M_INLINE,                     0),
    ("bgsound",    M_EMPTY,                                M_HEAD,                       0),
    ("big",        M_PCDATA | M_INLINE,                    M_INLINE,                     F_RESTART),
    ("blink",      M_PCDATA | M_INLINE,                    M_INLINE,                     F_RESTART),
    ("blockquote", M_PCDATA | M_INLINE | M_BLOCK,          M_BLOCK,                      0),
    ("body",       M_PCDATA | M_INLINE | M_BLOCK,          M_HTML,                       0),
    ("br",         M_EMPTY,                                M_INLINE,                     0),
    ("button",     M_PCDATA | M_INLINE | M_BLOCK,          M_INLINE | M_NOLINK,          0),
    ("canvas",     M_PCDATA | M_INLINE,                    M_INLINE,                     0),
    ("caption",    M_PCDATA | M_INLINE,                    M_TABULAR,                    0),
    ("center",     M_PCDATA | M_INLINE | M_BLOCK,          M_BLOCK,                      0),
    ("cite",       M_PCDATA | M_INLINE,                    M_INLINE,                     0),
    ("code",       M_PCDATA | M_INLINE,                    M_INLINE,                     0),
    ("col",        M_EMPTY,                                M_COL | M_TABULAR,            0),
    ("colgroup",   M_COL,                                  M_TABULAR,                    0),
    ("comment",    M_PCDATA,                               M_INLINE,                     0),
    ("dd",         M_PCDATA | M_INLINE | M_BLOCK,          M_DEF,                        0),
    ("del",        M_PCDATA | M_INLINE | M_BLOCK,          M_INLINE,                     0),
    ("dfn",        M_PCDATA | M_INLINE,                    M_INLINE,                     0),
    ("dir",        M_LI,                                   M_BLOCK,                      0),
    ("div",        M_PCDATA | M_INLINE | M_BLOCK,          M_BLOCK,                      0),
    ("dl",         M_DEF,                                  M_BLOCK,                      0),
    ("dt",         M_PCDATA | M_INLINE,                    M_DEF,                        0),
    ("em",         M_PCDATA | M_INLINE,                    M_INLINE,                     0),
    ("fieldset",   M_PCDATA | M_LEGEND | M_INLINE | M_BLOCK, M_BLOCK,                    0),
    ("font",       M_PCDATA | M_INLINE,                    M_INLINE,                     F_RESTART),
    ("form",       M_PCDATA | M_INLINE | M_BLOCK | M_TR | M_CELL, M_BLOCK | M_FORM,      F_NOFORCE),
    ("frame",      M_EMPTY,                                M_FRAME,                      0),
    ("frameset",   M_FRAME,                                M_FRAME | M_HTML,             0),
    ("h1",         M_PCDATA | M_INLINE,                    M_BLOCK,                      0),
    ("h2",         M_PCDATA | M_INLINE,                    M_BLOCK,                      0),
    ("h3",         M_PCDATA | M_INLINE,                    M_BLOCK,                      0),
    ("h4",         M_PCDATA | M_INLINE,                    M_BLOCK,                      0),
    ("h5",         M_PCDATA | M_INLINE,                    M_BLOCK,                      0),
    ("h6",         M_PCDATA | M_INLINE,                    M_BLOCK,                      0),
    ("head",       M_HEAD,                                 M_HTML,                       0),
    ("hr",         M_EMPTY,                                M_BLOCK,                      0),
    ("html",       M_HTML,                                 M_ROOT,                       0),
    ("i",          M_PCDATA | M_INLINE,                    M_INLINE,                     F_RESTART),
    ("iframe",     M_PCDATA | M_INLINE | M_BLOCK,          M_INLINE | M_NOLINK,          0),
    ("img",        M_EMPTY,                                M_INLINE | M_NOLINK,          0),
    ("input",      M_EMPTY,                                M_INLINE | M_NOLINK,          0),
    ("ins",        M_PCDATA | M_INLINE | M_BLOCK,          M_INLINE,                     0),
    ("isindex",    M_EMPTY,                                M_HEAD,                       0),
    ("kbd",        M_PCDATA | M_INLINE,                    M_INLINE,                     0),
    ("label",      M_PCDATA | M_INLINE,                    M_INLINE | M_NOLINK,          0),
    ("legend",     M_PCDATA | M_INLINE,                    M_LEGEND,                     0),
    ("li",         M_PCDATA | M_INLINE | M_BLOCK,          M_LI,                         0),
    ("link",       M_EMPTY,                                M_HEAD | M_INLINE,            0),
    ("listing",    M_PCDATA | M_INLINE,                    M_BLOCK,                      0),
    ("map",        M_BLOCK | M_AREA,                       M_INLINE,                     0),
    ("marquee",    M_PCDATA | M_INLINE | M_BLOCK,          M_INLINE,                     0),
    ("menu",       M_LI,                                   M_BLOCK,                      0),
    ("meta",       M_EMPTY,                                M_HEAD,                       0),
    ("nobr",       M_PCDATA | M_INLINE,                    M_INLINE,                     0),
    ("noframes",   M_PCDATA | M_INLINE | M_BLOCK,          M_BLOCK | M_FRAME,            0),
    ("noscript",   M_PCDATA | M_INLINE | M_BLOCK,          M_BLOCK,                      0),
    ("object",     M_PCDATA | M_PARAM | M_INLINE | M_BLOCK, M_HEAD | M_INLINE | M_NOLINK, 0),
    ("ol",         M_LI,                                   M_BLOCK,                      0),
    ("optgroup",   M_OPTION,                               M_OPTIONS,                    0),
    ("option",     M_PCDATA,                               M_OPTION | M_OPTIONS,         0),
    ("p",          M_PCDATA | M_INLINE,                    M_BLOCK | M_P,                0),
    ("param",      M_EMPTY,                                M_PARAM,                      0),
    ("pre",        M_PCDATA | M_INLINE,                    M_BLOCK,                      0),
    ("q",          M_PCDATA | M_INLINE,                    M_INLINE,                     0),
    ("rb",         M_PCDATA | M_INLINE,                    M_INLINE,                     0),
    ("rp",         M_PCDATA | M_INLINE,                    M_INLINE,                     0),
    ("rt",         M_PCDATA | M_INLINE,                    M_INLINE,                     0),
    ("ruby",       M_PCDATA | M_INLINE,                    M_INLINE,                     0),
    ("s",          M_PCDATA | M_INLINE,                    M_INLINE,                     F_RESTART),
    ("samp",       M_PCDATA | M_INLINE,                    M_INLINE,                     0),
    ("script",     M_PCDATA,                               M_ANY & !M_ROOT,              F_CDATA),
    ("select",     M_OPTIONS,                              M_INLINE | M_NOLINK,          0),
    ("small",      M_PCDATA | M_INLINE,                    M_INLINE,                     F_RESTART),
    ("spacer",     M_EMPTY,                                M_INLINE,                     0),
    ("span",       M_PCDATA | M_INLINE,                    M_INLINE,                     0),
    ("strike",     M_PCDATA | M_INLINE,                    M_INLINE,                     F_RESTART),
    ("strong",     M_PCDATA | M_INLINE,                    M_INLINE,                     0),
    ("style",      M_PCDATA,                               M_HEAD | M_INLINE,            F_CDATA),
    ("sub",        M_PCDATA | M_INLINE,                    M_INLINE,                     F_RESTART),
    ("sup",        M_PCDATA | M_INLINE,                    M_INLINE,                     F_RESTART),
    ("table",      M_FORM | M_TABULAR,                     M_BLOCK | M_TABLE,            0),
    ("tbody",      M_TR,                                   M_TABULAR,                    0),
    ("td",         M_PCDATA | M_INLINE | M_BLOCK,          M_CELL,                       0),
    ("textarea",   M_PCDATA,                               M_INLINE | M_NOLINK,          0),
    ("tfoot",      M_TR | M_CELL,                          M_TABULAR,                    0),
    ("th",         M_PCDATA | M_INLINE | M_BLOCK,          M_CELL,                       0),
    ("thead",      M_TR | M_CELL,                          M_TABULAR,                    0),
    ("title",      M_PCDATA,                               M_HEAD,                       0),
    ("tr",         M_CELL | M_FORM,                        M_TR | M_TABULAR,             0),
    ("tt",         M_PCDATA | M_INLINE,                    M_INLINE,                     F_RESTART),
    ("u",          M_PCDATA | M_INLINE,                    M_INLINE,                     F_RESTART),
    ("ul",         M_LI,                                   M_BLOCK,                      0),
    ("var",        M_PCDATA | M_INLINE,                    M_INLINE,                     0),
    ("wbr",        M_EMPTY,                                M_INLINE,                     0),
    ("xmp",        M_PCDATA | M_INLINE,                    M_BLOCK,                      F_CDATA),
];

/// `(child, natural parent)`; auto-insertion walks these upward until it
/// reaches an element the open stack can contain.
#[rustfmt::skip]
const PARENTS: &[(&str, &str)] = &[
    ("<pcdata>", "body"),
    ("a", "body"), ("abbr", "body"), ("acronym", "body"), ("address", "body"),
    ("applet", "body"), ("area", "map"), ("b", "body"), ("base", "head"),
    ("basefont", "body"), ("bdo", "body"), ("bgsound", "head"), ("big", "body"),
    ("blink", "body"), ("blockquote", "body"), ("body", "html"), ("br", "body"),
    ("button", "body"), ("canvas", "body"), ("caption", "table"),
    ("center", "body"), ("cite", "body"), ("code", "body"), ("col", "colgroup"),
    ("colgroup", "table"), ("comment", "body"), ("dd", "dl"), ("del", "body"),
    ("dfn", "body"), ("dir", "body"), ("div", "body"), ("dl", "body"),
    ("dt", "dl"), ("em", "body"), ("fieldset", "body"), ("font", "body"),
    ("form", "body"), ("frame", "frameset"), ("frameset", "html"),
    ("h1", "body"), ("h2", "body"), ("h3", "body"), ("h4", "body"),
    ("h5", "body"), ("h6", "body"), ("head", "html"), ("hr", "body"),
    ("html", "<root>"), ("i", "body"), ("iframe", "body"), ("img", "body"),
    ("input", "body"), ("ins", "body"), ("isindex", "head"), ("kbd", "body"),
    ("label", "body"), ("legend", "fieldset"), ("li", "ul"), ("link", "head"),
    ("listing", "body"), ("map", "body"), ("marquee", "body"), ("menu", "body"),
    ("meta", "head"), ("nobr", "body"), ("noframes", "body"),
    ("noscript", "body"), ("object", "body"), ("ol", "body"),
    ("optgroup", "select"), ("option", "select"), ("p", "body"),
    ("param", "object"), ("pre", "body"), ("q", "body"), ("rb", "ruby"),
    ("rp", "ruby"), ("rt", "ruby"), ("ruby", "body"), ("s", "body"),
    ("samp", "body"), ("script", "head"), ("select", "body"),
    ("small", "body"), ("spacer", "body"), ("span", "body"),
    ("strike", "body"), ("strong", "body"), ("style", "head"), ("sub", "body"),
    ("sup", "body"), ("table", "body"), ("tbody", "table"), ("td", "tr"),
    ("textarea", "body"), ("tfoot", "table"), ("th", "tr"), ("thead", "table"),
    ("title", "head"), ("tr", "tbody"), ("tt", "body"), ("u", "body"),
    ("ul", "body"), ("var", "body"), ("wbr", "body"), ("xmp", "body"),
];

/// `(element, attribute, type, default value)`.
///
/// CDATA attributes without defaults are not declared; boolean attributes
/// carry no default and only survive on elements that set them.
#[rustfmt::skip]
const DEFAULT_ATTRIBUTES: &[(&str, &str, AttributeType, Option<&str>)] = &[
    ("a",        "shape",       AttributeType::CDATA,   Some("rect")),
    ("area",     "nohref",      AttributeType::Boolean, None),
    ("area",     "shape",       AttributeType::CDATA,   Some("rect")),
    ("basefont", "size",        AttributeType::CDATA,   Some("3")),
    ("br",       "clear",       AttributeType::CDATA,   Some("none")),
    ("button",   "disabled",    AttributeType::Boolean, None),
    ("button",   "type",        AttributeType::CDATA,   Some("submit")),
    ("col",      "span",        AttributeType::CDATA,   Some("1")),
    ("colgroup", "span",        AttributeType::CDATA,   Some("1")),
    ("dir",      "compact",     AttributeType::Boolean, None),
    ("dl",       "compact",     AttributeType::Boolean, None),
    ("form",     "enctype",     AttributeType::CDATA,   Some("application/x-www-form-urlencoded")),
    ("form",     "method",      AttributeType::CDATA,   Some("get")),
    ("frame",    "frameborder", AttributeType::CDATA,   Some("1")),
    ("frame",    "noresize",    AttributeType::Boolean, None),
    ("frame",    "scrolling",   AttributeType::CDATA,   Some("auto")),
    ("hr",       "noshade",     AttributeType::Boolean, None),
    ("iframe",   "frameborder", AttributeType::CDATA,   Some("1")),
    ("iframe",   "scrolling",   AttributeType::CDATA,   Some("auto")),
    ("img",      "ismap",       AttributeType::Boolean, None),
    ("input",    "checked",     AttributeType::Boolean, None),
    ("input",    "disabled",    AttributeType::Boolean, None),
    ("input",    "readonly",    AttributeType::Boolean, None),
    ("input",    "type",        AttributeType::CDATA,   Some("text")),
    ("menu",     "compact",     AttributeType::Boolean, None),
    ("object",   "declare",     AttributeType::Boolean, None),
    ("ol",       "compact",     AttributeType::Boolean, None),
    ("optgroup", "disabled",    AttributeType::Boolean, None),
    ("option",   "disabled",    AttributeType::Boolean, None),
    ("option",   "selected",    AttributeType::Boolean, None),
    ("param",    "valuetype",   AttributeType::CDATA,   Some("data")),
    ("script",   "defer",       AttributeType::Boolean, None),
    ("select",   "disabled",    AttributeType::Boolean, None),
    ("select",   "multiple",    AttributeType::Boolean, None),
    ("td",       "colspan",     AttributeType::CDATA,   Some("1")),
    ("td",       "nowrap",      AttributeType::Boolean, None),
    ("td",       "rowspan",     AttributeType::CDATA,   Some("1")),
    ("textarea", "disabled",    AttributeType::Boolean, None),
    ("textarea", "readonly",    AttributeType::Boolean, None),
    ("th",       "colspan",     AttributeType::CDATA,   Some("1")),
    ("th",       "nowrap",      AttributeType::Boolean, None),
    ("th",       "rowspan",     AttributeType::CDATA,   Some("1")),
    ("ul",       "compact",     AttributeType::Boolean, None),
];

/// The named character entities of HTML 4.01.
#[rustfmt::skip]
const ENTITIES: &[(&str, u32)] = &[
    // C0 Controls and Basic Latin
    ("quot", 34), ("amp", 38), ("apos", 39), ("lt", 60), ("gt", 62),
    // ISO 8859-1 characters
    ("nbsp", 160), ("iexcl", 161), ("cent", 162), ("pound", 163),
    ("curren", 164), ("yen", 165), ("brvbar", 166), ("sect", 167),
    ("uml", 168), ("copy", 169), ("ordf", 170), ("laquo", 171),
    ("not", 172), ("shy", 173), ("reg", 174), ("macr", 175),
    ("deg", 176), ("plusmn", 177), ("sup2", 178), ("sup3", 179),
    ("acute", 180), ("micro", 181), ("para", 182), ("middot", 183),
    ("cedil", 184), ("sup1", 185), ("ordm", 186), ("raquo", 187),
    ("frac14", 188), ("frac12", 189), ("frac34", 190), ("iquest", 191),
    ("Agrave", 192), ("Aacute", 193), ("Acirc", 194), ("Atilde", 195),
    ("Auml", 196), ("Aring", 197), ("AElig", 198), ("Ccedil", 199),
    ("Egrave", 200), ("Eacute", 201), ("Ecirc", 202), ("Euml", 203),
    ("Igrave", 204), ("Iacute", 205), ("Icirc", 206), ("Iuml", 207),
    ("ETH", 208), ("Ntilde", 209), ("Ograve", 210), ("Oacute", 211),
    ("Ocirc", 212), ("Otilde", 213), ("Ouml", 214), ("times", 215),
    ("Oslash", 216), ("Ugrave", 217), ("Uacute", 218), ("Ucirc", 219),
    ("Uuml", 220), ("Yacute", 221), ("THORN", 222), ("szlig", 223),
    ("agrave", 224), ("aacute", 225), ("acirc", 226), ("atilde", 227),
    ("auml", 228), ("aring", 229), ("aelig", 230), ("ccedil", 231),
    ("egrave", 232), ("eacute", 233), ("ecirc", 234), ("euml", 235),
    ("igrave", 236), ("iacute", 237), ("icirc", 238), ("iuml", 239),
    ("eth", 240), ("ntilde", 241), ("ograve", 242), ("oacute", 243),
    ("ocirc", 244), ("otilde", 245), ("ouml", 246), ("divide", 247),
    ("oslash", 248), ("ugrave", 249), ("uacute", 250), ("ucirc", 251),
    ("uuml", 252), ("yacute", 253), ("thorn", 254), ("yuml", 255),
    // Latin Extended
    ("OElig", 338), ("oelig", 339), ("Scaron", 352), ("scaron", 353),
    ("Yuml", 376), ("fnof", 402),
    // Spacing modifier letters
    ("circ", 710), ("tilde", 732),
    // Greek
    ("Alpha", 913), ("Beta", 914), ("Gamma", 915), ("Delta", 916),
    ("Epsilon", 917), ("Zeta", 918), ("Eta", 919), ("Theta", 920),
    ("Iota", 921), ("Kappa", 922), ("Lambda", 923), ("Mu", 924),
    ("Nu", 925), ("Xi", 926), ("Omicron", 927), ("Pi", 928),
    ("Rho", 929), ("Sigma", 931), ("Tau", 932), ("Upsilon", 933),
    ("Phi", 934), ("Chi", 935), ("Psi", 936), ("Omega", 937),
    ("alpha", 945), ("beta", 946), ("gamma", 947), ("delta", 948),
    ("epsilon", 949), ("zeta", 950), ("eta", 951), ("theta", 952),
    ("iota", 953), ("kappa", 954), ("lambda", 955), ("mu", 956),
    ("nu", 957), ("xi", 958), ("omicron", 959), ("pi", 960),
    ("rho", 961), ("sigmaf", 962), ("sigma", 963), ("tau", 964),
    ("upsilon", 965), ("phi", 966), ("chi", 967), ("psi", 968),
    ("omega", 969), ("thetasym", 977), ("upsih", 978), ("piv", 982),
    // General punctuation
    ("ensp", 8194), ("emsp", 8195), ("thinsp", 8201), ("zwnj", 8204),
    ("zwj", 8205), ("lrm", 8206), ("rlm", 8207), ("ndash", 8211),
    ("mdash", 8212), ("lsquo", 8216), ("rsquo", 8217), ("sbquo", 8218),
    ("ldquo", 8220), ("rdquo", 8221), ("bdquo", 8222), ("dagger", 8224),
    ("Dagger", 8225), ("bull", 8226), ("hellip", 8230), ("permil", 8240),
    ("prime", 8242), ("Prime", 8243), ("lsaquo", 8249), ("rsaquo", 8250),
    ("oline", 8254), ("frasl", 8260), ("euro", 8364),
    // Letterlike symbols
    ("image", 8465), ("weierp", 8472), ("real", 8476), ("trade", 8482),
    ("alefsym", 8501),
    // Arrows
    ("larr", 8592), ("uarr", 8593), ("rarr", 8594), ("darr", 8595),
    ("harr", 8596), ("crarr", 8629), ("lArr", 8656), ("uArr", 8657),
    ("rArr", 8658), ("dArr", 8659), ("hArr", 8660),
    // Mathematical operators
    ("forall", 8704), ("part", 8706), ("exist", 8707), ("empty", 8709),
    ("nabla", 8711), ("isin", 8712), ("notin", 8713), ("ni", 8715),
    ("prod", 8719), ("sum", 8721), ("minus", 8722), ("lowast", 8727),
    ("radic", 8730), ("prop", 8733), ("infin", 8734), ("ang", 8736),
    ("and", 8743), ("or", 8744), ("cap", 8745), ("cup", 8746),
    ("int", 8747), ("there4", 8756), ("sim", 8764), ("cong", 8773),
    ("asymp", 8776), ("ne", 8800), ("equiv", 8801), ("le", 8804),
    ("ge", 8805), ("sub", 8834), ("sup", 8835), ("nsub", 8836),
    ("sube", 8838), ("supe", 8839), ("oplus", 8853), ("otimes", 8855),
    ("perp", 8869), ("sdot", 8901),
    // Miscellaneous technical
    ("lceil", 8968), ("rceil", 8969), ("lfloor", 8970), ("rfloor", 8971),
    ("lang", 9001), ("rang", 9002),
    // Geometric shapes and miscellaneous symbols
    ("loz", 9674), ("spades", 9824), ("clubs", 9827), ("hearts", 9829),
    ("diams", 9830),
];

impl Schema {
    /// A newly constructed HTML schema, independent of any existing one.
    pub fn html() -> Schema {
        let mut schema = Schema::new(XHTML_NAMESPACE, "html");
        for &(name, model, member_of, flags) in ELEMENT_TYPES {
            schema.element_type(name, model, member_of, flags);
        }
        for &(child, parent) in PARENTS {
            schema
                .parent(child, parent)
                .expect("the built-in HTML schema is self-consistent");
        }
        for &(elem, attr, atype, value) in DEFAULT_ATTRIBUTES {
            schema
                .attribute(elem, attr, atype, value)
                .expect("the built-in HTML schema is self-consistent");
        }
        for &(name, value) in ENTITIES {
            schema.entity(name, value);
        }
        schema
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_is_html() {
        let schema = Schema::html();
        assert_eq!(schema.root_element_type().unwrap().name(), "html");
        assert_eq!(schema.uri(), XHTML_NAMESPACE);
        assert_eq!(schema.prefix(), "html");
    }

    #[test]
    fn structural_containment() {
        let schema = Schema::html();
        let html = schema.get_element_type("html").unwrap();
        let body = schema.get_element_type("body").unwrap();
        let table = schema.get_element_type("table").unwrap();
        let tr = schema.get_element_type("tr").unwrap();
        let td = schema.get_element_type("td").unwrap();
        let pcdata = schema.get_element_type("<pcdata>").unwrap();
        assert!(html.can_contain(&body));
        assert!(body.can_contain(&table));
        assert!(table.can_contain(&tr));
        assert!(tr.can_contain(&td));
        assert!(td.can_contain(&pcdata));
        assert!(!table.can_contain(&pcdata));
        assert!(!body.can_contain(&td));
    }

    #[test]
    fn br_defaults_clear_none() {
        let schema = Schema::html();
        let br = schema.get_element_type("br").unwrap();
        let atts = br.atts();
        let clear = atts.get(atts.index_of_qname("clear").unwrap()).unwrap();
        assert_eq!(&*clear.value, "none");
    }

    #[test]
    fn entities_resolve() {
        let schema = Schema::html();
        assert_eq!(schema.get_entity("amp"), Some(38));
        assert_eq!(schema.get_entity("nbsp"), Some(160));
        assert_eq!(schema.get_entity("rArr"), Some(8658));
        assert_eq!(schema.get_entity("bogus"), None);
    }

    #[test]
    fn formatting_elements_are_restartable() {
        let schema = Schema::html();
        for name in ["b", "i", "big", "small", "tt", "u", "s", "strike"] {
            let t = schema.get_element_type(name).unwrap();
            assert_ne!(t.flags() & F_RESTART, 0, "{name} should restart");
        }
        for name in ["script", "style", "xmp"] {
            let t = schema.get_element_type(name).unwrap();
            assert_ne!(t.flags() & F_CDATA, 0, "{name} should be CDATA");
        }
        assert_ne!(
            schema.get_element_type("form").unwrap().flags() & F_NOFORCE,
            0
        );
    }
}
