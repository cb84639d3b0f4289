use std::{
    collections::{HashMap, VecDeque},
    io::Read,
    mem::replace,
    path::Path,
    sync::Arc,
};

use crate::{
    error::HTMLError,
    parse::element::Element,
    sax::{
        Locator,
        error::{fatal_error, warning},
        handler::{
            ContentHandler, DefaultHTMLHandler, EntityResolver, ErrorHandler, LexicalHandler,
        },
        source::InputSource,
    },
    scan::HTMLScanner,
    schema::{ElementType, Schema},
};

/// The behaviour switches of the parser.
///
/// Every option is also reachable through the SAX feature-URI surface;
/// see [`HTMLReader::set_feature`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ParserOption {
    /// Report namespace URIs and local names for elements and attributes.
    Namespaces = 0,
    /// Ignore unknown elements entirely.
    IgnoreBogons = 1,
    /// Give unknown elements a content model of EMPTY rather than ANY.
    BogonsEmpty = 2,
    /// Allow an unknown element to be the document element.
    RootBogons = 3,
    /// Fill in schema-declared default attribute values.
    DefaultAttributes = 4,
    /// Translate colons in names into underscores.
    TranslateColons = 5,
    /// Reopen restartable elements closed early by mismatched tags.
    RestartElements = 6,
    /// Report whitespace in element-only content via `ignorable_whitespace`.
    IgnorableWhitespace = 7,
    /// Treat CDATA elements (`script`, `style`, …) specially.
    CDATAElements = 8,
}

impl std::ops::BitOr<Self> for ParserOption {
    type Output = ParserConfig;

    fn bitor(self, rhs: Self) -> Self::Output {
        ParserConfig {
            flags: (1 << self as i32) | (1 << rhs as i32),
        }
    }
}

impl std::ops::BitOr<ParserConfig> for ParserOption {
    type Output = ParserConfig;

    fn bitor(self, rhs: ParserConfig) -> Self::Output {
        ParserConfig {
            flags: rhs.flags | (1 << self as i32),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ParserConfig {
    flags: u64,
}

impl ParserConfig {
    pub fn is_enable(&self, option: ParserOption) -> bool {
        self.flags & (1 << option as i32) != 0
    }

    pub fn set_option(&mut self, option: ParserOption, flag: bool) {
        if flag {
            self.flags |= 1 << (option as i32);
        } else {
            self.flags &= !(1 << (option as i32));
        }
    }
}

impl Default for ParserConfig {
    fn default() -> Self {
        ParserOption::Namespaces
            | ParserOption::RootBogons
            | ParserOption::DefaultAttributes
            | ParserOption::RestartElements
            | ParserOption::CDATAElements
    }
}

impl std::ops::BitOr<Self> for ParserConfig {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self::Output {
        ParserConfig {
            flags: self.flags | rhs.flags,
        }
    }
}

impl std::ops::BitOr<ParserOption> for ParserConfig {
    type Output = Self;

    fn bitor(self, rhs: ParserOption) -> Self::Output {
        ParserConfig {
            flags: self.flags | (1 << rhs as i32),
        }
    }
}

impl std::ops::BitOrAssign<ParserOption> for ParserConfig {
    fn bitor_assign(&mut self, rhs: ParserOption) {
        self.flags |= 1 << rhs as i32;
    }
}

// The live feature URIs.
pub const NAMESPACES_FEATURE: &str = "http://xml.org/sax/features/namespaces";
pub const IGNORE_BOGONS_FEATURE: &str = "http://www.ccil.org/~cowan/tagsoup/features/ignore-bogons";
pub const BOGONS_EMPTY_FEATURE: &str = "http://www.ccil.org/~cowan/tagsoup/features/bogons-empty";
pub const ROOT_BOGONS_FEATURE: &str = "http://www.ccil.org/~cowan/tagsoup/features/root-bogons";
pub const DEFAULT_ATTRIBUTES_FEATURE: &str =
    "http://www.ccil.org/~cowan/tagsoup/features/default-attributes";
pub const TRANSLATE_COLONS_FEATURE: &str =
    "http://www.ccil.org/~cowan/tagsoup/features/translate-colons";
pub const RESTART_ELEMENTS_FEATURE: &str =
    "http://www.ccil.org/~cowan/tagsoup/features/restart-elements";
pub const IGNORABLE_WHITESPACE_FEATURE: &str =
    "http://www.ccil.org/~cowan/tagsoup/features/ignorable-whitespace";
pub const CDATA_ELEMENTS_FEATURE: &str =
    "http://www.ccil.org/~cowan/tagsoup/features/cdata-elements";

// Standard SAX feature URIs that are recognised but have no effect here.
const INERT_FEATURES: &[(&str, bool)] = &[
    ("http://xml.org/sax/features/namespace-prefixes", false),
    ("http://xml.org/sax/features/external-general-entities", false),
    ("http://xml.org/sax/features/external-parameter-entities", false),
    ("http://xml.org/sax/features/is-standalone", false),
    ("http://xml.org/sax/features/lexical-handler/parameter-entities", false),
    ("http://xml.org/sax/features/resolve-dtd-uris", true),
    ("http://xml.org/sax/features/string-interning", true),
    ("http://xml.org/sax/features/use-attributes2", false),
    ("http://xml.org/sax/features/use-locator2", false),
    ("http://xml.org/sax/features/use-entity-resolver2", false),
    ("http://xml.org/sax/features/validation", false),
    ("http://xml.org/sax/features/unicode-normalization-checking", false),
    ("http://xml.org/sax/features/xmlns-uris", false),
    ("http://xml.org/sax/features/xml-1.1", false),
];

const LIVE_FEATURES: &[(&str, ParserOption)] = &[
    (NAMESPACES_FEATURE, ParserOption::Namespaces),
    (IGNORE_BOGONS_FEATURE, ParserOption::IgnoreBogons),
    (BOGONS_EMPTY_FEATURE, ParserOption::BogonsEmpty),
    (ROOT_BOGONS_FEATURE, ParserOption::RootBogons),
    (DEFAULT_ATTRIBUTES_FEATURE, ParserOption::DefaultAttributes),
    (TRANSLATE_COLONS_FEATURE, ParserOption::TranslateColons),
    (RESTART_ELEMENTS_FEATURE, ParserOption::RestartElements),
    (IGNORABLE_WHITESPACE_FEATURE, ParserOption::IgnorableWhitespace),
    (CDATA_ELEMENTS_FEATURE, ParserOption::CDATAElements),
];

/// The permissive HTML reader.
///
/// Owns the handlers, the schema, and the open-element machinery; one
/// instance can parse any number of documents in sequence. Distinct
/// readers share no mutable state.
pub struct HTMLReader {
    pub(crate) content_handler: Arc<dyn ContentHandler>,
    pub(crate) lexical_handler: Arc<dyn LexicalHandler>,
    pub(crate) entity_resolver: Arc<dyn EntityResolver>,
    pub(crate) error_handler: Arc<dyn ErrorHandler>,
    pub(crate) locator: Arc<Locator>,
    pub(crate) config: ParserConfig,
    features: HashMap<&'static str, bool>,
    pub(crate) schema: Schema,

    // Driver context
    pub(crate) stack: Vec<Element>,
    pub(crate) saved: VecDeque<Element>,
    pub(crate) pcdata_type: Option<Arc<ElementType>>,
    pub(crate) new_element: Option<Element>,
    pub(crate) attribute_name: String,
    pub(crate) pi_target: String,
    pub(crate) entity: u32,
    pub(crate) virgin_stack: bool,
    pub(crate) doctype_present: bool,
    pub(crate) doctype_name: String,
    pub(crate) doctype_public_id: String,
    pub(crate) doctype_system_id: String,
    pub(crate) cdata_request: bool,
    pub(crate) fatal_error_occurred: bool,
}

impl HTMLReader {
    pub fn content_handler(&self) -> Arc<dyn ContentHandler> {
        self.content_handler.clone()
    }
    pub fn lexical_handler(&self) -> Arc<dyn LexicalHandler> {
        self.lexical_handler.clone()
    }
    pub fn entity_resolver(&self) -> Arc<dyn EntityResolver> {
        self.entity_resolver.clone()
    }
    pub fn error_handler(&self) -> Arc<dyn ErrorHandler> {
        self.error_handler.clone()
    }

    pub fn set_content_handler(
        &mut self,
        handler: Arc<dyn ContentHandler>,
    ) -> Arc<dyn ContentHandler> {
        replace(&mut self.content_handler, handler)
    }
    pub fn set_lexical_handler(
        &mut self,
        handler: Arc<dyn LexicalHandler>,
    ) -> Arc<dyn LexicalHandler> {
        replace(&mut self.lexical_handler, handler)
    }
    pub fn set_entity_resolver(
        &mut self,
        handler: Arc<dyn EntityResolver>,
    ) -> Arc<dyn EntityResolver> {
        replace(&mut self.entity_resolver, handler)
    }
    pub fn set_error_handler(&mut self, handler: Arc<dyn ErrorHandler>) -> Arc<dyn ErrorHandler> {
        replace(&mut self.error_handler, handler)
    }

    /// Look up a feature by its SAX URI.
    ///
    /// Unknown names are an error; recognised-but-inert standard URIs
    /// report whatever was last set on them.
    pub fn get_feature(&self, name: &str) -> Result<bool, HTMLError> {
        self.features
            .get(name)
            .copied()
            .ok_or(HTMLError::ParserUnknownFeature)
    }

    /// Set a feature by its SAX URI.
    ///
    /// The nine live features map onto [`ParserOption`] values; the other
    /// recognised standard URIs accept any value without effect. Unknown
    /// names are an error.
    pub fn set_feature(&mut self, name: &str, value: bool) -> Result<(), HTMLError> {
        let slot = self
            .features
            .get_mut(name)
            .ok_or(HTMLError::ParserUnknownFeature)?;
        *slot = value;
        if let Some(&(_, option)) = LIVE_FEATURES.iter().find(|(uri, _)| *uri == name) {
            self.config.set_option(option, value);
        }
        Ok(())
    }

    pub fn parser_config(&self) -> ParserConfig {
        self.config
    }

    /// Whether the last parse reported a fatal error.
    pub fn fatal_error_occurred(&self) -> bool {
        self.fatal_error_occurred
    }

    /// Parse an in-memory document.
    pub fn parse_str(&mut self, html: &str, system_id: Option<&str>) -> Result<(), HTMLError> {
        let mut source = InputSource::from_content(html);
        if let Some(system_id) = system_id {
            source.set_system_id(system_id);
        }
        self.parse_document(&mut source)
    }

    /// Parse a document read from `reader`, decoding it as UTF-8.
    pub fn parse_reader(
        &mut self,
        reader: impl Read,
        system_id: Option<&str>,
    ) -> Result<(), HTMLError> {
        let mut source = InputSource::from_reader(reader);
        if let Some(system_id) = system_id {
            source.set_system_id(system_id);
        }
        self.parse_document(&mut source)
    }

    /// Parse the document at `path`.
    ///
    /// An unresolvable input is reported through the error handler as a
    /// fatal error and returned to the caller.
    pub fn parse_file(&mut self, path: impl AsRef<Path>) -> Result<(), HTMLError> {
        let mut source = match InputSource::from_file(path) {
            Ok(source) => source,
            Err(err) => {
                fatal_error!(
                    self,
                    HTMLError::ParserUnresolvableInput,
                    "could not resolve the input document: {}",
                    err
                );
                return Err(err);
            }
        };
        self.parse_document(&mut source)
    }

    /// Parse an already-constructed [`InputSource`].
    pub fn parse_source(&mut self, source: &mut InputSource<'_>) -> Result<(), HTMLError> {
        self.parse_document(source)
    }

    fn parse_document(&mut self, source: &mut InputSource<'_>) -> Result<(), HTMLError> {
        self.setup()?;

        self.content_handler.start_document();
        self.locator
            .set_system_id(source.system_id().unwrap_or("").into());
        self.locator.set_public_id(source.public_id().map(Arc::from));
        self.locator.set_line(1);
        self.locator.set_column(0);
        self.content_handler.set_document_locator(self.locator.clone());
        if !self.schema.uri().is_empty() {
            self.content_handler
                .start_prefix_mapping(self.schema.prefix(), self.schema.uri());
        }

        let mut scanner = HTMLScanner::new(self.locator.clone());
        let result = scanner.scan(source, self);
        if source.malformed_count() > 0 {
            warning!(
                self,
                HTMLError::ParserMalformedInput,
                "replaced {} malformed input byte(s) with U+FFFD",
                source.malformed_count()
            );
        }
        result.inspect_err(|err| {
            fatal_error!(self, err.clone(), "unrecoverable error: {}", err);
        })
    }

    /// Reset everything a previous parse may have touched.
    ///
    /// The schema is rebuilt because bogon registration mutates it.
    fn setup(&mut self) -> Result<(), HTMLError> {
        self.schema = Schema::html();
        let root = self
            .schema
            .get_element_type("<root>")
            .ok_or(HTMLError::InternalError)?;
        self.pcdata_type = self.schema.get_element_type("<pcdata>");
        self.stack.clear();
        self.stack.push(Element::new(
            root,
            self.config.is_enable(ParserOption::DefaultAttributes),
        ));
        self.saved.clear();
        self.new_element = None;
        self.attribute_name.clear();
        self.pi_target.clear();
        self.entity = 0;
        self.virgin_stack = true;
        self.doctype_present = false;
        self.doctype_name.clear();
        self.doctype_public_id.clear();
        self.doctype_system_id.clear();
        self.cdata_request = false;
        self.fatal_error_occurred = false;
        Ok(())
    }
}

fn initial_features(config: ParserConfig) -> HashMap<&'static str, bool> {
    let mut features = HashMap::new();
    for &(uri, value) in INERT_FEATURES {
        features.insert(uri, value);
    }
    for &(uri, option) in LIVE_FEATURES {
        features.insert(uri, config.is_enable(option));
    }
    features
}

impl Default for HTMLReader {
    fn default() -> Self {
        let handler = Arc::new(DefaultHTMLHandler);
        let config = ParserConfig::default();
        Self {
            content_handler: handler.clone(),
            lexical_handler: handler.clone(),
            entity_resolver: handler.clone(),
            error_handler: handler,
            locator: Arc::new(Locator::default()),
            config,
            features: initial_features(config),
            schema: Schema::html(),
            stack: vec![],
            saved: VecDeque::new(),
            pcdata_type: None,
            new_element: None,
            attribute_name: String::new(),
            pi_target: String::new(),
            entity: 0,
            virgin_stack: true,
            doctype_present: false,
            doctype_name: String::new(),
            doctype_public_id: String::new(),
            doctype_system_id: String::new(),
            cdata_request: false,
            fatal_error_occurred: false,
        }
    }
}

pub struct HTMLReaderBuilder {
    reader: HTMLReader,
}

impl HTMLReaderBuilder {
    pub fn new() -> Self {
        Self {
            reader: Default::default(),
        }
    }

    pub fn set_content_handler(mut self, handler: Arc<dyn ContentHandler>) -> Self {
        self.reader.content_handler = handler;
        self
    }
    pub fn set_lexical_handler(mut self, handler: Arc<dyn LexicalHandler>) -> Self {
        self.reader.lexical_handler = handler;
        self
    }
    pub fn set_entity_resolver(mut self, handler: Arc<dyn EntityResolver>) -> Self {
        self.reader.entity_resolver = handler;
        self
    }
    pub fn set_error_handler(mut self, handler: Arc<dyn ErrorHandler>) -> Self {
        self.reader.error_handler = handler;
        self
    }

    /// Wire one object into every handler role it implements.
    pub fn set_handler<H>(mut self, handler: Arc<H>) -> Self
    where
        H: ContentHandler + LexicalHandler + EntityResolver + ErrorHandler + 'static,
    {
        self.reader.content_handler = handler.clone();
        self.reader.lexical_handler = handler.clone();
        self.reader.entity_resolver = handler.clone();
        self.reader.error_handler = handler;
        self
    }

    pub fn set_parser_config(mut self, config: ParserConfig) -> Self {
        self.reader.config = config;
        self.reader.features = initial_features(config);
        self
    }
    pub fn enable_option(mut self, option: ParserOption) -> Self {
        self.reader.config.set_option(option, true);
        self.reader.features = initial_features(self.reader.config);
        self
    }
    pub fn disable_option(mut self, option: ParserOption) -> Self {
        self.reader.config.set_option(option, false);
        self.reader.features = initial_features(self.reader.config);
        self
    }

    pub fn build(self) -> HTMLReader {
        self.reader
    }
}

impl Default for HTMLReaderBuilder {
    fn default() -> Self {
        Self::new()
    }
}
