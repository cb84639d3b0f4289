#![doc = include_str!("../README.md")]

pub mod chars;
pub mod error;
mod parse;
pub mod save;
pub mod sax;
pub mod scan;
pub mod schema;
pub mod uri;

/// Approximate chunk length when the scanner reports character data
const PCDATA_CHUNK_LENGTH: usize = 4096;

pub(crate) const XML_XML_NAMESPACE: &str = "http://www.w3.org/XML/1998/namespace";

/// The namespace name of the HTML schema.
pub const XHTML_NAMESPACE: &str = "http://www.w3.org/1999/xhtml";
