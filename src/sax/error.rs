use std::{borrow::Cow, sync::Arc};

use crate::error::{HTMLError, HTMLErrorLevel};

#[derive(Debug)]
pub struct SAXParseError {
    pub error: HTMLError,
    pub level: HTMLErrorLevel,
    pub line: usize,
    pub column: usize,
    pub system_id: Arc<str>,
    pub public_id: Option<Arc<str>>,
    pub message: Cow<'static, str>,
}

impl std::fmt::Display for SAXParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}[line:{},column:{}][{}] {}",
            self.system_id, self.line, self.column, self.level, self.message,
        )
    }
}

impl std::error::Error for SAXParseError {}

macro_rules! generic_error {
    ($method:ident, $handler:expr, $code:expr, $level:expr, $locator:expr, $message:literal, $( $args:expr ),+) => {
        $handler.$method($crate::sax::error::SAXParseError {
            error: $code,
            level: $level,
            line: $locator.line(),
            column: $locator.column(),
            system_id: $locator.system_id(),
            public_id: $locator.public_id(),
            message: ::std::borrow::Cow::Owned(format!($message, $( $args ),+)),
        })
    };
    ($method:ident, $handler:expr, $code:expr, $level:expr, $locator:expr, $message:literal) => {
        $handler.$method($crate::sax::error::SAXParseError {
            error: $code,
            level: $level,
            line: $locator.line(),
            column: $locator.column(),
            system_id: $locator.system_id(),
            public_id: $locator.public_id(),
            message: ::std::borrow::Cow::Borrowed($message),
        })
    };
}

macro_rules! fatal_error {
    ($reader:expr, $code:expr, $message:literal, $( $args:expr ),+) => {
        $crate::sax::error::generic_error!(fatal_error, $reader.error_handler, $code, $crate::error::HTMLErrorLevel::FatalError, $reader.locator, $message, $( $args ),+);
        $reader.fatal_error_occurred = true;
    };
    ($reader:expr, $code:expr, $message:literal) => {
        $crate::sax::error::generic_error!(fatal_error, $reader.error_handler, $code, $crate::error::HTMLErrorLevel::FatalError, $reader.locator, $message);
        $reader.fatal_error_occurred = true;
    };
}

macro_rules! warning {
    ($reader:expr, $code:expr, $message:literal, $( $args:expr ),+) => {
        $crate::sax::error::generic_error!(warning, $reader.error_handler, $code, $crate::error::HTMLErrorLevel::Warning, $reader.locator, $message, $( $args ),+)
    };
    ($reader:expr, $code:expr, $message:literal) => {
        $crate::sax::error::generic_error!(warning, $reader.error_handler, $code, $crate::error::HTMLErrorLevel::Warning, $reader.locator, $message)
    };
}

pub(crate) use fatal_error;
pub(crate) use generic_error;
pub(crate) use warning;
