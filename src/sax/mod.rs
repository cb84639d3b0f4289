pub mod attributes;
pub mod error;
pub mod handler;
pub mod parser;
pub mod source;

use std::sync::{
    Arc, RwLock,
    atomic::{AtomicUsize, Ordering},
};

/// Tracks the position of the current lexical token.
///
/// Handed to [`ContentHandler::set_document_locator`](handler::ContentHandler::set_document_locator)
/// at the start of a parse; the scanner updates it whenever it marks the
/// start of a new token, so handler callbacks can query where the event
/// they are processing began.
pub struct Locator {
    system_id: RwLock<Arc<str>>,
    public_id: RwLock<Option<Arc<str>>>,
    line: AtomicUsize,
    column: AtomicUsize,
}

impl Locator {
    pub(crate) fn new(
        system_id: Arc<str>,
        public_id: Option<Arc<str>>,
        line: usize,
        column: usize,
    ) -> Self {
        Self {
            system_id: RwLock::new(system_id),
            public_id: RwLock::new(public_id),
            line: line.into(),
            column: column.into(),
        }
    }

    pub fn system_id(&self) -> Arc<str> {
        self.system_id.read().unwrap().clone()
    }

    pub fn public_id(&self) -> Option<Arc<str>> {
        self.public_id.read().unwrap().clone()
    }

    /// The line on which the current token started.
    pub fn line(&self) -> usize {
        self.line.load(Ordering::Acquire)
    }

    /// The column at which the current token started.
    pub fn column(&self) -> usize {
        self.column.load(Ordering::Acquire)
    }

    pub(crate) fn set_system_id(&self, system_id: Arc<str>) {
        *self.system_id.write().unwrap() = system_id;
    }

    pub(crate) fn set_public_id(&self, public_id: Option<Arc<str>>) {
        *self.public_id.write().unwrap() = public_id;
    }

    pub(crate) fn set_line(&self, line: usize) {
        self.line.store(line, Ordering::Release);
    }

    pub(crate) fn set_column(&self, column: usize) {
        self.column.store(column, Ordering::Release);
    }
}

impl Default for Locator {
    fn default() -> Self {
        Self::new("".into(), None, 1, 0)
    }
}
