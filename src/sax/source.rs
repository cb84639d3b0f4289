use std::{fs::File, io::Read, path::Path};

use crate::error::HTMLError;

pub(crate) const INPUT_CHUNK: usize = 4096;
const GROW_THRESHOLD: usize = 64;

/// Turns a byte stream into decoded code points for the scanner.
///
/// The input is decoded as UTF-8. Malformed sequences are replaced with
/// U+FFFD and counted; the parser reports the count as one SAX warning
/// after the scan instead of aborting, so damaged documents still produce
/// a complete event stream.
pub struct InputSource<'a> {
    source: Box<dyn Read + 'a>,
    buffer: Vec<u8>,
    /// Start position of the undecoded range of `buffer`
    buffer_next: usize,
    /// End position of data read into `buffer`
    buffer_end: usize,
    decoded: String,
    /// Start position of unused data in `decoded`
    decoded_next: usize,
    /// Whether `source` has reached EOF
    eof: bool,
    /// Number of malformed bytes replaced with U+FFFD so far
    malformed: usize,

    system_id: Option<Box<str>>,
    public_id: Option<Box<str>>,
}

impl<'a> InputSource<'a> {
    /// Construct an [`InputSource`] from the HTML document resource `reader`.
    pub fn from_reader(reader: impl Read + 'a) -> Self {
        Self {
            source: Box::new(reader),
            buffer: vec![0; INPUT_CHUNK],
            buffer_next: 0,
            buffer_end: 0,
            decoded: String::new(),
            decoded_next: 0,
            eof: false,
            malformed: 0,
            system_id: None,
            public_id: None,
        }
    }

    /// Construct an [`InputSource`] from in-memory document content.
    pub fn from_content(html: &str) -> Self {
        Self {
            source: Box::new(std::io::empty()),
            buffer: vec![],
            buffer_next: 0,
            buffer_end: 0,
            decoded: html.to_owned(),
            decoded_next: 0,
            eof: true,
            malformed: 0,
            system_id: None,
            public_id: None,
        }
    }

    /// Open `path` and construct an [`InputSource`] whose system id is the
    /// path itself.
    pub fn from_file(path: impl AsRef<Path>) -> Result<InputSource<'static>, HTMLError> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let mut source = InputSource::from_reader(file);
        source.system_id = Some(path.to_string_lossy().into());
        Ok(source)
    }

    pub fn system_id(&self) -> Option<&str> {
        self.system_id.as_deref()
    }

    pub fn public_id(&self) -> Option<&str> {
        self.public_id.as_deref()
    }

    pub fn set_system_id(&mut self, system_id: impl Into<Box<str>>) {
        self.system_id = Some(system_id.into());
    }

    pub fn set_public_id(&mut self, public_id: impl Into<Box<str>>) {
        self.public_id = Some(public_id.into());
    }

    /// The number of malformed input bytes replaced with U+FFFD.
    pub fn malformed_count(&self) -> usize {
        self.malformed
    }

    /// Read the next code point, refilling and decoding as needed.
    pub(crate) fn next_char(&mut self) -> Result<Option<char>, HTMLError> {
        loop {
            if let Some(c) = self.decoded[self.decoded_next..].chars().next() {
                self.decoded_next += c.len_utf8();
                if self.decoded_next >= INPUT_CHUNK {
                    self.decoded.drain(..self.decoded_next);
                    self.decoded_next = 0;
                }
                return Ok(Some(c));
            }
            if self.eof && self.buffer_next == self.buffer_end {
                return Ok(None);
            }
            self.grow()?;
        }
    }

    fn grow(&mut self) -> Result<(), HTMLError> {
        if !self.eof {
            let rem = self.buffer_end - self.buffer_next;
            if rem < GROW_THRESHOLD {
                self.buffer.copy_within(self.buffer_next..self.buffer_end, 0);
                self.buffer_next = 0;
                self.buffer_end = rem;
                let mut read = 1;
                while self.buffer_end < self.buffer.len() && read != 0 {
                    read = self.source.read(&mut self.buffer[self.buffer_end..])?;
                    self.buffer_end += read;
                }
                self.eof = read == 0;
            }
        }
        self.decode();
        Ok(())
    }

    /// Decode as much of the byte buffer as possible.
    ///
    /// An incomplete multi-byte sequence at the end of the buffer is kept
    /// for the next read unless the source is exhausted.
    fn decode(&mut self) {
        while self.buffer_next < self.buffer_end {
            let chunk = &self.buffer[self.buffer_next..self.buffer_end];
            match std::str::from_utf8(chunk) {
                Ok(s) => {
                    self.decoded.push_str(s);
                    self.buffer_next = self.buffer_end;
                }
                Err(e) => {
                    let valid = e.valid_up_to();
                    // from_utf8 guarantees the prefix is valid UTF-8
                    self.decoded
                        .push_str(unsafe { std::str::from_utf8_unchecked(&chunk[..valid]) });
                    self.buffer_next += valid;
                    match e.error_len() {
                        Some(len) => {
                            self.decoded.push('\u{FFFD}');
                            self.buffer_next += len;
                            self.malformed += len;
                        }
                        None if self.eof => {
                            // truncated sequence at end of input
                            self.malformed += self.buffer_end - self.buffer_next;
                            self.buffer_next = self.buffer_end;
                            self.decoded.push('\u{FFFD}');
                        }
                        None => return,
                    }
                }
            }
        }
    }
}

impl Default for InputSource<'_> {
    fn default() -> Self {
        Self::from_content("")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drain(source: &mut InputSource<'_>) -> String {
        let mut out = String::new();
        while let Some(c) = source.next_char().unwrap() {
            out.push(c);
        }
        out
    }

    #[test]
    fn decodes_utf8_across_chunk_boundaries() {
        let text = "收藏品".repeat(4096);
        let mut source = InputSource::from_reader(text.as_bytes());
        assert_eq!(drain(&mut source), text);
        assert_eq!(source.malformed_count(), 0);
    }

    #[test]
    fn malformed_bytes_are_replaced_and_counted() {
        let mut source = InputSource::from_reader(&b"a\xFF\xFEb"[..]);
        assert_eq!(drain(&mut source), "a\u{FFFD}\u{FFFD}b");
        assert_eq!(source.malformed_count(), 2);
    }

    #[test]
    fn truncated_sequence_at_eof() {
        let mut source = InputSource::from_reader(&b"ab\xE6\x94"[..]);
        assert_eq!(drain(&mut source), "ab\u{FFFD}");
        assert!(source.malformed_count() > 0);
    }
}
