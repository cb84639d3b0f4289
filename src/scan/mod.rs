//! A table-driven scanner for HTML, allowing for lots of defects.
//!
//! The scanner pulls decoded code points from an [`InputSource`] and
//! reports lexical events to a [`ScanHandler`]. All tokenising decisions
//! live in a flat transition table; recovery from malformed markup is a
//! property of the table itself, so the scanner never fails on input.

use std::sync::Arc;

use crate::{
    PCDATA_CHUNK_LENGTH, chars,
    error::HTMLError,
    sax::{Locator, source::InputSource},
};

/// The events a scanner reports.
///
/// `get_entity` and `cdata_mode_requested` run in the other direction:
/// the scanner queries the handler for the result of the last entity
/// lookup, and for whether the element just opened switched content to
/// CDATA mode.
pub trait ScanHandler {
    /// Report an attribute name without a value.
    fn adup(&mut self, buf: &str);
    /// Report an attribute name; a value will follow.
    fn aname(&mut self, buf: &str);
    /// Report an attribute value.
    fn aval(&mut self, buf: &str);
    /// Report the content of a CDATA section (not a CDATA element).
    fn cdsect(&mut self, buf: &str);
    /// Report a comment.
    fn cmnt(&mut self, buf: &str);
    /// Report a `<!…>` declaration, typically a DOCTYPE.
    fn decl(&mut self, buf: &str);
    /// Report an entity or character reference.
    fn entity(&mut self, buf: &str);
    /// Report EOF.
    fn eof(&mut self, buf: &str);
    /// Report an end-tag.
    fn etag(&mut self, buf: &str);
    /// Report the general identifier (element type name) of a start-tag.
    fn gi(&mut self, buf: &str);
    /// Report character content.
    fn pcdata(&mut self, buf: &str);
    /// Report the data part of a processing instruction.
    fn pi(&mut self, buf: &str);
    /// Report the target part of a processing instruction.
    fn pitarget(&mut self, buf: &str);
    /// Report the close of a start-tag.
    fn stagc(&mut self, buf: &str);
    /// Report the close of an empty-tag.
    fn stage(&mut self, buf: &str);
    /// The value of the last entity or character reference reported, or 0.
    fn get_entity(&self) -> u32;
    /// Polled after each dispatched event; returning `true` switches the
    /// scanner to CDATA content mode, where only `</` is markup.
    fn cdata_mode_requested(&mut self) -> bool {
        false
    }
}

const EOF: i32 = -1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Aname,
    Apos,
    Aval,
    Bb,
    Bbc,
    Bbcd,
    Bbcda,
    Bbcdat,
    Bbcdata,
    Cdata,
    Cdata2,
    Cdsect,
    Cdsect1,
    Cdsect2,
    Com,
    Com2,
    Com3,
    Com4,
    Decl,
    Decl2,
    Done,
    Emptytag,
    Ent,
    Eq,
    Etag,
    Gi,
    Ncr,
    Pcdata,
    Pi,
    Pitarget,
    Quot,
    Stagc,
    Tag,
    Tagws,
    Xncr,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    Adup,
    AdupSave,
    AdupStagc,
    Aname,
    AnameAdup,
    AnameAdupStagc,
    Aval,
    AvalStagc,
    Cdata,
    Cmnt,
    Decl,
    Emptytag,
    Entity,
    EntityStart,
    Etag,
    Gi,
    GiStagc,
    Lt,
    LtPcdata,
    Minus,
    Minus2,
    Minus3,
    Pcdata,
    Pi,
    Pitarget,
    PitargetPi,
    Save,
    Skip,
    Sp,
    Stagc,
    Unget,
    UnsavePcdata,
}

/// The transition table: `(state, match, action, next state)`.
///
/// A match of 0 is the wildcard and fires only if no exact row for the
/// state matches; −1 matches EOF. Rows for one state are contiguous and
/// scanned top to bottom.
#[rustfmt::skip]
const STATE_TABLE: &[(State, i32, Action, State)] = &[
    (State::Aname,    '/' as i32,  Action::AnameAdup,       State::Emptytag),
    (State::Aname,    '=' as i32,  Action::Aname,           State::Aval),
    (State::Aname,    '>' as i32,  Action::AnameAdupStagc,  State::Pcdata),
    (State::Aname,    0,           Action::Save,            State::Aname),
    (State::Aname,    EOF,         Action::AnameAdupStagc,  State::Done),
    (State::Aname,    ' ' as i32,  Action::Aname,           State::Eq),
    (State::Aname,    '\n' as i32, Action::Aname,           State::Eq),
    (State::Aname,    '\t' as i32, Action::Aname,           State::Eq),
    (State::Apos,     '\'' as i32, Action::Aval,            State::Tagws),
    (State::Apos,     0,           Action::Save,            State::Apos),
    (State::Apos,     EOF,         Action::AvalStagc,       State::Done),
    (State::Apos,     ' ' as i32,  Action::Sp,              State::Apos),
    (State::Apos,     '\n' as i32, Action::Sp,              State::Apos),
    (State::Apos,     '\t' as i32, Action::Sp,              State::Apos),
    (State::Aval,     '\'' as i32, Action::Skip,            State::Apos),
    (State::Aval,     '"' as i32,  Action::Skip,            State::Quot),
    (State::Aval,     '>' as i32,  Action::AvalStagc,       State::Pcdata),
    (State::Aval,     0,           Action::Save,            State::Stagc),
    (State::Aval,     EOF,         Action::AvalStagc,       State::Done),
    (State::Aval,     ' ' as i32,  Action::Skip,            State::Aval),
    (State::Aval,     '\n' as i32, Action::Skip,            State::Aval),
    (State::Aval,     '\t' as i32, Action::Skip,            State::Aval),
    (State::Bb,       'C' as i32,  Action::Skip,            State::Bbc),
    (State::Bb,       0,           Action::Skip,            State::Decl),
    (State::Bb,       EOF,         Action::Skip,            State::Done),
    (State::Bbc,      'D' as i32,  Action::Skip,            State::Bbcd),
    (State::Bbc,      0,           Action::Skip,            State::Decl),
    (State::Bbc,      EOF,         Action::Skip,            State::Done),
    (State::Bbcd,     'A' as i32,  Action::Skip,            State::Bbcda),
    (State::Bbcd,     0,           Action::Skip,            State::Decl),
    (State::Bbcd,     EOF,         Action::Skip,            State::Done),
    (State::Bbcda,    'T' as i32,  Action::Skip,            State::Bbcdat),
    (State::Bbcda,    0,           Action::Skip,            State::Decl),
    (State::Bbcda,    EOF,         Action::Skip,            State::Done),
    (State::Bbcdat,   'A' as i32,  Action::Skip,            State::Bbcdata),
    (State::Bbcdat,   0,           Action::Skip,            State::Decl),
    (State::Bbcdat,   EOF,         Action::Skip,            State::Done),
    (State::Bbcdata,  '[' as i32,  Action::Skip,            State::Cdsect),
    (State::Bbcdata,  0,           Action::Skip,            State::Decl),
    (State::Bbcdata,  EOF,         Action::Skip,            State::Done),
    (State::Cdata,    '<' as i32,  Action::Save,            State::Cdata2),
    (State::Cdata,    0,           Action::Save,            State::Cdata),
    (State::Cdata,    EOF,         Action::Pcdata,          State::Done),
    (State::Cdata2,   '/' as i32,  Action::UnsavePcdata,    State::Etag),
    (State::Cdata2,   0,           Action::Save,            State::Cdata),
    (State::Cdata2,   EOF,         Action::UnsavePcdata,    State::Done),
    (State::Cdsect,   ']' as i32,  Action::Save,            State::Cdsect1),
    (State::Cdsect,   0,           Action::Save,            State::Cdsect),
    (State::Cdsect,   EOF,         Action::Skip,            State::Done),
    (State::Cdsect1,  ']' as i32,  Action::Save,            State::Cdsect2),
    (State::Cdsect1,  0,           Action::Save,            State::Cdsect),
    (State::Cdsect1,  EOF,         Action::Skip,            State::Done),
    (State::Cdsect2,  '>' as i32,  Action::Cdata,           State::Pcdata),
    (State::Cdsect2,  0,           Action::Save,            State::Cdsect),
    (State::Cdsect2,  EOF,         Action::Skip,            State::Done),
    (State::Com,      '-' as i32,  Action::Skip,            State::Com2),
    (State::Com,      0,           Action::Save,            State::Com2),
    (State::Com,      EOF,         Action::Cmnt,            State::Done),
    (State::Com2,     '-' as i32,  Action::Skip,            State::Com3),
    (State::Com2,     0,           Action::Save,            State::Com2),
    (State::Com2,     EOF,         Action::Cmnt,            State::Done),
    (State::Com3,     '-' as i32,  Action::Skip,            State::Com4),
    (State::Com3,     0,           Action::Minus,           State::Com2),
    (State::Com3,     EOF,         Action::Cmnt,            State::Done),
    (State::Com4,     '-' as i32,  Action::Minus3,          State::Com4),
    (State::Com4,     '>' as i32,  Action::Cmnt,            State::Pcdata),
    (State::Com4,     0,           Action::Minus2,          State::Com2),
    (State::Com4,     EOF,         Action::Cmnt,            State::Done),
    (State::Decl,     '-' as i32,  Action::Skip,            State::Com),
    (State::Decl,     '[' as i32,  Action::Skip,            State::Bb),
    (State::Decl,     '>' as i32,  Action::Skip,            State::Pcdata),
    (State::Decl,     0,           Action::Save,            State::Decl2),
    (State::Decl,     EOF,         Action::Skip,            State::Done),
    (State::Decl2,    '>' as i32,  Action::Decl,            State::Pcdata),
    (State::Decl2,    0,           Action::Save,            State::Decl2),
    (State::Decl2,    EOF,         Action::Skip,            State::Done),
    (State::Emptytag, '>' as i32,  Action::Emptytag,        State::Pcdata),
    (State::Emptytag, 0,           Action::Save,            State::Aname),
    (State::Emptytag, ' ' as i32,  Action::Skip,            State::Tagws),
    (State::Emptytag, '\n' as i32, Action::Skip,            State::Tagws),
    (State::Emptytag, '\t' as i32, Action::Skip,            State::Tagws),
    (State::Ent,      0,           Action::Entity,          State::Ent),
    (State::Ent,      EOF,         Action::Entity,          State::Done),
    (State::Eq,       '=' as i32,  Action::Skip,            State::Aval),
    (State::Eq,       '>' as i32,  Action::AdupStagc,       State::Pcdata),
    (State::Eq,       0,           Action::AdupSave,        State::Aname),
    (State::Eq,       EOF,         Action::AdupStagc,       State::Done),
    (State::Eq,       ' ' as i32,  Action::Skip,            State::Eq),
    (State::Eq,       '\n' as i32, Action::Skip,            State::Eq),
    (State::Eq,       '\t' as i32, Action::Skip,            State::Eq),
    (State::Etag,     '>' as i32,  Action::Etag,            State::Pcdata),
    (State::Etag,     0,           Action::Save,            State::Etag),
    (State::Etag,     EOF,         Action::Etag,            State::Done),
    (State::Etag,     ' ' as i32,  Action::Skip,            State::Etag),
    (State::Etag,     '\n' as i32, Action::Skip,            State::Etag),
    (State::Etag,     '\t' as i32, Action::Skip,            State::Etag),
    (State::Gi,       '/' as i32,  Action::Skip,            State::Emptytag),
    (State::Gi,       '>' as i32,  Action::GiStagc,         State::Pcdata),
    (State::Gi,       0,           Action::Save,            State::Gi),
    (State::Gi,       EOF,         Action::Skip,            State::Done),
    (State::Gi,       ' ' as i32,  Action::Gi,              State::Tagws),
    (State::Gi,       '\n' as i32, Action::Gi,              State::Tagws),
    (State::Gi,       '\t' as i32, Action::Gi,              State::Tagws),
    (State::Ncr,      0,           Action::Entity,          State::Ncr),
    (State::Ncr,      EOF,         Action::Entity,          State::Done),
    (State::Pcdata,   '&' as i32,  Action::EntityStart,     State::Ent),
    (State::Pcdata,   '<' as i32,  Action::Pcdata,          State::Tag),
    (State::Pcdata,   0,           Action::Save,            State::Pcdata),
    (State::Pcdata,   EOF,         Action::Pcdata,          State::Done),
    (State::Pi,       '>' as i32,  Action::Pi,              State::Pcdata),
    (State::Pi,       0,           Action::Save,            State::Pi),
    (State::Pi,       EOF,         Action::Pi,              State::Done),
    (State::Pitarget, '>' as i32,  Action::PitargetPi,      State::Pcdata),
    (State::Pitarget, 0,           Action::Save,            State::Pitarget),
    (State::Pitarget, EOF,         Action::PitargetPi,      State::Done),
    (State::Pitarget, ' ' as i32,  Action::Pitarget,        State::Pi),
    (State::Pitarget, '\n' as i32, Action::Pitarget,        State::Pi),
    (State::Pitarget, '\t' as i32, Action::Pitarget,        State::Pi),
    (State::Quot,     '"' as i32,  Action::Aval,            State::Tagws),
    (State::Quot,     0,           Action::Save,            State::Quot),
    (State::Quot,     EOF,         Action::AvalStagc,       State::Done),
    (State::Quot,     ' ' as i32,  Action::Sp,              State::Quot),
    (State::Quot,     '\n' as i32, Action::Sp,              State::Quot),
    (State::Quot,     '\t' as i32, Action::Sp,              State::Quot),
    (State::Stagc,    '>' as i32,  Action::AvalStagc,       State::Pcdata),
    (State::Stagc,    0,           Action::Save,            State::Stagc),
    (State::Stagc,    EOF,         Action::AvalStagc,       State::Done),
    (State::Stagc,    ' ' as i32,  Action::Aval,            State::Tagws),
    (State::Stagc,    '\n' as i32, Action::Aval,            State::Tagws),
    (State::Stagc,    '\t' as i32, Action::Aval,            State::Tagws),
    (State::Tag,      '!' as i32,  Action::Skip,            State::Decl),
    (State::Tag,      '?' as i32,  Action::Skip,            State::Pitarget),
    (State::Tag,      '/' as i32,  Action::Skip,            State::Etag),
    (State::Tag,      '<' as i32,  Action::Save,            State::Tag),
    (State::Tag,      0,           Action::Save,            State::Gi),
    (State::Tag,      EOF,         Action::LtPcdata,        State::Done),
    (State::Tag,      ' ' as i32,  Action::Lt,              State::Pcdata),
    (State::Tag,      '\n' as i32, Action::Lt,              State::Pcdata),
    (State::Tag,      '\t' as i32, Action::Lt,              State::Pcdata),
    (State::Tagws,    '/' as i32,  Action::Skip,            State::Emptytag),
    (State::Tagws,    '>' as i32,  Action::Stagc,           State::Pcdata),
    (State::Tagws,    0,           Action::Save,            State::Aname),
    (State::Tagws,    EOF,         Action::Stagc,           State::Done),
    (State::Tagws,    ' ' as i32,  Action::Skip,            State::Tagws),
    (State::Tagws,    '\n' as i32, Action::Skip,            State::Tagws),
    (State::Tagws,    '\t' as i32, Action::Skip,            State::Tagws),
    (State::Xncr,     0,           Action::Entity,          State::Xncr),
    (State::Xncr,     EOF,         Action::Entity,          State::Done),
];

/// Windows-1252 repertoire for the 0x80–0x9F range.
///
/// Documents on the web routinely use numeric character references in this
/// range to mean the Windows glyphs rather than C1 controls.
const WINDOWS_1252: [u32; 32] = [
    0x20AC, 0xFFFD, 0x201A, 0x0192, 0x201E, 0x2026, 0x2020, 0x2021, 0x02C6, 0x2030, 0x0160,
    0x2039, 0x0152, 0xFFFD, 0x017D, 0xFFFD, 0xFFFD, 0x2018, 0x2019, 0x201C, 0x201D, 0x2022,
    0x2013, 0x2014, 0x02DC, 0x2122, 0x0161, 0x203A, 0x0153, 0xFFFD, 0x017E, 0x0178,
];

fn code_is_letter_or_digit(ch: i32) -> bool {
    u32::try_from(ch)
        .ok()
        .and_then(char::from_u32)
        .is_some_and(chars::is_letter_or_digit)
}

fn code_is_digit(ch: i32) -> bool {
    matches!(ch, 0x30..=0x39)
}

fn code_is_hex_letter(ch: i32) -> bool {
    matches!(ch, 0x41..=0x46 | 0x61..=0x66)
}

/// The table-driven HTML scanner.
pub struct HTMLScanner {
    locator: Arc<Locator>,
    current_line: usize,
    current_column: usize,
    state: State,
    next_state: State,
    output: String,
    pushback: Option<i32>,
}

impl HTMLScanner {
    pub fn new(locator: Arc<Locator>) -> Self {
        Self {
            locator,
            current_line: 1,
            current_column: 0,
            state: State::Pcdata,
            next_state: State::Pcdata,
            output: String::with_capacity(200),
            pushback: None,
        }
    }

    /// Scan HTML source, reporting lexical events to `h`.
    ///
    /// Runs until EOF; the final event is always `eof`. The only error
    /// conditions are I/O failures from the source and a corrupted
    /// transition table.
    pub fn scan(
        &mut self,
        src: &mut InputSource<'_>,
        h: &mut impl ScanHandler,
    ) -> Result<(), HTMLError> {
        self.state = State::Pcdata;
        while self.state != State::Done {
            let mut ch = self.read(src)?;

            if ch == '\r' as i32 {
                // expect LF next
                ch = self.read(src)?;
                if ch != '\n' as i32 {
                    self.unread(ch);
                    ch = '\n' as i32;
                }
            }

            if ch == '\n' as i32 {
                self.current_line += 1;
                self.current_column = 0;
            } else {
                self.current_column += 1;
            }

            // Control characters other than LF and TAB are dropped
            if !(ch >= 0x20 || ch == '\n' as i32 || ch == '\t' as i32 || ch == EOF) {
                continue;
            }

            // Search the state table: exact rows short-circuit, the
            // wildcard row is remembered until the state block ends.
            let mut action = None;
            for &(state, m, a, next) in STATE_TABLE {
                if state != self.state {
                    if action.is_some() {
                        break;
                    }
                    continue;
                }
                if m == 0 {
                    action = Some(a);
                    self.next_state = next;
                } else if m == ch {
                    action = Some(a);
                    self.next_state = next;
                    break;
                }
            }
            let Some(action) = action else {
                return Err(HTMLError::ScannerNoTransition);
            };

            match action {
                Action::Adup => {
                    h.adup(&self.output);
                    self.output.clear();
                }
                Action::AdupSave => {
                    h.adup(&self.output);
                    self.output.clear();
                    self.save(ch, h);
                }
                Action::AdupStagc => {
                    h.adup(&self.output);
                    self.output.clear();
                    h.stagc("");
                }
                Action::Aname => {
                    h.aname(&self.output);
                    self.output.clear();
                }
                Action::AnameAdup => {
                    h.aname(&self.output);
                    self.output.clear();
                    h.adup("");
                }
                Action::AnameAdupStagc => {
                    h.aname(&self.output);
                    self.output.clear();
                    h.adup("");
                    h.stagc("");
                }
                Action::Aval => {
                    h.aval(&self.output);
                    self.output.clear();
                }
                Action::AvalStagc => {
                    h.aval(&self.output);
                    self.output.clear();
                    h.stagc("");
                }
                Action::Cdata => {
                    self.mark();
                    // suppress the final "]]" in the buffer
                    let length = self.output.len();
                    if length > 1 {
                        self.output.truncate(length - 2);
                    }
                    h.cdsect(&self.output);
                    self.output.clear();
                }
                Action::EntityStart => {
                    h.pcdata(&self.output);
                    self.output.clear();
                    self.save(ch, h);
                }
                Action::Entity => self.scan_entity(ch, h),
                Action::Etag => {
                    h.etag(&self.output);
                    self.output.clear();
                }
                Action::Decl => {
                    h.decl(&self.output);
                    self.output.clear();
                }
                Action::Gi => {
                    h.gi(&self.output);
                    self.output.clear();
                }
                Action::GiStagc => {
                    h.gi(&self.output);
                    self.output.clear();
                    h.stagc("");
                }
                Action::Lt => {
                    self.mark();
                    self.save('<' as i32, h);
                    self.save(ch, h);
                }
                Action::LtPcdata => {
                    self.mark();
                    self.save('<' as i32, h);
                    h.pcdata(&self.output);
                    self.output.clear();
                }
                Action::Pcdata => {
                    self.mark();
                    h.pcdata(&self.output);
                    self.output.clear();
                }
                Action::Cmnt => {
                    self.mark();
                    h.cmnt(&self.output);
                    self.output.clear();
                }
                Action::Minus3 => {
                    self.save('-' as i32, h);
                    self.save(' ' as i32, h);
                }
                Action::Minus2 => {
                    self.save('-' as i32, h);
                    self.save(' ' as i32, h);
                    self.save('-' as i32, h);
                    self.save(ch, h);
                }
                Action::Minus => {
                    self.save('-' as i32, h);
                    self.save(ch, h);
                }
                Action::Pi => {
                    self.mark();
                    h.pi(&self.output);
                    self.output.clear();
                }
                Action::Pitarget => {
                    h.pitarget(&self.output);
                    self.output.clear();
                }
                Action::PitargetPi => {
                    h.pitarget(&self.output);
                    self.output.clear();
                    h.pi("");
                }
                Action::Save => self.save(ch, h),
                Action::Skip => {}
                Action::Sp => self.save(' ' as i32, h),
                Action::Stagc => {
                    h.stagc(&self.output);
                    self.output.clear();
                }
                Action::Emptytag => {
                    self.mark();
                    if !self.output.is_empty() {
                        h.gi(&self.output);
                        self.output.clear();
                    }
                    h.stage("");
                }
                Action::Unget => {
                    self.unread(ch);
                    self.current_column = self.current_column.saturating_sub(1);
                }
                Action::UnsavePcdata => {
                    self.output.pop();
                    h.pcdata(&self.output);
                    self.output.clear();
                }
            }

            if h.cdata_mode_requested() {
                self.next_state = State::Cdata;
            }
            self.state = self.next_state;
        }
        h.eof("");
        Ok(())
    }

    /// One character of an `&…` reference.
    ///
    /// Valid reference characters accumulate; the first invalid character
    /// terminates the reference, asks the handler to resolve it, and is
    /// ungot unless it is the `;` terminator.
    fn scan_entity(&mut self, ch: i32, h: &mut impl ScanHandler) {
        self.mark();
        if self.state == State::Ent && ch == '#' as i32 {
            self.next_state = State::Ncr;
            self.save(ch, h);
            return;
        }
        if self.state == State::Ncr && (ch == 'x' as i32 || ch == 'X' as i32) {
            self.next_state = State::Xncr;
            self.save(ch, h);
            return;
        }
        if self.state == State::Ent && code_is_letter_or_digit(ch) {
            self.save(ch, h);
            return;
        }
        if self.state == State::Ncr && code_is_digit(ch) {
            self.save(ch, h);
            return;
        }
        if self.state == State::Xncr && (code_is_digit(ch) || code_is_hex_letter(ch)) {
            self.save(ch, h);
            return;
        }

        // The whole entity reference has been collected
        h.entity(&self.output[1..]);
        let mut ent = h.get_entity();
        if ent != 0 {
            self.output.clear();
            if (0x80..=0x9F).contains(&ent) {
                ent = WINDOWS_1252[(ent - 0x80) as usize];
            }
            if ent < 0x20 {
                // Control becomes space
                ent = 0x20;
            }
            self.save(ent as i32, h);
            if ch != ';' as i32 {
                self.unread(ch);
                self.current_column = self.current_column.saturating_sub(1);
            }
        } else {
            self.unread(ch);
            self.current_column = self.current_column.saturating_sub(1);
        }
        self.next_state = State::Pcdata;
    }

    fn read(&mut self, src: &mut InputSource<'_>) -> Result<i32, HTMLError> {
        if let Some(ch) = self.pushback.take() {
            return Ok(ch);
        }
        Ok(src.next_char()?.map_or(EOF, |c| c as i32))
    }

    fn unread(&mut self, ch: i32) {
        self.pushback = Some(ch);
    }

    /// Record the current position as the start of the current token.
    fn mark(&mut self) {
        self.locator.set_line(self.current_line);
        self.locator.set_column(self.current_column);
    }

    fn save(&mut self, ch: i32, h: &mut impl ScanHandler) {
        if self.output.len() >= PCDATA_CHUNK_LENGTH
            && matches!(self.state, State::Pcdata | State::Cdata)
        {
            // Return a chunk of PCDATA rather than growing without bound
            h.pcdata(&self.output);
            self.output.clear();
        }
        if let Some(c) = u32::try_from(ch).ok().and_then(char::from_u32) {
            self.output.push(c);
        }
    }
}
