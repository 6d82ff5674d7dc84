use tinyvec::ArrayVec;

use super::{
    cursor::Cursor,
    sentences::{self, Sentence, SentenceKind},
    NmeaError,
};
use crate::status::GpsStatus;

/// Longest sentence body kept between `$` and the line ending. NMEA-0183
/// caps a whole line at 82 bytes.
pub const SENTENCE_BUF_SIZE: usize = 100;

#[derive(Default, Debug, Copy, Clone)]
pub struct SentenceBuf<const N: usize = SENTENCE_BUF_SIZE>(pub ArrayVec<[u8; N]>);

impl<const N: usize> SentenceBuf<N> {
    pub fn as_str(&self) -> Option<&str> {
        core::str::from_utf8(self.0.as_slice()).ok()
    }
}

impl<const N: usize> core::ops::Deref for SentenceBuf<N> {
    type Target = ArrayVec<[u8; N]>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<const N: usize> core::ops::DerefMut for SentenceBuf<N> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

/// Decode one sentence body, i.e. everything between `$` and the line ending.
pub fn parse_sentence(buf: &[u8]) -> Result<Sentence, NmeaError> {
    if buf.len() < 6 {
        return Err(NmeaError::TooShort(buf.len()));
    }
    // Talker id, then the kind code
    let cur = Cursor::new().skip(buf, 2)?;
    let kind = [buf[2], buf[3], buf[4]];
    let cur = cur.skip(buf, 3)?;

    let Some(known) = SentenceKind::from_code(kind) else {
        sentences::decode_other(cur, buf)?;
        return Ok(Sentence::Other { kind });
    };

    let cur = cur.comma(buf)?;
    let sentence = match known {
        SentenceKind::Gga => Sentence::Gga(sentences::decode_gga(cur, buf)?),
        SentenceKind::Gll => Sentence::Gll(sentences::decode_gll(cur, buf)?),
        SentenceKind::Rmc => Sentence::Rmc(sentences::decode_rmc(cur, buf)?),
        SentenceKind::Zda => Sentence::Zda(sentences::decode_zda(cur, buf)?),
    };
    Ok(sentence)
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum ParserState {
    /// Waiting for `$`
    Idle,
    /// Inside a sentence
    Collecting,
}
use ParserState::*;

pub struct NmeaParser<const N: usize = SENTENCE_BUF_SIZE> {
    state: ParserState,
    buf: SentenceBuf<N>,
}

impl<const N: usize> Default for NmeaParser<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> NmeaParser<N> {
    pub fn new() -> Self {
        Self {
            state: Idle,
            buf: SentenceBuf::default(),
        }
    }

    pub fn is_collecting(&self) -> bool {
        self.state == Collecting
    }

    /// Advance the state machine by one byte. Returns a result whenever a
    /// sentence ends, either at its line ending or by overflowing the buffer.
    pub fn process_byte(&mut self, b: u8) -> Option<Result<Sentence, NmeaError>> {
        match (self.state, b) {
            (_, b'$') => {
                self.buf.clear();
                self.state = Collecting;
                None
            }
            (Idle, _) => None,
            (Collecting, b'\r' | b'\n') => {
                self.state = Idle;
                if self.buf.is_empty() {
                    return None;
                }
                let result = parse_sentence(&self.buf);
                match &result {
                    Ok(_) => log_debug!("GPS parsed: {}", self.buf.as_str().unwrap_or("<binary>")),
                    Err(e) => log_warn!(
                        "bad sentence ({}): {}",
                        e,
                        self.buf.as_str().unwrap_or("<binary>")
                    ),
                }
                self.buf.clear();
                Some(result)
            }
            (Collecting, _) => {
                if self.buf.try_push(b).is_some() {
                    log_warn!("GPS buffer overflow");
                    self.buf.clear();
                    self.state = Idle;
                    Some(Err(NmeaError::TooLarge(N)))
                } else {
                    None
                }
            }
        }
    }

    /// Feed one byte from the receiver, folding any completed sentence into
    /// `status`. Returns `true` only when a sentence was just accepted.
    pub fn feed(&mut self, status: &mut GpsStatus, b: u8) -> bool {
        match self.process_byte(b) {
            Some(Ok(sentence)) => {
                status.apply(&sentence);
                true
            }
            Some(Err(_)) | None => false,
        }
    }
}
