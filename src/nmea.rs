//! NMEA-0183 sentence decoding.
//!
//! Sentences arrive one byte at a time from the receiver UART. [`NmeaParser`]
//! collects them into a fixed buffer, [`parse_sentence`] identifies the kind
//! and hands the remaining fields to the matching decoder in [`sentences`].
//! Every decoder threads a [`Cursor`] through the buffer so the XOR checksum
//! is accumulated as the fields are read, and nothing is trusted until the
//! trailing `*hh` matches.

pub mod cursor;
pub mod parser;
pub mod sentences;

pub use cursor::{Cursor, DegreesMinutes, UtcTime};
pub use parser::{parse_sentence, NmeaParser, SentenceBuf, SENTENCE_BUF_SIZE};
pub use sentences::{Gga, Gll, Rmc, Sentence, SentenceKind, Zda};

/// Running XOR of every byte between `$` and `*`.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct NmeaChecksum(pub u8);

impl NmeaChecksum {
    pub const fn new() -> Self {
        Self(0)
    }

    pub const fn next(self, byte: u8) -> Self {
        Self(self.0 ^ byte)
    }

    pub fn of(bytes: &[u8]) -> Self {
        bytes.iter().fold(Self::new(), |ck, &b| ck.next(b))
    }

    /// The two uppercase hex digits that must follow the `*`.
    pub const fn hex(self) -> [u8; 2] {
        const HEX: &[u8; 16] = b"0123456789ABCDEF";
        [HEX[(self.0 >> 4) as usize], HEX[(self.0 & 0x0f) as usize]]
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum NmeaError {
    #[error("sentence of {0} bytes is too short")]
    TooShort(usize),
    #[error("malformed field at offset {offset}")]
    Malformed { offset: usize },
    #[error("checksum mismatch, expected {expect:02X}")]
    BadChecksum { expect: u8 },
    #[error("sentence longer than {0} bytes")]
    TooLarge(usize),
}
