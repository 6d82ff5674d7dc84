use super::{NmeaChecksum, NmeaError};

// Further fractional digits are consumed and checksummed but do not change
// the value; ten digits would overflow the u32 accumulator.
const MAX_FRACTION_DIGITS: u32 = 9;

/// Read position within a sentence plus the checksum of everything before it.
///
/// Every decoder takes a cursor by value and hands back an advanced one, so a
/// failed decode never leaves a half-updated checksum behind.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct Cursor {
    pub pos: usize,
    pub checksum: NmeaChecksum,
}

/// UTC time of day as sent in `hhmmss.sss` fields.
#[derive(Debug, Default, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct UtcTime {
    pub hour: u8,
    pub min: u8,
    pub sec: f32,
}

/// A `dddmm.mmmm` coordinate before conversion to decimal degrees.
#[derive(Debug, Default, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DegreesMinutes {
    pub degrees: u32,
    pub minutes: f32,
}

impl DegreesMinutes {
    pub fn to_degrees(self) -> f32 {
        self.degrees as f32 + self.minutes / 60.0
    }
}

fn pow10(exp: u32) -> f32 {
    (0..exp).fold(1.0, |acc, _| acc * 10.0)
}

// Largest f32 strictly below `n`, for n >= 1.
fn just_below(n: u32) -> f32 {
    f32::from_bits((n as f32).to_bits() - 1)
}

impl Cursor {
    pub const fn new() -> Self {
        Self {
            pos: 0,
            checksum: NmeaChecksum::new(),
        }
    }

    fn step(self, byte: u8) -> Self {
        Self {
            pos: self.pos + 1,
            checksum: self.checksum.next(byte),
        }
    }

    fn peek(self, buf: &[u8]) -> Option<u8> {
        buf.get(self.pos).copied()
    }

    /// Fold the next `n` bytes into the checksum without looking at them.
    pub fn skip(self, buf: &[u8], n: usize) -> Result<Self, NmeaError> {
        let bytes = buf
            .get(self.pos..self.pos + n)
            .ok_or(NmeaError::TooShort(buf.len()))?;
        Ok(bytes.iter().fold(self, |cur, &b| cur.step(b)))
    }

    /// Consecutive decimal digits. An empty field reads as zero.
    pub fn integer(self, buf: &[u8]) -> (Self, u32) {
        let mut cur = self;
        let mut value = 0_u32;
        while let Some(b @ b'0'..=b'9') = cur.peek(buf) {
            value = value.wrapping_mul(10).wrapping_add(u32::from(b - b'0'));
            cur = cur.step(b);
        }
        (cur, value)
    }

    /// Optional `.` followed by digits, as a value in `[0, 1)`.
    fn fraction(self, buf: &[u8]) -> (Self, f32) {
        if self.peek(buf) != Some(b'.') {
            return (self, 0.0);
        }
        let mut cur = self.step(b'.');
        let mut value = 0_u32;
        let mut digits = 0_u32;
        while let Some(b @ b'0'..=b'9') = cur.peek(buf) {
            if digits < MAX_FRACTION_DIGITS {
                value = value * 10 + u32::from(b - b'0');
                digits += 1;
            }
            cur = cur.step(b);
        }
        (cur, value as f32 / pow10(digits))
    }

    /// `-?\d*(\.\d*)?`
    pub fn decimal(self, buf: &[u8]) -> (Self, f32) {
        let (cur, negative) = match self.peek(buf) {
            Some(b'-') => (self.step(b'-'), true),
            _ => (self, false),
        };
        let (cur, int) = cur.integer(buf);
        let (cur, frac) = cur.fraction(buf);
        let value = int as f32 + frac;
        (cur, if negative { -value } else { value })
    }

    /// A one-letter field. `None` means the field is empty and nothing was
    /// consumed.
    pub fn char(self, buf: &[u8]) -> Option<(Self, u8)> {
        match self.peek(buf) {
            None | Some(b',') | Some(b'*') => None,
            Some(b) => Some((self.step(b), b)),
        }
    }

    pub fn comma(self, buf: &[u8]) -> Result<Self, NmeaError> {
        match self.peek(buf) {
            Some(b',') => Ok(self.step(b',')),
            _ => Err(NmeaError::Malformed { offset: self.pos }),
        }
    }

    /// `hhmmss.sss`. Leading digits beyond six fold into the hour and a
    /// shorter run loses hour digits first, so `32432` is 03:24:32.
    pub fn hms(self, buf: &[u8]) -> (Self, UtcTime) {
        let (cur, value) = self.integer(buf);
        let (cur, frac) = cur.fraction(buf);
        let whole = value % 100;
        // A long fraction must not round up into the next second
        let time = UtcTime {
            hour: (value / 10_000 % 100) as u8,
            min: (value / 100 % 100) as u8,
            sec: (whole as f32 + frac).min(just_below(whole + 1)),
        };
        (cur, time)
    }

    /// `dddmm.mmmm`
    pub fn dm(self, buf: &[u8]) -> (Self, DegreesMinutes) {
        let (cur, value) = self.integer(buf);
        let (cur, frac) = cur.fraction(buf);
        let dm = DegreesMinutes {
            degrees: value / 100,
            minutes: (value % 100) as f32 + frac,
        };
        (cur, dm)
    }

    /// Fold everything up to the `*` into the checksum.
    pub fn skip_to_checksum(self, buf: &[u8]) -> Self {
        let mut cur = self;
        while let Some(b) = cur.peek(buf) {
            if b == b'*' {
                break;
            }
            cur = cur.step(b);
        }
        cur
    }

    /// Match `*hh` against the accumulated checksum.
    pub fn verify(self, buf: &[u8]) -> Result<(), NmeaError> {
        let [hi, lo] = self.checksum.hex();
        match buf.get(self.pos..self.pos + 3) {
            Some(&[b'*', h, l]) if h == hi && l == lo => Ok(()),
            _ => Err(NmeaError::BadChecksum {
                expect: self.checksum.0,
            }),
        }
    }
}
