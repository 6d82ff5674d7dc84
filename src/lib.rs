#![no_std]

use core::fmt::{self, Write};

use tinyvec::ArrayVec;

#[macro_use]
mod logging;

pub mod gps;
pub mod nmea;
pub mod report;
pub mod status;

pub use gps::{ByteSource, Gps};
pub use nmea::{parse_sentence, NmeaError, NmeaParser, Sentence};
pub use status::{GpsStatus, StatusError};

/// Fixed-capacity text buffer. Writing past the end fails instead of
/// truncating.
#[derive(Default)]
pub struct FmtBuf<const N: usize = 256>(pub ArrayVec<[u8; N]>);

impl<const N: usize> Write for FmtBuf<N> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        if self.0.len() + s.len() > N {
            return Err(fmt::Error);
        }
        self.0.extend_from_slice(s.as_bytes());
        Ok(())
    }
}

impl<const N: usize> FmtBuf<N> {
    pub fn as_str(&self) -> Option<&str> {
        core::str::from_utf8(self.0.as_slice()).ok()
    }

    pub fn new() -> Self {
        Self(Default::default())
    }
}

/// Signed decimal degrees, south and west negative. Altitude in meters above
/// mean sea level.
#[derive(Debug, Default, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Position {
    pub lat: f32,
    pub lon: f32,
    pub alt: f32,
}
