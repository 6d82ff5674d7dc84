//! Per-kind sentence decoders.
//!
//! Each decoder starts with a cursor positioned just after the `,` that
//! follows the kind code, reads its fields in order and finishes with the
//! checksum. Decoded fields are returned only when the whole sentence checks
//! out.

use super::{
    cursor::{Cursor, UtcTime},
    NmeaError,
};

/// The sentence kinds we decode, by their three-letter code.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SentenceKind {
    /// Global positioning system fix data
    Gga,
    /// Geographic position
    Gll,
    /// Recommended minimum specific data
    Rmc,
    /// Time and date
    Zda,
}

impl SentenceKind {
    pub fn from_code(code: [u8; 3]) -> Option<Self> {
        match &code {
            b"GGA" => Some(Self::Gga),
            b"GLL" => Some(Self::Gll),
            b"RMC" => Some(Self::Rmc),
            b"ZDA" => Some(Self::Zda),
            _ => None,
        }
    }
}

#[derive(Debug, Default, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Gga {
    pub time: UtcTime,
    pub lat: f32,
    pub lon: f32,
    pub fix_quality: u8,
    pub satellites: u8,
    pub hdop: f32,
    pub altitude: f32,
    pub geoid_sep: f32,
}

#[derive(Debug, Default, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Gll {
    pub lat: f32,
    pub lon: f32,
    pub time: UtcTime,
    pub valid: bool,
}

#[derive(Debug, Default, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Rmc {
    pub time: UtcTime,
    pub valid: bool,
    pub lat: f32,
    pub lon: f32,
}

#[derive(Debug, Default, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Zda {
    pub time: UtcTime,
    pub day: u8,
    pub month: u8,
    pub year: u16,
    /// Local zone offset. Decoded but not applied.
    pub zone_hour: u8,
    pub zone_min: u8,
}

#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Sentence {
    Gga(Gga),
    Gll(Gll),
    Rmc(Rmc),
    Zda(Zda),
    /// Checksummed correctly but not a kind we decode.
    Other { kind: [u8; 3] },
}

// An empty field keeps the positive sign, `negative` flips it, anything but
// `positive` is a malformed sentence.
fn hemisphere(
    cur: Cursor,
    buf: &[u8],
    magnitude: f32,
    positive: u8,
    negative: u8,
) -> Result<(Cursor, f32), NmeaError> {
    match cur.char(buf) {
        None => Ok((cur, magnitude)),
        Some((next, c)) if c == positive => Ok((next, magnitude)),
        Some((next, c)) if c == negative => Ok((next, -magnitude)),
        Some(_) => Err(NmeaError::Malformed { offset: cur.pos }),
    }
}

fn latitude(cur: Cursor, buf: &[u8]) -> Result<(Cursor, f32), NmeaError> {
    let (cur, dm) = cur.dm(buf);
    let cur = cur.comma(buf)?;
    hemisphere(cur, buf, dm.to_degrees(), b'N', b'S')
}

fn longitude(cur: Cursor, buf: &[u8]) -> Result<(Cursor, f32), NmeaError> {
    let (cur, dm) = cur.dm(buf);
    let cur = cur.comma(buf)?;
    hemisphere(cur, buf, dm.to_degrees(), b'E', b'W')
}

/// `A` is valid, `V` or an empty field is not.
fn validity(cur: Cursor, buf: &[u8]) -> Result<(Cursor, bool), NmeaError> {
    match cur.char(buf) {
        None => Ok((cur, false)),
        Some((next, b'A')) => Ok((next, true)),
        Some((next, b'V')) => Ok((next, false)),
        Some(_) => Err(NmeaError::Malformed { offset: cur.pos }),
    }
}

/// A unit letter that must be `unit` when present.
fn unit(cur: Cursor, buf: &[u8], unit: u8) -> Result<Cursor, NmeaError> {
    match cur.char(buf) {
        None => Ok(cur),
        Some((next, c)) if c == unit => Ok(next),
        Some(_) => Err(NmeaError::Malformed { offset: cur.pos }),
    }
}

/// `hhmmss.sss,llll.ll,a,yyyyy.yy,a,q,nn,h.h,a.a,M,g.g,M,...`
pub fn decode_gga(cur: Cursor, buf: &[u8]) -> Result<Gga, NmeaError> {
    let (cur, time) = cur.hms(buf);
    let cur = cur.comma(buf)?;
    let (cur, lat) = latitude(cur, buf)?;
    let cur = cur.comma(buf)?;
    let (cur, lon) = longitude(cur, buf)?;
    let cur = cur.comma(buf)?;
    let (cur, fix_quality) = cur.integer(buf);
    let cur = cur.comma(buf)?;
    let (cur, satellites) = cur.integer(buf);
    let cur = cur.comma(buf)?;
    let (cur, hdop) = cur.decimal(buf);
    let cur = cur.comma(buf)?;
    let (cur, altitude) = cur.decimal(buf);
    let cur = cur.comma(buf)?;
    let cur = unit(cur, buf, b'M')?;
    let cur = cur.comma(buf)?;
    let (cur, geoid_sep) = cur.decimal(buf);
    // Geoid unit, DGPS age and station id are not used
    cur.skip_to_checksum(buf).verify(buf)?;

    Ok(Gga {
        time,
        lat,
        lon,
        fix_quality: fix_quality as u8,
        satellites: satellites as u8,
        hdop,
        altitude,
        geoid_sep,
    })
}

/// `llll.ll,a,yyyyy.yy,a,hhmmss.ss,A,...`
pub fn decode_gll(cur: Cursor, buf: &[u8]) -> Result<Gll, NmeaError> {
    let (cur, lat) = latitude(cur, buf)?;
    let cur = cur.comma(buf)?;
    let (cur, lon) = longitude(cur, buf)?;
    let cur = cur.comma(buf)?;
    let (cur, time) = cur.hms(buf);
    let cur = cur.comma(buf)?;
    let (cur, valid) = validity(cur, buf)?;
    cur.skip_to_checksum(buf).verify(buf)?;

    Ok(Gll {
        lat,
        lon,
        time,
        valid,
    })
}

/// `hhmmss.ss,A,llll.ll,a,yyyyy.yy,a,...`
///
/// Speed, course, date and magnetic variation follow but are not used.
pub fn decode_rmc(cur: Cursor, buf: &[u8]) -> Result<Rmc, NmeaError> {
    let (cur, time) = cur.hms(buf);
    let cur = cur.comma(buf)?;
    let (cur, valid) = validity(cur, buf)?;
    let cur = cur.comma(buf)?;
    let (cur, lat) = latitude(cur, buf)?;
    let cur = cur.comma(buf)?;
    let (cur, lon) = longitude(cur, buf)?;
    cur.skip_to_checksum(buf).verify(buf)?;

    Ok(Rmc {
        time,
        valid,
        lat,
        lon,
    })
}

/// `hhmmss.ss,dd,mm,yyyy,zh,zm`
pub fn decode_zda(cur: Cursor, buf: &[u8]) -> Result<Zda, NmeaError> {
    let (cur, time) = cur.hms(buf);
    let cur = cur.comma(buf)?;
    let (cur, day) = cur.integer(buf);
    let cur = cur.comma(buf)?;
    let (cur, month) = cur.integer(buf);
    let cur = cur.comma(buf)?;
    let (cur, year) = cur.integer(buf);
    let cur = cur.comma(buf)?;
    let (cur, zone_hour) = cur.integer(buf);
    let cur = cur.comma(buf)?;
    let (cur, zone_min) = cur.integer(buf);
    cur.verify(buf)?;

    Ok(Zda {
        time,
        day: day as u8,
        month: month as u8,
        year: year as u16,
        zone_hour: zone_hour as u8,
        zone_min: zone_min as u8,
    })
}

/// Only the checksum of a kind we do not decode is checked.
pub fn decode_other(cur: Cursor, buf: &[u8]) -> Result<(), NmeaError> {
    cur.skip_to_checksum(buf).verify(buf)
}
