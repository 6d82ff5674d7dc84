//! Text renderings of the GPS status for the HTTP status document and the
//! log.

use core::fmt::{self, Write};

use chrono::{Datelike, Timelike};

use crate::{status::GpsStatus, Position};

/// Stand-in for coordinates without a fix. JSON has no NaN.
pub const INVALID_READING: f32 = -512.0;

/// The GPS members of the status JSON object, without surrounding braces.
pub fn write_json<W: Write>(w: &mut W, status: &GpsStatus) -> fmt::Result {
    let pos = status.location().unwrap_or(Position {
        lat: INVALID_READING,
        lon: INVALID_READING,
        alt: INVALID_READING,
    });
    write!(
        w,
        "\"latitude\": {:.6}, \"longitude\": {:.6}, \"altitude\": {:.3}, ",
        pos.lat, pos.lon, pos.alt
    )?;

    match status.utc_now() {
        Ok(t) => write!(
            w,
            "\"time\": \"{:04}-{:02}-{:02} {:02}:{:02}:{:02}\", ",
            t.year(),
            t.month(),
            t.day(),
            t.hour(),
            t.minute(),
            t.second()
        )?,
        Err(_) => w.write_str("\"time\": \"0000-00-00 00:00:00\", ")?,
    }

    write!(
        w,
        "\"sat_num\": {}, \"gps_valid\": {}",
        status.satellites(),
        u8::from(status.position_valid())
    )
}

/// Two lines of unsigned degrees with hemisphere letters.
pub fn write_coordinates<W: Write>(w: &mut W, pos: &Position) -> fmt::Result {
    write!(
        w,
        "{:.4}°{}\n{:.4}°{}",
        pos.lat.abs(),
        if pos.lat >= 0.0 { 'N' } else { 'S' },
        pos.lon.abs(),
        if pos.lon >= 0.0 { 'E' } else { 'W' }
    )
}
