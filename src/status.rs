//! Last-known GPS state, merged from whichever sentences decoded successfully.
//!
//! Each sentence kind owns a group of fields and overwrites only that group,
//! so the record is a merge over time rather than a snapshot of one sentence.
//! Nothing here tracks how old a field is.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};

use crate::{
    nmea::{Sentence, UtcTime},
    Position,
};

/// Years at or below this are what an empty ZDA leaves behind, not a date.
pub const MIN_TRUSTED_YEAR: u16 = 1000;

#[derive(Debug, Copy, Clone, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StatusError {
    #[error("no date received from GPS yet")]
    NoTime,
    #[error("GPS reports no valid fix")]
    NoFix,
    #[error("GPS date is not a calendar date")]
    InvalidDate,
    #[error("GPS time of day is out of range")]
    InvalidTime,
}

#[derive(Debug, Default, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GpsStatus {
    lat: f32,
    lon: f32,
    alt: f32,
    valid: bool,
    satellites: u8,

    hour: u8,
    min: u8,
    sec: f32,
    year: u16,
    month: u8,
    day: u8,
    time_valid: bool,
}

impl GpsStatus {
    pub const fn new() -> Self {
        Self {
            lat: 0.0,
            lon: 0.0,
            alt: 0.0,
            valid: false,
            satellites: 0,
            hour: 0,
            min: 0,
            sec: 0.0,
            year: 0,
            month: 0,
            day: 0,
            time_valid: false,
        }
    }

    /// Fold a successfully decoded sentence into the record.
    pub fn apply(&mut self, sentence: &Sentence) {
        match *sentence {
            Sentence::Gga(gga) => {
                self.lat = gga.lat;
                self.lon = gga.lon;
                self.valid = gga.fix_quality > 0;
                self.alt = gga.altitude;
                self.satellites = gga.satellites;
                self.set_time(gga.time);
            }
            Sentence::Gll(gll) => {
                self.lat = gll.lat;
                self.lon = gll.lon;
                self.valid = gll.valid;
                self.set_time(gll.time);
            }
            Sentence::Rmc(rmc) => {
                self.valid = rmc.valid;
                self.lat = rmc.lat;
                self.lon = rmc.lon;
                self.set_time(rmc.time);
            }
            Sentence::Zda(zda) => {
                self.set_time(zda.time);
                self.year = zda.year;
                self.month = zda.month;
                self.day = zda.day;
            }
            Sentence::Other { kind } => {
                log_trace!(
                    "ignoring sentence kind {}",
                    core::str::from_utf8(&kind).unwrap_or("???")
                );
                return;
            }
        }
        // Stays true once a real date has been seen, even if the receiver
        // later loses its fix.
        self.time_valid = self.year > MIN_TRUSTED_YEAR;
    }

    fn set_time(&mut self, time: UtcTime) {
        self.hour = time.hour;
        self.min = time.min;
        self.sec = time.sec;
    }

    /// Current UTC date and time as last reported by the receiver.
    pub fn utc_now(&self) -> Result<DateTime<Utc>, StatusError> {
        if !self.time_valid {
            return Err(StatusError::NoTime);
        }
        let date = NaiveDate::from_ymd_opt(self.year.into(), self.month.into(), self.day.into())
            .ok_or(StatusError::InvalidDate)?;
        let whole = self.sec as u32;
        let nanos = (((self.sec - whole as f32) * 1e9) as u32).min(999_999_999);
        let time = NaiveTime::from_hms_nano_opt(self.hour.into(), self.min.into(), whole, nanos)
            .ok_or(StatusError::InvalidTime)?;
        Ok(DateTime::from_naive_utc_and_offset(
            NaiveDateTime::new(date, time),
            Utc,
        ))
    }

    /// Last reported position, unless the latest report said it is invalid.
    pub fn location(&self) -> Result<Position, StatusError> {
        if !self.valid {
            return Err(StatusError::NoFix);
        }
        Ok(Position {
            lat: self.lat,
            lon: self.lon,
            alt: self.alt,
        })
    }

    pub fn satellites(&self) -> u8 {
        self.satellites
    }

    pub fn position_valid(&self) -> bool {
        self.valid
    }

    pub fn time_valid(&self) -> bool {
        self.time_valid
    }

    /// `(hour, minute, second)` of the latest time-bearing sentence.
    pub fn time_of_day(&self) -> (u8, u8, f32) {
        (self.hour, self.min, self.sec)
    }

    /// `(year, month, day)` of the latest ZDA sentence.
    pub fn date(&self) -> (u16, u8, u8) {
        (self.year, self.month, self.day)
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Datelike, Timelike};

    use super::*;
    use crate::nmea::{parse_sentence, Gga, Gll, Rmc, Zda};

    fn apply(status: &mut GpsStatus, body: &[u8]) {
        status.apply(&parse_sentence(body).unwrap());
    }

    #[test]
    fn starts_empty() {
        let status = GpsStatus::new();
        assert_eq!(status, GpsStatus::default());
        assert_eq!(status.utc_now(), Err(StatusError::NoTime));
        assert_eq!(status.location(), Err(StatusError::NoFix));
        assert_eq!(status.satellites(), 0);
    }

    #[test]
    fn gga_owns_position_altitude_and_satellites() {
        let mut status = GpsStatus::new();
        status.apply(&Sentence::Gga(Gga {
            time: UtcTime {
                hour: 12,
                min: 16,
                sec: 13.0,
            },
            lat: 24.5,
            lon: 65.25,
            fix_quality: 1,
            satellites: 5,
            hdop: 3.3,
            altitude: -1.0,
            geoid_sep: 0.0,
        }));
        assert_eq!(
            status.location(),
            Ok(Position {
                lat: 24.5,
                lon: 65.25,
                alt: -1.0
            })
        );
        assert_eq!(status.satellites(), 5);
        assert_eq!(status.time_of_day(), (12, 16, 13.0));
        // GGA carries no date
        assert!(!status.time_valid());
    }

    #[test]
    fn gga_without_fix_is_invalid() {
        let mut status = GpsStatus::new();
        apply(&mut status, b"GNGGA,,,,,,0,00,25.5,,,,,,*64");
        assert!(!status.position_valid());
        assert_eq!(status.location(), Err(StatusError::NoFix));
    }

    #[test]
    fn gll_and_rmc_keep_altitude_and_satellites() {
        let mut status = GpsStatus::new();
        apply(
            &mut status,
            b"GNGGA,121613.000,2455.2122,N,6532.8547,E,1,05,3.3,-1.0,M,0.0,M,,*64",
        );
        status.apply(&Sentence::Gll(Gll {
            lat: 1.0,
            lon: 2.0,
            time: UtcTime::default(),
            valid: true,
        }));
        assert_eq!(status.location().unwrap().alt, -1.0);
        assert_eq!(status.satellites(), 5);

        status.apply(&Sentence::Rmc(Rmc {
            valid: false,
            ..Rmc::default()
        }));
        assert_eq!(status.location(), Err(StatusError::NoFix));
        assert_eq!(status.satellites(), 5);
    }

    #[test]
    fn zda_makes_time_trustworthy() {
        let mut status = GpsStatus::new();
        apply(&mut status, b"GNZDA,060618.133,23,02,2023,00,00*40");
        assert!(status.time_valid());
        let now = status.utc_now().unwrap();
        assert_eq!((now.year(), now.month(), now.day()), (2023, 2, 23));
        assert_eq!((now.hour(), now.minute(), now.second()), (6, 6, 18));
        assert!((now.nanosecond() as i64 - 133_000_000).abs() < 10_000);
    }

    #[test]
    fn long_fraction_stays_within_the_second() {
        let mut status = GpsStatus::new();
        apply(&mut status, b"GNZDA,235959.9999999,31,12,2023,00,00*42");
        let now = status.utc_now().unwrap();
        assert_eq!((now.year(), now.month(), now.day()), (2023, 12, 31));
        assert_eq!((now.hour(), now.minute(), now.second()), (23, 59, 59));
        assert!(now.nanosecond() < 1_000_000_000);
    }

    #[test]
    fn leap_second_is_rejected() {
        let mut status = GpsStatus::new();
        status.apply(&Sentence::Zda(Zda {
            time: UtcTime {
                hour: 23,
                min: 59,
                sec: 60.0,
            },
            year: 2016,
            month: 12,
            day: 31,
            ..Zda::default()
        }));
        assert_eq!(status.utc_now(), Err(StatusError::InvalidTime));
    }

    #[test]
    fn time_stays_trusted_after_position_sentences() {
        let mut status = GpsStatus::new();
        apply(&mut status, b"GNZDA,001313.000,29,01,2023,00,00*41");
        apply(&mut status, b"GNRMC,,V,,,,,,,,,,M*4E");
        assert!(status.time_valid());
        // The clock follows the latest sentence, the date the latest ZDA
        let now = status.utc_now().unwrap();
        assert_eq!((now.hour(), now.minute(), now.second()), (0, 0, 0));
        assert_eq!(now.day(), 29);
    }

    #[test]
    fn empty_zda_clears_date() {
        let mut status = GpsStatus::new();
        apply(&mut status, b"GNZDA,001313.000,29,01,2023,00,00*41");
        apply(&mut status, b"GNZDA,,,,,,*56");
        assert!(!status.time_valid());
        assert_eq!(status.utc_now(), Err(StatusError::NoTime));
    }

    #[test]
    fn impossible_date_is_rejected() {
        let mut status = GpsStatus::new();
        status.apply(&Sentence::Zda(Zda {
            year: 2023,
            month: 13,
            day: 1,
            ..Zda::default()
        }));
        assert!(status.time_valid());
        assert_eq!(status.utc_now(), Err(StatusError::InvalidDate));

        status.apply(&Sentence::Zda(Zda {
            time: UtcTime {
                hour: 25,
                min: 0,
                sec: 0.0,
            },
            year: 2023,
            month: 1,
            day: 1,
            ..Zda::default()
        }));
        assert_eq!(status.utc_now(), Err(StatusError::InvalidTime));
    }

    #[test]
    fn other_sentences_change_nothing() {
        let mut status = GpsStatus::new();
        apply(&mut status, b"GNZDA,001313.000,29,01,2023,00,00*41");
        let before = status;
        status.apply(&Sentence::Other { kind: *b"GSV" });
        assert_eq!(status, before);
    }

    #[test]
    fn same_sentence_twice_is_idempotent() {
        let body = b"GNGGA,121613.000,2455.2122,N,6532.8547,E,1,05,3.3,-1.0,M,0.0,M,,*64";
        let mut once = GpsStatus::new();
        apply(&mut once, body);
        let mut twice = once;
        apply(&mut twice, body);
        assert_eq!(once, twice);
    }
}
