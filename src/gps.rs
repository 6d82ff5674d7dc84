use crate::{nmea::NmeaParser, status::GpsStatus};

/// A receive path that hands out one byte at a time without blocking.
pub trait ByteSource {
    type Error;

    fn read(&mut self) -> nb::Result<u8, Self::Error>;
}

/// Owns the receiver's byte source together with the parser and the status it
/// feeds. Meant to be polled from the main loop between other periodic work.
pub struct Gps<S> {
    source: S,
    parser: NmeaParser,
    status: GpsStatus,

    pub count: usize,
    pub accepted: usize,
    pub rejected: usize,
    pub read_errors: usize,
}

impl<S: ByteSource> Gps<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            parser: NmeaParser::new(),
            status: GpsStatus::new(),
            count: 0,
            accepted: 0,
            rejected: 0,
            read_errors: 0,
        }
    }

    /// Drain whatever the source has buffered. Returns the number of
    /// sentences accepted during this call.
    pub fn poll(&mut self) -> usize {
        let had_time = self.status.time_valid();
        let mut accepted = 0;
        loop {
            match self.source.read() {
                Ok(b) => {
                    self.count += 1;
                    match self.parser.process_byte(b) {
                        Some(Ok(sentence)) => {
                            self.status.apply(&sentence);
                            accepted += 1;
                        }
                        Some(Err(_)) => self.rejected += 1,
                        None => {}
                    }
                }
                Err(nb::Error::WouldBlock) => break,
                Err(nb::Error::Other(_)) => {
                    // Try again on the next poll rather than spin on a
                    // faulted UART
                    self.read_errors += 1;
                    log_error!("GPS UART read error");
                    break;
                }
            }
        }
        self.accepted += accepted;

        if !had_time && self.status.time_valid() {
            log_info!("GPS time acquired");
        }
        accepted
    }

    pub fn status(&self) -> &GpsStatus {
        &self.status
    }

    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }
}
