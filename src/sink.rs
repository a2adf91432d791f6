use crate::{
    clock::{Clock, SystemClock},
    destination::Destination,
    flags::Flags,
};
use chrono::{Local, NaiveDateTime};
use std::{
    fmt::{self, Write as _},
    io,
    panic::Location,
    sync::Arc,
};

/// A destination decorated with its own prefix and header flags.
///
/// Sinks are shared as `Arc<Sink>`. Two `Arc`s pointing at the same
/// allocation are the same sink.
pub struct Sink {
    destination: Destination,
    prefix: String,
    flags: Flags,
    clock: Arc<dyn Clock>,
}

impl Sink {
    pub fn new(destination: Destination, prefix: impl Into<String>, flags: Flags) -> Self {
        Self {
            destination,
            prefix: prefix.into(),
            flags,
            clock: Arc::new(SystemClock),
        }
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn destination(&self) -> &Destination {
        &self.destination
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn flags(&self) -> Flags {
        self.flags
    }

    /// Writes every line of `text` to the destination, each preceded by
    /// this sink's header, as a single write.
    ///
    /// One trailing newline in `text` is absorbed rather than producing an
    /// empty final line.
    pub fn print(&self, text: &str, caller: &Location<'_>) -> io::Result<()> {
        let header = self.header(caller);
        let text = text.strip_suffix('\n').unwrap_or(text);

        let mut out = String::with_capacity(text.len() + header.len() + 1);
        for line in text.split('\n') {
            out.push_str(&header);
            out.push_str(line);
            out.push('\n');
        }
        self.destination.write_line(out.as_bytes())
    }

    fn header(&self, caller: &Location<'_>) -> String {
        let mut header = String::new();
        // Writing into a String cannot fail.
        let _ = self.write_header(&mut header, caller);
        header
    }

    fn write_header(&self, out: &mut String, caller: &Location<'_>) -> fmt::Result {
        let flags = self.flags;
        if !flags.contains(Flags::MSG_PREFIX) {
            out.push_str(&self.prefix);
        }

        if flags.intersects(Flags::DATE | Flags::TIME | Flags::MICROSECONDS) {
            let now = self.clock.now();
            let stamp: NaiveDateTime = if flags.contains(Flags::UTC) {
                now.naive_utc()
            } else {
                now.with_timezone(&Local).naive_local()
            };

            if flags.contains(Flags::DATE) {
                write!(out, "{} ", stamp.format("%Y/%m/%d"))?;
            }
            if flags.contains(Flags::MICROSECONDS) {
                write!(out, "{} ", stamp.format("%H:%M:%S%.6f"))?;
            } else if flags.contains(Flags::TIME) {
                write!(out, "{} ", stamp.format("%H:%M:%S"))?;
            }
        }

        if flags.intersects(Flags::SHORT_FILE | Flags::LONG_FILE) {
            let file = if flags.contains(Flags::SHORT_FILE) {
                caller
                    .file()
                    .rsplit(['/', '\\'])
                    .next()
                    .unwrap_or(caller.file())
            } else {
                caller.file()
            };
            write!(out, "{}:{}: ", file, caller.line())?;
        }

        if flags.contains(Flags::MSG_PREFIX) {
            out.push_str(&self.prefix);
        }
        Ok(())
    }
}

impl fmt::Debug for Sink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Sink")
            .field("destination", &self.destination)
            .field("prefix", &self.prefix)
            .field("flags", &self.flags)
            .finish_non_exhaustive()
    }
}
