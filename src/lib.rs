//! Leveled logging over one or more line-oriented sinks.
//!
//! A [`Logger`] holds a verbosity threshold and an ordered list of
//! [`Sink`]s. Messages at or below the threshold are labeled (`D: `, `I: `,
//! `W: `, `E: `, with `+  ` on continuation lines) and printed to every sink
//! in attachment order. Each sink adds its own prefix and date, time or
//! caller decorations ahead of the label.
//!
//! ```ignore
//! use lvlog::{Destination, Flags, Level, Logger};
//!
//! let mut logger = Logger::with_stderr(Level::Info);
//! logger.add_writer(Destination::create("app.log")?, "", Flags::empty())?;
//! logger.info("started\nwith two lines");
//! lvlog::warnf!(logger, "{} retries left", 3);
//! ```
//!
//! The [`global`] module exposes a process-wide default logger for code that
//! has no logger passed to it.

mod macros;

pub mod clock;
pub mod close;
pub mod config;
pub mod destination;
pub mod error;
pub mod flags;
pub mod global;
pub mod level;
pub mod logger;
pub mod sink;

pub use clock::{Clock, SystemClock};
pub use close::{Close, CloseGuard};
pub use config::Config;
pub use destination::{Destination, DestinationId};
pub use error::{LogError, Result};
pub use flags::Flags;
pub use level::{CONTINUATION_LABEL, Level};
pub use logger::Logger;
pub use sink::Sink;
