//! The process-wide default logger.
//!
//! Starts at [`Level::Error`] with a single standard error sink stamped with
//! date and time. Libraries should prefer taking a [`Logger`] from their
//! caller; these functions exist for the application's entry point and for
//! code that has no logger to hand.

use crate::{
    close::Close, config::Config, destination::Destination, error::Result, flags::Flags,
    level::Level, logger::Logger, sink::Sink,
};
use parking_lot::RwLock;
use std::{
    fmt,
    sync::{Arc, LazyLock},
};

// Readers take `read_recursive`: `Display` and `Close` impls run under the
// read lock and may log again while a writer is queued.
static DEFAULT: LazyLock<RwLock<Logger>> =
    LazyLock::new(|| RwLock::new(Logger::with_stderr(Level::Error)));

/// Replaces the default logger with one built from `config`.
pub fn init(config: &Config) {
    replace(config.build());
}

/// Replaces the default logger, returning the previous one.
pub fn replace(logger: Logger) -> Logger {
    std::mem::replace(&mut *DEFAULT.write(), logger)
}

/// Runs `f` with shared access to the default logger.
///
/// The read lock is held while `f` runs. Logging from inside `f` is fine,
/// but calling [`set_level`], [`add_sink`], [`add_writer`], [`replace`] or
/// [`init`] from inside `f` deadlocks the calling thread.
pub fn with_default<R>(f: impl FnOnce(&Logger) -> R) -> R {
    f(&*DEFAULT.read_recursive())
}

pub fn set_level(level: Level) -> Level {
    DEFAULT.write().set_level(level)
}

pub fn level() -> Level {
    DEFAULT.read_recursive().level()
}

pub fn is_debug() -> bool {
    DEFAULT.read_recursive().is_debug()
}

pub fn is_info() -> bool {
    DEFAULT.read_recursive().is_info()
}

pub fn is_warn() -> bool {
    DEFAULT.read_recursive().is_warn()
}

pub fn add_sink(sink: Arc<Sink>) -> Result<()> {
    DEFAULT.write().add_sink(sink)
}

pub fn add_writer(
    destination: Destination,
    prefix: impl Into<String>,
    flags: Flags,
) -> Result<Arc<Sink>> {
    DEFAULT.write().add_writer(destination, prefix, flags)
}

#[track_caller]
pub fn log(level: Level, msg: &str) {
    DEFAULT.read_recursive().log(level, msg);
}

#[track_caller]
pub fn log_fmt(level: Level, args: fmt::Arguments<'_>) {
    DEFAULT.read_recursive().log_fmt(level, args);
}

#[track_caller]
pub fn debug(msg: &str) {
    DEFAULT.read_recursive().debug(msg);
}

#[track_caller]
pub fn debug_fmt(args: fmt::Arguments<'_>) {
    DEFAULT.read_recursive().debug_fmt(args);
}

#[track_caller]
pub fn info(msg: &str) {
    DEFAULT.read_recursive().info(msg);
}

#[track_caller]
pub fn info_fmt(args: fmt::Arguments<'_>) {
    DEFAULT.read_recursive().info_fmt(args);
}

#[track_caller]
pub fn warn(msg: &str) {
    DEFAULT.read_recursive().warn(msg);
}

#[track_caller]
pub fn warn_fmt(args: fmt::Arguments<'_>) {
    DEFAULT.read_recursive().warn_fmt(args);
}

#[track_caller]
pub fn error(msg: &str) {
    DEFAULT.read_recursive().error(msg);
}

#[track_caller]
pub fn error_fmt(args: fmt::Arguments<'_>) {
    DEFAULT.read_recursive().error_fmt(args);
}

#[track_caller]
pub fn close<C: Close + ?Sized>(closable: &mut C, context: &str) {
    DEFAULT.read_recursive().close(closable, context);
}

#[track_caller]
pub fn close_fmt<C: Close + ?Sized>(closable: &mut C, context: fmt::Arguments<'_>) {
    DEFAULT.read_recursive().close_fmt(closable, context);
}
