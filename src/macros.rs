//! Format-string front ends for the logging methods.
//!
//! With a leading format literal the macros log through the process-wide
//! default logger; with a leading logger expression they log through that
//! logger. Arguments are only rendered when the level is enabled.
//!
//! ```ignore
//! lvlog::infof!("listening on {addr}");
//! lvlog::warnf!(logger, "retry {} of {}", attempt, max);
//! ```

#[macro_export]
macro_rules! logf {
    ($lvl:expr, $fmt:literal $(, $arg:expr)* $(,)?) => {
        $crate::global::log_fmt($lvl, ::core::format_args!($fmt $(, $arg)*))
    };
    ($logger:expr, $lvl:expr, $($arg:tt)+) => {
        $logger.log_fmt($lvl, ::core::format_args!($($arg)+))
    };
}

#[macro_export]
macro_rules! debugf {
    ($fmt:literal $(, $arg:expr)* $(,)?) => {
        $crate::global::debug_fmt(::core::format_args!($fmt $(, $arg)*))
    };
    ($logger:expr, $($arg:tt)+) => {
        $logger.debug_fmt(::core::format_args!($($arg)+))
    };
}

#[macro_export]
macro_rules! infof {
    ($fmt:literal $(, $arg:expr)* $(,)?) => {
        $crate::global::info_fmt(::core::format_args!($fmt $(, $arg)*))
    };
    ($logger:expr, $($arg:tt)+) => {
        $logger.info_fmt(::core::format_args!($($arg)+))
    };
}

#[macro_export]
macro_rules! warnf {
    ($fmt:literal $(, $arg:expr)* $(,)?) => {
        $crate::global::warn_fmt(::core::format_args!($fmt $(, $arg)*))
    };
    ($logger:expr, $($arg:tt)+) => {
        $logger.warn_fmt(::core::format_args!($($arg)+))
    };
}

#[macro_export]
macro_rules! errorf {
    ($fmt:literal $(, $arg:expr)* $(,)?) => {
        $crate::global::error_fmt(::core::format_args!($fmt $(, $arg)*))
    };
    ($logger:expr, $($arg:tt)+) => {
        $logger.error_fmt(::core::format_args!($($arg)+))
    };
}

/// `closef!(closable, "fmt", ..)` closes through the default logger,
/// `closef!(logger => closable, "fmt", ..)` through `logger`.
#[macro_export]
macro_rules! closef {
    ($logger:expr => $closable:expr, $($arg:tt)+) => {
        $logger.close_fmt($closable, ::core::format_args!($($arg)+))
    };
    ($closable:expr, $($arg:tt)+) => {
        $crate::global::close_fmt($closable, ::core::format_args!($($arg)+))
    };
}
