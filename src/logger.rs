use crate::{
    close::{Close, CloseGuard},
    destination::Destination,
    error::{LogError, Result},
    flags::Flags,
    level::{CONTINUATION_LABEL, Level},
    sink::Sink,
};
use std::{fmt, panic::Location, sync::Arc};

/// Routes labeled messages at or below a verbosity threshold to an ordered
/// set of sinks.
///
/// Every accepted message is labeled once and printed to each sink in the
/// order the sinks were attached. Write failures are dropped; logging never
/// fails the caller.
#[derive(Debug)]
pub struct Logger {
    threshold: Level,
    sinks: Vec<Arc<Sink>>,
}

impl Logger {
    pub fn new(threshold: Level, sink: Arc<Sink>) -> Self {
        Self {
            threshold,
            sinks: vec![sink],
        }
    }

    /// A logger printing to standard error with date and time stamps.
    pub fn with_stderr(threshold: Level) -> Self {
        let sink = Sink::new(Destination::stderr(), "", Flags::STD);
        Self::new(threshold, Arc::new(sink))
    }

    /// Replaces the threshold, returning the previous one.
    pub fn set_level(&mut self, threshold: Level) -> Level {
        std::mem::replace(&mut self.threshold, threshold)
    }

    pub fn level(&self) -> Level {
        self.threshold
    }

    pub fn enabled(&self, level: Level) -> bool {
        level <= self.threshold
    }

    pub fn is_debug(&self) -> bool {
        self.enabled(Level::Debug)
    }

    pub fn is_info(&self) -> bool {
        self.enabled(Level::Info)
    }

    pub fn is_warn(&self) -> bool {
        self.enabled(Level::Warn)
    }

    /// Attached sinks in fan-out order.
    pub fn sinks(&self) -> &[Arc<Sink>] {
        &self.sinks
    }

    /// Attaches `sink` after the existing sinks.
    ///
    /// Fails if this exact sink is already attached, or if an attached sink
    /// writes to the same destination.
    pub fn add_sink(&mut self, sink: Arc<Sink>) -> Result<()> {
        for attached in &self.sinks {
            if Arc::ptr_eq(attached, &sink) {
                return Err(LogError::DuplicateSink);
            }
            if attached.destination().id() == sink.destination().id() {
                return Err(LogError::DuplicateDestination);
            }
        }
        self.sinks.push(sink);
        Ok(())
    }

    /// Wraps `destination` in a new sink and attaches it.
    pub fn add_writer(
        &mut self,
        destination: Destination,
        prefix: impl Into<String>,
        flags: Flags,
    ) -> Result<Arc<Sink>> {
        let sink = Arc::new(Sink::new(destination, prefix, flags));
        self.add_sink(sink.clone())?;
        Ok(sink)
    }

    #[track_caller]
    pub fn log(&self, level: Level, msg: &str) {
        if self.enabled(level) {
            self.emit(level, msg, Location::caller());
        }
    }

    /// Formats `args` only when `level` is enabled.
    #[track_caller]
    pub fn log_fmt(&self, level: Level, args: fmt::Arguments<'_>) {
        if !self.enabled(level) {
            return;
        }
        match args.as_str() {
            Some(msg) => self.emit(level, msg, Location::caller()),
            None => self.emit(level, &args.to_string(), Location::caller()),
        }
    }

    #[track_caller]
    pub fn debug(&self, msg: &str) {
        self.log(Level::Debug, msg);
    }

    #[track_caller]
    pub fn debug_fmt(&self, args: fmt::Arguments<'_>) {
        self.log_fmt(Level::Debug, args);
    }

    #[track_caller]
    pub fn info(&self, msg: &str) {
        self.log(Level::Info, msg);
    }

    #[track_caller]
    pub fn info_fmt(&self, args: fmt::Arguments<'_>) {
        self.log_fmt(Level::Info, args);
    }

    #[track_caller]
    pub fn warn(&self, msg: &str) {
        self.log(Level::Warn, msg);
    }

    #[track_caller]
    pub fn warn_fmt(&self, args: fmt::Arguments<'_>) {
        self.log_fmt(Level::Warn, args);
    }

    /// Error level is always enabled.
    #[track_caller]
    pub fn error(&self, msg: &str) {
        self.log(Level::Error, msg);
    }

    #[track_caller]
    pub fn error_fmt(&self, args: fmt::Arguments<'_>) {
        self.log_fmt(Level::Error, args);
    }

    /// Closes `closable`, logging `Close <context> caused: <error>` at error
    /// level if that fails.
    #[track_caller]
    pub fn close<C: Close + ?Sized>(&self, closable: &mut C, context: &str) {
        self.close_at(closable, format_args!("{context}"), Location::caller());
    }

    #[track_caller]
    pub fn close_fmt<C: Close + ?Sized>(&self, closable: &mut C, context: fmt::Arguments<'_>) {
        self.close_at(closable, context, Location::caller());
    }

    /// Takes ownership of `resource` and closes it through [`Logger::close`]
    /// when the returned guard goes out of scope.
    #[track_caller]
    pub fn close_on_drop<C: Close>(
        &self,
        resource: C,
        context: impl Into<String>,
    ) -> CloseGuard<'_, C> {
        CloseGuard::new(self, resource, context.into(), Location::caller())
    }

    pub(crate) fn close_at<C: Close + ?Sized>(
        &self,
        closable: &mut C,
        context: fmt::Arguments<'_>,
        caller: &Location<'_>,
    ) {
        if let Err(err) = closable.close() {
            let context = context.to_string();
            let msg = if context.is_empty() {
                format!("Close caused: {err}")
            } else {
                format!("Close {context} caused: {err}")
            };
            self.emit(Level::Error, &msg, caller);
        }
    }

    fn emit(&self, level: Level, msg: &str, caller: &Location<'_>) {
        let text = relabel(level, msg);
        for sink in &self.sinks {
            let _ = sink.print(&text, caller);
        }
    }
}

/// Labels the first line of `msg` with the level label and every following
/// line with the continuation label.
fn relabel(level: Level, msg: &str) -> String {
    let label = level.label();
    let mut text = String::with_capacity(label.len() + msg.len());
    text.push_str(label);
    for (i, line) in msg.split('\n').enumerate() {
        if i > 0 {
            text.push('\n');
            text.push_str(CONTINUATION_LABEL);
        }
        text.push_str(line);
    }
    text
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::{clock::tests::FakeClock, destination::tests::Capture};
    use test_case::test_case;

    fn setup(threshold: Level) -> (Capture, Logger) {
        let capture = Capture::new();
        let sink = Sink::new(capture.destination("mem"), "", Flags::empty());
        (capture, Logger::new(threshold, Arc::new(sink)))
    }

    fn log_all_levels(logger: &Logger, marker: &str) {
        logger.debug(&format!("{marker}-debug"));
        logger.info(&format!("{marker}-info"));
        logger.warn(&format!("{marker}-warn"));
        logger.error(&format!("{marker}-error"));
    }

    /// Closes once, then fails like a file closed twice.
    struct Shut {
        name: &'static str,
        open: bool,
    }

    impl Close for Shut {
        type Error = String;

        fn close(&mut self) -> std::result::Result<(), Self::Error> {
            if self.open {
                self.open = false;
                Ok(())
            } else {
                Err(format!("close {}: file already closed", self.name))
            }
        }
    }

    #[test_case(Level::Error, "E: 1-error\n"; "error")]
    #[test_case(Level::Warn, "W: 1-warn\nE: 1-error\n"; "warn")]
    #[test_case(Level::Info, "I: 1-info\nW: 1-warn\nE: 1-error\n"; "info")]
    #[test_case(Level::Debug, "D: 1-debug\nI: 1-info\nW: 1-warn\nE: 1-error\n"; "debug")]
    fn threshold_filters_levels(threshold: Level, expected: &str) {
        let (capture, logger) = setup(threshold);
        log_all_levels(&logger, "1");
        assert_eq!(expected, capture.contents());
    }

    #[test]
    fn emitted_iff_level_within_threshold() {
        for threshold in Level::ALL {
            for level in Level::ALL {
                let (capture, logger) = setup(threshold);
                logger.log(level, "msg");
                assert_eq!(
                    level <= threshold,
                    !capture.contents().is_empty(),
                    "level {level} at threshold {threshold}"
                );
            }
        }
    }

    #[test_case(Level::Error, false, false, false)]
    #[test_case(Level::Warn, false, false, true)]
    #[test_case(Level::Info, false, true, true)]
    #[test_case(Level::Debug, true, true, true)]
    fn accessors_track_threshold(threshold: Level, debug: bool, info: bool, warn: bool) {
        let (_capture, mut logger) = setup(Level::Debug);
        logger.set_level(threshold);
        assert_eq!(debug, logger.is_debug());
        assert_eq!(info, logger.is_info());
        assert_eq!(warn, logger.is_warn());
    }

    #[test]
    fn set_level_returns_previous() {
        let (_capture, mut logger) = setup(Level::Error);
        assert_eq!(Level::Error, logger.set_level(Level::Info));
        assert_eq!(Level::Info, logger.set_level(Level::Warn));
        assert_eq!(Level::Warn, logger.level());
    }

    #[test]
    fn filtering_restored_after_round_trip() {
        let (capture, mut logger) = setup(Level::Warn);
        log_all_levels(&logger, "a");
        let before = capture.contents();

        logger.set_level(Level::Debug);
        logger.set_level(Level::Warn);
        log_all_levels(&logger, "a");

        assert_eq!(format!("{before}{before}"), capture.contents());
    }

    #[test]
    fn formatted_variants_match_plain() {
        let (capture, logger) = setup(Level::Debug);
        let what = "SEE";
        logger.debug_fmt(format_args!("WE SHOULD {what} THIS DEBUG MESSAGE"));
        logger.info_fmt(format_args!("WE SHOULD {} THIS INFO MESSAGE", what));
        logger.warn_fmt(format_args!("WE SHOULD {what} THIS WARNING MESSAGE"));
        logger.error_fmt(format_args!("plain"));
        assert_eq!(
            "D: WE SHOULD SEE THIS DEBUG MESSAGE\n\
             I: WE SHOULD SEE THIS INFO MESSAGE\n\
             W: WE SHOULD SEE THIS WARNING MESSAGE\n\
             E: plain\n",
            capture.contents()
        );
    }

    #[test]
    fn disabled_format_arguments_are_not_rendered() {
        struct Loud;
        impl fmt::Display for Loud {
            fn fmt(&self, _f: &mut fmt::Formatter<'_>) -> fmt::Result {
                panic!("rendered a filtered message");
            }
        }

        let (capture, logger) = setup(Level::Error);
        logger.debug_fmt(format_args!("{}", Loud));
        assert_eq!("", capture.contents());
    }

    #[test]
    fn multi_line_message_is_relabeled() {
        let (capture, logger) = setup(Level::Error);
        logger.error("line1\nline2");
        assert_eq!("E: line1\n+  line2\n", capture.contents());

        let (capture, logger) = setup(Level::Info);
        logger.info("a\nb\nc");
        assert_eq!("I: a\n+  b\n+  c\n", capture.contents());
    }

    #[test]
    fn trailing_newline_becomes_empty_continuation() {
        assert_eq!("E: msg\n+  ", relabel(Level::Error, "msg\n"));
        assert_eq!("W: ", relabel(Level::Warn, ""));
    }

    #[test]
    fn duplicate_sink_rejected() {
        let (_capture, mut logger) = setup(Level::Error);
        let sink = Arc::new(Sink::new(Capture::new().destination("other"), "", Flags::empty()));

        logger.add_sink(sink.clone()).unwrap();
        let err = logger.add_sink(sink).unwrap_err();
        assert!(matches!(err, LogError::DuplicateSink));
        assert_eq!("duplicate sink added", err.to_string());
        assert_eq!(2, logger.sinks().len());
    }

    #[test]
    fn duplicate_destination_rejected() {
        let (_capture, mut logger) = setup(Level::Error);
        let dest = Capture::new().destination("file");

        logger.add_writer(dest.clone(), "", Flags::empty()).unwrap();
        let err = logger.add_writer(dest.clone(), "other ", Flags::STD).unwrap_err();
        assert_eq!("duplicate destination added", err.to_string());

        let sink = Arc::new(Sink::new(dest, "", Flags::empty()));
        assert!(matches!(
            logger.add_sink(sink),
            Err(LogError::DuplicateDestination)
        ));
        assert_eq!(2, logger.sinks().len());
    }

    #[test]
    fn initial_sink_counts_for_duplicates() {
        let (_capture, mut logger) = setup(Level::Error);
        let initial = logger.sinks()[0].clone();
        assert!(matches!(
            logger.add_sink(initial),
            Err(LogError::DuplicateSink)
        ));
    }

    #[test]
    fn distinct_destinations_accepted() {
        let mut logger = Logger::with_stderr(Level::Error);
        logger
            .add_writer(Capture::new().destination("a"), "", Flags::empty())
            .unwrap();
        logger
            .add_writer(Capture::new().destination("b"), "", Flags::empty())
            .unwrap();
        assert!(matches!(
            logger.add_writer(Destination::stderr(), "", Flags::empty()),
            Err(LogError::DuplicateDestination)
        ));
        assert_eq!(3, logger.sinks().len());
    }

    #[test]
    fn fan_out_in_attachment_order_with_own_decoration() {
        let clock = Arc::new(FakeClock::fixed());
        let first = Capture::new();
        let second = Capture::new();
        let shared = Capture::new();

        let sink = Sink::new(first.destination("first"), "[1] ", Flags::empty());
        let mut logger = Logger::new(Level::Info, Arc::new(sink));
        let sink = Sink::new(second.destination("second"), "[2] ", Flags::TIME | Flags::UTC)
            .with_clock(clock);
        logger.add_sink(Arc::new(sink)).unwrap();

        // Both writers feed one buffer so the write order is observable.
        logger
            .add_writer(shared.destination("shared-a"), "a:", Flags::empty())
            .unwrap();
        logger
            .add_writer(shared.destination("shared-b"), "b:", Flags::empty())
            .unwrap();

        logger.info("hello\nworld");

        assert_eq!("[1] I: hello\n[1] +  world\n", first.contents());
        assert_eq!(
            "[2] 01:23:23 I: hello\n[2] 01:23:23 +  world\n",
            second.contents()
        );
        assert_eq!(
            "a:I: hello\na:+  world\nb:I: hello\nb:+  world\n",
            shared.contents()
        );
    }

    #[test]
    fn write_failures_do_not_stop_fan_out() {
        let (capture, mut logger) = setup(Level::Error);
        let dead = Capture::new().destination("dead");
        logger.add_writer(dead.clone(), "", Flags::empty()).unwrap();
        let after = Capture::new();
        logger
            .add_writer(after.destination("after"), "", Flags::empty())
            .unwrap();

        dead.close().unwrap();
        logger.error("still here");

        assert_eq!("E: still here\n", capture.contents());
        assert_eq!("E: still here\n", after.contents());
    }

    #[test]
    fn close_logs_each_failure() {
        let (capture, logger) = setup(Level::Error);
        let mut file = Shut {
            name: "/tmp/x",
            open: true,
        };

        logger.close(&mut file, "");
        logger.close(&mut file, "");
        logger.close(&mut file, "msg1 msg2");
        logger.close_fmt(&mut file, format_args!("msg1 {}", "msg2"));

        assert_eq!(
            "E: Close caused: close /tmp/x: file already closed\n\
             E: Close msg1 msg2 caused: close /tmp/x: file already closed\n\
             E: Close msg1 msg2 caused: close /tmp/x: file already closed\n",
            capture.contents()
        );
    }

    #[test]
    fn only_failed_close_is_logged() {
        let (capture, logger) = setup(Level::Error);
        let dest = Capture::new().destination("mem");
        logger.close(&mut dest.clone(), "first");
        logger.close(&mut dest.clone(), "second");
        assert_eq!(
            "E: Close second caused: close mem: destination already closed\n",
            capture.contents()
        );
    }

    #[test]
    fn close_guard_closes_on_scope_exit() {
        let (capture, logger) = setup(Level::Error);
        let dest = Capture::new().destination("scoped");
        {
            let guard = logger.close_on_drop(dest.clone(), "scoped log");
            guard.write_line(b"payload\n").unwrap();
            assert!(!guard.is_closed());
        }
        assert!(dest.is_closed());
        assert_eq!("", capture.contents());

        {
            let _guard = logger.close_on_drop(dest.clone(), "scoped log");
        }
        assert_eq!(
            "E: Close scoped log caused: close scoped: destination already closed\n",
            capture.contents()
        );
    }

    #[test]
    fn file_flag_reports_call_site() {
        let capture = Capture::new();
        let sink = Sink::new(capture.destination("mem"), "", Flags::SHORT_FILE);
        let logger = Logger::new(Level::Error, Arc::new(sink));

        let line = line!() + 1;
        logger.error("located");

        assert_eq!(format!("logger.rs:{line}: E: located\n"), capture.contents());
    }
}
