use std::{
    fmt,
    io::Write,
    time::{Duration, Instant},
};

use crate::presenter::Presenter;

/// Gaps between two events longer than this get flagged.
pub const LONG_THRESHOLD: Duration = Duration::from_millis(750);

/// Prints how much time passed since the previous event and since start.
///
/// Lines go to the diagnostic writer only, never to the body output.
pub struct Reporter<W: Write> {
    presenter: Presenter,
    out: W,
    start: Instant,
    last: Instant,
}

impl<W: Write> Reporter<W> {
    pub fn start(presenter: Presenter, out: W) -> Self {
        Self::start_at(presenter, out, Instant::now())
    }

    fn start_at(presenter: Presenter, out: W, now: Instant) -> Self {
        Self {
            presenter,
            out,
            start: now,
            last: now,
        }
    }

    pub fn report(&mut self, msg: &str) {
        self.report_at(msg, Instant::now());
    }

    pub fn reportf(&mut self, args: fmt::Arguments<'_>) {
        self.report(&args.to_string());
    }

    fn report_at(&mut self, msg: &str, now: Instant) {
        let from_last = now.saturating_duration_since(self.last);
        let from_start = now.saturating_duration_since(self.start);

        let mut line = self
            .presenter
            .report_text(&format!("\n{msg}: from_last={from_last:?}"));
        if from_last > LONG_THRESHOLD {
            line.push_str(&self.presenter.report_text(" "));
            line.push_str(&self.presenter.alarm_text("(LONG)"));
            line.push_str(&self.presenter.report_text(" "));
        }
        line.push_str(
            &self
                .presenter
                .report_text(&format!(", from_start={from_start:?}\n")),
        );

        let _ = self.out.write_all(line.as_bytes());
        let _ = self.out.flush();

        self.last = now;
    }
}
