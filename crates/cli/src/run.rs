// Scheduling loop for `sheetdash run`.
//
// Polling and rendering share one thread, so a render never observes a
// half-finished poll. A slow fetch delays the next render.

use std::io::{self, IsTerminal, Write};
use std::thread;
use std::time::{Duration, Instant};

use crate::dashboard::Dashboard;
use crate::exit_codes::EXIT_ERROR;
use crate::render;
use crate::CliError;

/// What is due at a given instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Due {
    pub update: bool,
    pub render: bool,
}

/// Two independent fixed-interval timers. A deadline that cannot be
/// represented as an `Instant` disables its timer.
pub struct Schedule {
    update_every: Duration,
    render_every: Duration,
    next_update: Option<Instant>,
    next_render: Option<Instant>,
}

impl Schedule {
    /// The first update is one interval after `start` (the caller polls
    /// before the loop); the first render is immediate.
    pub fn new(start: Instant, update_every: Duration, render_every: Duration) -> Self {
        Self {
            update_every,
            render_every,
            next_update: start.checked_add(update_every),
            next_render: Some(start),
        }
    }

    pub fn due(&mut self, now: Instant) -> Due {
        let update = fire(&mut self.next_update, self.update_every, now);
        let render = fire(&mut self.next_render, self.render_every, now);
        Due { update, render }
    }

    /// Earliest pending deadline, `None` once both timers are disabled.
    pub fn next_wake(&self) -> Option<Instant> {
        match (self.next_update, self.next_render) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }
}

fn fire(deadline: &mut Option<Instant>, every: Duration, now: Instant) -> bool {
    match *deadline {
        Some(at) if now >= at => {
            *deadline = advance(at, every, now);
            true
        }
        _ => false,
    }
}

/// Next deadline strictly after `now`. Ticks missed during a long poll are
/// dropped rather than fired in a burst.
fn advance(deadline: Instant, every: Duration, now: Instant) -> Option<Instant> {
    let mut next = deadline.checked_add(every)?;
    while next <= now {
        next = next.checked_add(every)?;
    }
    Some(next)
}

pub struct RunOptions {
    pub update_every: Duration,
    pub render_every: Duration,
    pub plots_per_line: usize,
    /// Stop after this many render passes.
    pub max_frames: Option<u64>,
}

pub fn run(dashboard: &mut Dashboard, options: &RunOptions) -> Result<(), CliError> {
    let clear = io::stdout().is_terminal();
    let mut schedule = Schedule::new(Instant::now(), options.update_every, options.render_every);
    let mut pass: u64 = 0;

    loop {
        let due = schedule.due(Instant::now());
        if due.update {
            let failures = dashboard.poll_all();
            log::info!(
                "update pass: {} interface(s), {} failed",
                dashboard.interfaces().len(),
                failures.len()
            );
        }
        if due.render {
            let frame = render::text_frame(dashboard, pass, options.plots_per_line);
            write_frame(&frame, clear)?;
            pass += 1;
            if options.max_frames == Some(pass) {
                return Ok(());
            }
        }

        let Some(wake) = schedule.next_wake() else {
            log::warn!("no timer left to wait for, stopping");
            return Ok(());
        };
        let now = Instant::now();
        if wake > now {
            thread::sleep(wake - now);
        }
    }
}

fn write_frame(frame: &str, clear: bool) -> Result<(), CliError> {
    let mut out = io::stdout().lock();
    let result = if clear {
        write!(out, "\x1b[2J\x1b[H{}", frame)
    } else {
        writeln!(out, "{}", frame)
    };
    result
        .and_then(|_| out.flush())
        .map_err(|e| CliError::new(EXIT_ERROR, format!("cannot write frame: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SEC: Duration = Duration::from_secs(1);

    #[test]
    fn renders_immediately_then_on_interval() {
        let start = Instant::now();
        let mut schedule = Schedule::new(start, 60 * SEC, 10 * SEC);

        assert_eq!(schedule.due(start), Due { update: false, render: true });
        assert_eq!(schedule.due(start + 5 * SEC), Due { update: false, render: false });
        assert_eq!(schedule.due(start + 10 * SEC), Due { update: false, render: true });
        assert_eq!(schedule.next_wake(), Some(start + 20 * SEC));
    }

    #[test]
    fn update_and_render_can_coincide() {
        let start = Instant::now();
        let mut schedule = Schedule::new(start, 20 * SEC, 10 * SEC);
        schedule.due(start);
        schedule.due(start + 10 * SEC);
        assert_eq!(schedule.due(start + 20 * SEC), Due { update: true, render: true });
        assert_eq!(schedule.next_wake(), Some(start + 30 * SEC));
    }

    #[test]
    fn missed_ticks_are_dropped() {
        let start = Instant::now();
        let mut schedule = Schedule::new(start, 100 * SEC, 10 * SEC);
        schedule.due(start);

        // A poll that blocked for 35 seconds yields a single render.
        assert_eq!(schedule.due(start + 35 * SEC), Due { update: false, render: true });
        assert_eq!(schedule.next_wake(), Some(start + 40 * SEC));
    }

    #[test]
    fn huge_interval_disables_its_timer() {
        let start = Instant::now();
        let mut schedule = Schedule::new(start, Duration::from_secs(u64::MAX), 10 * SEC);

        assert_eq!(schedule.due(start), Due { update: false, render: true });
        assert_eq!(schedule.next_wake(), Some(start + 10 * SEC));
        assert_eq!(schedule.due(start + 10 * SEC), Due { update: false, render: true });
    }

    #[test]
    fn overflowing_render_interval_stops_the_timer() {
        let start = Instant::now();
        let mut schedule =
            Schedule::new(start, Duration::from_secs(u64::MAX), Duration::from_secs(u64::MAX));

        assert_eq!(schedule.due(start), Due { update: false, render: true });
        assert_eq!(schedule.next_wake(), None);
    }
}
