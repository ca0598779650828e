//! Terminal mode handling and frame pacing.

use std::io::{self, stderr};
use std::time::{Duration, Instant};

use crossterm::{
    cursor::Show,
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};

/// Runs a restore action exactly once: on [`finish`](Self::finish), or on
/// drop if the scope is left early.
pub struct RestoreGuard<F: FnMut() -> io::Result<()>> {
    restore: Option<F>,
}

impl<F: FnMut() -> io::Result<()>> RestoreGuard<F> {
    pub fn new(restore: F) -> Self {
        Self {
            restore: Some(restore),
        }
    }

    /// Restore now and report the outcome.
    pub fn finish(mut self) -> io::Result<()> {
        match self.restore.take() {
            Some(mut restore) => restore(),
            None => Ok(()),
        }
    }
}

impl<F: FnMut() -> io::Result<()>> Drop for RestoreGuard<F> {
    fn drop(&mut self) {
        if let Some(mut restore) = self.restore.take() {
            if let Err(err) = restore() {
                tracing::warn!(%err, "terminal restore failed");
            }
        }
    }
}

/// Raw mode, alternate screen and mouse capture on stderr.  The returned
/// guard undoes all three, even if a later setup step fails.
pub fn enter() -> io::Result<RestoreGuard<fn() -> io::Result<()>>> {
    enable_raw_mode()?;
    let guard = RestoreGuard::new(restore as fn() -> io::Result<()>);
    execute!(stderr(), EnterAlternateScreen, EnableMouseCapture)?;
    Ok(guard)
}

fn restore() -> io::Result<()> {
    disable_raw_mode()?;
    execute!(stderr(), LeaveAlternateScreen, DisableMouseCapture, Show)
}

// ───────────────────────────────────────── frame pacing ──────

/// Hands out animation time in whole frames, from whichever loop branch
/// asks first.
#[derive(Debug, Clone, Copy)]
pub struct FrameClock {
    interval: Duration,
    last: Instant,
}

impl FrameClock {
    pub fn new(interval: Duration, now: Instant) -> Self {
        Self {
            interval,
            last: now,
        }
    }

    /// Seconds since the last frame, if at least one interval has passed.
    pub fn take_due(&mut self, now: Instant) -> Option<f64> {
        let elapsed = now.saturating_duration_since(self.last);
        if elapsed < self.interval {
            return None;
        }
        self.last = now;
        Some(elapsed.as_secs_f64())
    }
}
