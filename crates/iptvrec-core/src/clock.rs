use std::time::Duration;

use anyhow::Result;
use chrono::{DateTime, Local};

use crate::scheduler::{Scheduler, TimerHandle, TimerId};

/// Interval between clock ticks.
pub const TICK_PERIOD: Duration = Duration::from_secs(1);

/// Default auto-stop threshold for countdown mode (2h15m).
pub const DEFAULT_THRESHOLD_SECONDS: u64 = 8100;

pub const DEFAULT_STOPPED_LABEL: &str = "Stopped";
pub const DEFAULT_FINISHED_LABEL: &str = "Timer Finished";

/// Format a timestamp as zero-padded 24-hour `HH:MM:SS`.
pub fn format_clock(t: &DateTime<Local>) -> String {
    t.format("%H:%M:%S").to_string()
}

/// Write-only text surface the updater publishes into.
pub trait LabelSink {
    fn publish(&mut self, text: &str);
}

impl LabelSink for String {
    fn publish(&mut self, text: &str) {
        self.clear();
        self.push_str(text);
    }
}

/// What the clock label shows while running.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayMode {
    /// Current wall-clock time, indefinitely.
    Clock,
    /// Wall-clock time until `threshold_seconds` have elapsed since start,
    /// then the finished label and an automatic stop.
    Countdown { threshold_seconds: u64 },
}

impl DisplayMode {
    pub fn name(&self) -> &'static str {
        match self {
            DisplayMode::Clock => "clock",
            DisplayMode::Countdown { .. } => "countdown",
        }
    }

    pub fn threshold_seconds(&self) -> Option<u64> {
        match self {
            DisplayMode::Clock => None,
            DisplayMode::Countdown { threshold_seconds } => Some(*threshold_seconds),
        }
    }
}

/// Fixed labels published on stop and on countdown completion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClockLabels {
    pub stopped: String,
    pub finished: String,
}

impl Default for ClockLabels {
    fn default() -> Self {
        Self {
            stopped: DEFAULT_STOPPED_LABEL.to_string(),
            finished: DEFAULT_FINISHED_LABEL.to_string(),
        }
    }
}

/// Scheduler verdict returned from a tick, mirroring a main-loop source's
/// continue/remove result.
#[must_use]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    Continue,
    Break,
}

/// Mutable state of one clock updater.
///
/// Running is defined as holding a registration handle, so the two can never
/// disagree.
#[derive(Debug, Default)]
pub struct TimerState {
    reference_time: Option<DateTime<Local>>,
    handle: Option<TimerHandle>,
}

impl TimerState {
    pub fn is_running(&self) -> bool {
        self.handle.is_some()
    }

    pub fn timer_id(&self) -> Option<TimerId> {
        self.handle.as_ref().map(TimerHandle::id)
    }

    fn release<S: Scheduler + ?Sized>(&mut self, scheduler: &mut S) -> bool {
        match self.handle.take() {
            Some(handle) => {
                scheduler.cancel(handle);
                true
            }
            None => false,
        }
    }
}

/// Periodic clock label driver.
///
/// One instance replaces both the always-on clock and the auto-stopping
/// countdown; the [`DisplayMode`] selects between them.
#[derive(Debug)]
pub struct ClockUpdater {
    mode: DisplayMode,
    labels: ClockLabels,
    period: Duration,
    state: TimerState,
}

impl ClockUpdater {
    pub fn new(mode: DisplayMode, labels: ClockLabels) -> Self {
        Self {
            mode,
            labels,
            period: TICK_PERIOD,
            state: TimerState::default(),
        }
    }

    pub fn is_running(&self) -> bool {
        self.state.is_running()
    }

    pub fn timer_id(&self) -> Option<TimerId> {
        self.state.timer_id()
    }

    /// Whole seconds since the last start, truncated toward zero.
    pub fn elapsed_seconds(&self, now: &DateTime<Local>) -> Option<i64> {
        self.state
            .reference_time
            .map(|start| now.signed_duration_since(start).num_seconds())
    }

    /// Seconds left before a countdown finishes. `None` outside countdown
    /// mode or while stopped.
    pub fn remaining_seconds(&self, now: &DateTime<Local>) -> Option<u64> {
        let threshold = self.mode.threshold_seconds()?;
        if !self.is_running() {
            return None;
        }
        let elapsed = self.elapsed_seconds(now)?.max(0) as u64;
        Some(threshold.saturating_sub(elapsed))
    }

    /// Start (or restart) the clock.
    ///
    /// Publishes the current display immediately. A restart while running
    /// keeps the existing registration and only resets the reference time.
    pub fn start<S, L>(&mut self, now: DateTime<Local>, scheduler: &mut S, label: &mut L) -> Result<()>
    where
        S: Scheduler + ?Sized,
        L: LabelSink + ?Sized,
    {
        if self.state.handle.is_none() {
            let handle = scheduler.register(self.period)?;
            tracing::info!(mode = self.mode.name(), timer = %handle.id(), "clock started");
            self.state.handle = Some(handle);
        } else {
            tracing::info!(mode = self.mode.name(), "clock restarted");
        }
        self.state.reference_time = Some(now);
        label.publish(&format_clock(&now));
        Ok(())
    }

    /// Stop the clock and publish the stopped label. Safe to call repeatedly.
    pub fn stop<S, L>(&mut self, scheduler: &mut S, label: &mut L)
    where
        S: Scheduler + ?Sized,
        L: LabelSink + ?Sized,
    {
        if self.state.release(scheduler) {
            tracing::info!("clock stopped");
        }
        label.publish(&self.labels.stopped);
    }

    /// Release the registration without touching the label. Used when the
    /// owning window goes away.
    pub fn shutdown<S: Scheduler + ?Sized>(&mut self, scheduler: &mut S) {
        if self.state.release(scheduler) {
            tracing::debug!("clock registration released on shutdown");
        }
    }

    /// Handle one scheduler tick.
    pub fn tick<S, L>(&mut self, now: DateTime<Local>, scheduler: &mut S, label: &mut L) -> TickOutcome
    where
        S: Scheduler + ?Sized,
        L: LabelSink + ?Sized,
    {
        if !self.is_running() {
            return TickOutcome::Break;
        }

        if let DisplayMode::Countdown { threshold_seconds } = self.mode {
            let elapsed = self.elapsed_seconds(&now).unwrap_or(0);
            if elapsed >= 0 && elapsed as u64 >= threshold_seconds {
                label.publish(&self.labels.finished);
                self.state.release(scheduler);
                tracing::info!(elapsed, threshold_seconds, "countdown finished");
                return TickOutcome::Break;
            }
        }

        label.publish(&format_clock(&now));
        TickOutcome::Continue
    }
}
