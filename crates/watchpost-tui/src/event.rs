//! Terminal input merged with the dashboard's clock.
//!
//! The tick clock follows the refresh interval: the "updated Ns ago" label
//! and the waiting throbber only move when a tick lands.

use std::time::Duration;

use crossterm::event::{Event as CrosstermEvent, EventStream, KeyEvent, KeyEventKind};
use futures::StreamExt;
use tokio::time::{Interval, MissedTickBehavior};
use tracing::warn;

#[derive(Debug)]
pub enum Event {
    Key(KeyEvent),
    Resize,
    /// Advance the clock label and the throbber.
    Tick,
    /// Redraw.
    Render,
}

/// Tick and redraw periods.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cadence {
    pub tick: Duration,
    pub render: Duration,
}

impl Cadence {
    const MIN_TICK: Duration = Duration::from_millis(100);
    const MAX_TICK: Duration = Duration::from_secs(1);
    const RENDER: Duration = Duration::from_millis(100);

    /// Four ticks per refresh period, kept between 100ms and 1s so the
    /// seconds label never lags a full second behind.
    pub fn for_refresh(refresh: Duration) -> Self {
        Self {
            tick: (refresh / 4).clamp(Self::MIN_TICK, Self::MAX_TICK),
            render: Self::RENDER,
        }
    }
}

/// Polled directly from the app loop; no background task.
pub struct TerminalEvents {
    input: EventStream,
    tick: Interval,
    render: Interval,
}

impl TerminalEvents {
    pub fn new(cadence: Cadence) -> Self {
        Self {
            input: EventStream::new(),
            tick: skipping_interval(cadence.tick),
            render: skipping_interval(cadence.render),
        }
    }

    /// The next event, or `None` once terminal input is gone.
    pub async fn next(&mut self) -> Option<Event> {
        loop {
            tokio::select! {
                _ = self.tick.tick() => return Some(Event::Tick),
                _ = self.render.tick() => return Some(Event::Render),
                input = self.input.next() => match input? {
                    Ok(CrosstermEvent::Key(key)) if key.kind == KeyEventKind::Press => {
                        return Some(Event::Key(key));
                    }
                    Ok(CrosstermEvent::Resize(..)) => return Some(Event::Resize),
                    Ok(_) => {}
                    Err(e) => {
                        warn!(error = %e, "terminal input failed");
                        return None;
                    }
                },
            }
        }
    }
}

fn skipping_interval(period: Duration) -> Interval {
    let mut interval = tokio::time::interval(period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
    interval
}
