//! Message types for actor communication
//!
//! Commands travel over per-actor mpsc channels; ticks travel over the
//! clock's per-listener channels. Everything is cheap to clone.

use chrono::{DateTime, Utc};

/// One firing of the periodic clock, fanned out to every collector.
///
/// All collectors observe the same tick, which makes `seq` a round marker:
/// readings produced for the same `seq` belong to the same sampling pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tick {
    /// Monotonically increasing round number, starting at 0.
    pub seq: u64,

    /// When the clock fired.
    pub at: DateTime<Utc>,
}

/// Commands that can be sent to the ClockActor.
#[derive(Debug)]
pub enum ClockCommand {
    /// Stop ticking and drop all listener channels.
    ///
    /// Collectors observe the closed tick channel and exit.
    Shutdown,
}

/// Commands that can be sent to the ReporterActor.
#[derive(Debug)]
pub enum ReporterCommand {
    /// Close the sink connection (if any) and exit.
    Shutdown,
}
