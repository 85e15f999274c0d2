//! Simulation observer trait for progress reporting and data collection.

use sos_core::Tick;

use crate::{Snapshot, TickSummary};

/// Callbacks invoked by [`World::run`][crate::World::run] at key points in
/// the tick loop.
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.
///
/// # Example — progress printer
///
/// ```rust,ignore
/// struct ProgressPrinter;
///
/// impl SimObserver for ProgressPrinter {
///     fn on_tick_end(&mut self, summary: &TickSummary) {
///         println!("{}: {} discovered", summary.tick, summary.discovered);
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called at the very start of each tick, before the bleed.
    fn on_tick_start(&mut self, _tick: Tick) {}

    /// Called after every unit has been stepped.
    fn on_tick_end(&mut self, _summary: &TickSummary) {}

    /// Called at snapshot intervals (every `config.output_interval_ticks`
    /// ticks, after `on_tick_end`).
    fn on_snapshot(&mut self, _snapshot: &Snapshot) {}

    /// Called once after the final tick completes.
    fn on_sim_end(&mut self, _final_tick: Tick) {}
}

/// A [`SimObserver`] that does nothing.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
