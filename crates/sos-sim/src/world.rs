//! The `World` struct and its tick loop.

use sos_behavior::{Action, AgentInfo, Message, SimContext, Unit, UnitRole};
use sos_core::{ScenarioConfig, SimRng, Tick};
use sos_env::Environment;
use tracing::{debug, info, warn};

use crate::{SimObserver, SimResult, Snapshot, TickSummary};

/// The main simulation runner.
///
/// `World` owns the environment, the unit registry, and the single shared
/// random stream, and drives the tick loop:
///
/// 1. **Bleed**: every patient loses one unit of vitality.
/// 2. **Step**: each unit, in registry order, runs its decision step
///    against a read-only [`SimContext`].
/// 3. **Execute**: the selected [`Action`] is applied immediately, before
///    the next unit is stepped, so later units see its effects on the same
///    tick.
///
/// Create via [`WorldBuilder`][crate::WorldBuilder].
pub struct World {
    pub(crate) config: ScenarioConfig,
    pub(crate) rng:    SimRng,
    pub(crate) env:    Environment,
    pub(crate) units:  Vec<Unit>,
    pub(crate) roster: Vec<AgentInfo>,
    pub(crate) time:   Tick,
}

impl World {
    // ── Lifecycle ─────────────────────────────────────────────────────────

    /// Return the scenario to its initial state.
    ///
    /// Reseeds the random stream, resets every unit, re-registers facility
    /// cells, and re-places every patient.  Idempotent: everything derives
    /// from configuration + seed.
    pub fn reset(&mut self) -> SimResult<()> {
        self.rng.reseed();
        self.time = Tick::ZERO;

        for unit in &mut self.units {
            unit.reset();
        }

        let facilities = self
            .units
            .iter()
            .filter(|u| u.role() == UnitRole::Facility)
            .filter_map(Unit::location);
        self.env.register_facilities(facilities)?;
        self.env.reset(&mut self.rng)?;

        info!(
            seed     = self.rng.seed(),
            sos_type = %self.config.sos_type,
            units    = self.units.len(),
            "world reset"
        );
        Ok(())
    }

    /// Run from the current tick to `config.end_tick()`.
    ///
    /// Calls observer hooks at every tick boundary.  Use
    /// [`NoopObserver`][crate::NoopObserver] if you don't need callbacks.
    pub fn run<O: SimObserver>(&mut self, observer: &mut O) {
        while self.time < self.config.end_tick() {
            self.tick(observer);
        }
        observer.on_sim_end(self.time);
    }

    /// Run exactly `n` ticks from the current position (ignores `end_tick`).
    ///
    /// Useful for tests and incremental stepping.
    pub fn run_ticks<O: SimObserver>(&mut self, n: u64, observer: &mut O) {
        for _ in 0..n {
            self.tick(observer);
        }
    }

    fn tick<O: SimObserver>(&mut self, observer: &mut O) {
        let now = self.time;
        observer.on_tick_start(now);
        let summary = self.progress(now);
        observer.on_tick_end(&summary);

        if now.is_every(self.config.output_interval_ticks) {
            observer.on_snapshot(&self.snapshot());
        }
        self.time = now.next();
    }

    // ── Core tick processing ──────────────────────────────────────────────

    /// Process one tick: bleed, then step and execute every unit once in
    /// registry order.
    ///
    /// Does not advance the world clock; [`run`](Self::run) and
    /// [`run_ticks`](Self::run_ticks) do that.
    pub fn progress(&mut self, now: Tick) -> TickSummary {
        self.env.bleed();

        let mut summary = TickSummary::new(now);
        for index in 0..self.units.len() {
            // Explicit field borrows so the borrow checker sees disjoint access.
            let action = {
                let ctx = SimContext::new(
                    now,
                    self.config.sos_type,
                    self.config.observation,
                    &self.roster,
                    &self.env,
                );
                self.units[index].step(&ctx, &mut self.rng)
            };
            summary.record(&action);
            self.execute(index, action, &mut summary);
        }

        summary.discovered = self.env.discovered_count() as u32;
        summary
    }

    fn execute(&mut self, index: usize, action: Action, summary: &mut TickSummary) {
        match action {
            Action::Noop => {}

            Action::DiscoverPatient => {
                if let Some(patient) = self.units[index].execute_discovery(&mut self.env) {
                    summary.found += 1;
                    debug!(unit = self.units[index].name(), %patient, "patient discovered");
                }
            }

            Action::Move(direction) => self.units[index].execute_move(direction),

            Action::SendMessage(message) => {
                summary.delivered += self.send_message(message) as u32;
            }
        }
    }

    // ── Messaging ─────────────────────────────────────────────────────────

    /// Deliver `message` to every unit other than the sender whose name
    /// starts with `message.receiver`.
    ///
    /// With a location filter, only units whose location equals the filter
    /// receive it.  Delivery is synchronous: each recipient's queue holds
    /// the message when this returns.  Returns the number of recipients.
    pub fn send_message(&mut self, message: Message) -> usize {
        let mut delivered = 0;
        for unit in &mut self.units {
            if unit.name() == message.sender || !message.addresses(unit.name()) {
                continue;
            }
            if let Some(filter) = message.location {
                if unit.location() != Some(filter) {
                    continue;
                }
            }
            unit.receive_message(message.clone());
            delivered += 1;
        }

        if delivered == 0 {
            warn!(
                sender   = %message.sender,
                receiver = %message.receiver,
                purpose  = %message.purpose,
                "message had no recipients"
            );
        } else {
            debug!(
                sender   = %message.sender,
                receiver = %message.receiver,
                purpose  = %message.purpose,
                name     = %message.name,
                delivered,
                "message routed"
            );
        }
        delivered
    }

    // ── Read access ───────────────────────────────────────────────────────

    #[inline]
    pub fn config(&self) -> &ScenarioConfig {
        &self.config
    }

    /// The next tick to be processed.
    #[inline]
    pub fn time(&self) -> Tick {
        self.time
    }

    #[inline]
    pub fn env(&self) -> &Environment {
        &self.env
    }

    /// Registered units in stepping order.
    #[inline]
    pub fn units(&self) -> &[Unit] {
        &self.units
    }

    pub fn unit(&self, name: &str) -> Option<&Unit> {
        self.units.iter().find(|u| u.name() == name)
    }

    #[inline]
    pub fn roster(&self) -> &[AgentInfo] {
        &self.roster
    }

    /// A read-only context at the current tick, for resource lookup.
    pub fn context(&self) -> SimContext<'_> {
        SimContext::new(
            self.time,
            self.config.sos_type,
            self.config.observation,
            &self.roster,
            &self.env,
        )
    }

    /// Patients and unit properties as of now.
    pub fn snapshot(&self) -> Snapshot {
        let units = self.units.iter().map(Unit::properties).collect();
        Snapshot::capture(self.time, &self.env, units)
    }
}
