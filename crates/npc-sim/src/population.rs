//! A set of schedulers stepped together.

use npc_behavior::BehaviorModel;
use npc_core::AgentId;
use npc_replication::InitState;

use crate::observer::StepLog;
use crate::{Controller, Scheduler, SchedulerObserver, SimError, SimResult};

/// Schedulers kept in ascending [`AgentId`] order.
///
/// [`step`][Self::step] advances every agent, then delivers observer
/// callbacks agent by agent in ID order.  With the `parallel` feature the
/// agents are advanced on Rayon's thread pool; since each scheduler owns its
/// RNG and controller the result is identical to a sequential run.
pub struct Population<B: BehaviorModel, C: Controller> {
    schedulers: Vec<Scheduler<B, C>>,
}

impl<B: BehaviorModel, C: Controller> Default for Population<B, C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<B: BehaviorModel, C: Controller> Population<B, C> {
    pub fn new() -> Self {
        Self { schedulers: Vec::new() }
    }

    /// Add a scheduler.  Fails if its ID is already present.
    pub fn insert(&mut self, scheduler: Scheduler<B, C>) -> SimResult<()> {
        match self.schedulers.binary_search_by_key(&scheduler.id(), Scheduler::id) {
            Ok(_) => Err(SimError::DuplicateAgent(scheduler.id())),
            Err(pos) => {
                self.schedulers.insert(pos, scheduler);
                Ok(())
            }
        }
    }

    pub fn len(&self) -> usize {
        self.schedulers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.schedulers.is_empty()
    }

    pub fn get(&self, id: AgentId) -> Option<&Scheduler<B, C>> {
        self.schedulers
            .binary_search_by_key(&id, Scheduler::id)
            .ok()
            .map(|i| &self.schedulers[i])
    }

    pub fn iter(&self) -> impl Iterator<Item = &Scheduler<B, C>> {
        self.schedulers.iter()
    }

    /// Initialize every agent that is not ready yet.  Returns the initial
    /// states of the agents that became ready, in ID order.
    pub fn init_all<O: SchedulerObserver + ?Sized>(
        &mut self,
        observer: &mut O,
    ) -> Vec<(AgentId, InitState)> {
        self.schedulers
            .iter_mut()
            .filter(|s| !s.is_ready())
            .filter_map(|s| s.init(&mut *observer).map(|state| (s.id(), state)))
            .collect()
    }

    /// Step every agent by `delta` seconds.  Returns the number of snapshots
    /// published.
    pub fn step<O: SchedulerObserver + ?Sized>(&mut self, delta: f32, observer: &mut O) -> usize {
        let logs = self.step_all(delta);
        logs.into_iter().map(|log| log.replay(&mut *observer)).sum()
    }

    #[cfg(not(feature = "parallel"))]
    fn step_all(&mut self, delta: f32) -> Vec<StepLog> {
        self.schedulers
            .iter_mut()
            .map(|s| {
                let mut log = StepLog::new(s.id());
                s.step(delta, &mut log);
                log
            })
            .collect()
    }

    #[cfg(feature = "parallel")]
    fn step_all(&mut self, delta: f32) -> Vec<StepLog> {
        use rayon::prelude::*;

        self.schedulers
            .par_iter_mut()
            .map(|s| {
                let mut log = StepLog::new(s.id());
                s.step(delta, &mut log);
                log
            })
            .collect()
    }
}
