//! `TraceObserver<W>` — bridges `SchedulerObserver` to a `TraceWriter`.

use std::collections::BTreeMap;

use log::warn;
use npc_behavior::Action;
use npc_core::AgentId;
use npc_replication::{ChannelName, InitState, Snapshot};
use npc_sim::SchedulerObserver;

use crate::row::{EventRow, TraceEvent, TraceRow};
use crate::writer::TraceWriter;
use crate::{TraceError, TraceResult};

/// A [`SchedulerObserver`] that writes every published snapshot and every
/// scheduler decision to a [`TraceWriter`].
///
/// Errors from the writer are stored internally because observer methods
/// have no return value.  Only the first is kept; check it with
/// [`take_error`][Self::take_error] once the run is over.
pub struct TraceObserver<W: TraceWriter> {
    writer:       W,
    last_publish: BTreeMap<AgentId, f64>,
    rows:         u64,
    last_error:   Option<TraceError>,
}

impl<W: TraceWriter> TraceObserver<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, last_publish: BTreeMap::new(), rows: 0, last_error: None }
    }

    /// Flush the writer.  Call once after the last step.
    pub fn finish(&mut self) {
        let result = self.writer.finish();
        self.store_err(result);
    }

    /// Take the stored write error, if any.
    pub fn take_error(&mut self) -> Option<TraceError> {
        self.last_error.take()
    }

    /// Rows written successfully, snapshots and events together.
    pub fn rows(&self) -> u64 {
        self.rows
    }

    pub fn into_writer(self) -> W {
        self.writer
    }

    fn store_err(&mut self, result: TraceResult<()>) {
        match result {
            Ok(()) => {}
            Err(e) if self.last_error.is_none() => {
                warn!("trace output failed: {e}");
                self.last_error = Some(e);
            }
            Err(_) => {}
        }
    }

    fn write_snapshot(&mut self, row: TraceRow) {
        let result = self.writer.write_snapshot(&row);
        if result.is_ok() {
            self.rows += 1;
        }
        self.store_err(result);
    }

    fn write_event(&mut self, agent: AgentId, event: TraceEvent) {
        let row = EventRow {
            agent_id:  agent.0,
            time_secs: self.last_publish.get(&agent).copied().unwrap_or(0.0),
            event,
        };
        let result = self.writer.write_event(&row);
        if result.is_ok() {
            self.rows += 1;
        }
        self.store_err(result);
    }
}

impl<W: TraceWriter> SchedulerObserver for TraceObserver<W> {
    fn on_init(&mut self, agent: AgentId, state: &InitState) {
        self.last_publish.insert(agent, 0.0);
        self.write_snapshot(TraceRow::new(agent, ChannelName::Init, 0.0, &state.snapshot));
    }

    fn on_publish(&mut self, agent: AgentId, time_secs: f64, snapshot: &Snapshot) {
        self.last_publish.insert(agent, time_secs);
        self.write_snapshot(TraceRow::new(agent, ChannelName::Change, time_secs, snapshot));
    }

    fn on_action_selected(&mut self, agent: AgentId, action: &Action) {
        self.write_event(agent, TraceEvent::Selected(action.kind()));
    }

    fn on_geofence(&mut self, agent: AgentId, distance: f32) {
        self.write_event(agent, TraceEvent::Geofence(distance));
    }
}
