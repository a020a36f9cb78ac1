//! CSV trace backend.
//!
//! Creates two files in the configured output directory:
//! - `snapshots.csv`
//! - `events.csv`

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::row::TraceEvent;
use crate::writer::TraceWriter;
use crate::{EventRow, TraceResult, TraceRow};

pub const SNAPSHOT_HEADERS: [&str; 8] = ["agent_id", "channel", "time_secs", "x", "y", "z", "yaw", "code"];
pub const EVENT_HEADERS: [&str; 5] = ["agent_id", "time_secs", "event", "action", "distance"];

/// Writes trace output to two CSV files.
pub struct CsvTraceWriter {
    snapshots: Writer<File>,
    events:    Writer<File>,
    finished:  bool,
}

impl CsvTraceWriter {
    /// Create `dir` if needed, open both CSV files and write the header rows.
    pub fn new(dir: &Path) -> TraceResult<Self> {
        std::fs::create_dir_all(dir)?;

        let mut snapshots = Writer::from_path(dir.join("snapshots.csv"))?;
        snapshots.write_record(SNAPSHOT_HEADERS)?;

        let mut events = Writer::from_path(dir.join("events.csv"))?;
        events.write_record(EVENT_HEADERS)?;

        Ok(Self { snapshots, events, finished: false })
    }
}

impl TraceWriter for CsvTraceWriter {
    fn write_snapshot(&mut self, row: &TraceRow) -> TraceResult<()> {
        self.snapshots.write_record(&[
            row.agent_id.to_string(),
            row.channel.as_str().to_owned(),
            format!("{:.4}", row.time_secs),
            row.x.to_string(),
            row.y.to_string(),
            row.z.to_string(),
            row.yaw.to_string(),
            row.code.as_u8().to_string(),
        ])?;
        Ok(())
    }

    fn write_event(&mut self, row: &EventRow) -> TraceResult<()> {
        let (action, distance) = match row.event {
            TraceEvent::Selected(kind) => (kind.as_str().to_owned(), String::new()),
            TraceEvent::Geofence(d)    => (String::new(), d.to_string()),
        };
        self.events.write_record(&[
            row.agent_id.to_string(),
            format!("{:.4}", row.time_secs),
            row.event.as_str().to_owned(),
            action,
            distance,
        ])?;
        Ok(())
    }

    fn finish(&mut self) -> TraceResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.snapshots.flush()?;
        self.events.flush()?;
        Ok(())
    }
}
