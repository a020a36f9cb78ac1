//! Tests for npc-trace.

#[cfg(test)]
mod csv_tests {
    use glam::Vec3;
    use npc_behavior::ActionKind;
    use npc_core::{ActionCode, AgentId};
    use npc_replication::{ChannelName, Snapshot};
    use tempfile::TempDir;

    use crate::csv::{CsvTraceWriter, EVENT_HEADERS, SNAPSHOT_HEADERS};
    use crate::row::{EventRow, TraceEvent, TraceRow};
    use crate::writer::TraceWriter;

    fn tmp() -> TempDir {
        tempfile::tempdir().expect("create temp dir")
    }

    fn snap_row(agent: u32, time_secs: f64) -> TraceRow {
        let snapshot = Snapshot::new(Vec3::new(1.5, 0.0, -2.0), 0.25, ActionCode::Walk);
        TraceRow::new(AgentId(agent), ChannelName::Change, time_secs, &snapshot)
    }

    fn read_all(path: &std::path::Path) -> Vec<csv::StringRecord> {
        let mut rdr = csv::Reader::from_path(path).unwrap();
        rdr.records().map(|r| r.unwrap()).collect()
    }

    #[test]
    fn csv_files_created() {
        let dir = tmp();
        let _w = CsvTraceWriter::new(dir.path()).unwrap();
        assert!(dir.path().join("snapshots.csv").exists());
        assert!(dir.path().join("events.csv").exists());
    }

    #[test]
    fn csv_creates_missing_directory() {
        let dir = tmp();
        let nested = dir.path().join("runs").join("tavern");
        let _w = CsvTraceWriter::new(&nested).unwrap();
        assert!(nested.join("snapshots.csv").exists());
    }

    #[test]
    fn csv_headers_correct() {
        let dir = tmp();
        let mut w = CsvTraceWriter::new(dir.path()).unwrap();
        w.finish().unwrap();

        let mut rdr = csv::Reader::from_path(dir.path().join("snapshots.csv")).unwrap();
        let headers: Vec<_> = rdr.headers().unwrap().iter().map(str::to_owned).collect();
        assert_eq!(headers, SNAPSHOT_HEADERS);

        let mut rdr2 = csv::Reader::from_path(dir.path().join("events.csv")).unwrap();
        let headers2: Vec<_> = rdr2.headers().unwrap().iter().map(str::to_owned).collect();
        assert_eq!(headers2, EVENT_HEADERS);
    }

    #[test]
    fn csv_snapshot_columns() {
        let dir = tmp();
        let mut w = CsvTraceWriter::new(dir.path()).unwrap();
        w.write_snapshot(&snap_row(7, 0.3333)).unwrap();
        w.finish().unwrap();

        let rows = read_all(&dir.path().join("snapshots.csv"));
        assert_eq!(rows.len(), 1);
        assert_eq!(&rows[0][0], "7");      // agent_id
        assert_eq!(&rows[0][1], "change"); // channel
        assert_eq!(&rows[0][2], "0.3333"); // time_secs
        assert_eq!(&rows[0][3], "1.5");    // x
        assert_eq!(&rows[0][5], "-2");     // z
        assert_eq!(&rows[0][7], "1");      // Walk wire code
    }

    #[test]
    fn csv_event_columns() {
        let dir = tmp();
        let mut w = CsvTraceWriter::new(dir.path()).unwrap();
        w.write_event(&EventRow {
            agent_id:  2,
            time_secs: 1.0,
            event:     TraceEvent::Geofence(3.5),
        })
        .unwrap();
        w.write_event(&EventRow {
            agent_id:  2,
            time_secs: 1.0,
            event:     TraceEvent::Selected(ActionKind::ReturnHome),
        })
        .unwrap();
        w.finish().unwrap();

        let rows = read_all(&dir.path().join("events.csv"));
        assert_eq!(rows.len(), 2);
        assert_eq!(&rows[0][2], "geofence");
        assert_eq!(&rows[0][3], "");
        assert_eq!(&rows[0][4], "3.5");
        assert_eq!(&rows[1][2], "selected");
        assert_eq!(&rows[1][3], "return_home");
        assert_eq!(&rows[1][4], "");
    }

    #[test]
    fn csv_finish_idempotent() {
        let dir = tmp();
        let mut w = CsvTraceWriter::new(dir.path()).unwrap();
        w.finish().unwrap();
        w.finish().unwrap();
    }
}

#[cfg(test)]
mod observer_tests {
    use glam::Vec3;
    use npc_behavior::ActionKind;
    use npc_core::AgentId;
    use npc_sim::{AgentProfile, SchedulerBuilder, SchedulerObserver};
    use tempfile::TempDir;

    use crate::row::{EventRow, TraceEvent, TraceRow};
    use crate::writer::TraceWriter;
    use crate::{CsvTraceWriter, TraceError, TraceObserver, TraceResult};

    const DT: f32 = 1.0 / 60.0;

    /// Keeps rows in memory.
    #[derive(Default)]
    struct MemoryWriter {
        snapshots: Vec<TraceRow>,
        events:    Vec<EventRow>,
        finished:  usize,
    }

    impl TraceWriter for MemoryWriter {
        fn write_snapshot(&mut self, row: &TraceRow) -> TraceResult<()> {
            self.snapshots.push(*row);
            Ok(())
        }
        fn write_event(&mut self, row: &EventRow) -> TraceResult<()> {
            self.events.push(*row);
            Ok(())
        }
        fn finish(&mut self) -> TraceResult<()> {
            self.finished += 1;
            Ok(())
        }
    }

    /// Fails every write with a distinguishable I/O error.
    struct FailingWriter {
        attempts: usize,
    }

    impl TraceWriter for FailingWriter {
        fn write_snapshot(&mut self, _row: &TraceRow) -> TraceResult<()> {
            self.attempts += 1;
            Err(std::io::Error::other(format!("write {}", self.attempts)).into())
        }
        fn write_event(&mut self, _row: &EventRow) -> TraceResult<()> {
            self.attempts += 1;
            Err(std::io::Error::other(format!("write {}", self.attempts)).into())
        }
        fn finish(&mut self) -> TraceResult<()> {
            Ok(())
        }
    }

    fn run_pig<W: TraceWriter>(trace: &mut TraceObserver<W>, ticks: usize) {
        let mut pig = SchedulerBuilder::new(AgentProfile::pig(Vec3::ZERO))
            .id(AgentId(4))
            .seed(11)
            .build()
            .unwrap();
        pig.init(&mut *trace).unwrap();
        for _ in 0..ticks {
            pig.step(DT, &mut *trace);
        }
        trace.finish();
    }

    #[test]
    fn observer_records_init_then_changes() {
        let mut trace = TraceObserver::new(MemoryWriter::default());
        run_pig(&mut trace, 600);
        assert!(trace.take_error().is_none());

        let writer = trace.into_writer();
        assert_eq!(writer.finished, 1);
        assert_eq!(writer.snapshots.len(), 31, "one init + 30 changes in 10 s");
        assert_eq!(writer.snapshots[0].channel.as_str(), "init");
        assert_eq!(writer.snapshots[0].time_secs, 0.0);
        assert!(writer.snapshots[1..].iter().all(|r| r.channel.as_str() == "change"));
        assert!(writer.snapshots.iter().all(|r| r.agent_id == 4));
        assert!(
            writer.snapshots.windows(2).all(|w| w[0].time_secs < w[1].time_secs),
            "publish times strictly increase"
        );
    }

    #[test]
    fn observer_records_selections() {
        let mut trace = TraceObserver::new(MemoryWriter::default());
        run_pig(&mut trace, 600);
        let writer = trace.into_writer();

        assert!(writer.events.len() >= 2, "10 s of pig spans several actions");
        assert!(matches!(writer.events[0].event, TraceEvent::Selected(_)));
        assert_eq!(writer.events[0].time_secs, 0.0, "first pick happens at init");
        for e in &writer.events {
            if let TraceEvent::Selected(kind) = e.event {
                assert_ne!(kind, ActionKind::Gesture, "pigs have no gestures");
            }
        }
    }

    #[test]
    fn observer_stamps_events_with_last_publish() {
        let mut trace = TraceObserver::new(MemoryWriter::default());
        trace.on_publish(AgentId(1), 2.5, &Default::default());
        trace.on_geofence(AgentId(1), 9.0);
        trace.on_geofence(AgentId(2), 9.0);
        let writer = trace.into_writer();
        assert_eq!(writer.events[0].time_secs, 2.5);
        assert_eq!(writer.events[1].time_secs, 0.0, "agent 2 never published");
    }

    #[test]
    fn observer_keeps_first_error() {
        let mut trace = TraceObserver::new(FailingWriter { attempts: 0 });
        run_pig(&mut trace, 120);
        assert_eq!(trace.rows(), 0);

        match trace.take_error() {
            Some(TraceError::Io(e)) => assert_eq!(e.to_string(), "write 1"),
            other => panic!("expected the first I/O error, got {other:?}"),
        }
        assert!(trace.take_error().is_none(), "take_error clears the slot");
    }

    #[test]
    fn integration_csv() {
        let dir: TempDir = tempfile::tempdir().unwrap();
        let mut trace = TraceObserver::new(CsvTraceWriter::new(dir.path()).unwrap());
        run_pig(&mut trace, 600);
        assert!(trace.take_error().is_none());

        let mut rdr = csv::Reader::from_path(dir.path().join("snapshots.csv")).unwrap();
        let rows: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 31);
        assert_eq!(&rows[0][1], "init");
        for row in &rows {
            let code: u8 = row[7].parse().unwrap();
            assert!(code <= 2, "pig codes are idle/walk/run, got {code}");
        }
    }
}
