//! Integration tests for wsn-output.

#[cfg(test)]
mod csv_tests {
    use tempfile::TempDir;

    use crate::csv::CsvWriter;
    use crate::row::{FrameSummaryRow, ScheduleRow};
    use crate::writer::OutputWriter;

    fn tmp() -> TempDir {
        tempfile::tempdir().expect("create temp dir")
    }

    fn read_rows(path: std::path::PathBuf) -> Vec<csv::StringRecord> {
        let mut rdr = csv::Reader::from_path(path).unwrap();
        rdr.records().map(|r| r.unwrap()).collect()
    }

    #[test]
    fn csv_files_created() {
        let dir = tmp();
        let _w = CsvWriter::new(dir.path()).unwrap();
        assert!(dir.path().join("frame_summaries.csv").exists());
        assert!(dir.path().join("schedule.csv").exists());
    }

    #[test]
    fn creates_missing_directory() {
        let dir = tmp();
        let nested = dir.path().join("runs").join("a");
        let _w = CsvWriter::new(&nested).unwrap();
        assert!(nested.join("schedule.csv").exists());
    }

    #[test]
    fn csv_headers_correct() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.finish().unwrap();

        let mut rdr = csv::Reader::from_path(dir.path().join("frame_summaries.csv")).unwrap();
        let headers: Vec<_> = rdr.headers().unwrap().iter().map(str::to_owned).collect();
        assert_eq!(headers, ["frame", "slots", "occupancy", "delivered"]);

        let mut rdr2 = csv::Reader::from_path(dir.path().join("schedule.csv")).unwrap();
        let headers2: Vec<_> = rdr2.headers().unwrap().iter().map(str::to_owned).collect();
        assert_eq!(headers2, ["frame", "slot", "sender", "receiver"]);
    }

    #[test]
    fn frame_summary_written() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.write_frame_summary(&FrameSummaryRow { frame: 4, slots: 7, occupancy: 12, delivered: 5 })
            .unwrap();
        w.finish().unwrap();

        let rows = read_rows(dir.path().join("frame_summaries.csv"));
        assert_eq!(rows.len(), 1);
        assert_eq!(&rows[0][0], "4");
        assert_eq!(&rows[0][1], "7");
        assert_eq!(&rows[0][2], "12");
        assert_eq!(&rows[0][3], "5");
    }

    #[test]
    fn schedule_rows_written() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.write_schedule(&[
            ScheduleRow { frame: 0, slot: 0, sender: 2, receiver: 1 },
            ScheduleRow { frame: 0, slot: 0, sender: 4, receiver: 3 },
        ])
        .unwrap();
        w.write_schedule(&[]).unwrap();
        w.finish().unwrap();

        let rows = read_rows(dir.path().join("schedule.csv"));
        assert_eq!(rows.len(), 2);
        assert_eq!(&rows[1][2], "4");
        assert_eq!(&rows[1][3], "3");
    }

    #[test]
    fn csv_finish_idempotent() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.finish().unwrap();
        w.finish().unwrap();
    }
}

// ── Observer → writer ─────────────────────────────────────────────────────────

#[cfg(test)]
mod observer_tests {
    use tempfile::TempDir;

    use wsn_core::{NodeId, RoutingMode, SimConfig};
    use wsn_sim::BufferSimBuilder;
    use wsn_topology::Topology;

    use crate::csv::CsvWriter;
    use crate::observer::SimOutputObserver;

    fn tmp() -> TempDir {
        tempfile::tempdir().expect("create temp dir")
    }

    fn star() -> Topology {
        Topology::from_edges(4, &[
            (NodeId(0), NodeId(1)),
            (NodeId(0), NodeId(2)),
            (NodeId(0), NodeId(3)),
        ])
        .unwrap()
    }

    fn saturated(num_frames: u64, adaptation: u64) -> SimConfig {
        SimConfig {
            arrival_probability:   1.0,
            num_frames,
            adaptation,
            max_arrivals_per_slot: 1,
            routing:               RoutingMode::Unbalanced,
            seed:                  1,
        }
    }

    #[test]
    fn integration_csv() {
        let dir = tmp();
        let mut sim = BufferSimBuilder::new(saturated(3, 0), star()).build().unwrap();
        let mut obs = SimOutputObserver::new(CsvWriter::new(dir.path()).unwrap());
        sim.run(&mut obs).unwrap();
        assert!(obs.take_error().is_none(), "no write errors expected");

        let mut rdr = csv::Reader::from_path(dir.path().join("frame_summaries.csv")).unwrap();
        let rows: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 3);
        let occupancy: Vec<_> = rows.iter().map(|r| r[2].to_owned()).collect();
        assert_eq!(occupancy, ["9", "15", "21"]);
        assert!(rows.iter().all(|r| &r[1] == "3" && &r[3] == "3"));

        // Only the initial schedule; no adaptation.
        let mut rdr = csv::Reader::from_path(dir.path().join("schedule.csv")).unwrap();
        assert_eq!(rdr.records().count(), 3);
    }

    #[test]
    fn adapted_schedules_appended() {
        let dir = tmp();
        let mut sim = BufferSimBuilder::new(saturated(2, 1), star()).build().unwrap();
        let mut obs = SimOutputObserver::new(CsvWriter::new(dir.path()).unwrap());
        sim.run(&mut obs).unwrap();
        assert!(obs.take_error().is_none());

        let mut rdr = csv::Reader::from_path(dir.path().join("schedule.csv")).unwrap();
        let rows: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        // 3 initial transmissions, then 9 for the rebuilt frame starting at frame 1.
        assert_eq!(rows.len(), 12);
        assert!(rows[..3].iter().all(|r| &r[0] == "0"));
        assert!(rows[3..].iter().all(|r| &r[0] == "1"));
        assert_eq!(&rows[11][1], "8");

        let mut rdr = csv::Reader::from_path(dir.path().join("frame_summaries.csv")).unwrap();
        let rows: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(&rows[1][1], "9");
        assert_eq!(&rows[1][3], "9");
    }
}
