//! Tests for kp-output.

#[cfg(test)]
mod helpers {
    use kp_route::{KPathEntry, KPathSet};
    use kp_sim::OdOutcome;
    use kp_world::{GridLayout, TransitNetwork, TransitNetworkBuilder};

    /// x —5— y —2— z in a row.
    pub fn line_xyz() -> (TransitNetwork, GridLayout) {
        let mut b = TransitNetworkBuilder::new();
        b.add_link("x", "y", 5.0);
        b.add_link("y", "z", 2.0);
        let net = b.build().unwrap();
        let g = GridLayout::parse("x,y,z\n", ',', &net).unwrap();
        (net, g)
    }

    pub fn outcome(net: &TransitNetwork, routes: &[(&str, f64)]) -> OdOutcome {
        let entries: Vec<KPathEntry> = routes
            .iter()
            .map(|&(r, cost)| KPathEntry {
                stations: r.chars().map(|c| net.station(&c.to_string()).unwrap()).collect(),
                cost,
            })
            .collect();
        let origin = entries.first().map(|e| e.stations[0]).unwrap_or(net.station("x").unwrap());
        let destination = entries
            .first()
            .and_then(|e| e.stations.last().copied())
            .unwrap_or(net.station("z").unwrap());
        let shortest = entries.iter().map(|e| e.cost).fold(f64::INFINITY, f64::min);
        let paths = (!entries.is_empty()).then(|| KPathSet { entries, shortest });
        OdOutcome {
            index: 0,
            origin,
            destination,
            demand: 100,
            shares: paths.as_ref().map(|p| vec![1.0; p.len()]).unwrap_or_default(),
            volumes: Vec::new(),
            paths,
            dead_agents: 2,
            routes_offered: 9,
        }
    }
}

// ── Report text ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod report {
    use super::helpers::{line_xyz, outcome};
    use crate::report::{failure_notice, flow_line, kpath_line, outcome_lines};

    #[test]
    fn kpath_line_format() {
        assert_eq!(kpath_line(1, "xy", "x-y", 6.0), "The 1 K-path for OD: xy->x-y time:6 min");
        assert_eq!(
            kpath_line(2, "ad", "a-c-d", 29.5),
            "The 2 K-path for OD: ad->a-c-d time:29.5 min"
        );
    }

    #[test]
    fn failure_names_the_pair() {
        assert!(failure_notice("xz").contains("OD:xz"));
    }

    #[test]
    fn flow_rounds_up() {
        assert_eq!(flow_line("x", "y", 12.01), "xy 13");
        assert_eq!(flow_line("x", "y", 12.0), "xy 12");
        assert_eq!(flow_line("y", "x", 0.0), "yx 0");
    }

    #[test]
    fn outcome_lines_in_rank_order() {
        let (net, _) = line_xyz();
        let lines = outcome_lines(&net, &outcome(&net, &[("xyz", 8.0)]));
        assert_eq!(lines, vec!["The 1 K-path for OD: xz->x-y-z time:8 min".to_owned()]);

        let failed = outcome_lines(&net, &outcome(&net, &[]));
        assert_eq!(failed, vec![failure_notice("xz")]);
    }
}

// ── Rows ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod rows {
    use kp_route::EdgeFlowTable;

    use super::helpers::{line_xyz, outcome};
    use crate::{EdgeFlowRow, KPathRow, OdSummaryRow};

    #[test]
    fn kpath_rows_rank_from_one() {
        let (net, _) = line_xyz();
        let rows = KPathRow::from_outcome(&net, &outcome(&net, &[("xy", 6.0), ("xzy", 9.0)]));
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].rank, 1);
        assert_eq!(rows[1].route, "x-z-y");
        assert_eq!(rows[1].od, "xy");
        assert_eq!(rows[1].volume, 0.0);
    }

    #[test]
    fn failed_pair_has_summary_but_no_kpaths() {
        let (net, _) = line_xyz();
        let o = outcome(&net, &[]);
        assert!(KPathRow::from_outcome(&net, &o).is_empty());
        let s = OdSummaryRow::from_outcome(&net, &o);
        assert_eq!((s.k, s.shortest, s.dead_agents), (0, None, 2));
    }

    #[test]
    fn edge_rows_cover_every_link() {
        let (net, _) = line_xyz();
        let rows = EdgeFlowRow::from_table(&net, &EdgeFlowTable::new(&net));
        assert_eq!(rows.len(), 4);
        assert!(rows.iter().all(|r| r.flow == 0.0));
    }
}

// ── CSV backend ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod csv_tests {
    use tempfile::TempDir;

    use crate::csv::CsvWriter;
    use crate::row::{EdgeFlowRow, KPathRow, OdSummaryRow};
    use crate::writer::OutputWriter;

    fn tmp() -> TempDir {
        tempfile::tempdir().expect("create temp dir")
    }

    fn headers(path: std::path::PathBuf) -> Vec<String> {
        let mut rdr = csv::Reader::from_path(path).unwrap();
        rdr.headers().unwrap().iter().map(str::to_owned).collect()
    }

    #[test]
    fn files_and_headers() {
        let dir = tmp();
        let mut w = CsvWriter::new(&dir.path().join("nested")).unwrap();
        w.finish().unwrap();
        let base = dir.path().join("nested");
        assert_eq!(headers(base.join("kpaths.csv")), ["od", "rank", "route", "cost", "share", "volume"]);
        assert_eq!(headers(base.join("od_summary.csv")), ["od", "demand", "k", "shortest", "dead_agents"]);
        assert_eq!(headers(base.join("edge_flows.csv")), ["from", "to", "flow"]);
    }

    #[test]
    fn rows_written() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.write_kpaths(&[KPathRow {
            od:     "xy".into(),
            rank:   1,
            route:  "x-y".into(),
            cost:   6.0,
            share:  1.0,
            volume: 100.0,
        }])
        .unwrap();
        w.write_od_summary(&OdSummaryRow {
            od:          "xz".into(),
            demand:      7,
            k:           0,
            shortest:    None,
            dead_agents: 3,
        })
        .unwrap();
        w.write_edge_flows(&[EdgeFlowRow { from: "x".into(), to: "y".into(), flow: 100.0 }])
            .unwrap();
        w.finish().unwrap();
        w.finish().unwrap();

        let mut rdr = csv::Reader::from_path(dir.path().join("kpaths.csv")).unwrap();
        let rows: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 1);
        assert_eq!(&rows[0][2], "x-y");
        assert_eq!(&rows[0][3], "6");

        let mut rdr = csv::Reader::from_path(dir.path().join("od_summary.csv")).unwrap();
        let rows: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(&rows[0][3], "");
    }
}

// ── Observer ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod observer_tests {
    use kp_core::ColonyConfig;
    use kp_route::{DemandTable, OdDemand};
    use kp_sim::Driver;

    use super::helpers::line_xyz;
    use crate::{
        CsvWriter, EdgeFlowRow, KPathRow, OdSummaryRow, OutputError, OutputResult, OutputWriter,
        RunOutputObserver,
    };

    #[test]
    fn run_writes_all_three_files() {
        let (net, g) = line_xyz();
        let mut demand = DemandTable::new();
        demand.push(OdDemand {
            origin:      net.station("x").unwrap(),
            destination: net.station("y").unwrap(),
            passengers:  100,
        });
        let cfg = ColonyConfig { iterations: 10, ant_count: 5, ..ColonyConfig::default() };
        let mut driver = Driver::new(&net, &g, cfg).unwrap();

        let dir = tempfile::tempdir().unwrap();
        let mut obs = RunOutputObserver::new(CsvWriter::new(dir.path()).unwrap(), &net);
        driver.run(&demand, &mut obs).unwrap();
        assert!(obs.take_error().is_none());

        let mut rdr = csv::Reader::from_path(dir.path().join("kpaths.csv")).unwrap();
        let rows: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 1);
        assert_eq!(&rows[0][0], "xy");
        assert_eq!(&rows[0][2], "x-y");
        assert_eq!(&rows[0][5], "100");

        let mut rdr = csv::Reader::from_path(dir.path().join("edge_flows.csv")).unwrap();
        let flows: Vec<(String, String)> = rdr
            .records()
            .map(|r| r.unwrap())
            .map(|r| (format!("{}{}", &r[0], &r[1]), r[2].to_owned()))
            .collect();
        assert_eq!(flows.len(), 4);
        assert!(flows.contains(&("xy".to_owned(), "100".to_owned())));
        assert!(flows.contains(&("yx".to_owned(), "0".to_owned())));
    }

    /// Fails every write with a distinguishable message.
    struct Broken {
        calls: usize,
    }

    impl OutputWriter for Broken {
        fn write_kpaths(&mut self, _rows: &[KPathRow]) -> OutputResult<()> {
            self.fail()
        }
        fn write_od_summary(&mut self, _row: &OdSummaryRow) -> OutputResult<()> {
            self.fail()
        }
        fn write_edge_flows(&mut self, _rows: &[EdgeFlowRow]) -> OutputResult<()> {
            self.fail()
        }
        fn finish(&mut self) -> OutputResult<()> {
            self.fail()
        }
    }

    impl Broken {
        fn fail(&mut self) -> OutputResult<()> {
            self.calls += 1;
            Err(OutputError::Io(std::io::Error::other(format!("write {}", self.calls))))
        }
    }

    #[test]
    fn first_error_is_kept() {
        let (net, g) = line_xyz();
        let mut demand = DemandTable::new();
        demand.push(OdDemand {
            origin:      net.station("x").unwrap(),
            destination: net.station("y").unwrap(),
            passengers:  1,
        });
        let cfg = ColonyConfig { iterations: 3, ant_count: 2, ..ColonyConfig::default() };
        let mut driver = Driver::new(&net, &g, cfg).unwrap();

        let mut obs = RunOutputObserver::new(Broken { calls: 0 }, &net);
        driver.run(&demand, &mut obs).unwrap();
        let err = obs.take_error().unwrap();
        assert!(err.to_string().contains("write 1"));
        assert!(obs.take_error().is_none());
        assert_eq!(obs.into_writer().calls, 4);
    }
}
