//! CSV output backend.
//!
//! Creates three files in the configured output directory:
//! - `kpaths.csv`
//! - `od_summary.csv`
//! - `edge_flows.csv`

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::writer::OutputWriter;
use crate::{EdgeFlowRow, KPathRow, OdSummaryRow, OutputResult};

/// Writes run output to three CSV files.
pub struct CsvWriter {
    kpaths:   Writer<File>,
    summary:  Writer<File>,
    flows:    Writer<File>,
    finished: bool,
}

impl CsvWriter {
    /// Create `dir` if needed, open the three CSV files, and write the
    /// header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        std::fs::create_dir_all(dir)?;

        let mut kpaths = Writer::from_path(dir.join("kpaths.csv"))?;
        kpaths.write_record(["od", "rank", "route", "cost", "share", "volume"])?;

        let mut summary = Writer::from_path(dir.join("od_summary.csv"))?;
        summary.write_record(["od", "demand", "k", "shortest", "dead_agents"])?;

        let mut flows = Writer::from_path(dir.join("edge_flows.csv"))?;
        flows.write_record(["from", "to", "flow"])?;

        Ok(Self { kpaths, summary, flows, finished: false })
    }
}

impl OutputWriter for CsvWriter {
    fn write_kpaths(&mut self, rows: &[KPathRow]) -> OutputResult<()> {
        for row in rows {
            self.kpaths.write_record(&[
                row.od.clone(),
                row.rank.to_string(),
                row.route.clone(),
                row.cost.to_string(),
                row.share.to_string(),
                row.volume.to_string(),
            ])?;
        }
        Ok(())
    }

    fn write_od_summary(&mut self, row: &OdSummaryRow) -> OutputResult<()> {
        self.summary.write_record(&[
            row.od.clone(),
            row.demand.to_string(),
            row.k.to_string(),
            row.shortest.map(|s| s.to_string()).unwrap_or_default(),
            row.dead_agents.to_string(),
        ])?;
        Ok(())
    }

    fn write_edge_flows(&mut self, rows: &[EdgeFlowRow]) -> OutputResult<()> {
        for row in rows {
            self.flows.write_record(&[row.from.clone(), row.to.clone(), row.flow.to_string()])?;
        }
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.kpaths.flush()?;
        self.summary.flush()?;
        self.flows.flush()?;
        Ok(())
    }
}
