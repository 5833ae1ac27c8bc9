//! `RunOutputObserver<W>` — bridges `RunObserver` to an `OutputWriter`.

use kp_route::EdgeFlowTable;
use kp_sim::{OdOutcome, RunObserver};
use kp_world::TransitNetwork;

use crate::row::{EdgeFlowRow, KPathRow, OdSummaryRow};
use crate::writer::OutputWriter;
use crate::{OutputError, OutputResult};

/// A [`RunObserver`] that writes K-paths, per-OD summaries, and the final
/// flow table to any [`OutputWriter`].
///
/// Observer hooks cannot fail, so the first write error is held until the
/// caller collects it with [`take_error`][Self::take_error] once the run is
/// over.  Later errors are dropped.
pub struct RunOutputObserver<'a, W: OutputWriter> {
    writer:     W,
    network:    &'a TransitNetwork,
    last_error: Option<OutputError>,
}

impl<'a, W: OutputWriter> RunOutputObserver<'a, W> {
    pub fn new(writer: W, network: &'a TransitNetwork) -> Self {
        Self { writer, network, last_error: None }
    }

    /// The first write error of the run; `None` when every write succeeded.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    pub fn into_writer(self) -> W {
        self.writer
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            self.last_error.get_or_insert(e);
        }
    }
}

impl<W: OutputWriter> RunObserver for RunOutputObserver<'_, W> {
    fn on_od_end(&mut self, outcome: &OdOutcome) {
        let rows = KPathRow::from_outcome(self.network, outcome);
        if !rows.is_empty() {
            let result = self.writer.write_kpaths(&rows);
            self.store_err(result);
        }
        let summary = OdSummaryRow::from_outcome(self.network, outcome);
        let result = self.writer.write_od_summary(&summary);
        self.store_err(result);
    }

    fn on_run_end(&mut self, flows: &EdgeFlowTable) {
        let rows = EdgeFlowRow::from_table(self.network, flows);
        let result = self.writer.write_edge_flows(&rows);
        self.store_err(result);
        let result = self.writer.finish();
        self.store_err(result);
    }
}
