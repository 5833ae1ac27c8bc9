//! The `OutputWriter` trait implemented by backend writers.

use crate::{EdgeFlowRow, KPathRow, OdSummaryRow, OutputResult};

/// Sink for run output.
///
/// Errors are stored by [`RunOutputObserver`][crate::RunOutputObserver] and
/// retrieved with its `take_error`.
pub trait OutputWriter {
    /// Write the K-paths of one OD pair.
    fn write_kpaths(&mut self, rows: &[KPathRow]) -> OutputResult<()>;

    fn write_od_summary(&mut self, row: &OdSummaryRow) -> OutputResult<()>;

    /// Write the final edge-flow table.
    fn write_edge_flows(&mut self, rows: &[EdgeFlowRow]) -> OutputResult<()>;

    /// Flush everything written so far.  Later calls are no-ops.
    fn finish(&mut self) -> OutputResult<()>;
}
