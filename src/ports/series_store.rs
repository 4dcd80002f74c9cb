use crate::domain::{CombinedTable, Metric, Sample, Series};
use crate::error::MonitorResult;

/// Port for the rolling per-metric series and the combined table
pub trait SeriesStore: Send + Sync {
    /// Append one sample to the table and to every series, all or nothing
    fn append(&self, sample: Sample) -> MonitorResult<()>;

    /// Copy of the committed series for one metric
    fn snapshot(&self, metric: Metric) -> Series;

    /// Copy of the committed combined table
    fn table(&self) -> CombinedTable;

    /// Most recent sample
    fn latest(&self) -> Option<Sample>;

    /// Number of committed rows (ticks)
    fn len(&self) -> usize;
}
