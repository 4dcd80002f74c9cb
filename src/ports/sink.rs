use crate::domain::Series;
use crate::error::MonitorResult;

/// Port for consumers that display an updated series every tick
pub trait SeriesSink: Send + Sync {
    fn name(&self) -> &str;

    /// Called once per metric per tick with the full committed series
    fn render(&self, series: &Series) -> MonitorResult<()>;
}
