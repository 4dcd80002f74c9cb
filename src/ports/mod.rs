pub mod metric_source;
pub mod series_store;
pub mod sink;

pub use metric_source::MetricSource;
pub use series_store::SeriesStore;
pub use sink::SeriesSink;
