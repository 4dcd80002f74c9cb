pub mod procfs;
pub mod sink;
pub mod store;

pub use procfs::{ProcfsConfig, ProcfsMetricSource};
pub use sink::LogSink;
pub use store::MemorySeriesStore;
