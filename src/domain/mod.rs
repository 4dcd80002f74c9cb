pub mod metric;
pub mod sample;
pub mod series;

pub use metric::{table_columns, Metric};
pub use sample::{Reading, Sample};
pub use series::{CombinedTable, Point, Series};
