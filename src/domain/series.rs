use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{table_columns, Metric, Reading, Sample};

/// One (timestamp, value) pair of a series
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub timestamp: DateTime<Utc>,
    pub value: Reading,
}

impl Point {
    pub fn new(timestamp: DateTime<Utc>, value: Reading) -> Self {
        Self { timestamp, value }
    }
}

/// Append-only chronological history of a single metric
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Series {
    pub metric: Metric,
    pub points: Vec<Point>,
}

impl Series {
    pub fn new(metric: Metric) -> Self {
        Self {
            metric,
            points: Vec::new(),
        }
    }

    pub fn push(&mut self, point: Point) {
        self.points.push(point);
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn last(&self) -> Option<&Point> {
        self.points.last()
    }
}

/// Every sample in tick order, one row per tick
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CombinedTable {
    pub rows: Vec<Sample>,
}

impl CombinedTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn columns(&self) -> [&'static str; 5] {
        table_columns()
    }

    pub fn push(&mut self, sample: Sample) {
        self.rows.push(sample);
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn last(&self) -> Option<&Sample> {
        self.rows.last()
    }
}
