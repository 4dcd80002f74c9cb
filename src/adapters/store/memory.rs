use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::domain::{CombinedTable, Metric, Point, Sample, Series};
use crate::error::{MonitorError, MonitorResult};
use crate::ports::SeriesStore;

struct Inner {
    table: CombinedTable,
    series: [Series; 4],
}

impl Inner {
    fn check_lengths(&self) -> MonitorResult<()> {
        let table_rows = self.table.len();
        for series in &self.series {
            if series.len() != table_rows {
                return Err(MonitorError::StoreInvariantViolation {
                    metric: series.metric,
                    table_rows,
                    series_len: series.len(),
                });
            }
        }
        Ok(())
    }
}

/// In-memory, unbounded series store.
///
/// One lock covers the table and all four series, so readers only ever see
/// whole ticks. Snapshots are copies taken under the read lock.
pub struct MemorySeriesStore {
    inner: RwLock<Inner>,
}

impl MemorySeriesStore {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Inner {
                table: CombinedTable::new(),
                series: Metric::ALL.map(Series::new),
            }),
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, Inner> {
        self.inner.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, Inner> {
        self.inner.write().unwrap_or_else(|e| e.into_inner())
    }
}

impl Default for MemorySeriesStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SeriesStore for MemorySeriesStore {
    fn append(&self, sample: Sample) -> MonitorResult<()> {
        let mut inner = self.write();
        inner.check_lengths()?;

        for metric in Metric::ALL {
            let point = Point::new(sample.timestamp, sample.reading(metric));
            inner.series[metric.index()].push(point);
        }
        inner.table.push(sample);

        inner.check_lengths()
    }

    fn snapshot(&self, metric: Metric) -> Series {
        self.read().series[metric.index()].clone()
    }

    fn table(&self) -> CombinedTable {
        self.read().table.clone()
    }

    fn latest(&self) -> Option<Sample> {
        self.read().table.last().cloned()
    }

    fn len(&self) -> usize {
        self.read().table.len()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::{Duration, Utc};

    use super::*;
    use crate::domain::Reading;

    fn sample_at(offset_secs: i64, cpu: f64) -> Sample {
        Sample::new(Utc::now() + Duration::seconds(offset_secs))
            .with_reading(Metric::Cpu, Reading::Available(cpu))
            .with_reading(Metric::Memory, Reading::Available(40.0))
            .with_reading(Metric::Disk, Reading::Available(70.0))
            .with_reading(Metric::Network, Reading::Available(2.0))
    }

    #[test]
    fn test_lengths_match_after_every_append() {
        let store = MemorySeriesStore::new();
        assert_eq!(store.len(), 0);

        for k in 1..=25 {
            store.append(sample_at(k, k as f64)).unwrap();
            assert_eq!(store.len(), k as usize);
            assert_eq!(store.table().len(), k as usize);
            for metric in Metric::ALL {
                assert_eq!(store.snapshot(metric).len(), k as usize);
            }
        }
    }

    #[test]
    fn test_snapshot_is_projection_of_table() {
        let store = MemorySeriesStore::new();
        store.append(sample_at(1, 10.0)).unwrap();
        store.append(sample_at(2, 55.0).with_reading(Metric::Disk, Reading::Unavailable)).unwrap();

        let table = store.table();
        for metric in Metric::ALL {
            let projected: Vec<Point> = table
                .rows
                .iter()
                .map(|row| Point::new(row.timestamp, row.reading(metric)))
                .collect();
            assert_eq!(store.snapshot(metric).points, projected);
        }
        assert_eq!(store.snapshot(Metric::Disk).points[1].value, Reading::Unavailable);
        assert_eq!(store.latest().unwrap().cpu_usage, Reading::Available(55.0));
    }

    #[test]
    fn test_snapshot_is_detached_copy() {
        let store = MemorySeriesStore::new();
        store.append(sample_at(1, 10.0)).unwrap();
        let before = store.snapshot(Metric::Cpu);

        store.append(sample_at(2, 20.0)).unwrap();

        assert_eq!(before.len(), 1);
        assert_eq!(store.snapshot(Metric::Cpu).len(), 2);
    }

    #[test]
    fn test_corrupted_state_is_reported() {
        let store = MemorySeriesStore::new();
        store.write().series[Metric::Network.index()].push(Point::new(Utc::now(), Reading::Unavailable));

        let err = store.append(sample_at(1, 1.0)).unwrap_err();
        assert!(err.is_fatal());
        assert_eq!(store.table().len(), 0);
    }

    #[test]
    fn test_concurrent_readers_never_see_partial_rows() {
        let store = Arc::new(MemorySeriesStore::new());
        let writer = {
            let store = Arc::clone(&store);
            std::thread::spawn(move || {
                for k in 0..500 {
                    store.append(sample_at(k, 1.0)).unwrap();
                }
            })
        };

        for _ in 0..500 {
            let table = store.table();
            let series = store.snapshot(Metric::Network);
            assert!(series.len() >= table.len());
            let inner = store.read();
            inner.check_lengths().unwrap();
        }

        writer.join().unwrap();
        assert_eq!(store.len(), 500);
    }
}
