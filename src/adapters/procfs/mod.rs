mod parser;
mod source;

use std::path::PathBuf;

pub use source::ProcfsMetricSource;

/// Configuration for procfs paths (useful for Docker mounts)
#[derive(Debug, Clone)]
pub struct ProcfsConfig {
    pub proc_path: PathBuf,
}

impl ProcfsConfig {
    pub fn new(proc_path: impl Into<PathBuf>) -> Self {
        Self {
            proc_path: proc_path.into(),
        }
    }
}
