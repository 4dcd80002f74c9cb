mod memory;

pub use memory::MemorySeriesStore;
