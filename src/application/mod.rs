mod collector;
mod scheduler;

#[cfg(test)]
pub(crate) mod fakes;

pub use collector::SampleCollector;
pub use scheduler::Scheduler;
