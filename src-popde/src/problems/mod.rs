//! Ready-made problems.

pub mod benchmark;
pub mod translate;

pub use benchmark::Benchmark;
pub use translate::Translate;
