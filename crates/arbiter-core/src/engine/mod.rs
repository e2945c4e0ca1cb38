pub mod runner;

pub use runner::{RunReport, RunRow, RunSummary, Runner};
