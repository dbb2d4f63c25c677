//! Application layer - one monitor run from fetch to notification

pub mod monitor;

pub use monitor::Monitor;
