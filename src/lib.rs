// Library module for pathstamp
// Re-exports modules for use in integration tests and external crates

pub mod stamp;
