//! Suspicious transaction monitor
//!
//! A fixed pool of workers consumes newline-delimited JSON transactions from
//! a source, persists the ones above the suspicion threshold and keeps live
//! counters. Companion modes write synthetic input files and stream them to
//! a consumer over TCP.

pub mod app;
pub mod domain;
pub mod ingest;
pub mod io;
pub mod pool;
pub mod prelude;
pub mod publish;
pub mod settings;
pub mod stats;
pub mod storage;
pub mod workers;

#[cfg(test)]
mod test_support;
