//! Core library for the `mach` CLI.
//!
//! This crate provides the building blocks used by the binary: CLI argument
//! types, configuration resolution, the raw HTTP/1.1 client and worker pool,
//! statistics with regression comparison, and JSON persistence of runs. The
//! primary user-facing interface is the `mach` command-line application;
//! library APIs may evolve as the CLI grows.
pub mod args;
pub mod config;
pub mod error;
pub mod http;
pub mod metrics;
pub mod shutdown;
pub mod storage;
pub mod ui;

#[cfg(feature = "fuzzing")]
pub mod fuzzing;
