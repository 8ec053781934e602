//! Driver for the `solgen` binary: configuration, deployment loading,
//! compilation of every listed contract and emission of the results.

pub mod commands;
pub mod config;
pub mod deployment;
pub mod emit;

pub use commands::{compile, inspect, run, RunSummary, SkippedContract};
pub use config::{Config, RunSettings};
pub use deployment::{load_deployments, load_options, Deployment};
pub use emit::{Emitter, JsonEmitter};
