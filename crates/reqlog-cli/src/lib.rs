//! Reqlog CLI library: argument definitions, configuration and the export
//! pipeline behind the `reqlog` binary.

pub mod cli;
pub mod config;
pub mod export;
pub mod sink;
