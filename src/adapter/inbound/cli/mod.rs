//! CLI module graph.

pub mod allocate;
pub mod command;
pub mod config;
pub mod distribution;
pub mod explain;
pub mod input;
pub mod markets;
pub mod output;
pub mod paths;
pub mod settle;
