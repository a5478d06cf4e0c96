//! Command implementations for the seqcfg CLI

pub mod check;
pub mod config;
pub mod example;
pub mod kinds;
pub mod table;
