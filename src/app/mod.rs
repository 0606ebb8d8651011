//! Application module: the `prioq` stress runner

pub mod cli;
pub mod startup;
pub mod workload;
