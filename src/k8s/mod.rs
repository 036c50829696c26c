pub mod client;
pub mod collect;
pub mod units;
pub mod workloads;
