pub mod config;
pub mod error;
pub mod swarm;
pub mod types;
