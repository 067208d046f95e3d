pub mod choreography;
pub mod rng;
pub mod scheduler;
pub mod store;
pub mod time;
