//! Datastore file contracts: shared models, the gateway service trait, and adapters.

pub mod memory;
pub mod service;
pub mod types;
