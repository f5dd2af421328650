pub mod classifier;
pub mod clock;
pub mod config;
pub mod contracts;
pub mod entities;
pub mod errors;
pub mod http_api;
pub mod query_engine;
pub mod queue_resolver;
pub mod selector;
pub mod slotting;

#[cfg(test)]
pub(crate) mod fixtures;
