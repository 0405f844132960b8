//! Adapters for the staking subsystem

pub mod event_bus;

pub use event_bus::InMemoryEventBus;
