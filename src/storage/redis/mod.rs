//! Redis storage implementations.

mod counter_store;

pub use counter_store::RedisCounterStore;
