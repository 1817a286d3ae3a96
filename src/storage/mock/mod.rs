//! Mock storage implementations for testing.

mod counter_store;
mod pricing_catalog;
mod session_store;

pub use counter_store::MockCounterStore;
pub use pricing_catalog::MockPricingCatalog;
pub use session_store::MockSessionStore;
