//! Shared storage integration tests.
//!
//! Tests the SessionStore, PricingCatalog and CounterStore interfaces
//! against all implementations. Each backend binary imports these test
//! functions and runs them.

#![allow(dead_code)]

pub mod counter_store_tests;
pub mod pricing_catalog_tests;
pub mod session_store_tests;
