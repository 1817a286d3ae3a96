//! arcade-pass - play-session codes for arcade consoles
//!
//! Issues a short code for each purchased play session, records it in a
//! ledger, and lets a console check and redeem it exactly once.
//!
//! - [`code`]: the code alphabet and the counter-backed generator
//! - [`services`]: registration, validation and redemption
//! - [`storage`]: SQL ledger and catalog, Redis counter, in-memory mocks

pub mod code;
pub mod config;
pub mod interfaces;
pub mod models;
pub mod services;
pub mod storage;
pub mod utils;
pub mod validation;
