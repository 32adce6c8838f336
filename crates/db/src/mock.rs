//! Test doubles for the repository traits.
//!
//! [`repositories`] holds `mockall` mocks for expectation-driven tests;
//! [`memory::InMemoryStore`] is a working ledger that enforces the same
//! uniqueness rules as the PostgreSQL schema.

pub mod memory;
pub mod repositories;
