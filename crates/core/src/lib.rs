//! # Slotbook Core
//!
//! Domain types shared by the storage and API crates: identifiers, operator
//! and booking records, request/response payloads, the error type, and the
//! daily slot catalog.

pub mod errors;
pub mod models;
pub mod slots;
