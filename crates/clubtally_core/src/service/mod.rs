//! Roster use-case services.
//!
//! # Responsibility
//! - Own the in-memory roster and dispatch user intents against it.
//! - Keep front-ends (FFI, CLI) decoupled from storage details.

pub mod ranking;
pub mod roster_service;
