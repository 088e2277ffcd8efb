//! Command implementations.

pub mod award;
pub mod event;
pub mod history;
pub mod member;
pub mod rank;
pub mod reset;
