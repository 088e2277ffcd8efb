//! Flutter bridge for the club tally core.

pub mod api;
