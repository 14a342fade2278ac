//! procline — single-line host telemetry sampler.
//!
//! Provides:
//! - `collector` — CPU, memory, network and disk sampling from `/proc`
//! - `fmt` — pure formatting helpers for the console status line

pub mod collector;
pub mod fmt;
