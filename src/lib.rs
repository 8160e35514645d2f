//! Core library for hostinger-ddns
//!
//! One-shot dynamic DNS updating for the Hostinger DNS API: resolve the
//! host's public IPv4 address, compare it against the last published value,
//! and replace the zone's A record when it changed.

pub mod config;
pub mod constants;
pub mod hostinger;
pub mod provider;
pub mod resolver;
pub mod state;
pub mod updater;
pub mod validation;
