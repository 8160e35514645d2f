//! Trait seams for the updater's two collaborators
//!
//! The production wiring is fixed (ifconfig.me and the Hostinger API); these
//! traits exist so the orchestrator can be exercised against test doubles.

use async_trait::async_trait;

use crate::hostinger::{UpdateError, UpdateOutcome, ZoneUpdateRequest};

/// Source of the host's current public IPv4 address.
#[async_trait]
pub trait IpSource: Send + Sync {
    /// Returns the current public IPv4 address as a dotted-quad string.
    ///
    /// Fails on transport errors, non-2xx responses, or a body that does not
    /// have the dotted-quad shape. No retries; the scheduler re-invokes the
    /// whole process.
    async fn current_ipv4(&self) -> anyhow::Result<String>;
}

/// Target accepting DNS zone updates.
#[async_trait]
pub trait DnsProvider: Send + Sync {
    /// Applies `request` to the zone for `domain`.
    async fn update_zone(
        &self,
        domain: &str,
        request: &ZoneUpdateRequest,
    ) -> Result<UpdateOutcome, UpdateError>;
}
