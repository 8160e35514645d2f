//! Single-run update orchestration
//!
//! Linear control flow: resolve current IP, load the last published IP,
//! compare, publish on change, persist on confirmed success. In the steady
//! state (no change) a run costs one IP-echo request and nothing else.

use std::sync::Arc;

use tracing::{error, info, warn};

use crate::config::Config;
use crate::constants::{ENV_API_TOKEN, MIN_API_TOKEN_LENGTH};
use crate::hostinger::{UpdateError, UpdateOutcome, ZoneUpdateRequest};
use crate::provider::{DnsProvider, IpSource};
use crate::state::StateStore;

//==============================================================================
// Outcome
//==============================================================================

/// Result of one updater run, mapped to the process exit code in main.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// Current IP matches the last published IP; nothing sent.
    NoChange,
    /// The provider accepted the new record and the state file was refreshed.
    Updated,
    /// Dry run: a change was detected but no update was sent.
    WouldUpdate,
    /// IP resolution or the zone update failed; state left untouched so the
    /// next run re-attempts the same update.
    Failed,
}

impl RunOutcome {
    pub fn is_failure(self) -> bool {
        matches!(self, RunOutcome::Failed)
    }
}

//==============================================================================
// Updater
//==============================================================================

/// One-shot DDNS updater.
pub struct Updater {
    config: Arc<Config>,
    ip_source: Arc<dyn IpSource>,
    provider: Arc<dyn DnsProvider>,
    store: StateStore,
    dry_run: bool,
}

impl Updater {
    pub fn new(
        config: Arc<Config>,
        ip_source: Arc<dyn IpSource>,
        provider: Arc<dyn DnsProvider>,
        store: StateStore,
    ) -> Self {
        Self {
            config,
            ip_source,
            provider,
            store,
            dry_run: false,
        }
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Performs one update check.
    pub async fn run(&self) -> RunOutcome {
        info!("Starting update check for {}", self.config.record_fqdn());

        let current = match self.ip_source.current_ipv4().await {
            Ok(ip) => ip,
            Err(e) => {
                error!("Could not determine current public IP: {:#}", e);
                return RunOutcome::Failed;
            }
        };

        let last = self.store.load();
        if last.as_deref() == Some(current.as_str()) {
            info!("No IP change detected ({})", current);
            return RunOutcome::NoChange;
        }

        info!(
            "IP change detected: current {}, last {}",
            current,
            last.as_deref().unwrap_or("none")
        );

        if self.dry_run {
            info!(
                "Dry run: would update {} -> {}",
                self.config.record_fqdn(),
                current
            );
            return RunOutcome::WouldUpdate;
        }

        if self.publish(&current).await {
            // Persist only after the provider confirmed the update. Losing
            // this write just costs one redundant attempt next run.
            if let Err(e) = self.store.save(&current) {
                warn!("Could not persist last IP: {:#}", e);
            }
            info!(
                "Update successful: {} -> {}",
                self.config.record_fqdn(),
                current
            );
            RunOutcome::Updated
        } else {
            error!("Update failed; next run will retry");
            RunOutcome::Failed
        }
    }

    /// Sends the zone update, interpreting the provider's response.
    ///
    /// Returns false on any failure; the differentiated logging and the
    /// 401/403 state reset are the only per-variant behavior.
    async fn publish(&self, ip: &str) -> bool {
        let token = self.config.api_token.as_str();
        if token.is_empty() || token.len() < MIN_API_TOKEN_LENGTH {
            error!(
                "API token is not set or too short; set {} to a valid token",
                ENV_API_TOKEN
            );
            return false;
        }

        let request = ZoneUpdateRequest::a_record(&self.config.subdomain, ip, self.config.ttl);

        info!(
            "Sending zone update for {} -> {}",
            self.config.record_fqdn(),
            ip
        );
        match self.provider.update_zone(&self.config.domain, &request).await {
            Ok(UpdateOutcome::Accepted) => {
                info!(
                    "Provider accepted update for {} -> {}",
                    self.config.record_fqdn(),
                    ip
                );
                true
            }
            Ok(UpdateOutcome::AcceptedUnexpectedBody(body)) => {
                // Lenient policy: a 2xx without a provider error is success,
                // whatever the body looks like.
                warn!(
                    "Provider accepted update but returned an unexpected body: {}",
                    body
                );
                true
            }
            Err(e @ UpdateError::Unauthorized { .. }) => {
                error!("{:#}; verify {} is correct", e, ENV_API_TOKEN);
                // Drop the cached IP so the next run retries instead of
                // skipping on "no change".
                match self.store.clear() {
                    Ok(()) => info!("Cleared cached last IP to force a retry on the next run"),
                    Err(clear_err) => warn!("Could not clear cached last IP: {:#}", clear_err),
                }
                false
            }
            Err(e @ UpdateError::Validation(_)) => {
                error!("{:#}; check the configured domain and subdomain", e);
                false
            }
            Err(e @ UpdateError::Server { .. }) => {
                error!("{:#}", e);
                false
            }
            Err(e) => {
                error!("Zone update failed: {:#}", e);
                false
            }
        }
    }
}
