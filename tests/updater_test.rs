//! Contract tests for the single-run update orchestration
//!
//! Exercises the updater against stub collaborators: a canned IP source and
//! a recording DNS provider, with the state file in a temp directory.

use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::anyhow;
use async_trait::async_trait;
use tempfile::TempDir;
use zeroize::Zeroizing;

use hostinger_ddns::config::Config;
use hostinger_ddns::hostinger::{UpdateError, UpdateOutcome, ZoneUpdateRequest};
use hostinger_ddns::provider::{DnsProvider, IpSource};
use hostinger_ddns::state::StateStore;
use hostinger_ddns::updater::{RunOutcome, Updater};

//==============================================================================
// Test Doubles
//==============================================================================

struct StubIpSource {
    ip: Option<String>,
}

impl StubIpSource {
    fn returning(ip: &str) -> Arc<Self> {
        Arc::new(Self {
            ip: Some(ip.to_string()),
        })
    }

    fn failing() -> Arc<Self> {
        Arc::new(Self { ip: None })
    }
}

#[async_trait]
impl IpSource for StubIpSource {
    async fn current_ipv4(&self) -> anyhow::Result<String> {
        self.ip
            .clone()
            .ok_or_else(|| anyhow!("IP echo endpoint unreachable"))
    }
}

#[derive(Clone, Copy)]
enum ProviderBehavior {
    Accept,
    AcceptUnexpectedBody,
    Unauthorized(u16),
    Validation,
    Server,
}

struct RecordingProvider {
    behavior: ProviderBehavior,
    calls: AtomicUsize,
    last_request: Mutex<Option<(String, ZoneUpdateRequest)>>,
}

impl RecordingProvider {
    fn new(behavior: ProviderBehavior) -> Arc<Self> {
        Arc::new(Self {
            behavior,
            calls: AtomicUsize::new(0),
            last_request: Mutex::new(None),
        })
    }

    fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn last_request(&self) -> Option<(String, ZoneUpdateRequest)> {
        self.last_request.lock().unwrap().clone()
    }
}

#[async_trait]
impl DnsProvider for RecordingProvider {
    async fn update_zone(
        &self,
        domain: &str,
        request: &ZoneUpdateRequest,
    ) -> Result<UpdateOutcome, UpdateError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_request.lock().unwrap() = Some((domain.to_string(), request.clone()));

        match self.behavior {
            ProviderBehavior::Accept => Ok(UpdateOutcome::Accepted),
            ProviderBehavior::AcceptUnexpectedBody => Ok(UpdateOutcome::AcceptedUnexpectedBody(
                r#"["something else"]"#.to_string(),
            )),
            ProviderBehavior::Unauthorized(status) => Err(UpdateError::Unauthorized {
                status,
                body: "invalid token".to_string(),
            }),
            ProviderBehavior::Validation => {
                Err(UpdateError::Validation("unknown record shape".to_string()))
            }
            ProviderBehavior::Server => Err(UpdateError::Server {
                status: 500,
                body: "internal error".to_string(),
            }),
        }
    }
}

//==============================================================================
// Harness
//==============================================================================

const VALID_TOKEN: &str = "0123456789abcdefghijklmnop";

struct Harness {
    _dir: TempDir,
    state_path: PathBuf,
    config: Arc<Config>,
}

impl Harness {
    fn new(token: &str) -> Self {
        let dir = TempDir::new().expect("temp dir");
        let state_path = dir.path().join("last-ip.txt");
        let config = Arc::new(Config {
            api_token: Zeroizing::new(token.to_string()),
            domain: "example.com".to_string(),
            subdomain: "vpn".to_string(),
            ttl: 60,
            timeout: Duration::from_secs(5),
            log_file: dir.path().join("ddns.log"),
            state_file: state_path.clone(),
            verbose: false,
        });
        Self {
            _dir: dir,
            state_path,
            config,
        }
    }

    fn seed_state(&self, ip: &str) {
        std::fs::write(&self.state_path, ip).expect("seed state");
    }

    fn state_contents(&self) -> Option<String> {
        std::fs::read_to_string(&self.state_path).ok()
    }

    fn updater(
        &self,
        ip_source: Arc<StubIpSource>,
        provider: Arc<RecordingProvider>,
    ) -> Updater {
        Updater::new(
            self.config.clone(),
            ip_source,
            provider,
            StateStore::new(self.state_path.clone()),
        )
    }
}

//==============================================================================
// Tests
//==============================================================================

#[tokio::test]
async fn no_change_makes_no_provider_call() {
    let harness = Harness::new(VALID_TOKEN);
    harness.seed_state("203.0.113.5");
    let provider = RecordingProvider::new(ProviderBehavior::Accept);

    let outcome = harness
        .updater(StubIpSource::returning("203.0.113.5"), provider.clone())
        .run()
        .await;

    assert_eq!(outcome, RunOutcome::NoChange);
    assert_eq!(provider.call_count(), 0);
    assert_eq!(harness.state_contents(), Some("203.0.113.5".to_string()));
}

#[tokio::test]
async fn resolver_failure_fails_without_provider_call() {
    let harness = Harness::new(VALID_TOKEN);
    harness.seed_state("1.2.3.4");
    let provider = RecordingProvider::new(ProviderBehavior::Accept);

    let outcome = harness
        .updater(StubIpSource::failing(), provider.clone())
        .run()
        .await;

    assert_eq!(outcome, RunOutcome::Failed);
    assert_eq!(provider.call_count(), 0);
    assert_eq!(harness.state_contents(), Some("1.2.3.4".to_string()));
}

#[tokio::test]
async fn absent_state_forces_update() {
    let harness = Harness::new(VALID_TOKEN);
    let provider = RecordingProvider::new(ProviderBehavior::Accept);

    let outcome = harness
        .updater(StubIpSource::returning("203.0.113.5"), provider.clone())
        .run()
        .await;

    assert_eq!(outcome, RunOutcome::Updated);
    assert_eq!(provider.call_count(), 1);
    assert_eq!(harness.state_contents(), Some("203.0.113.5".to_string()));
}

#[tokio::test]
async fn accepted_update_persists_new_ip() {
    let harness = Harness::new(VALID_TOKEN);
    harness.seed_state("1.2.3.4");
    let provider = RecordingProvider::new(ProviderBehavior::Accept);

    let outcome = harness
        .updater(StubIpSource::returning("5.6.7.8"), provider.clone())
        .run()
        .await;

    assert_eq!(outcome, RunOutcome::Updated);
    assert_eq!(harness.state_contents(), Some("5.6.7.8".to_string()));

    let (domain, request) = provider.last_request().expect("one request recorded");
    assert_eq!(domain, "example.com");
    assert_eq!(request, ZoneUpdateRequest::a_record("vpn", "5.6.7.8", 60));
}

#[tokio::test]
async fn unexpected_success_body_still_counts_as_updated() {
    let harness = Harness::new(VALID_TOKEN);
    harness.seed_state("1.2.3.4");
    let provider = RecordingProvider::new(ProviderBehavior::AcceptUnexpectedBody);

    let outcome = harness
        .updater(StubIpSource::returning("5.6.7.8"), provider.clone())
        .run()
        .await;

    assert_eq!(outcome, RunOutcome::Updated);
    assert_eq!(harness.state_contents(), Some("5.6.7.8".to_string()));
}

#[tokio::test]
async fn server_error_leaves_state_unchanged() {
    let harness = Harness::new(VALID_TOKEN);
    harness.seed_state("1.2.3.4");
    let provider = RecordingProvider::new(ProviderBehavior::Server);

    let outcome = harness
        .updater(StubIpSource::returning("5.6.7.8"), provider.clone())
        .run()
        .await;

    assert_eq!(outcome, RunOutcome::Failed);
    assert_eq!(provider.call_count(), 1);
    assert_eq!(harness.state_contents(), Some("1.2.3.4".to_string()));
}

#[tokio::test]
async fn validation_error_with_absent_state_stays_absent() {
    let harness = Harness::new(VALID_TOKEN);
    let provider = RecordingProvider::new(ProviderBehavior::Validation);

    let outcome = harness
        .updater(StubIpSource::returning("5.6.7.8"), provider.clone())
        .run()
        .await;

    assert_eq!(outcome, RunOutcome::Failed);
    assert_eq!(harness.state_contents(), None);
}

#[tokio::test]
async fn unauthorized_clears_state_file() {
    let harness = Harness::new(VALID_TOKEN);
    harness.seed_state("1.2.3.4");
    let provider = RecordingProvider::new(ProviderBehavior::Unauthorized(401));

    let outcome = harness
        .updater(StubIpSource::returning("5.6.7.8"), provider.clone())
        .run()
        .await;

    assert_eq!(outcome, RunOutcome::Failed);
    assert_eq!(harness.state_contents(), None);
}

#[tokio::test]
async fn forbidden_also_clears_state_file() {
    let harness = Harness::new(VALID_TOKEN);
    harness.seed_state("1.2.3.4");
    let provider = RecordingProvider::new(ProviderBehavior::Unauthorized(403));

    let outcome = harness
        .updater(StubIpSource::returning("5.6.7.8"), provider.clone())
        .run()
        .await;

    assert_eq!(outcome, RunOutcome::Failed);
    assert_eq!(harness.state_contents(), None);
}

#[tokio::test]
async fn unauthorized_with_absent_state_still_fails_cleanly() {
    let harness = Harness::new(VALID_TOKEN);
    let provider = RecordingProvider::new(ProviderBehavior::Unauthorized(401));

    let outcome = harness
        .updater(StubIpSource::returning("5.6.7.8"), provider.clone())
        .run()
        .await;

    assert_eq!(outcome, RunOutcome::Failed);
    assert_eq!(harness.state_contents(), None);
}

#[tokio::test]
async fn empty_token_fails_before_any_provider_call() {
    let harness = Harness::new("");
    harness.seed_state("1.2.3.4");
    let provider = RecordingProvider::new(ProviderBehavior::Accept);

    let outcome = harness
        .updater(StubIpSource::returning("5.6.7.8"), provider.clone())
        .run()
        .await;

    assert_eq!(outcome, RunOutcome::Failed);
    assert_eq!(provider.call_count(), 0);
    assert_eq!(harness.state_contents(), Some("1.2.3.4".to_string()));
}

#[tokio::test]
async fn short_token_fails_before_any_provider_call() {
    let harness = Harness::new("too-short");
    let provider = RecordingProvider::new(ProviderBehavior::Accept);

    let outcome = harness
        .updater(StubIpSource::returning("5.6.7.8"), provider.clone())
        .run()
        .await;

    assert_eq!(outcome, RunOutcome::Failed);
    assert_eq!(provider.call_count(), 0);
}

#[tokio::test]
async fn dry_run_reports_change_without_side_effects() {
    let harness = Harness::new(VALID_TOKEN);
    harness.seed_state("1.2.3.4");
    let provider = RecordingProvider::new(ProviderBehavior::Accept);

    let outcome = harness
        .updater(StubIpSource::returning("5.6.7.8"), provider.clone())
        .with_dry_run(true)
        .run()
        .await;

    assert_eq!(outcome, RunOutcome::WouldUpdate);
    assert_eq!(provider.call_count(), 0);
    assert_eq!(harness.state_contents(), Some("1.2.3.4".to_string()));
}
