//! Hostinger API client for DNS zone updates
//!
//! Uses reqwest with rustls for HTTP requests. A zone update replaces any
//! existing A records matching the configured name (`overwrite: true`), so
//! the zone never accumulates stale duplicates.

use std::time::Duration;

use anyhow::{Context as _, Result};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;
use urlencoding::encode;
use zeroize::Zeroizing;

use crate::constants::{DNS_RECORD_TYPE_A, HOSTINGER_API_BASE, USER_AGENT};
use crate::provider::DnsProvider;

//==============================================================================
// Wire Types
//==============================================================================

/// Body of a DNS zone update request.
///
/// `overwrite` is always true for DDNS use: the provider must replace the
/// existing A records for the name rather than append to them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ZoneUpdateRequest {
    pub overwrite: bool,
    pub zone: Vec<ZoneEntry>,
}

/// One record set within a zone update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ZoneEntry {
    pub name: String,
    #[serde(rename = "type")]
    pub record_type: String,
    pub ttl: u32,
    pub records: Vec<RecordValue>,
}

/// A single record value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecordValue {
    pub content: String,
}

impl ZoneUpdateRequest {
    /// Builds the request for a single A record: one zone entry named after
    /// the subdomain, carrying exactly one record value.
    pub fn a_record(subdomain: &str, ip: &str, ttl: u32) -> Self {
        Self {
            overwrite: true,
            zone: vec![ZoneEntry {
                name: subdomain.to_string(),
                record_type: DNS_RECORD_TYPE_A.to_string(),
                ttl,
                records: vec![RecordValue {
                    content: ip.to_string(),
                }],
            }],
        }
    }
}

/// Expected "empty success" response shape from the zone update endpoint.
#[derive(Debug, Deserialize)]
struct SuccessBody {
    #[allow(dead_code)]
    message: String,
}

//==============================================================================
// Outcome and Error
//==============================================================================

/// Result of an accepted zone update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// 2xx response with the expected empty-success body shape.
    Accepted,
    /// 2xx response with an unrecognized body. Treated as success: the
    /// absence of a provider error is the authoritative signal. The body is
    /// carried so the caller can log it.
    AcceptedUnexpectedBody(String),
}

/// Classified zone update failure.
///
/// All variants collapse to the same uniform failure at the orchestrator;
/// the distinction exists for log fidelity and the 401/403 state reset.
#[derive(Debug, Error)]
pub enum UpdateError {
    #[error("authentication rejected ({status}): {body}")]
    Unauthorized { status: u16, body: String },
    #[error("zone validation rejected (422): {0}")]
    Validation(String),
    #[error("provider server error ({status}): {body}")]
    Server { status: u16, body: String },
    #[error("provider error ({status}): {body}")]
    Api { status: u16, body: String },
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
}

//==============================================================================
// Client
//==============================================================================

pub struct HostingerClient {
    api_token: Zeroizing<String>,
    client: reqwest::Client,
}

impl HostingerClient {
    pub fn new(api_token: &str, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .connect_timeout(timeout)
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .context("build reqwest client")?;

        Ok(Self {
            api_token: Zeroizing::new(api_token.to_string()),
            client,
        })
    }

    /// Sends a zone update for `domain`, classifying the response.
    pub async fn put_zone(
        &self,
        domain: &str,
        request: &ZoneUpdateRequest,
    ) -> Result<UpdateOutcome, UpdateError> {
        let url = format!("{}/zones/{}", HOSTINGER_API_BASE, encode(domain));

        debug!("PUT {}", url);
        let resp = self
            .client
            .put(&url)
            .bearer_auth(self.api_token.as_str())
            .json(request)
            .send()
            .await?;
        let status = resp.status();
        let body = resp.text().await?;

        if status.is_success() {
            return Ok(match serde_json::from_str::<SuccessBody>(&body) {
                Ok(_) => UpdateOutcome::Accepted,
                Err(_) => UpdateOutcome::AcceptedUnexpectedBody(body),
            });
        }

        Err(match status.as_u16() {
            401 | 403 => UpdateError::Unauthorized {
                status: status.as_u16(),
                body,
            },
            422 => UpdateError::Validation(body),
            s if status.is_server_error() => UpdateError::Server { status: s, body },
            s => UpdateError::Api { status: s, body },
        })
    }
}

#[async_trait::async_trait]
impl DnsProvider for HostingerClient {
    async fn update_zone(
        &self,
        domain: &str,
        request: &ZoneUpdateRequest,
    ) -> Result<UpdateOutcome, UpdateError> {
        self.put_zone(domain, request).await
    }
}

//==============================================================================
// Tests
//==============================================================================
