//! Public IP resolution via an IP-echo HTTP endpoint

use std::time::Duration;

use anyhow::{bail, Context as _, Result};

use crate::constants::{IP_ECHO_URL, USER_AGENT};
use crate::provider::IpSource;
use crate::validation::is_dotted_quad;

//==============================================================================
// Resolver
//==============================================================================

/// Resolves the host's public IPv4 address with a single bounded GET.
pub struct HttpIpResolver {
    url: String,
    client: reqwest::Client,
}

impl HttpIpResolver {
    pub fn new(timeout: Duration) -> Result<Self> {
        Self::with_url(IP_ECHO_URL, timeout)
    }

    pub fn with_url(url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .connect_timeout(timeout)
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .context("build reqwest client")?;

        Ok(Self {
            url: url.into(),
            client,
        })
    }

    async fn fetch(&self) -> Result<String> {
        let resp = self
            .client
            .get(&self.url)
            .send()
            .await
            .with_context(|| format!("IP echo request to {} failed", self.url))?;

        let status = resp.status();
        if !status.is_success() {
            bail!("IP echo endpoint {} returned HTTP {}", self.url, status);
        }

        let body = resp
            .text()
            .await
            .context("Failed to read IP echo response")?;
        parse_ip_body(&body)
    }
}

/// Trims and shape-checks an IP-echo response body.
fn parse_ip_body(body: &str) -> Result<String> {
    let ip = body.trim();
    if !is_dotted_quad(ip) {
        bail!("Invalid IP format received from IP echo endpoint: '{}'", ip);
    }
    Ok(ip.to_string())
}

#[async_trait::async_trait]
impl IpSource for HttpIpResolver {
    async fn current_ipv4(&self) -> Result<String> {
        self.fetch().await
    }
}

//==============================================================================
// Tests
//==============================================================================
