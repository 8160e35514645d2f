//! Validation utilities for hostinger-ddns
//!
//! Covers DNS name validation for the configured domain and subdomain, and
//! the dotted-quad shape check applied to IP-echo responses.

use anyhow::{anyhow, Result};

use crate::constants::{MAX_LABEL_LENGTH, MAX_RECORD_NAME_LENGTH};

/// Validates a DNS record name (zone apex or record label).
///
/// Enforces RFC 1035 length limits (253 characters total, 63 per label) and
/// the usual label syntax: letters, digits, `-` (not at a label boundary) and
/// `_` (TXT/ACME style labels). `@` denotes the zone apex, a trailing dot
/// (FQDN notation) is accepted, and `*` is accepted as a complete label.
pub fn validate_record_name(record_name: &str) -> Result<()> {
    let trimmed = record_name.trim();
    if trimmed.is_empty() {
        return Err(anyhow!("Record name cannot be empty"));
    }
    if trimmed == "@" {
        return Ok(());
    }
    if trimmed.contains(' ') {
        return Err(anyhow!("Record name cannot contain spaces"));
    }

    let name = trimmed.strip_suffix('.').unwrap_or(trimmed);
    if name.is_empty() {
        return Err(anyhow!("Record name cannot be empty"));
    }
    if name.len() > MAX_RECORD_NAME_LENGTH {
        return Err(anyhow!(
            "Record name too long (max {} characters, got {})",
            MAX_RECORD_NAME_LENGTH,
            name.len()
        ));
    }
    if name.starts_with('.') {
        return Err(anyhow!("Record name cannot start with a dot"));
    }
    if name.contains("..") {
        return Err(anyhow!("Record name cannot contain consecutive dots"));
    }

    for label in name.split('.') {
        validate_label(label)?;
    }

    Ok(())
}

fn validate_label(label: &str) -> Result<()> {
    if label.is_empty() {
        return Err(anyhow!("Record name contains empty label"));
    }
    if label == "*" {
        return Ok(());
    }
    if label.len() > MAX_LABEL_LENGTH {
        return Err(anyhow!(
            "Record name label too long (max {} characters, got {})",
            MAX_LABEL_LENGTH,
            label.len()
        ));
    }
    if label.starts_with('-') || label.ends_with('-') {
        return Err(anyhow!("Record name label cannot start or end with hyphen"));
    }
    for ch in label.chars() {
        if !ch.is_alphanumeric() && ch != '-' && ch != '_' {
            return Err(anyhow!(
                "Record name contains invalid character: '{}' (allowed: letters, digits, '-', '_', or wildcard labels)",
                ch
            ));
        }
    }
    Ok(())
}

/// Returns true if `ip` has the dotted-quad shape: exactly four dot-separated
/// segments, each non-empty and all ASCII digits.
///
/// Deliberately no 0-255 range check. The IP-echo endpoint is trusted to
/// return a real address; this only rejects bodies that are obviously not an
/// IPv4 address (error pages, truncated responses).
pub fn is_dotted_quad(ip: &str) -> bool {
    let segments: Vec<&str> = ip.split('.').collect();
    if segments.len() != 4 {
        return false;
    }
    segments
        .iter()
        .all(|s| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit()))
}
