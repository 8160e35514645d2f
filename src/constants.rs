//! Common constants used throughout the hostinger-ddns application

//==============================================================================
// Hostinger API Constants
//==============================================================================

/// Hostinger DNS zone API base URL
pub const HOSTINGER_API_BASE: &str = "https://developers.hostinger.com/api/dns/v1";

/// User agent string for outbound HTTP requests
pub const USER_AGENT: &str = "hostinger-ddns/1.0";

/// DNS record type for IPv4 addresses
pub const DNS_RECORD_TYPE_A: &str = "A";

//==============================================================================
// IP Echo Constants
//==============================================================================

/// Public IP-echo endpoint returning the caller's IPv4 address as plain text
pub const IP_ECHO_URL: &str = "https://ifconfig.me";

//==============================================================================
// Defaults
//==============================================================================

/// Default zone apex
pub const DEFAULT_DOMAIN: &str = "example.com";

/// Default record label within the zone
pub const DEFAULT_SUBDOMAIN: &str = "vpn";

/// Default record TTL in seconds
pub const DEFAULT_TTL_SECS: u32 = 60;

/// Default HTTP request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 15;

/// Default log file path
pub const DEFAULT_LOG_FILE: &str = "/tmp/hostinger-ddns.log";

/// Default last-IP state file path
pub const DEFAULT_STATE_FILE: &str = "/tmp/hostinger-ddns-last-ip.txt";

//==============================================================================
// Validation Constants
//==============================================================================

/// Minimum plausible API token length in characters
pub const MIN_API_TOKEN_LENGTH: usize = 20;

/// Minimum record TTL in seconds
pub const MIN_TTL_SECS: u32 = 1;

/// Maximum record TTL in seconds (one day)
pub const MAX_TTL_SECS: u32 = 86_400;

/// Minimum HTTP request timeout in seconds
pub const MIN_TIMEOUT_SECS: u64 = 1;

/// Maximum HTTP request timeout in seconds
pub const MAX_TIMEOUT_SECS: u64 = 300;

/// Maximum DNS record name length in characters
pub const MAX_RECORD_NAME_LENGTH: usize = 253;

/// Maximum DNS label length in characters
pub const MAX_LABEL_LENGTH: usize = 63;

//==============================================================================
// Environment Variable Names
//==============================================================================

/// Environment variable name for the Hostinger API token
pub const ENV_API_TOKEN: &str = "HOSTINGER_API_TOKEN";

/// Environment variable name for the zone apex
pub const ENV_DOMAIN: &str = "DDNS_DOMAIN";

/// Environment variable name for the record label
pub const ENV_SUBDOMAIN: &str = "DDNS_SUBDOMAIN";

/// Environment variable name for the record TTL
pub const ENV_TTL: &str = "DDNS_TTL";

/// Environment variable name for the HTTP timeout
pub const ENV_TIMEOUT: &str = "DDNS_TIMEOUT";

/// Environment variable name for the log file path
pub const ENV_LOG_FILE: &str = "DDNS_LOG_FILE";

/// Environment variable name for the state file path
pub const ENV_STATE_FILE: &str = "DDNS_STATE_FILE";

/// Environment variable name for verbose logging
pub const ENV_VERBOSE: &str = "DDNS_VERBOSE";
