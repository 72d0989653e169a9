//! Hostname resolution.
//!
//! Literal IPv4/IPv6 strings short-circuit without touching the network.
//! Names go through `trust-dns-resolver`, built fresh for every call so that
//! concurrent scans never share resolver state.
//!
//! When a name resolves to several addresses the first one in the order the
//! resolver returned them is used.

use crate::error::ResolutionError;
use crate::types::Target;
use std::net::IpAddr;
use tracing::debug;
use trust_dns_resolver::config::{ResolverConfig, ResolverOpts};
use trust_dns_resolver::TokioAsyncResolver;

/// Resolve a hostname or IP literal to a single-address [`Target`].
pub async fn resolve(hostname: &str) -> Result<Target, ResolutionError> {
    let hostname = hostname.trim();
    if hostname.is_empty() {
        return Err(ResolutionError::EmptyHostname);
    }

    // Bracketed IPv6 literals ("[::1]") are accepted as well.
    let literal = hostname
        .strip_prefix('[')
        .and_then(|h| h.strip_suffix(']'))
        .unwrap_or(hostname);
    if let Ok(ip) = literal.parse::<IpAddr>() {
        return Ok(Target::new(hostname, ip));
    }

    let resolver = build_resolver();
    let response = resolver
        .lookup_ip(hostname)
        .await
        .map_err(|e| ResolutionError::LookupFailed(hostname.to_string(), e.to_string()))?;

    let ip = response
        .iter()
        .next()
        .ok_or_else(|| ResolutionError::NoAddressesFound(hostname.to_string()))?;

    debug!(hostname, %ip, "resolved target");
    Ok(Target::new(hostname, ip))
}

/// Prefer the system resolver configuration (hosts file, resolv.conf),
/// falling back to the library defaults when it cannot be read.
fn build_resolver() -> TokioAsyncResolver {
    TokioAsyncResolver::tokio_from_system_conf().unwrap_or_else(|e| {
        debug!(error = %e, "system resolver config unavailable, using defaults");
        TokioAsyncResolver::tokio(ResolverConfig::default(), ResolverOpts::default())
    })
}
