//! Host-name resolution backed by the operating system resolver.

use std::net::{IpAddr, ToSocketAddrs};

use keyschema_core::{CidrError, CidrResult, HostResolver};

/// Resolves names through `getaddrinfo` via `std::net`.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct SystemResolver;

impl HostResolver for SystemResolver {
    fn resolve(&self, host: &str) -> CidrResult<Vec<IpAddr>> {
        let addresses = (host, 0)
            .to_socket_addrs()
            .map_err(|err| CidrError::Resolve {
                host: host.to_string(),
                detail: err.to_string(),
            })?;
        let mut resolved: Vec<IpAddr> = addresses.map(|address| address.ip()).collect();
        resolved.dedup();
        tracing::debug!(host, addresses = resolved.len(), "host resolved");
        Ok(resolved)
    }
}
