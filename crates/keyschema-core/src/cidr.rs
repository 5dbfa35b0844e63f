//! IP literal recognition and CIDR range arithmetic.
//!
//! # Design
//! - Addresses are widened to `u128` so IPv4 (32-bit) and IPv6 (128-bit) share one
//!   masking path: `host = ones(width) >> prefix`, `network = addr & !host`,
//!   `broadcast = network | host`.
//! - Host name resolution is an external collaborator behind [`HostResolver`].

use std::fmt::{self, Display, Formatter};
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

use crate::error::{CidrError, CidrResult};

/// Contiguous address range derived from a CIDR literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CidrRange {
    network: IpAddr,
    broadcast: IpAddr,
    prefix_len: u32,
}

impl CidrRange {
    /// First address of the range.
    #[must_use]
    pub const fn network(&self) -> IpAddr {
        self.network
    }

    /// Last address of the range.
    #[must_use]
    pub const fn broadcast(&self) -> IpAddr {
        self.broadcast
    }

    /// Prefix length the range was declared with.
    #[must_use]
    pub const fn prefix_len(&self) -> u32 {
        self.prefix_len
    }

    /// Whether `address` lies within `network..=broadcast`; families never mix.
    #[must_use]
    pub fn contains(&self, address: IpAddr) -> bool {
        let (candidate, width) = to_bits(address);
        let (network, network_width) = to_bits(self.network);
        let (broadcast, _) = to_bits(self.broadcast);
        width == network_width && network <= candidate && candidate <= broadcast
    }
}

impl Display for CidrRange {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}/{}", self.network, self.prefix_len)
    }
}

/// Resolves host names to addresses for [`address_in_scope`].
pub trait HostResolver {
    /// Resolve `host` to every address it maps to.
    ///
    /// # Errors
    ///
    /// Returns `CidrError::Resolve` when the name cannot be resolved.
    fn resolve(&self, host: &str) -> CidrResult<Vec<IpAddr>>;
}

/// Whether `literal` is an IPv4 dotted quad.
#[must_use]
pub fn is_ipv4_literal(literal: &str) -> bool {
    literal.trim().parse::<Ipv4Addr>().is_ok()
}

/// Whether `literal` is an IPv6 address in standard or `::`-compressed form.
#[must_use]
pub fn is_ipv6_literal(literal: &str) -> bool {
    literal.trim().parse::<Ipv6Addr>().is_ok()
}

/// Whether `literal` is an IPv4 or IPv6 address.
#[must_use]
pub fn is_ip_literal(literal: &str) -> bool {
    parse_address(literal).is_ok()
}

/// Whether `literal` is well-formed `address/prefixLength` notation.
#[must_use]
pub fn is_cidr_literal(literal: &str) -> bool {
    parse_cidr(literal).is_ok()
}

/// Compute the range described by `address/prefixLength`.
///
/// # Errors
///
/// Returns `CidrError` when the literal has no `/`, the address is not an IP
/// literal, or the prefix exceeds the address width.
pub fn parse_cidr(literal: &str) -> CidrResult<CidrRange> {
    let trimmed = literal.trim();
    let Some((address, prefix)) = trimmed.split_once('/') else {
        return Err(CidrError::NotCidr {
            literal: trimmed.to_string(),
        });
    };
    let address = parse_address(address)?;
    let (bits, width) = to_bits(address);
    let prefix_len = prefix
        .trim()
        .parse::<u32>()
        .ok()
        .filter(|len| *len <= width)
        .ok_or_else(|| CidrError::InvalidPrefix {
            prefix: prefix.trim().to_string(),
            width,
        })?;

    let all_ones = if width == 128 {
        u128::MAX
    } else {
        (1_u128 << width) - 1
    };
    let host_mask = all_ones.checked_shr(prefix_len).unwrap_or(0);
    let network = bits & !host_mask & all_ones;
    let broadcast = network | host_mask;

    Ok(CidrRange {
        network: from_bits(network, address)?,
        broadcast: from_bits(broadcast, address)?,
        prefix_len,
    })
}

/// Whether the address literal lies inside `range`; unparseable addresses are outside.
#[must_use]
pub fn cidr_contains(range: &CidrRange, address: &str) -> bool {
    parse_address(address).is_ok_and(|address| range.contains(address))
}

/// Whether the address literal is inside `scope`, which may be a CIDR range,
/// a bare address, or a host name resolved through `resolver`.
///
/// # Errors
///
/// Returns `CidrError` when the address is not an IP literal, the scope is malformed
/// CIDR notation, or the host name cannot be resolved.
pub fn address_in_scope(
    resolver: &dyn HostResolver,
    address: &str,
    scope: &str,
) -> CidrResult<bool> {
    let address = parse_address(address)?;
    let scope = scope.trim();
    if scope.contains('/') {
        return Ok(parse_cidr(scope)?.contains(address));
    }
    if let Ok(exact) = parse_address(scope) {
        return Ok(same_address(exact, address));
    }
    let resolved = resolver.resolve(scope)?;
    tracing::debug!(host = scope, addresses = resolved.len(), "resolved scope host");
    Ok(resolved
        .into_iter()
        .any(|candidate| same_address(candidate, address)))
}

fn parse_address(literal: &str) -> CidrResult<IpAddr> {
    literal
        .trim()
        .parse::<IpAddr>()
        .map_err(|_| CidrError::InvalidAddress {
            literal: literal.trim().to_string(),
        })
}

fn same_address(left: IpAddr, right: IpAddr) -> bool {
    to_bits(left) == to_bits(right)
}

fn to_bits(address: IpAddr) -> (u128, u32) {
    match address {
        IpAddr::V4(v4) => (u128::from(u32::from(v4)), 32),
        IpAddr::V6(v6) => (u128::from(v6), 128),
    }
}

fn from_bits(bits: u128, family: IpAddr) -> CidrResult<IpAddr> {
    match family {
        IpAddr::V4(_) => u32::try_from(bits)
            .map(|raw| IpAddr::V4(Ipv4Addr::from(raw)))
            .map_err(|_| CidrError::InvalidAddress {
                literal: family.to_string(),
            }),
        IpAddr::V6(_) => Ok(IpAddr::V6(Ipv6Addr::from(bits))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    struct StaticResolver(HashMap<&'static str, Vec<IpAddr>>);

    impl HostResolver for StaticResolver {
        fn resolve(&self, host: &str) -> CidrResult<Vec<IpAddr>> {
            self.0.get(host).cloned().ok_or_else(|| CidrError::Resolve {
                host: host.to_string(),
                detail: "unknown host".to_string(),
            })
        }
    }

    fn ip(literal: &str) -> IpAddr {
        literal.parse().expect("valid address")
    }

    #[test]
    fn ipv4_range_masks_host_bits() {
        let range = parse_cidr("10.0.0.0/24").expect("valid cidr");
        assert_eq!(range.network(), ip("10.0.0.0"));
        assert_eq!(range.broadcast(), ip("10.0.0.255"));
        assert!(cidr_contains(&range, "10.0.0.128"));
        assert!(!cidr_contains(&range, "10.0.1.1"));
        assert_eq!(range.to_string(), "10.0.0.0/24");
    }

    #[test]
    fn ipv4_range_normalises_host_address() {
        let range = parse_cidr("192.168.17.99/20").expect("valid cidr");
        assert_eq!(range.network(), ip("192.168.16.0"));
        assert_eq!(range.broadcast(), ip("192.168.31.255"));
    }

    #[test]
    fn prefix_extremes_cover_everything_or_one_address() {
        let all = parse_cidr("0.0.0.0/0").expect("valid cidr");
        assert_eq!(all.broadcast(), ip("255.255.255.255"));
        let single = parse_cidr("10.1.2.3/32").expect("valid cidr");
        assert_eq!(single.network(), single.broadcast());

        let all_v6 = parse_cidr("::/0").expect("valid cidr");
        assert_eq!(all_v6.broadcast(), ip("ffff:ffff:ffff:ffff:ffff:ffff:ffff:ffff"));
        let single_v6 = parse_cidr("2001:db8::1/128").expect("valid cidr");
        assert_eq!(single_v6.network(), ip("2001:db8::1"));
    }

    #[test]
    fn ipv6_range_uses_full_width() {
        let range = parse_cidr("2001:db8::/32").expect("valid cidr");
        assert_eq!(range.network(), ip("2001:db8::"));
        assert_eq!(
            range.broadcast(),
            ip("2001:db8:ffff:ffff:ffff:ffff:ffff:ffff")
        );
        assert!(cidr_contains(&range, "2001:db8:1::42"));
        assert!(!cidr_contains(&range, "2001:db9::1"));
        assert!(!cidr_contains(&range, "10.0.0.1"));
    }

    #[test]
    fn malformed_literals_are_rejected() {
        assert!(matches!(
            parse_cidr("10.0.0.0"),
            Err(CidrError::NotCidr { .. })
        ));
        assert!(matches!(
            parse_cidr("10.0.0.300/8"),
            Err(CidrError::InvalidAddress { .. })
        ));
        assert!(matches!(
            parse_cidr("10.0.0.0/33"),
            Err(CidrError::InvalidPrefix { width: 32, .. })
        ));
        assert!(matches!(
            parse_cidr("::1/129"),
            Err(CidrError::InvalidPrefix { width: 128, .. })
        ));
    }

    #[test]
    fn literal_recognition() {
        assert!(is_ipv4_literal("127.0.0.1"));
        assert!(!is_ipv4_literal("127.0.0"));
        assert!(is_ipv6_literal("fe80::1"));
        assert!(is_ipv6_literal("2001:0db8:0000:0000:0000:ff00:0042:8329"));
        assert!(!is_ipv6_literal("fe80:::1"));
        assert!(is_cidr_literal("fe80::/10"));
        assert!(!is_cidr_literal("fe80::"));
    }

    #[test]
    fn scope_accepts_ranges_addresses_and_hosts() {
        let resolver = StaticResolver(HashMap::from([(
            "gateway.local",
            vec![ip("10.0.0.1"), ip("fd00::1")],
        )]));
        assert!(address_in_scope(&resolver, "10.0.0.7", "10.0.0.0/29").expect("range"));
        assert!(!address_in_scope(&resolver, "10.0.0.9", "10.0.0.0/29").expect("range"));
        assert!(address_in_scope(&resolver, "10.0.0.7", "10.0.0.7").expect("address"));
        assert!(address_in_scope(&resolver, "fd00::1", "gateway.local").expect("host"));
        assert!(!address_in_scope(&resolver, "10.0.0.2", "gateway.local").expect("host"));
        assert!(matches!(
            address_in_scope(&resolver, "10.0.0.2", "unknown.local"),
            Err(CidrError::Resolve { .. })
        ));
        assert!(matches!(
            address_in_scope(&resolver, "not-an-ip", "10.0.0.0/8"),
            Err(CidrError::InvalidAddress { .. })
        ));
    }
}
