//! Address validation.
//!
//! Host tokens from the log are checked before they reach the GeoIP database so
//! garbage never costs a lookup. Validity is purely syntactic: an address the
//! database does not know is still valid here.

use std::net::IpAddr;

/// Parses a CIDR network literal such as `10.0.0.0/8` or `2001:db8::/32`.
///
/// Host bits must be zero (`10.0.0.1/8` is rejected). A bare address is also a
/// network with a full-length prefix.
pub fn parse_network(token: &str) -> Option<(IpAddr, u8)> {
    let (addr, prefix) = match token.split_once('/') {
        Some((addr, prefix)) => (addr, Some(prefix)),
        None => (token, None),
    };
    let addr: IpAddr = addr.parse().ok()?;
    let max_prefix: u8 = if addr.is_ipv4() { 32 } else { 128 };
    let prefix = match prefix {
        Some(p) if !p.is_empty() && p.bytes().all(|b| b.is_ascii_digit()) => p.parse::<u8>().ok()?,
        Some(_) => return None,
        None => max_prefix,
    };
    if prefix > max_prefix || has_host_bits(addr, prefix) {
        return None;
    }
    Some((addr, prefix))
}

fn has_host_bits(addr: IpAddr, prefix: u8) -> bool {
    match addr {
        IpAddr::V4(v4) => {
            let bits = u32::from(v4);
            let host_mask = u32::MAX.checked_shr(u32::from(prefix)).unwrap_or(0);
            bits & host_mask != 0
        }
        IpAddr::V6(v6) => {
            let bits = u128::from(v6);
            let host_mask = u128::MAX.checked_shr(u32::from(prefix)).unwrap_or(0);
            bits & host_mask != 0
        }
    }
}

/// Returns true if `token` is an IPv4/IPv6 address or network literal.
///
/// Address parsing is attempted first, network parsing second.
pub fn is_valid_address(token: &str) -> bool {
    token.parse::<IpAddr>().is_ok() || parse_network(token).is_some()
}

/// The address to look up for a valid token: the address itself, or the
/// network address of a CIDR literal.
pub fn lookup_address(token: &str) -> Option<IpAddr> {
    token
        .parse::<IpAddr>()
        .ok()
        .or_else(|| parse_network(token).map(|(addr, _)| addr))
}
